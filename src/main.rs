//! Slack Reader CLI - main entry point
//!
//! This is the unified CLI interface for training, chatting and exporting.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use slack_reader::{commands, metrics, Config};
use tracing::warn;

#[derive(Parser)]
#[command(name = "slack_reader")]
#[command(about = "Slack Channel Reader & Knowledge Bot", long_about = None)]
#[command(version)]
struct Cli {
    /// Address to expose Prometheus metrics (e.g., 0.0.0.0:9898)
    #[arg(long, env = "METRICS_ADDR")]
    metrics_addr: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a knowledge base from a URL or local JSON file
    Train {
        /// Document source: a URL or a path to a JSON file
        source: String,

        /// Vector collection to store the chunks in
        #[arg(short, long, default_value = "knowledge_base")]
        collection: String,
    },

    /// Ask a question against a trained knowledge base
    Chat {
        /// The question to answer
        question: String,

        /// Vector collection to search
        #[arg(short, long, default_value = "knowledge_base")]
        collection: String,
    },

    /// Export a Slack channel's conversation history to JSON
    Export {
        /// Channel ID (e.g., C0123456789)
        channel: String,
    },

    /// Interactive menu (train / chat / export)
    Menu,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Train { .. } => "train",
            Commands::Chat { .. } => "chat",
            Commands::Export { .. } => "export",
            Commands::Menu => "menu",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for local development
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("slack_reader=info".parse()?))
        .init();

    let cli = Cli::parse();

    if let Some(addr) = cli.metrics_addr.as_deref() {
        match addr.parse::<SocketAddr>() {
            Ok(socket) => metrics::spawn_metrics_server(socket),
            Err(err) => warn!(%addr, "Invalid metrics address: {}", err),
        }
    }

    let command_name = cli.command.name();
    metrics::record_command_start(command_name);
    let start = Instant::now();

    let result = execute_command(cli.command).await;

    metrics::record_command_result(command_name, start.elapsed(), result.is_ok());

    result
}

async fn execute_command(command: Commands) -> anyhow::Result<()> {
    let config = Config::new();

    match command {
        Commands::Train { source, collection } => {
            let result = commands::train::run(&config, &source, &collection).await?;
            println!(
                "Trained collection '{}': {} chunks stored ({} points total)",
                result.collection, result.chunks_stored, result.points_total
            );
        }
        Commands::Chat {
            question,
            collection,
        } => {
            println!("thinking....");
            let answer = commands::chat::run(&config, &collection, &question).await?;
            println!("{}", answer);
        }
        Commands::Export { channel } => {
            commands::export::run(&config, &channel).await?;
        }
        Commands::Menu => {
            commands::menu::run(&config).await?;
        }
    }

    Ok(())
}
