//! Export channel binary.

use std::env;

use slack_reader::{commands, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let channel = args
        .get(1)
        .ok_or_else(|| anyhow::anyhow!("Usage: export_channel <channel_id>"))?;

    let config = Config::new();
    commands::export::run(&config, channel).await?;
    Ok(())
}
