//! Interactive menu: train, chat or export from standard input.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::error;

use crate::config::Config;
use crate::knowledge::DEFAULT_COLLECTION;

const MENU: &str = "\n  1. Train a model\n  2. ChatBot\n  3. Export Slack channel\n  Choose menu: ";

/// Sentinel that ends the chat sub-loop.
const CHAT_END: &str = "end";

#[derive(Debug, PartialEq)]
enum Choice {
    Train,
    Chat,
    Export,
    Quit,
}

fn parse_choice(input: &str) -> Choice {
    match input.trim() {
        "1" => Choice::Train,
        "2" => Choice::Chat,
        "3" => Choice::Export,
        _ => Choice::Quit,
    }
}

/// Print a prompt and read one line. `None` on end of input.
fn prompt(text: &str) -> Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Run the interactive loop until the user picks anything outside the menu.
///
/// Command failures are printed and logged but do not end the loop; the menu
/// is shown again.
pub async fn run(config: &Config) -> Result<()> {
    loop {
        let choice = match prompt(MENU)? {
            Some(input) => parse_choice(&input),
            None => return Ok(()),
        };

        match choice {
            Choice::Train => {
                let (Some(url), Some(collection)) =
                    (prompt("URL: ")?, prompt("Collection Name: ")?)
                else {
                    return Ok(());
                };
                if let Err(err) = super::train::run(config, &url, &collection).await {
                    error!("Training failed: {:#}", err);
                    println!("Training failed: {:#}", err);
                }
            }
            Choice::Chat => {
                println!("Hello! How can I help you today?");
                loop {
                    let msg = match prompt("Message: ")? {
                        Some(msg) if msg != CHAT_END => msg,
                        _ => break,
                    };
                    println!("thinking....");
                    match super::chat::run(config, DEFAULT_COLLECTION, &msg).await {
                        Ok(answer) => println!("{}", answer),
                        Err(err) => {
                            error!("Chat failed: {:#}", err);
                            println!("Chat failed: {:#}", err);
                        }
                    }
                }
            }
            Choice::Export => {
                let Some(channel) = prompt("Channel ID: ")? else {
                    return Ok(());
                };
                if let Err(err) = super::export::run(config, &channel).await {
                    error!("Export failed: {:#}", err);
                    println!("Export failed: {:#}", err);
                }
            }
            Choice::Quit => return Ok(()),
        }
    }
}
