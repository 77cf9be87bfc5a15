//! Export a Slack channel's conversation history to a JSON file.

use anyhow::{bail, Result};
use tracing::info;

use crate::config::Config;
use crate::export::{build_dataset, export_dataset, ExportOptions};
use crate::slack::SlackClient;

/// Fetch the channel's history with threaded replies and write the dataset
/// to the fixed export path.
pub async fn run(config: &Config, channel_id: &str) -> Result<()> {
    if channel_id.trim().is_empty() {
        bail!("Channel id must not be empty");
    }

    let client = SlackClient::from_config(config)?;
    let options = ExportOptions::from_config(config);

    info!("Exporting channel {}", channel_id);
    let dataset = build_dataset(&client, channel_id, &options).await?;

    export_dataset(&dataset);
    Ok(())
}
