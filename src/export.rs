//! Slack channel export: history fetch, thread reconciliation, JSON dataset.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::{self, Config};
use crate::slack::{RawMessage, SlackClient};
use crate::{Error, Result};

/// Fixed output path of the export file, overwritten on every run.
pub const EXPORT_PATH: &str = "./slack_conversation.json";

/// Retries allowed for one thread fetch on top of the initial attempt.
pub const REPLY_RETRY_BUDGET: u32 = 5;

/// Placeholder for messages whose author is unknown to the backend.
pub const UNKNOWN_USER: &str = "unknown_user";

/// Tunables of the export flow.
///
/// Defaults match the documented behavior: one page of 1000 messages, a flat
/// 10 second delay between reply retries, 30 seconds between consecutive
/// messages.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub history_limit: usize,
    pub retry_delay: Duration,
    pub message_pause: Duration,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            history_limit: config::DEFAULT_HISTORY_LIMIT,
            retry_delay: Duration::from_secs(config::DEFAULT_RETRY_DELAY_SECS),
            message_pause: Duration::from_secs(config::DEFAULT_MESSAGE_PAUSE_SECS),
        }
    }
}

impl ExportOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            history_limit: config.history_limit,
            retry_delay: Duration::from_secs(config.retry_delay_secs),
            message_pause: Duration::from_secs(config.message_pause_secs),
        }
    }
}

/// Single reply inside a thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub text: String,
}

impl Reply {
    fn from_raw(raw: &RawMessage) -> Self {
        Self {
            user_id: raw.user.clone().unwrap_or_default(),
            text: raw.text.clone().unwrap_or_default(),
        }
    }
}

/// Normalized channel message as it appears in the export file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "hasReply")]
    pub has_reply: bool,
    pub reply_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_ts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replies: Option<Vec<Reply>>,
}

impl Message {
    /// Normalize a backend message into the dataset shape.
    ///
    /// Missing authors become [`UNKNOWN_USER`], the reply count is clamped to
    /// zero, empty thread ids are treated as absent, and text passes through
    /// untouched. `replies` starts out unset and is only filled by
    /// [`fill_in_replies`].
    pub fn from_raw(raw: &RawMessage) -> Self {
        let reply_count = raw.reply_count.unwrap_or(0).max(0);
        Self {
            user: raw
                .user
                .clone()
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| UNKNOWN_USER.to_string()),
            text: raw.text.clone(),
            has_reply: reply_count > 0,
            reply_count,
            reply_ts: raw.thread_ts.clone().filter(|ts| !ts.is_empty()),
            replies: None,
        }
    }
}

/// Exported dataset: one channel, its messages in backend order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(rename = "channelId")]
    pub channel_id: String,
    pub messages: Vec<Message>,
}

/// Fetch one thread with a bounded retry loop.
///
/// Makes up to six calls (the initial attempt plus [`REPLY_RETRY_BUDGET`]
/// retries) with a flat delay in between and returns the first successful
/// result. Exhausting the budget yields [`Error::RepliesFetch`] carrying the
/// total attempt count and the last backend error.
pub async fn fetch_thread_replies(
    client: &SlackClient,
    channel: &str,
    thread_ts: &str,
    options: &ExportOptions,
) -> Result<Vec<RawMessage>> {
    retry_replies(channel, thread_ts, options, move |attempt| {
        debug!(
            "Fetching replies for thread {} in {} (attempt {})",
            thread_ts, channel, attempt
        );
        client.conversations_replies(channel, thread_ts)
    })
    .await
}

async fn retry_replies<F, Fut>(
    channel: &str,
    thread_ts: &str,
    options: &ExportOptions,
    mut call: F,
) -> Result<Vec<RawMessage>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<RawMessage>>>,
{
    let mut attempt: u32 = 0;
    loop {
        match call(attempt).await {
            Ok(messages) => return Ok(messages),
            Err(err) if attempt < REPLY_RETRY_BUDGET => {
                warn!(
                    "Reply fetch failed for thread {} (attempt {}): {}. Retrying in {:?}",
                    thread_ts, attempt, err, options.retry_delay
                );
                sleep(options.retry_delay).await;
                attempt += 1;
            }
            Err(err) => {
                return Err(Error::RepliesFetch {
                    channel: channel.to_string(),
                    thread_ts: thread_ts.to_string(),
                    attempts: attempt + 1,
                    reason: error_reason(err),
                });
            }
        }
    }
}

fn error_reason(err: Error) -> String {
    match err {
        Error::SlackApi(reason) => reason,
        other => other.to_string(),
    }
}

/// Attach thread replies to a single message.
///
/// Messages already flagged `has_reply` and messages without a thread id pass
/// through unchanged. `has_reply` itself is never modified here; it keeps
/// reporting what the backend counted at fetch time.
pub async fn fill_in_replies(
    client: &SlackClient,
    channel: &str,
    message: Message,
    options: &ExportOptions,
) -> Result<Message> {
    let thread_ts = match message.reply_ts.clone() {
        Some(ts) if !message.has_reply => ts,
        _ => return Ok(message),
    };

    let raw_replies = fetch_thread_replies(client, channel, &thread_ts, options).await?;
    let replies = raw_replies.iter().map(Reply::from_raw).collect();

    Ok(Message {
        replies: Some(replies),
        ..message
    })
}

/// Build the full dataset for a channel.
///
/// Fetches one page of history, normalizes every message, then enriches them
/// strictly sequentially in backend order with an awaited pause between
/// consecutive messages. Any enrichment failure aborts the run; no partial
/// dataset is returned.
pub async fn build_dataset(
    client: &SlackClient,
    channel_id: &str,
    options: &ExportOptions,
) -> Result<Dataset> {
    let raw_messages = client
        .conversations_history(channel_id, options.history_limit)
        .await?;
    info!(
        "Fetched {} messages from channel {}",
        raw_messages.len(),
        channel_id
    );

    let normalized: Vec<Message> = raw_messages.iter().map(Message::from_raw).collect();
    let total = normalized.len();
    let mut messages = Vec::with_capacity(total);

    for (index, message) in normalized.into_iter().enumerate() {
        if index > 0 {
            sleep(options.message_pause).await;
        }
        let enriched = fill_in_replies(client, channel_id, message, options).await?;
        messages.push(enriched);
        info!("Enriched {}/{} messages", messages.len(), total);
    }

    Ok(Dataset {
        channel_id: channel_id.to_string(),
        messages,
    })
}

/// Serialize the dataset as pretty JSON and write it to `path`.
pub fn write_dataset<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let json = serde_json::to_string_pretty(dataset)?;
    std::fs::write(path.as_ref(), json).map_err(|e| Error::ExportWrite {
        path: path.as_ref().display().to_string(),
        reason: e.to_string(),
    })
}

/// Write the dataset to the fixed export path.
///
/// Write failures are logged and swallowed; the export run is still reported
/// as complete to the caller.
pub fn export_dataset(dataset: &Dataset) {
    export_dataset_to(dataset, EXPORT_PATH);
}

/// Same as [`export_dataset`] but with an explicit target path.
pub fn export_dataset_to<P: AsRef<Path>>(dataset: &Dataset, path: P) {
    match write_dataset(dataset, &path) {
        Ok(()) => {
            println!("\n------------------");
            println!(
                "JSON file has been created at {}",
                path.as_ref().display()
            );
        }
        Err(err) => error!("Error creating JSON file: {}", err),
    }
}
