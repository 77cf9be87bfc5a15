//! Error types for the Slack reader

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Slack API error: {0}")]
    SlackApi(String),

    #[error("Failed to fetch history for channel {channel}: {reason}")]
    HistoryFetch { channel: String, reason: String },

    #[error(
        "Failed to fetch replies for thread {thread_ts} in channel {channel} after {attempts} attempts: {reason}"
    )]
    RepliesFetch {
        channel: String,
        thread_ts: String,
        attempts: u32,
        reason: String,
    },

    #[error("Failed to write export file {path}: {reason}")]
    ExportWrite { path: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("OpenAI API error: {0}")]
    OpenAiError(String),

    #[error("Vector database error: {0}")]
    VectorDbError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}
