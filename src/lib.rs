//! Slack Channel Reader & Knowledge Bot Library
//!
//! This library provides tools to:
//! - Export a Slack channel's conversation history (with threaded replies) to JSON
//! - Train a knowledge base from web pages or JSON files (chunk, embed, store)
//! - Answer free-text questions against a trained vector collection with OpenAI

pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod integrations;
pub mod knowledge;
pub mod metrics;
pub mod slack;

// Re-export common types
pub use config::Config;
pub use error::{Error, Result};
pub use export::{Dataset, ExportOptions, Message, Reply};
pub use integrations::OpenAIClient;
pub use slack::{RawMessage, SlackClient};
