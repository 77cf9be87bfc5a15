//! External integrations module.
//!
//! Provides the OpenAI chat-completions client used by the chat command.

pub mod openai;

pub use openai::OpenAIClient;
