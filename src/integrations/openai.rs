//! OpenAI chat-completions client for answering questions over retrieved context.

use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

const OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// OpenAI client.
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create client from environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| Error::InvalidArgument("OPENAI_API_KEY not set".to_string()))?;
        Self::new(api_key)
    }

    /// Create client with API key.
    pub fn new<S: Into<String>>(api_key: S) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::InvalidArgument("OPENAI_API_KEY is empty".to_string()));
        }

        let http = Client::builder()
            .user_agent("slack_reader/0.1.0")
            .build()
            .map_err(|e| Error::InvalidArgument(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            base_url: OPENAI_API_URL.to_string(),
        })
    }

    /// Create client pointed at a non-default API root (tests, proxies).
    pub fn with_base_url<S: Into<String>>(api_key: S, base_url: impl Into<String>) -> Result<Self> {
        let mut client = Self::new(api_key)?;
        client.base_url = base_url.into();
        Ok(client)
    }

    /// Chat completion.
    pub async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        model: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        let request = ChatRequest {
            model: model.to_string(),
            messages,
            temperature,
            max_tokens,
        };

        debug!("Requesting chat completion from {}", model);

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::OpenAiError(format!("OpenAI request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::OpenAiError(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::OpenAiError(format!(
                "OpenAI error {}: {}",
                status, text
            )));
        }

        let chat_response: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| Error::OpenAiError(format!("Invalid response: {}", e)))?;

        chat_response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| Error::OpenAiError("Empty response from OpenAI".to_string()))
    }

    /// Answer a question using retrieved knowledge-base chunks as context.
    ///
    /// Context chunks are joined into the system prompt; the question goes in
    /// as the user message. With no context the model is asked to answer from
    /// its own knowledge and say so.
    pub async fn answer_with_context(
        &self,
        question: &str,
        context: &[String],
        model: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        let system_prompt = if context.is_empty() {
            "You are a helpful assistant. No reference material was found for \
             this question; answer from general knowledge and say that the \
             knowledge base had nothing relevant."
                .to_string()
        } else {
            format!(
                "You are a helpful assistant. Answer the question using the \
                 following reference material. If the material does not cover \
                 the question, say so.\n\n{}",
                context.join("\n---\n")
            )
        };

        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: Some(system_prompt),
            },
            ChatMessage {
                role: "user".to_string(),
                content: Some(question.to_string()),
            },
        ];

        self.chat_completion(messages, model, temperature, max_tokens)
            .await
    }
}

/// Chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
