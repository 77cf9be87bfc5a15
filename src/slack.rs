//! Slack Web API client (conversations.history / conversations.replies).

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

const SLACK_API_URL: &str = "https://slack.com/api";

/// Message as returned by the Slack Web API.
///
/// Every field is optional: the API omits `user` for bot posts, `text` for
/// some subtypes, and the thread fields for messages without replies.
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMessage {
    pub channel: Option<String>,
    pub user: Option<String>,
    pub text: Option<String>,
    pub reply_count: Option<i64>,
    pub thread_ts: Option<String>,
}

/// Envelope shared by the conversations.* endpoints.
#[derive(Debug, Deserialize)]
struct ConversationsResponse {
    ok: bool,
    error: Option<String>,
    messages: Option<Vec<RawMessage>>,
}

/// Slack Web API client.
///
/// Constructed explicitly from credentials and passed by reference into the
/// export flow. Credentials are not validated up front; a missing or bad
/// token surfaces as an `invalid_auth` API error on the first call.
#[derive(Debug, Clone)]
pub struct SlackClient {
    http: Client,
    bot_token: String,
    signing_secret: String,
    base_url: String,
}

impl SlackClient {
    /// Create client with explicit credentials.
    pub fn new<S: Into<String>>(bot_token: S, signing_secret: S) -> Result<Self> {
        let http = Client::builder()
            .user_agent("slack_reader/0.1.0")
            .build()
            .map_err(|e| Error::SlackApi(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            bot_token: bot_token.into(),
            signing_secret: signing_secret.into(),
            base_url: SLACK_API_URL.to_string(),
        })
    }

    /// Create client from loaded configuration.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        Self::new(
            config.slack_bot_token.clone(),
            config.slack_signing_secret.clone(),
        )
    }

    /// Create client pointed at a non-default API root (tests, proxies).
    pub fn with_base_url<S: Into<String>>(
        bot_token: S,
        signing_secret: S,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let mut client = Self::new(bot_token, signing_secret)?;
        client.base_url = base_url.into();
        Ok(client)
    }

    /// Signing secret for request verification when running as a Slack app.
    pub fn signing_secret(&self) -> &str {
        &self.signing_secret
    }

    /// Fetch one page of channel history, most recent messages first.
    ///
    /// Single call, no pagination, no retry. Failures map to
    /// [`Error::HistoryFetch`].
    pub async fn conversations_history(
        &self,
        channel: &str,
        limit: usize,
    ) -> Result<Vec<RawMessage>> {
        let limit = limit.to_string();
        self.conversations_call("conversations.history", &[("channel", channel), ("limit", &limit)])
            .await
            .map_err(|e| Error::HistoryFetch {
                channel: channel.to_string(),
                reason: api_reason(e),
            })
    }

    /// Fetch the messages of one thread (parent included, backend order).
    ///
    /// Single attempt; the export flow applies its own retry budget on top.
    pub async fn conversations_replies(
        &self,
        channel: &str,
        thread_ts: &str,
    ) -> Result<Vec<RawMessage>> {
        self.conversations_call("conversations.replies", &[("channel", channel), ("ts", thread_ts)])
            .await
    }

    async fn conversations_call(
        &self,
        method: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<RawMessage>> {
        let result = self.execute(method, query).await;
        crate::metrics::record_slack_api_call(method, result.is_ok());
        result
    }

    async fn execute(&self, method: &str, query: &[(&str, &str)]) -> Result<Vec<RawMessage>> {
        debug!("Calling {} {:?}", method, query);

        let response = self
            .http
            .get(format!("{}/{}", self.base_url, method))
            .header("Authorization", format!("Bearer {}", self.bot_token))
            .query(query)
            .send()
            .await
            .map_err(|e| Error::SlackApi(format!("{} request failed: {}", method, e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::SlackApi(format!("Failed to read {} response: {}", method, e)))?;

        if !status.is_success() {
            return Err(Error::SlackApi(format!(
                "{} returned {}: {}",
                method, status, text
            )));
        }

        let parsed: ConversationsResponse = serde_json::from_str(&text)
            .map_err(|e| Error::SlackApi(format!("Invalid {} response: {}", method, e)))?;

        if !parsed.ok {
            let reason = parsed.error.unwrap_or_else(|| "unknown_error".to_string());
            return Err(Error::SlackApi(format!("{} failed: {}", method, reason)));
        }

        Ok(parsed.messages.unwrap_or_default())
    }
}

fn api_reason(err: Error) -> String {
    match err {
        Error::SlackApi(reason) => reason,
        other => other.to_string(),
    }
}
