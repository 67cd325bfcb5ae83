//! Telegram delivery via the Bot API `sendMessage` method.

use crate::error::BotError;
use crate::providers::NotificationSink;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram notification sink (sendMessage). Token and chat_id from config/env.
pub struct TelegramSink {
    api_base: String,
    token: String,
    chat_id: String,
    client: Arc<Client>,
}

impl TelegramSink {
    /// Create sink for the given bot token and chat. Never log token.
    pub fn new(token: String, chat_id: String) -> Self {
        Self {
            api_base: TELEGRAM_API_BASE.to_string(),
            token,
            chat_id,
            client: Arc::new(Client::new()),
        }
    }

    /// Point the sink at another Bot API server (self-hosted or test double).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the client with one that enforces a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, BotError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::NotifyFailure(format!("failed to build HTTP client: {}", e)))?;
        self.client = Arc::new(client);
        Ok(self)
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }
}

#[async_trait]
impl NotificationSink for TelegramSink {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, text: &str) -> Result<(), BotError> {
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
        });
        // reqwest errors embed the request URL, which carries the token
        let res = self
            .client
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| BotError::NotifyFailure(e.without_url().to_string()))?;
        if !res.status().is_success() {
            let status = res.status();
            let err_body = res.text().await.unwrap_or_default();
            return Err(BotError::NotifyFailure(format!(
                "Telegram API error {}: {}",
                status, err_body
            )));
        }
        Ok(())
    }
}
