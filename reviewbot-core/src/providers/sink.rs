//! Notification sink: outbound delivery to a chat provider

use crate::error::BotError;
use async_trait::async_trait;

/// Sink for delivering text to a chat provider (e.g. Telegram).
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Provider name for logging (e.g. "telegram").
    fn name(&self) -> &str;

    /// Send one message. Exactly one outbound request, no retries.
    async fn send(&self, text: &str) -> Result<(), BotError>;
}
