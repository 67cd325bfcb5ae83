//! Chat providers: notification sinks
//!
//! **Delivery failures**: [`notify`] absorbs sink errors. They are logged
//! and reported as `false`, never propagated, so a chat outage cannot stop
//! the poll loop.

mod sink;
mod telegram;

pub use sink::NotificationSink;
pub use telegram::{TelegramSink, TELEGRAM_API_BASE};

/// Deliver `message` through `sink`. Returns whether delivery succeeded.
pub async fn notify(sink: &dyn NotificationSink, message: &str) -> bool {
    match sink.send(message).await {
        Ok(()) => {
            tracing::debug!(provider = sink.name(), "Message successfully sent: {}", message);
            true
        }
        Err(e) => {
            tracing::error!(provider = sink.name(), error = %e, "Notification delivery failed");
            false
        }
    }
}
