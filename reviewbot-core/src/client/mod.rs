//! Client for the homework review-status API

use crate::error::BotError;
use async_trait::async_trait;
use serde_json::Value;

pub mod status_client;

pub use status_client::StatusClient;

/// Source of raw review-status responses, one request per call.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch statuses updated since `from_date` (Unix seconds). No retries.
    async fn fetch(&self, from_date: i64) -> Result<Value, BotError>;
}
