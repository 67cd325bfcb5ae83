//! HTTP implementation of [`StatusSource`] for the review-status endpoint

use crate::client::StatusSource;
use crate::error::BotError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

pub struct StatusClient {
    endpoint: String,
    token: String,
    client: Client,
}

impl StatusClient {
    /// Build a client with an explicit per-request timeout. Never log token.
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BotError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::transport(&e))?;
        Ok(Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl StatusSource for StatusClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, BotError> {
        tracing::debug!(endpoint = %self.endpoint, from_date, "Requesting homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| BotError::transport(&e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BotError::unexpected_status(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| BotError::transport(&e))?;
        serde_json::from_slice(&body).map_err(|e| BotError::DecodeError(e.to_string()))
    }
}
