//! Poller: drives fetch, validate, interpret and notify once per cycle

use crate::client::{StatusClient, StatusSource};
use crate::error::BotError;
use crate::models::{ApiResponse, Configuration, HomeworkRecord, VerdictMapping};
use crate::poller::{CycleOutcome, LoopState};
use crate::providers::{self, NotificationSink, TelegramSink};
use crate::services::logging;
use crate::validation::validate_response;
use std::sync::Arc;
use std::time::Duration;

/// Single-recipient review status poller
pub struct Poller {
    source: Arc<dyn StatusSource>,
    sink: Arc<dyn NotificationSink>,
    verdicts: VerdictMapping,
    retry_period: Duration,
    cursor: i64,
    state: LoopState,
}

impl Poller {
    /// Create a poller starting at `start_cursor` (Unix seconds)
    pub fn new(
        source: Arc<dyn StatusSource>,
        sink: Arc<dyn NotificationSink>,
        verdicts: VerdictMapping,
        retry_period: Duration,
        start_cursor: i64,
    ) -> Self {
        Self {
            source,
            sink,
            verdicts,
            retry_period,
            cursor: start_cursor,
            state: LoopState::new(),
        }
    }

    /// Wire the HTTP status client and Telegram sink from configuration.
    /// The cursor starts at the current time.
    pub fn from_config(config: &Configuration) -> Result<Self, BotError> {
        let credentials = config.require_credentials()?;
        let timeout = Duration::from_secs(config.request_timeout_secs);

        let source = StatusClient::new(
            config.endpoint.clone(),
            credentials.practicum_token,
            timeout,
        )?;
        let sink = TelegramSink::new(credentials.telegram_token, credentials.telegram_chat_id)
            .with_api_base(config.telegram_api_base.clone())
            .with_timeout(timeout)?;

        Ok(Self::new(
            Arc::new(source),
            Arc::new(sink),
            config.verdicts.clone(),
            Duration::from_secs(config.retry_period_secs),
            chrono::Utc::now().timestamp(),
        ))
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    pub fn retry_period(&self) -> Duration {
        self.retry_period
    }

    /// Run one cycle: fetch, validate, interpret, decide and notify.
    /// Never sleeps and never fails; every error becomes a [`CycleOutcome`].
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll().await {
            Ok(None) => {
                self.state.clear_error();
                tracing::debug!("No new homework statuses");
                CycleOutcome::NoUpdates
            }
            Ok(Some(message)) => {
                self.state.clear_error();
                self.deliver_status(message).await
            }
            Err(error) => self.report_failure(error).await,
        }
    }

    /// Poll forever, sleeping `retry_period` after every cycle, until Ctrl-C.
    pub async fn run(mut self) {
        tracing::info!(
            retry_period_secs = self.retry_period.as_secs(),
            cursor = self.cursor,
            "Review status polling started"
        );

        loop {
            let outcome = self.run_cycle().await;
            logging::log_cycle(outcome.as_str(), self.cursor);

            tokio::select! {
                _ = tokio::time::sleep(self.retry_period) => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutting down poller");
                    break;
                }
            }
        }
    }

    /// Fetch and interpret the newest status. `Ok(None)` means nothing to report.
    async fn poll(&mut self) -> Result<Option<String>, BotError> {
        let raw = self.source.fetch(self.cursor).await?;
        let response = validate_response(raw)?;
        self.advance_cursor(&response);

        match response.latest() {
            None => Ok(None),
            Some(raw) => {
                let record = HomeworkRecord::from_value(raw)?;
                self.verdicts.interpret(&record).map(Some)
            }
        }
    }

    fn advance_cursor(&mut self, response: &ApiResponse) {
        match response.cursor() {
            Ok(next) if next >= self.cursor => self.cursor = next,
            Ok(next) => {
                tracing::warn!(
                    held = self.cursor,
                    received = next,
                    "Ignoring current_date older than the held cursor"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, cursor = self.cursor, "Keeping previous cursor");
            }
        }
    }

    async fn deliver_status(&mut self, message: String) -> CycleOutcome {
        if !self.state.should_send(&message) {
            tracing::debug!("Homework status unchanged: {}", message);
            return CycleOutcome::Unchanged;
        }

        if providers::notify(self.sink.as_ref(), &message).await {
            self.state.record_sent(message.clone());
            CycleOutcome::Notified(message)
        } else {
            CycleOutcome::DeliveryFailed(message)
        }
    }

    async fn report_failure(&mut self, error: BotError) -> CycleOutcome {
        let message = format!("Bot program failure: {}", error);
        logging::log_error(&error.to_string(), Some("poll cycle"));

        let fingerprint = error.fingerprint();
        if !self.state.should_report(&fingerprint) {
            tracing::debug!(?fingerprint, "Error already reported, not notifying again");
            return CycleOutcome::Failed {
                fingerprint,
                reported: false,
            };
        }

        let reported = providers::notify(self.sink.as_ref(), &message).await;
        if reported {
            self.state.record_reported(fingerprint.clone());
        }
        CycleOutcome::Failed {
            fingerprint,
            reported,
        }
    }
}
