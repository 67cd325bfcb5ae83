//! Cross-cycle memory of the poll loop

use crate::error::ErrorFingerprint;

/// What the loop remembers between cycles. Owned by one poller, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopState {
    /// Last status message that reached the chat
    pub last_sent_message: Option<String>,
    /// Identity of the last error that reached the chat
    pub last_error: Option<ErrorFingerprint>,
}

impl LoopState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True unless `message` is exactly what was last delivered.
    pub fn should_send(&self, message: &str) -> bool {
        self.last_sent_message.as_deref() != Some(message)
    }

    pub fn record_sent(&mut self, message: String) {
        self.last_sent_message = Some(message);
    }

    /// True unless the same error was already reported.
    pub fn should_report(&self, fingerprint: &ErrorFingerprint) -> bool {
        self.last_error.as_ref() != Some(fingerprint)
    }

    pub fn record_reported(&mut self, fingerprint: ErrorFingerprint) {
        self.last_error = Some(fingerprint);
    }

    /// Forget the reported error after a healthy cycle.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }
}

/// Result of a single poll cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Response carried no homeworks
    NoUpdates,
    /// Latest status matches what was already sent
    Unchanged,
    /// New status delivered
    Notified(String),
    /// New status found but the sink failed; will be retried next cycle
    DeliveryFailed(String),
    /// Fetch, validation or interpretation failed
    Failed {
        fingerprint: ErrorFingerprint,
        /// Whether an error report reached the chat this cycle
        reported: bool,
    },
}

impl CycleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleOutcome::NoUpdates => "no_updates",
            CycleOutcome::Unchanged => "unchanged",
            CycleOutcome::Notified(_) => "notified",
            CycleOutcome::DeliveryFailed(_) => "delivery_failed",
            CycleOutcome::Failed { reported: true, .. } => "failed_reported",
            CycleOutcome::Failed { reported: false, .. } => "failed",
        }
    }
}
