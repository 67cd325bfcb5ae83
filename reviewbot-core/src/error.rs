//! Error types shared by every reviewbot component

use thiserror::Error;

/// Errors produced while configuring, polling, interpreting or notifying
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Missing required configuration: {}", .missing.join(", "))]
    MissingConfiguration { missing: Vec<&'static str> },

    #[error("Endpoint is not available: {message}")]
    EndpointUnavailable {
        /// HTTP status when the server answered, None for transport failures
        status: Option<u16>,
        message: String,
    },

    #[error("JSON decode error: {0}")]
    DecodeError(String),

    #[error("Incorrect API response: {detail}")]
    MalformedResponse { reason: &'static str, detail: String },

    #[error("API response has no usable current_date: {0}")]
    MissingCursor(String),

    #[error("Homework record has no \"{0}\" key")]
    MissingField(&'static str),

    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),

    #[error("Failed to send message: {0}")]
    NotifyFailure(String),
}

/// Stable identity of an error, used to suppress repeated reports.
///
/// Only the kind and a static cause take part; transport messages and
/// other per-call text never do, so the same outage compares equal across
/// cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorFingerprint {
    MissingConfiguration,
    EndpointUnavailable { status: Option<u16> },
    DecodeError,
    MalformedResponse(&'static str),
    MissingCursor,
    MissingField(&'static str),
    UnknownStatus(String),
    NotifyFailure,
}

impl BotError {
    /// Endpoint answered with a status other than 200 OK.
    pub fn unexpected_status(status: reqwest::StatusCode) -> Self {
        BotError::EndpointUnavailable {
            status: Some(status.as_u16()),
            message: format!("unexpected response status {}", status),
        }
    }

    /// Request never produced a response (connect error, timeout, ...).
    pub fn transport(err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            "request timed out"
        } else if err.is_connect() {
            "connection failed"
        } else {
            "request failed"
        };
        BotError::EndpointUnavailable {
            status: None,
            message: format!("{}: {}", kind, err),
        }
    }

    pub fn malformed(reason: &'static str, detail: impl Into<String>) -> Self {
        BotError::MalformedResponse {
            reason,
            detail: detail.into(),
        }
    }

    pub fn fingerprint(&self) -> ErrorFingerprint {
        match self {
            BotError::MissingConfiguration { .. } => ErrorFingerprint::MissingConfiguration,
            BotError::EndpointUnavailable { status, .. } => {
                ErrorFingerprint::EndpointUnavailable { status: *status }
            }
            BotError::DecodeError(_) => ErrorFingerprint::DecodeError,
            BotError::MalformedResponse { reason, .. } => ErrorFingerprint::MalformedResponse(*reason),
            BotError::MissingCursor(_) => ErrorFingerprint::MissingCursor,
            BotError::MissingField(field) => ErrorFingerprint::MissingField(*field),
            BotError::UnknownStatus(status) => ErrorFingerprint::UnknownStatus(status.clone()),
            BotError::NotifyFailure(_) => ErrorFingerprint::NotifyFailure,
        }
    }
}
