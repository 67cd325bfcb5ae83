//! # Reviewbot Core Library
//!
//! Polls a homework review-status API, turns the newest status into a
//! human-readable verdict and forwards changes to a Telegram chat.

pub mod client;
pub mod error;
pub mod models;
pub mod poller;
pub mod providers;
pub mod services;
pub mod validation;

pub use error::{BotError, ErrorFingerprint};
