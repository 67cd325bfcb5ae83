//! Configuration data structures

use crate::error::BotError;
use crate::models::VerdictMapping;
use crate::providers::TELEGRAM_API_BASE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const ENV_TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const ENV_RETRY_PERIOD: &str = "RETRY_PERIOD";
pub const ENV_ENDPOINT: &str = "REVIEWBOT_ENDPOINT";

const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Logging level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "debug")]
    #[default]
    Debug,
    #[serde(rename = "trace")]
    Trace,
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Review API OAuth token
    pub practicum_token: Option<String>,
    /// Telegram bot token
    pub telegram_token: Option<String>,
    /// Destination chat for every notification
    pub telegram_chat_id: Option<String>,
    /// Review status endpoint
    pub endpoint: String,
    /// Telegram Bot API base URL
    pub telegram_api_base: String,
    /// Seconds to sleep between poll cycles
    pub retry_period_secs: u64,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Logging verbosity level
    pub log_level: LogLevel,
    /// Status code to display text
    pub verdicts: VerdictMapping,
}

/// Credentials that must be present before the poll loop starts
#[derive(Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"***")
            .field("telegram_token", &"***")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            practicum_token: None,
            telegram_token: None,
            telegram_chat_id: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            telegram_api_base: TELEGRAM_API_BASE.to_string(),
            retry_period_secs: 600, // 10 minutes
            request_timeout_secs: 30,
            log_level: LogLevel::Debug,
            verdicts: VerdictMapping::default(),
        }
    }
}

impl Configuration {
    /// Load configuration from file
    pub fn load_from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Configuration = toml::from_str(&content)?;
            Ok(config)
        } else {
            // Return default configuration if file doesn't exist
            Ok(Configuration::default())
        }
    }

    /// Get the XDG config directory path
    pub fn default_config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_dir = dirs::config_dir().ok_or("Could not determine config directory")?;
        Ok(config_dir.join("reviewbot").join("config.toml"))
    }

    /// Override file values with process environment variables
    pub fn apply_env(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Override file values using `lookup` as the variable source
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(ENV_PRACTICUM_TOKEN) {
            self.practicum_token = Some(token);
        }
        if let Some(token) = lookup(ENV_TELEGRAM_TOKEN) {
            self.telegram_token = Some(token);
        }
        if let Some(chat_id) = lookup(ENV_TELEGRAM_CHAT_ID) {
            self.telegram_chat_id = Some(chat_id);
        }
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.endpoint = endpoint;
        }
        if let Some(period) = lookup(ENV_RETRY_PERIOD) {
            self.retry_period_secs = period
                .trim()
                .parse()
                .map_err(|e| format!("{} must be a number of seconds: {}", ENV_RETRY_PERIOD, e))?;
        }
        Ok(())
    }

    /// Check that every credential is present and non-empty
    pub fn require_credentials(&self) -> Result<Credentials, BotError> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty())
        }

        let practicum = present(&self.practicum_token);
        let telegram = present(&self.telegram_token);
        let chat_id = present(&self.telegram_chat_id);

        match (practicum, telegram, chat_id) {
            (Some(p), Some(t), Some(c)) => Ok(Credentials {
                practicum_token: p.to_string(),
                telegram_token: t.to_string(),
                telegram_chat_id: c.to_string(),
            }),
            _ => {
                let mut missing = Vec::new();
                if practicum.is_none() {
                    missing.push(ENV_PRACTICUM_TOKEN);
                }
                if telegram.is_none() {
                    missing.push(ENV_TELEGRAM_TOKEN);
                }
                if chat_id.is_none() {
                    missing.push(ENV_TELEGRAM_CHAT_ID);
                }
                Err(BotError::MissingConfiguration { missing })
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.retry_period_secs == 0 {
            errors.push("retry_period_secs must be greater than 0".to_string());
        }

        if self.request_timeout_secs == 0 {
            errors.push("request_timeout_secs must be greater than 0".to_string());
        } else if self.request_timeout_secs > 300 {
            errors.push("request_timeout_secs cannot exceed 300 (5 minutes)".to_string());
        }

        if !is_http_url(&self.endpoint) {
            errors.push("endpoint must be an http or https URL".to_string());
        }

        if !is_http_url(&self.telegram_api_base) {
            errors.push("telegram_api_base must be an http or https URL".to_string());
        }

        if self.verdicts.is_empty() {
            errors.push("verdicts must map at least one status".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_http_url(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.has_host(),
        Err(_) => false,
    }
}
