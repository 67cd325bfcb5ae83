//! Command handlers for run, check and test-notify

use anyhow::{anyhow, bail, Context, Result};
use reviewbot_core::models::{Configuration, LogLevel};
use reviewbot_core::poller::Poller;
use reviewbot_core::providers::{NotificationSink, TelegramSink};
use reviewbot_core::services::logging;
use reviewbot_core::BotError;
use std::path::PathBuf;
use std::time::Duration;

fn resolve_config_path(config_arg: &str) -> Result<PathBuf> {
    if let Some(rest) = config_arg.strip_prefix("~/") {
        let home = std::env::var("HOME").map_err(|_| anyhow!("HOME not set"))?;
        Ok(PathBuf::from(home).join(rest))
    } else {
        Ok(PathBuf::from(config_arg))
    }
}

/// Config file (if any) with environment overrides applied
fn load_config(config_arg: &str) -> Result<Configuration> {
    let path = resolve_config_path(config_arg).or_else(|_| {
        Configuration::default_config_path().map_err(|e| anyhow!("Config path: {}", e))
    })?;
    let mut config = Configuration::load_from_file(&path)
        .map_err(|e| anyhow!("Failed to load config {}: {}", path.display(), e))?;
    config
        .apply_env()
        .map_err(|e| anyhow!("Invalid environment: {}", e))?;
    Ok(config)
}

/// Problems that would keep the poller from starting (no secrets)
fn config_problems(config: &Configuration) -> Vec<String> {
    let mut problems = Vec::new();
    if let Err(BotError::MissingConfiguration { missing }) = config.require_credentials() {
        problems.extend(missing.iter().map(|name| format!("{} is not set", name)));
    }
    if let Err(errors) = config.validate() {
        problems.extend(errors);
    }
    problems
}

pub async fn handle_run(config_arg: &str, log_level: Option<LogLevel>, once: bool) -> Result<()> {
    let loaded = load_config(config_arg);
    let level = log_level
        .or_else(|| loaded.as_ref().ok().map(|config| config.log_level))
        .unwrap_or_default();
    logging::init_logging(level).map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Refusing to start with unreadable configuration");
            return Err(e);
        }
    };

    if let Err(errors) = config.validate() {
        for error in &errors {
            tracing::error!(problem = %error, "Invalid configuration");
        }
        bail!("Invalid configuration: {}", errors.join("; "));
    }

    let mut poller = match Poller::from_config(&config) {
        Ok(poller) => poller,
        Err(e @ BotError::MissingConfiguration { .. }) => {
            tracing::error!(error = %e, "Refusing to start without required configuration");
            return Err(e.into());
        }
        Err(e) => return Err(e).context("Failed to start poller"),
    };

    if once {
        let outcome = poller.run_cycle().await;
        logging::log_cycle(outcome.as_str(), poller.cursor());
        return Ok(());
    }

    poller.run().await;
    Ok(())
}

pub fn handle_check(config_arg: &str) -> Result<()> {
    let config = load_config(config_arg)?;
    let problems = config_problems(&config);

    println!("endpoint: {}", config.endpoint);
    println!("retry period: {}s", config.retry_period_secs);
    println!("request timeout: {}s", config.request_timeout_secs);

    if problems.is_empty() {
        println!("configuration: ok");
        return Ok(());
    }
    for problem in &problems {
        println!("problem: {}", problem);
    }
    bail!("{} configuration problem(s) found", problems.len())
}

pub async fn handle_test_notify(config_arg: &str, text: &str) -> Result<()> {
    let config = load_config(config_arg)?;
    let credentials = config.require_credentials()?;
    let sink = TelegramSink::new(credentials.telegram_token, credentials.telegram_chat_id)
        .with_api_base(config.telegram_api_base.clone())
        .with_timeout(Duration::from_secs(config.request_timeout_secs))?;

    sink.send(text)
        .await
        .context("Telegram test message failed")?;
    println!("Test message sent to chat {}", sink.chat_id());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_plain_path() {
        let path = resolve_config_path("/etc/reviewbot.toml").unwrap();
        assert_eq!(path, PathBuf::from("/etc/reviewbot.toml"));
    }

    #[test]
    fn test_config_problems_lists_missing_credentials() {
        let config = Configuration {
            telegram_token: Some("bot".to_string()),
            ..Configuration::default()
        };
        let problems = config_problems(&config);
        assert!(problems.iter().any(|p| p.contains("PRACTICUM_TOKEN")));
        assert!(problems.iter().any(|p| p.contains("TELEGRAM_CHAT_ID")));
        assert!(!problems.iter().any(|p| p.contains("TELEGRAM_TOKEN is")));
    }

    #[test]
    fn test_config_problems_empty_when_complete() {
        let config = Configuration {
            practicum_token: Some("api".to_string()),
            telegram_token: Some("bot".to_string()),
            telegram_chat_id: Some("1".to_string()),
            ..Configuration::default()
        };
        assert!(config_problems(&config).is_empty());
    }
}
