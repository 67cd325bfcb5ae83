//! Logging service

use crate::models::LogLevel;
use tracing_subscriber::EnvFilter;

fn filter_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "reviewbot=error,reviewbot_core=error",
        LogLevel::Warn => "reviewbot=warn,reviewbot_core=warn",
        LogLevel::Info => "reviewbot=info,reviewbot_core=info",
        LogLevel::Debug => "reviewbot=debug,reviewbot_core=debug",
        LogLevel::Trace => "reviewbot=trace,reviewbot_core=trace",
    }
}

/// Initialize logging with the specified level. `RUST_LOG` wins when set.
///
/// Lines go to stdout: timestamp, level, target, message.
pub fn init_logging(level: LogLevel) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stdout)
        .try_init()
}

/// Log the result of one poll cycle
pub fn log_cycle(outcome: &str, cursor: i64) {
    tracing::info!(outcome = outcome, cursor = cursor, "Poll cycle finished");
}

/// Log a system error
pub fn log_error(error: &str, context: Option<&str>) {
    tracing::error!(
        error = error,
        context = context.unwrap_or(""),
        "Bot program failure"
    );
}
