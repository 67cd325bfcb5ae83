mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::handlers;
use reviewbot_core::models::LogLevel;

const DEFAULT_CONFIG: &str = "~/.config/reviewbot/config.toml";

#[derive(Parser)]
#[command(name = "reviewbot")]
#[command(version)]
#[command(about = "Polls homework review statuses and reports changes to Telegram")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the review API and notify the chat on status changes (default)
    ///
    /// Credentials come from PRACTICUM_TOKEN, TELEGRAM_TOKEN and
    /// TELEGRAM_CHAT_ID; RETRY_PERIOD overrides the poll interval.
    Run {
        /// Path to config file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: String,

        /// Logging level (error, warn, info, debug, trace)
        #[arg(long)]
        log_level: Option<LogLevel>,

        /// Run a single poll cycle and exit
        #[arg(long)]
        once: bool,
    },

    /// Validate configuration and credentials (no secrets printed)
    Check {
        /// Path to config file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: String,
    },

    /// Send a test message to the configured Telegram chat
    TestNotify {
        /// Message text
        #[arg(default_value = "reviewbot test message")]
        text: String,

        /// Path to config file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Run {
        config: DEFAULT_CONFIG.to_string(),
        log_level: None,
        once: false,
    });

    match command {
        Commands::Run {
            config,
            log_level,
            once,
        } => {
            handlers::handle_run(&config, log_level, once).await?;
        }
        Commands::Check { config } => {
            handlers::handle_check(&config)?;
        }
        Commands::TestNotify { text, config } => {
            handlers::handle_test_notify(&config, &text).await?;
        }
    }

    Ok(())
}
