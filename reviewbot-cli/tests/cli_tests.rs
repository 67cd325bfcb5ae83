use std::process::{Command, Output};
use tempfile::tempdir;

const CREDENTIAL_VARS: &[&str] = &[
    "PRACTICUM_TOKEN",
    "TELEGRAM_TOKEN",
    "TELEGRAM_CHAT_ID",
    "RETRY_PERIOD",
    "REVIEWBOT_ENDPOINT",
];

fn run_reviewbot(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_reviewbot"));
    for var in CREDENTIAL_VARS {
        command.env_remove(var);
    }
    command
        .args(args)
        .envs(env.iter().copied())
        .output()
        .expect("failed to run reviewbot")
}

#[test]
fn test_help_lists_subcommands() {
    let output = run_reviewbot(&["--help"], &[]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("run"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("test-notify"));
}

#[test]
fn test_check_fails_without_credentials() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("absent.toml");
    let output = run_reviewbot(&["check", "--config", config.to_str().unwrap()], &[]);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PRACTICUM_TOKEN is not set"));
    assert!(stdout.contains("TELEGRAM_TOKEN is not set"));
    assert!(stdout.contains("TELEGRAM_CHAT_ID is not set"));
}

#[test]
fn test_check_passes_with_env_credentials() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("absent.toml");
    let output = run_reviewbot(
        &["check", "--config", config.to_str().unwrap()],
        &[
            ("PRACTICUM_TOKEN", "super-secret-api"),
            ("TELEGRAM_TOKEN", "super-secret-bot"),
            ("TELEGRAM_CHAT_ID", "42"),
            ("RETRY_PERIOD", "30"),
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("configuration: ok"));
    assert!(stdout.contains("retry period: 30s"));
    assert!(!stdout.contains("super-secret"));
}

#[test]
fn test_run_refuses_to_start_without_credentials() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("absent.toml");
    let output = run_reviewbot(
        &["run", "--once", "--config", config.to_str().unwrap()],
        &[("TELEGRAM_TOKEN", "bot")],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing required configuration"));
}

#[test]
fn test_run_logs_unreadable_configuration() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("absent.toml");
    let output = run_reviewbot(
        &["run", "--once", "--config", config.to_str().unwrap()],
        &[("RETRY_PERIOD", "soon"), ("RUST_LOG", "reviewbot=error")],
    );

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ERROR"));
    assert!(stdout.contains("Refusing to start with unreadable configuration"));
    assert!(stdout.contains("RETRY_PERIOD must be a number of seconds"));
}
