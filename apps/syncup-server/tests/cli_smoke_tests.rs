//! CLI smoke tests for the syncup-server binary.

use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::timeout;

fn run_syncup_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_syncup-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute syncup-server")
}

async fn run_syncup_server_with_timeout(
    args: &[&str],
    timeout_duration: Duration,
) -> Result<std::process::Output, Box<dyn std::error::Error>> {
    let mut cmd = tokio::process::Command::new(env!("CARGO_BIN_EXE_syncup-server"));
    cmd.args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match timeout(timeout_duration, cmd.output()).await {
        Ok(result) => result.map_err(|e| e.into()),
        Err(elapsed) => Err(elapsed.into()),
    }
}

/// Config rooted in a temp dir so logs and the database stay out of $HOME.
fn write_config(dir: &TempDir, name: &str, extra: &str) -> String {
    let home = dir.path().join("home").to_string_lossy().replace('\\', "/");
    let config = format!(
        r#"
server:
  home_dir: "{home}"
  host: "127.0.0.1"
  port: 0

logging:
  default:
    console_level: "off"
    file: "logs/syncup.log"
    file_level: info
    max_backups: 1
    max_size_mb: 10
{extra}"#
    );
    let path = dir.path().join(name);
    std::fs::write(&path, config).expect("Failed to write config file");
    path.to_string_lossy().to_string()
}

#[test]
fn test_cli_help_command() {
    let output = run_syncup_server(&["--help"]);
    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("syncup-server"));
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--mock"));
}

#[test]
fn test_cli_version_command() {
    let output = run_syncup_server(&["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("syncup-server 0.1.0"));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_syncup_server(&["invalid-command"]);
    assert!(!output.status.success(), "Invalid command should fail");
    assert!(String::from_utf8_lossy(&output.stderr).contains("error"));
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_syncup_server(&["-c", "/nonexistent/config.yaml", "check"]);
    assert!(!output.status.success(), "Should fail with missing config");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("config file not found"),
        "Should mention config file issue: {stderr}"
    );
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed")
        .expect("Failed to write file");

    let output = run_syncup_server(&["--config", config_path.to_str().unwrap(), "check"]);
    assert!(!output.status.success(), "Should fail with invalid YAML");
}

#[test]
fn test_cli_check_accepts_sqlite_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        &temp_dir,
        "valid.yaml",
        r#"
database:
  url: "sqlite://database/syncup.db"

modules:
  hangouts:
    horizon_days: 7
    generator:
      enabled: false
"#,
    );

    let output = run_syncup_server(&["--config", &config_path, "check"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "Should succeed with valid config: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("Configuration check passed"));
    assert!(stdout.contains("horizon_days: 7"));
}

#[test]
fn test_cli_check_rejects_unsupported_database() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        &temp_dir,
        "pg.yaml",
        r#"
database:
  url: "postgresql://localhost/nonexistent"
"#,
    );

    let output = run_syncup_server(&["--config", &config_path, "check"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported database type"));

    // --mock drops the database section entirely.
    let output = run_syncup_server(&["--config", &config_path, "--mock", "check"]);
    assert!(
        output.status.success(),
        "Mock mode should ignore the database section: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_cli_print_config_applies_port_override() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, "print.yaml", "");

    let output = run_syncup_server(&["--config", &config_path, "--port", "9123", "--print-config"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("port: 9123"));
    assert!(stdout.contains("127.0.0.1:9123"));
}

#[tokio::test]
async fn test_cli_run_starts_with_sqlite() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        &temp_dir,
        "run.yaml",
        r#"
database:
  url: "sqlite://database/syncup.db"
"#,
    );

    let result = run_syncup_server_with_timeout(
        &["--config", &config_path, "run"],
        Duration::from_secs(10),
    )
    .await;

    match result {
        // Still serving when the timeout fired.
        Err(err) if err.to_string().contains("elapsed") => {
            assert!(temp_dir.path().join("home/database/syncup.db").exists());
        }
        Err(err) => panic!("Server failed to start: {err}"),
        Ok(output) => panic!(
            "Server exited early: {}",
            String::from_utf8_lossy(&output.stderr)
        ),
    }
}

#[test]
fn test_cli_run_rejects_bad_bind_address() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        &temp_dir,
        "bind.yaml",
        r#"
modules:
  api_ingress:
    bind_addr: "not-an-address"
"#,
    );

    let output = run_syncup_server(&["--config", &config_path, "--mock", "run"]);
    assert!(!output.status.success(), "Should fail with invalid bind address");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid bind address"));
}

#[test]
fn test_cli_subcommand_help() {
    let output = run_syncup_server(&["run", "--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Start the server"));

    let output = run_syncup_server(&["check", "--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Check configuration"));
}
