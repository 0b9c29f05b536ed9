//! CLI Integration Tests for Bistro Admin
//!
//! Runs the built `bistro-admin` binary and checks help output, the init
//! command, and error reporting against an unreachable API.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// Helper to run bistro-admin with arguments
fn run_bistro(args: &[&str], working_dir: Option<&std::path::Path>) -> std::process::Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bistro-admin"));
    cmd.args(args)
        .env_remove("BISTRO_API_URL")
        .env_remove("RUST_LOG");

    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }

    cmd.output().expect("Failed to execute command")
}

/// A base URL nothing is listening on.
fn closed_api_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api", port)
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_command() {
    let output = run_bistro(&["--help"], None);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("Bistro Admin"));
    assert!(stdout.contains("USAGE") || stdout.contains("Usage"));
    for subcommand in ["dashboard", "menu", "inventory", "orders", "open", "init"] {
        assert!(stdout.contains(subcommand), "help is missing {}", subcommand);
    }
}

#[test]
fn test_version_command() {
    let output = run_bistro(&["--version"], None);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("bistro-admin"));
}

#[test]
fn test_orders_list_help_lists_statuses() {
    let output = run_bistro(&["orders", "list", "--help"], None);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--status"));
    assert!(stdout.contains("pending"));
}

#[test]
fn test_unknown_status_is_rejected() {
    let output = run_bistro(&["orders", "set-status", "o1", "shipped"], None);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("shipped"));
}

// =============================================================================
// Init Command Tests
// =============================================================================

#[test]
fn test_init_creates_bistro_toml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_path = temp_dir.path().to_str().unwrap();

    let output = run_bistro(
        &["--no-color", "init", temp_path, "--base-url", "http://pos.local/api"],
        None,
    );
    assert!(output.status.success(), "Init command failed: {:?}", output);

    let config_path = temp_dir.path().join("bistro.toml");
    let content = fs::read_to_string(&config_path).expect("Failed to read bistro.toml");
    assert!(content.contains("[api]"));
    assert!(content.contains("base_url = \"http://pos.local/api\""));
    assert!(content.contains("[logging]"));

    assert!(temp_dir.path().join(".env.example").exists());
}

#[test]
fn test_init_refuses_to_overwrite_without_force() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_path = temp_dir.path().to_str().unwrap();
    fs::write(temp_dir.path().join("bistro.toml"), "# mine").unwrap();

    let output = run_bistro(&["--no-color", "init", temp_path], None);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("already exists"));
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("bistro.toml")).unwrap(),
        "# mine"
    );

    let output = run_bistro(&["--no-color", "init", temp_path, "--force"], None);
    assert!(output.status.success());
    let content = fs::read_to_string(temp_dir.path().join("bistro.toml")).unwrap();
    assert!(content.contains("[api]"));
}

// =============================================================================
// Config and API Error Tests
// =============================================================================

#[test]
fn test_invalid_config_fails_with_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("bistro.toml"), "[api]\nbase_url = \"ftp://x\"\n").unwrap();

    let output = run_bistro(&["--no-color", "dashboard"], Some(temp_dir.path()));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bistro.toml"));
}

#[test]
fn test_dashboard_with_unreachable_api_still_renders() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let api_url = closed_api_url();

    let output = run_bistro(
        &["--no-color", "--api-url", &api_url, "dashboard"],
        Some(temp_dir.path()),
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Dashboard"));
    assert!(stdout.contains("[WARN] Could not load dashboard"));
    assert!(stdout.contains("Pending orders: 0"));
}

#[test]
fn test_menu_show_with_unreachable_api_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let api_url = closed_api_url();

    let output = run_bistro(
        &["--no-color", "--api-url", &api_url, "menu", "show", "m1"],
        Some(temp_dir.path()),
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[ERROR]"));
}

#[test]
fn test_menu_edit_reports_load_failure_as_is() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let api_url = closed_api_url();

    let output = run_bistro(
        &["--no-color", "--api-url", &api_url, "menu", "edit", "m1", "--name", "Calzone"],
        Some(temp_dir.path()),
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[ERROR] Transport error"));
    assert!(!stderr.contains("Invalid input"));
}

#[test]
fn test_open_unknown_route_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let api_url = closed_api_url();

    let output = run_bistro(
        &["--no-color", "--api-url", &api_url, "open", "/kitchen"],
        Some(temp_dir.path()),
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/kitchen"));
}
