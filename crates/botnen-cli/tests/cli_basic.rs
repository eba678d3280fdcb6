//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated data directory and verify
//! outputs and the countdown file on disk.

use std::path::Path;
use std::process::Command;

/// Run a CLI command with `home` as the data directory.
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_botnen"))
        .env("BOTNEN_HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn stored(home: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(home.join("countdowns.json")).expect("countdown file");
    serde_json::from_str(&raw).expect("valid JSON")
}

#[test]
fn test_list_empty() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["list"]);
    assert_eq!(code, 0, "List failed");
    assert!(stdout.contains("no countdowns"));
}

#[test]
fn test_add_persists() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["add", "X", "2099-01-01 00:00:00"]);
    assert_eq!(code, 0, "Add failed");
    assert!(stdout.contains("added [0] X - 2099-01-01 00:00:00"));

    assert_eq!(
        stored(home.path()),
        serde_json::json!([{"name": "X", "date": "2099-01-01 00:00:00"}])
    );
}

#[test]
fn test_add_invalid_date() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["add", "X", "not-a-date"]);
    assert_eq!(code, 2, "Rejected input should exit with 2");
    assert!(stderr.contains("YYYY-MM-DD HH:MM:SS"));
    assert!(!home.path().join("countdowns.json").exists());
}

#[test]
fn test_edit_and_delete() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["add", "a", "2099-01-01 00:00:00"]);
    run_cli(home.path(), &["add", "b", "2099-02-01 00:00:00"]);
    run_cli(home.path(), &["add", "c", "2099-03-01 00:00:00"]);

    let (code, _, _) = run_cli(home.path(), &["edit", "0", "--name", "Y", "--date", "2030-06-15 12:00:00"]);
    assert_eq!(code, 0, "Edit failed");
    let (code, _, _) = run_cli(home.path(), &["delete", "1"]);
    assert_eq!(code, 0, "Delete failed");

    assert_eq!(
        stored(home.path()),
        serde_json::json!([
            {"name": "Y", "date": "2030-06-15 12:00:00"},
            {"name": "c", "date": "2099-03-01 00:00:00"},
        ])
    );
}

#[test]
fn test_edit_keeps_unspecified_fields() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["add", "a", "2099-01-01 00:00:00"]);
    let (code, _, _) = run_cli(home.path(), &["edit", "0", "--name", "renamed"]);
    assert_eq!(code, 0, "Edit failed");
    assert_eq!(
        stored(home.path()),
        serde_json::json!([{"name": "renamed", "date": "2099-01-01 00:00:00"}])
    );
}

#[test]
fn test_edit_missing_index() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["edit", "3", "--name", "x"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("out of bounds"));
}

#[test]
fn test_status_evicts_expired() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["add", "old", "2001-01-01 00:00:00"]);
    run_cli(home.path(), &["add", "far", "2999-01-01 00:00:00"]);

    let (code, stdout, _) = run_cli(home.path(), &["status"]);
    assert_eq!(code, 0, "Status failed");
    assert!(stdout.contains("expired: old"));
    assert!(stdout.contains("Ongoing countdowns:\nfar: "));

    assert_eq!(
        stored(home.path()),
        serde_json::json!([{"name": "far", "date": "2999-01-01 00:00:00"}])
    );
}

#[test]
fn test_status_json() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["status", "--json"]);
    assert_eq!(code, 0, "Status JSON failed");
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(report["ongoing"].as_array().unwrap().is_empty());
}

#[test]
fn test_watch_with_tick_limit() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["config", "set", "refresh.interval_ms", "10"]);
    let (code, stdout, _) = run_cli(home.path(), &["watch", "--ticks", "2"]);
    assert_eq!(code, 0, "Watch failed");
    assert_eq!(stdout.matches("No ongoing countdowns").count(), 2);
}

#[test]
fn test_file_override() {
    let home = tempfile::tempdir().unwrap();
    let other = home.path().join("elsewhere.json");
    let other = other.to_str().unwrap();

    let (code, _, _) = run_cli(home.path(), &["--file", other, "add", "x", "2099-01-01 00:00:00"]);
    assert_eq!(code, 0);
    assert!(Path::new(other).exists());
    assert!(!home.path().join("countdowns.json").exists());
}

#[test]
fn test_corrupt_file_fails_loudly() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join("countdowns.json"), "not json").unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["list"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("corrupt"));
}

#[test]
fn test_config_get_set_list() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "refresh.interval_ms"]);
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "1000");

    let (code, _, _) = run_cli(home.path(), &["config", "set", "refresh.interval_ms", "500"]);
    assert_eq!(code, 0, "Config set failed");

    let (code, stdout, _) = run_cli(home.path(), &["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    assert!(stdout.contains("refresh.interval_ms = 500"));

    let (code, _, _) = run_cli(home.path(), &["config", "get", "nope.nothing"]);
    assert_ne!(code, 0);
}

#[test]
fn test_mutations_emit_json_events() {
    let home = tempfile::tempdir().unwrap();

    let (code, stdout, _) = run_cli(home.path(), &["add", "X", "2099-01-01 00:00:00", "--json"]);
    assert_eq!(code, 0, "Add --json failed");
    let event: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(event["type"], "CountdownAdded");
    assert_eq!(event["index"], 0);
    assert_eq!(event["countdown"]["date"], "2099-01-01 00:00:00");

    let (code, stdout, _) = run_cli(home.path(), &["edit", "0", "--name", "Y", "--json"]);
    assert_eq!(code, 0, "Edit --json failed");
    let event: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(event["type"], "CountdownUpdated");
    assert_eq!(event["countdown"]["name"], "Y");

    let (code, stdout, _) = run_cli(home.path(), &["delete", "0", "--json"]);
    assert_eq!(code, 0, "Delete --json failed");
    let event: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(event["type"], "CountdownDeleted");
    assert_eq!(event["countdown"]["name"], "Y");
}

#[test]
fn test_config_set_keeps_malformed_file() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("config.toml");
    std::fs::write(&path, "refresh = [").unwrap();

    let (code, _, stderr) = run_cli(home.path(), &["config", "set", "log.level", "debug"]);
    assert_ne!(code, 0, "Config set overwrote a malformed file");
    assert!(stderr.contains("config.toml"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "refresh = [");
}
