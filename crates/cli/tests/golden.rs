//! Golden tests for verifying JSON output format stability
//!
//! Every test runs the `t` binary against a profile file in a fresh
//! temporary directory, so none of them touch `~/.trc` or the network.
//!
//! Run with: `cargo test --features golden`

#![cfg(feature = "golden")]

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn t(profile: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_t"))
        .args(args)
        .arg("--json")
        .env("T_PROFILE", profile)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute t")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

fn stderr_json(output: &Output) -> serde_json::Value {
    let stderr = String::from_utf8_lossy(&output.stderr);
    serde_json::from_str(&stderr).expect("Error output should be valid JSON")
}

fn add_account(profile: &Path, username: &str, key: &str) -> Output {
    let output = t(
        profile,
        &["accounts", "add", username, key, "asdfasd223sd2", "7505382-cebdct6bwobn", "epzrjvxtumoc"],
    );
    assert!(output.status.success(), "accounts add should succeed");
    output
}

fn profile_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join(".trc")
}

#[test]
fn test_accounts_empty_json() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let output = t(&profile_path(&dir), &["accounts"]);
    assert!(output.status.success(), "Command should succeed");

    let json = stdout_json(&output);
    insta::assert_json_snapshot!("accounts_empty", json);
}

#[test]
fn test_accounts_add_json() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let output = add_account(&profile_path(&dir), "@testcli", "abc123");

    let json = stdout_json(&output);
    insta::assert_json_snapshot!("accounts_add", json);
}

#[test]
fn test_accounts_list_json() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let profile = profile_path(&dir);
    add_account(&profile, "testcli", "abc123");
    add_account(&profile, "testcli", "xyz789");
    add_account(&profile, "sferik", "def456");

    let output = t(&profile, &["accounts"]);
    assert!(output.status.success(), "Command should succeed");

    let json = stdout_json(&output);
    insta::assert_json_snapshot!("accounts_list", json);
}

#[test]
fn test_set_active_json() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let profile = profile_path(&dir);
    add_account(&profile, "testcli", "abc123");
    add_account(&profile, "sferik", "def456");

    let output = t(&profile, &["set", "active", "SFER"]);
    assert!(output.status.success(), "Command should succeed");
    insta::assert_json_snapshot!("set_active", stdout_json(&output));

    let output = t(&profile, &["whoami"]);
    assert!(output.status.success(), "Command should succeed");
    insta::assert_json_snapshot!("whoami", stdout_json(&output));
}

#[test]
fn test_set_active_not_found_json() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let profile = profile_path(&dir);
    add_account(&profile, "testcli", "abc123");

    let output = t(&profile, &["set", "active", "nobody"]);
    assert_eq!(output.status.code(), Some(2), "Unknown username is a usage error");

    insta::assert_json_snapshot!("set_active_not_found", stderr_json(&output));
}

#[test]
fn test_whoami_without_profile_exit_code() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let output = t(&profile_path(&dir), &["whoami"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_timeline_without_profile_makes_no_request() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    // Unroutable host: reaching the network would be a network error, not a usage error
    let output = t(&profile_path(&dir), &["timeline", "-H", "127.0.0.1:9", "-U"]);
    assert_eq!(output.status.code(), Some(2));
}
