//! CLI binary tests
//!
//! Runs the built binary with an isolated HOME so config lookups never
//! touch the real user directory.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Helper to run the CLI and capture output
fn run_scanswitch(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_scanswitch"))
        .args(args)
        .env("HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute scanswitch");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_scanswitch(home.path(), &["--help"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("play"));
    assert!(stdout.contains("config"));
}

#[test]
fn config_path_is_under_home() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_scanswitch(home.path(), &["config", "path"]);

    assert_eq!(code, 0);
    let expected = home.path().join(".config").join("scanswitch").join("config.toml");
    assert_eq!(stdout.trim(), expected.display().to_string());
}

#[test]
fn config_show_prints_defaults() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_scanswitch(home.path(), &["config", "show"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("[cache]"));
    assert!(stdout.contains("capacity = 10"));
    assert!(stdout.contains("[carousel]"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let home = TempDir::new().unwrap();
    let (_, _, first) = run_scanswitch(home.path(), &["config", "init"]);
    assert_eq!(first, 0);
    assert!(home.path().join(".config/scanswitch/config.toml").exists());

    let (_, stderr, second) = run_scanswitch(home.path(), &["config", "init"]);
    assert_ne!(second, 0);
    assert!(stderr.contains("already exists"));

    let (_, _, forced) = run_scanswitch(home.path(), &["config", "init", "--force"]);
    assert_eq!(forced, 0);
}

#[test]
fn play_synthetic_runs_for_requested_frames() {
    let home = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_scanswitch(
        home.path(),
        &[
            "play",
            "--synthetic",
            "3",
            "--frames",
            "20",
            "--width",
            "40",
            "--step",
            "10",
        ],
    );

    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("showing #0 img-0"));
    assert!(stdout.contains("showing #1 img-1"));
    assert!(stdout.contains("Played 20 frames over 3 images"));
}

#[test]
fn play_empty_directory_fails() {
    let home = TempDir::new().unwrap();
    let images = TempDir::new().unwrap();
    let dir = images.path().to_str().unwrap();
    let (_, stderr, code) = run_scanswitch(home.path(), &["play", dir, "--frames", "1"]);

    assert_ne!(code, 0);
    assert!(stderr.contains("No images found"));
}

#[test]
fn play_rejects_invalid_overrides() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_scanswitch(
        home.path(),
        &["play", "--synthetic", "2", "--capacity", "0", "--frames", "1"],
    );

    assert_ne!(code, 0);
    assert!(stderr.contains("cache.capacity"));
}

#[test]
fn play_requires_a_source() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_scanswitch(home.path(), &["play"]);
    assert_ne!(code, 0);
}
