//! CLI integration tests
//!
//! Exercises the bidboard binary directly with assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("bidboard").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bidboard"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("bidboard").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bidboard"));
}

#[test]
fn test_process_help() {
    let mut cmd = Command::cargo_bin("bidboard").unwrap();
    cmd.args(["process", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("publish the board"));
}

#[test]
fn test_inspect_help() {
    let mut cmd = Command::cargo_bin("bidboard").unwrap();
    cmd.args(["inspect", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preview"));
}

#[test]
fn test_process_empty_folder_succeeds() {
    let dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("bidboard").unwrap();
    cmd.args(["process", dir.path().to_str().unwrap(), "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No .xlsb files found"));
}

#[test]
fn test_process_dry_run_skips_remote_write() {
    let dir = TempDir::new().unwrap();
    // Not a real workbook; the file must be skipped with a warning, and the
    // dry run must finish without credentials
    std::fs::write(dir.path().join("제1공구_입찰결과.xlsb"), b"not a workbook").unwrap();

    let mut cmd = Command::cargo_bin("bidboard").unwrap();
    cmd.args(["process", dir.path().to_str().unwrap(), "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN"))
        .stdout(predicate::str::contains("Skipping"))
        .stdout(predicate::str::contains("Google Sheets write skipped"));
}

#[test]
fn test_process_without_sheet_id_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("제1공구.xlsb"), b"junk").unwrap();

    let mut cmd = Command::cargo_bin("bidboard").unwrap();
    cmd.args(["process", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sheet id"));
}

#[test]
fn test_inspect_missing_file_fails() {
    let mut cmd = Command::cargo_bin("bidboard").unwrap();
    cmd.args(["inspect", "/no/such/file.xlsb"])
        .assert()
        .failure();
}

#[test]
fn test_colors_missing_file_fails() {
    let mut cmd = Command::cargo_bin("bidboard").unwrap();
    cmd.args(["colors", "/no/such/colors.xlsx"])
        .assert()
        .failure();
}

#[test]
fn test_process_rejects_unknown_flag() {
    let mut cmd = Command::cargo_bin("bidboard").unwrap();
    cmd.args(["process", "--no-such-flag"]).assert().failure();
}
