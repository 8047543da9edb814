//! CLI end-to-end tests
//!
//! Tests for the reelscan command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the reelscan binary
#[allow(deprecated)]
fn reelscan_cmd() -> Command {
    let mut cmd = Command::cargo_bin("reelscan").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = reelscan_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = reelscan_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("reelscan "));
}

#[test]
fn test_cli_parse_help() {
    let mut cmd = reelscan_cmd();
    cmd.args(["parse", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parse one or more filenames"));
}

#[test]
fn test_cli_parse_text() {
    let temp = tempdir().unwrap();
    let mut cmd = reelscan_cmd();
    cmd.current_dir(temp.path())
        .args(["parse", "Desperate Housewives S04E01E02E03E06.iso"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Desperate Housewives"))
        .stdout(predicate::str::contains("Season: 4 Episodes: 1, 2, 3, 6"))
        .stdout(predicate::str::contains("Container: ISO"));
}

#[test]
fn test_cli_parse_json() {
    let temp = tempdir().unwrap();
    let mut cmd = reelscan_cmd();
    let output = cmd
        .current_dir(temp.path())
        .args(["parse", "--json", "Aliens(1986).avi", "The File [cd3]h.264.avi"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["title"], "Aliens");
    assert_eq!(json[0]["year"], 1986);
    assert_eq!(json[0]["path"], "Aliens(1986).avi");
    assert_eq!(json[1]["part"], 3);
    assert_eq!(json[1]["video_codec"], "H.264");
}

#[test]
fn test_cli_parse_directory() {
    let temp = tempdir().unwrap();
    let mut cmd = reelscan_cmd();
    cmd.current_dir(temp.path())
        .args(["parse", "--dir", "Heat.1995"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Heat"))
        .stdout(predicate::str::contains("Container: DVD"))
        .stdout(predicate::str::contains("Source: DVD"));
}

#[test]
fn test_cli_parse_with_config() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("config.toml");
    fs::write(
        &config_file,
        r#"
[scanner]
skip_keywords = ["DiAMOND"]

[[scanner.languages]]
id = "Russian"
strict = ["RUS", "Rus", "rus"]
loose = ["RUS", "RUSSIAN"]
"#,
    )
    .unwrap();

    let mut cmd = reelscan_cmd();
    cmd.arg("--config")
        .arg(&config_file)
        .args(["parse", "Blood DiAMOND ccc.mkv", "You Don't Mess with the Zohan.2008.Rus.DVDRip.avi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Blood\n"))
        .stdout(predicate::str::contains("Languages: Russian"));
}

#[test]
fn test_cli_scan_directory() {
    let temp = tempdir().unwrap();
    let library = temp.path().join("library");
    fs::create_dir_all(library.join("Heat (1995)").join("VIDEO_TS")).unwrap();
    fs::create_dir_all(library.join("Show")).unwrap();
    fs::write(library.join("Aliens(1986).avi"), b"").unwrap();
    fs::write(library.join("Aliens(1986).srt"), b"").unwrap();
    fs::write(library.join("Show").join("Show.S01E02.mkv"), b"").unwrap();

    let mut cmd = reelscan_cmd();
    let output = cmd
        .current_dir(temp.path())
        .args(["scan", "--json", "--threads", "2"])
        .arg(&library)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["title"], "Aliens");
    assert_eq!(entries[1]["title"], "Heat");
    assert_eq!(entries[1]["is_directory"], true);
    assert_eq!(entries[1]["year"], 1995);
    assert_eq!(entries[2]["season"], 1);
}

#[test]
fn test_cli_scan_without_paths_fails() {
    let temp = tempdir().unwrap();
    let mut cmd = reelscan_cmd();
    cmd.current_dir(temp.path())
        .arg("scan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No paths given"));
}

#[test]
fn test_cli_languages() {
    let temp = tempdir().unwrap();
    let mut cmd = reelscan_cmd();
    cmd.current_dir(temp.path())
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("English: eng|en|english"));
}

#[test]
fn test_cli_validate_valid_config() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("config.toml");
    fs::write(
        &config_file,
        r#"
[library]
extensions = ["mkv"]

[scanner]
skip_regex_keywords = ["\\d+MB"]
"#,
    )
    .unwrap();

    let mut cmd = reelscan_cmd();
    cmd.arg("validate")
        .arg(&config_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Skip expressions: 1"));
}

#[test]
fn test_cli_validate_invalid_config() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("config.toml");
    fs::write(
        &config_file,
        r#"
[scanner]
skip_regex_keywords = ["(unclosed"]
"#,
    )
    .unwrap();

    let mut cmd = reelscan_cmd();
    cmd.arg("validate")
        .arg(&config_file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid scanner configuration"));
}

#[test]
fn test_cli_validate_nonexistent_config() {
    let mut cmd = reelscan_cmd();
    cmd.args(["validate", "/nonexistent/config.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}
