//! CLI integration tests

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Build command for the kibom-cli binary (finds it in target/debug when run via cargo test).
fn kibom_cli() -> Command {
    cargo_bin_cmd!("kibom-cli")
}

/// Path to kibom library test fixtures (relative to workspace).
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("kibom")
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_cli_help() {
    let mut cmd = kibom_cli();

    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("bill of materials"));
}

#[test]
fn test_cli_version() {
    let mut cmd = kibom_cli();

    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_xml() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("bom.xml");

    let mut cmd = kibom_cli();
    cmd.arg("xml")
        .arg(fixtures_dir().join("single_board.json"))
        .arg("--output")
        .arg(&output);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Groups:"));

    let xml = std::fs::read_to_string(&output).unwrap();
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<KiCad_BOM"));
    assert!(xml.contains("Reference__num=\"R1 R2 R10\""));
}

#[test]
fn test_cli_xml_json_summary() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("bom.xml");

    let mut cmd = kibom_cli();
    cmd.arg("xml")
        .arg(fixtures_dir().join("single_board.json"))
        .arg("-o")
        .arg(&output)
        .arg("--keep-dnf")
        .arg("--format")
        .arg("json");

    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["groups_written"], 5);
    assert_eq!(summary["n_groups"], 5);
}

#[test]
fn test_cli_csv() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("bom.csv");

    let mut cmd = kibom_cli();
    cmd.arg("csv")
        .arg(fixtures_dir().join("single_board.json"))
        .arg("-o")
        .arg(&output)
        .arg("--separator")
        .arg(";")
        .arg("--number")
        .arg("2");

    cmd.assert().success();

    let csv = std::fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("Reference #;Value;"));
    assert!(csv.contains("R1 R2 R10;10k;R_0603;3;6;"));
    assert!(csv.contains("Number_of_PCBs;2"));
}

#[test]
fn test_cli_missing_input() {
    let dir = TempDir::new().unwrap();

    let mut cmd = kibom_cli();
    cmd.arg("xml")
        .arg("does_not_exist.json")
        .arg("-o")
        .arg(dir.path().join("bom.xml"));

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_cli_parse() {
    let mut cmd = kibom_cli();

    cmd.arg("parse").arg("4k7");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("4.7"))
        .stdout(predicate::str::contains("1e3"));
}

#[test]
fn test_cli_parse_unparseable() {
    let mut cmd = kibom_cli();

    cmd.arg("parse").arg("foo");
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("unparseable"));
}

#[test]
fn test_cli_compare() {
    let mut cmd = kibom_cli();
    cmd.arg("compare").arg("100n").arg("0.1uF");
    cmd.assert().code(0).stdout(predicate::str::contains("equal"));

    let mut cmd = kibom_cli();
    cmd.arg("compare").arg("1M").arg("1m");
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("different"));
}

#[test]
fn test_cli_compare_decimal_comma() {
    let mut cmd = kibom_cli();
    cmd.arg("compare")
        .arg("4,7k")
        .arg("4k7")
        .arg("--decimal-point")
        .arg(",");
    cmd.assert().code(0);
}

#[test]
fn test_cli_columns() {
    let mut cmd = kibom_cli();

    cmd.arg("columns");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("References"))
        .stdout(predicate::str::contains("Build Quantity"));
}
