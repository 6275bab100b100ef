//! Integration tests for the lettermerge CLI
//!
//! These tests run the lettermerge binary against temporary pipeline roots.

mod support;

use std::fs;

use predicates::prelude::*;
use tempfile::tempdir;

use crate::support::{create_scenario, lettermerge, lettermerge_at, write_file};

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn test_help_flag() {
    lettermerge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: lettermerge"))
        .stdout(predicate::str::contains("combine"))
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("archive"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn test_version_flag() {
    lettermerge()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lettermerge"));
}

#[test]
fn test_no_command_prints_hint() {
    let dir = tempdir().unwrap();
    lettermerge_at(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("lettermerge --help"));
}

// ============================================================================
// Usage errors
// ============================================================================

#[test]
fn test_invalid_date_is_usage_error() {
    let dir = tempdir().unwrap();
    lettermerge_at(dir.path())
        .args(["combine", "--date", "2023-06-01"])
        .assert()
        .code(2);
}

#[test]
fn test_invalid_date_json_envelope() {
    let dir = tempdir().unwrap();
    let output = lettermerge_at(dir.path())
        .args(["--format", "json", "combine", "--date", "nope"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["type"], "usage_error");
}

#[test]
fn test_invalid_config_is_usage_error() {
    let dir = tempdir().unwrap();
    write_file(
        &dir.path().join("lettermerge.toml"),
        "[documents]\nextension = \"\"\n",
    );
    lettermerge_at(dir.path())
        .arg("archive")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("documents.extension"));
}

// ============================================================================
// Seed
// ============================================================================

#[test]
fn test_seed_creates_sample_letters() {
    let dir = tempdir().unwrap();
    lettermerge_at(dir.path())
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample input files created"));

    let input = dir.path().join("Input");
    for rel in [
        "Admission/20230518/admission-12345678.txt",
        "Admission/20230518/admission-87654321.txt",
        "Scholarship/20230518/scholarship-12345678.txt",
        "Scholarship/20230518/scholarship-56781234.txt",
    ] {
        assert!(input.join(rel).exists(), "missing {}", rel);
    }
    assert_eq!(
        fs::read_to_string(input.join("Admission/20230518/admission-12345678.txt")).unwrap(),
        "Admission Letter for Student 12345678\n"
    );
}

// ============================================================================
// Combine
// ============================================================================

#[test]
fn test_combine_missing_input_root() {
    let dir = tempdir().unwrap();
    lettermerge_at(dir.path())
        .args(["combine", "--date", "20230601"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("input root not found"));
}

#[test]
fn test_combine_writes_only_multi_letter_students() {
    let dir = tempdir().unwrap();
    create_scenario(dir.path());

    lettermerge_at(dir.path())
        .args(["combine", "--date", "20230601"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 letters for 2 students"))
        .stdout(predicate::str::contains("Combined letters for 1 student(s)"))
        .stdout(predicate::str::contains("consolidate: 1 succeeded, 0 failed"));

    let partition = dir.path().join("Output/20230601");
    let combined = fs::read_to_string(partition.join("combined-12345678.txt")).unwrap();
    assert_eq!(
        combined,
        "===== Admission/20230518/admission-12345678.txt =====\nA\n\
         ===== Scholarship/20230518/scholarship-12345678.txt =====\nB\n"
    );
    assert!(!partition.join("combined-87654321.txt").exists());

    // Combining leaves the inputs in place.
    assert!(dir
        .path()
        .join("Input/Admission/20230518/admission-12345678.txt")
        .exists());
}

#[test]
fn test_combine_json_output() {
    let dir = tempdir().unwrap();
    create_scenario(dir.path());

    let output = lettermerge_at(dir.path())
        .args(["--format", "json", "combine", "--date", "20230601"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["run_date"], "20230601");
    assert_eq!(json["merged_ids"], serde_json::json!(["12345678"]));
    assert_eq!(json["phases"][0]["phase"], "discover");
    assert_eq!(json["phases"][0]["succeeded"], 3);
    assert_eq!(json["phases"][1]["phase"], "consolidate");
    assert_eq!(json["phases"][1]["succeeded"], 1);
}

#[test]
fn test_combine_rerun_same_day_is_identical() {
    let dir = tempdir().unwrap();
    create_scenario(dir.path());
    let combined = dir.path().join("Output/20230601/combined-12345678.txt");

    lettermerge_at(dir.path())
        .args(["combine", "--date", "20230601"])
        .assert()
        .success();
    let first = fs::read(&combined).unwrap();

    lettermerge_at(dir.path())
        .args(["combine", "--date", "20230601"])
        .assert()
        .success();
    assert_eq!(fs::read(&combined).unwrap(), first);
}

#[test]
fn test_malformed_file_warns_without_failing() {
    let dir = tempdir().unwrap();
    create_scenario(dir.path());
    write_file(
        &dir.path().join("Input/Admission/20230518/notes.txt"),
        "scratch\n",
    );

    lettermerge_at(dir.path())
        .args(["combine", "--date", "20230601"])
        .assert()
        .success()
        .stdout(predicate::str::contains("warning: malformed filename"))
        .stdout(predicate::str::contains("notes.txt"));
}

// ============================================================================
// Report
// ============================================================================

#[test]
fn test_report_lists_combined_files() {
    let dir = tempdir().unwrap();
    create_scenario(dir.path());
    lettermerge_at(dir.path())
        .args(["combine", "--date", "20230601"])
        .assert()
        .success();

    lettermerge_at(dir.path())
        .args(["report", "--date", "20230601"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 combined letters"));

    assert_eq!(
        fs::read_to_string(dir.path().join("Output/20230601/report.txt")).unwrap(),
        "Processing Date: 2023-06-01\nTotal Combined Letters: 1\n12345678\n"
    );
}

#[test]
fn test_report_without_combine_is_empty() {
    let dir = tempdir().unwrap();
    let output = lettermerge_at(dir.path())
        .args(["--format", "json", "report", "--date", "20230601"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total"], 0);
}

// ============================================================================
// Archive
// ============================================================================

#[test]
fn test_archive_moves_everything() {
    let dir = tempdir().unwrap();
    create_scenario(dir.path());
    write_file(
        &dir.path().join("Input/Admission/20230518/notes.txt"),
        "scratch\n",
    );

    lettermerge_at(dir.path())
        .arg("archive")
        .assert()
        .success()
        .stdout(predicate::str::contains("Archived 4 files"));

    let archive = dir.path().join("Archive/20230518");
    for name in [
        "admission-12345678.txt",
        "scholarship-12345678.txt",
        "admission-87654321.txt",
        "notes.txt",
    ] {
        assert!(archive.join(name).exists(), "missing {}", name);
    }
    let admission = dir.path().join("Input/Admission/20230518");
    assert_eq!(fs::read_dir(admission).unwrap().count(), 0);
}

#[test]
fn test_archive_missing_input_root() {
    let dir = tempdir().unwrap();
    let output = lettermerge_at(dir.path())
        .args(["--format", "json", "archive"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["type"], "input_root_missing");
}

// ============================================================================
// Run
// ============================================================================

#[test]
fn test_run_end_to_end() {
    let dir = tempdir().unwrap();
    create_scenario(dir.path());

    lettermerge_at(dir.path())
        .args(["run", "--date", "20230601"])
        .assert()
        .success()
        .stdout(predicate::str::contains("discover: 3 succeeded, 0 failed"))
        .stdout(predicate::str::contains("consolidate: 1 succeeded, 0 failed"))
        .stdout(predicate::str::contains("report: 1 succeeded, 0 failed"))
        .stdout(predicate::str::contains("archive: 3 succeeded, 0 failed"));

    let output = dir.path().join("Output/20230601");
    assert!(output.join("combined-12345678.txt").exists());
    assert!(!output.join("combined-87654321.txt").exists());
    assert!(fs::read_to_string(output.join("report.txt"))
        .unwrap()
        .contains("Total Combined Letters: 1"));
    assert!(dir
        .path()
        .join("Archive/20230518/admission-87654321.txt")
        .exists());
}

#[test]
fn test_run_with_seed_json() {
    let dir = tempdir().unwrap();
    let output = lettermerge_at(dir.path())
        .args(["--format", "json", "run", "--seed", "--date", "20230601"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["merged_ids"], serde_json::json!(["12345678"]));
    assert_eq!(json["report"]["total"], 1);
    assert_eq!(json["moves"].as_array().unwrap().len(), 4);
    assert_eq!(json["phases"].as_array().unwrap().len(), 4);
}

#[test]
fn test_run_twice_archives_nothing_new() {
    let dir = tempdir().unwrap();
    create_scenario(dir.path());
    lettermerge_at(dir.path())
        .args(["run", "--date", "20230601"])
        .assert()
        .success();

    lettermerge_at(dir.path())
        .args(["run", "--date", "20230602"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No letters to combine."))
        .stdout(predicate::str::contains("Archived 0 files"));

    assert!(fs::read_to_string(dir.path().join("Output/20230602/report.txt"))
        .unwrap()
        .contains("Total Combined Letters: 0"));
}

#[test]
fn test_custom_layout_from_config() {
    let dir = tempdir().unwrap();
    write_file(
        &dir.path().join("lettermerge.toml"),
        "[layout]\narchive_dir = \"History\"\n\n[documents]\nextension = \"md\"\n",
    );
    write_file(
        &dir.path().join("Input/Admission/20230518/admission-7.md"),
        "A\n",
    );
    write_file(
        &dir.path().join("Input/Scholarship/20230518/scholarship-7.md"),
        "B\n",
    );

    lettermerge_at(dir.path())
        .args(["--quiet", "run", "--date", "20230601"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(dir.path().join("Output/20230601/combined-7.md").exists());
    assert!(dir.path().join("Output/20230601/report.md").exists());
    assert!(dir.path().join("History/20230518/admission-7.md").exists());
}
