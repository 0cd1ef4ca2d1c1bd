//! End-to-end CLI tests.

use assert_cmd::Command;
use predicates::prelude::*;

const CPAP_NOTE: &str = "Patient Name: John Smith\n\
DOB: 03/04/1958\n\
Diagnosis: severe obstructive sleep apnea.\n\
Patient needs a CPAP with full face mask and humidifier, set at 10 cmH2O. \
AHI > 20. Ordered by Dr. Cameron.\n";

#[test]
fn process_cpap_note_emits_json_order() {
    let dir = tempfile::tempdir().unwrap();
    let note_path = dir.path().join("note.txt");
    std::fs::write(&note_path, CPAP_NOTE).unwrap();

    Command::cargo_bin("demex")
        .unwrap()
        .args(["process", note_path.to_str().unwrap(), "--rules-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""device":"CPAP""#))
        .stdout(predicate::str::contains(r#""ordering_provider":"Dr. Cameron""#))
        .stdout(predicate::str::contains(r#""mask_type":"full face""#));
}

#[test]
fn process_unwraps_json_note() {
    let dir = tempfile::tempdir().unwrap();
    let note_path = dir.path().join("note.json");
    let payload = serde_json::json!({
        "note": "Home oxygen at 2 L/min via nasal cannula for use during sleep. Ordered by Dr. Wilson."
    });
    std::fs::write(&note_path, payload.to_string()).unwrap();

    Command::cargo_bin("demex")
        .unwrap()
        .args(["process", note_path.to_str().unwrap(), "--rules-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""device":"Oxygen""#))
        .stdout(predicate::str::contains(r#""liters":"2 L/min""#))
        .stdout(predicate::str::contains(r#""delivery_method":"nasal cannula""#));
}

#[test]
fn process_rejects_note_without_device_keyword() {
    let dir = tempfile::tempdir().unwrap();
    let note_path = dir.path().join("note.txt");
    std::fs::write(
        &note_path,
        "Patient Name: Jane Doe\nFollow up for medication review in two weeks.\n",
    )
    .unwrap();

    Command::cargo_bin("demex")
        .unwrap()
        .args(["process", note_path.to_str().unwrap(), "--rules-only"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation failed"));
}

#[test]
fn process_text_format_summarizes_order() {
    let dir = tempfile::tempdir().unwrap();
    let note_path = dir.path().join("note.txt");
    std::fs::write(&note_path, CPAP_NOTE).unwrap();

    Command::cargo_bin("demex")
        .unwrap()
        .args([
            "process",
            note_path.to_str().unwrap(),
            "--rules-only",
            "--format",
            "text",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Device: CPAP"))
        .stdout(predicate::str::contains("Ordered by: Dr. Cameron"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");

    std::fs::write(dir.path().join("a.txt"), CPAP_NOTE).unwrap();
    std::fs::write(
        dir.path().join("b.txt"),
        "Patient requires a standard walker for ambulation around the home.\n",
    )
    .unwrap();

    let pattern = format!("{}/*.txt", dir.path().to_str().unwrap());

    Command::cargo_bin("demex")
        .unwrap()
        .args([
            "batch",
            &pattern,
            "--rules-only",
            "--summary",
            "--output-dir",
            out_dir.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(out_dir.join("a.json").exists());
    assert!(out_dir.join("b.json").exists());

    let summary = std::fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(summary.contains("a.txt"));
    assert!(summary.contains("CPAP"));
    assert!(summary.contains("Walker"));
}

#[test]
fn missing_input_file_fails() {
    Command::cargo_bin("demex")
        .unwrap()
        .args(["process", "/nonexistent/note.txt", "--rules-only"])
        .assert()
        .failure();
}
