use assert_cmd::Command;
use tempfile::TempDir;

const RECORD_JSON: &str = r#"{
  "schema": "inspeq.record.v1",
  "inspection_id": "I2-MOD123-2024-01",
  "inspection_type": "I2",
  "module_name": "parser",
  "inspection_date": "2024-01-15",
  "participants": ["Bea (Moderator)", "Ann (Coder)"],
  "metrics": {
    "size_estimate_pre": 1000,
    "size_estimate_post": 1051,
    "preparation_hours": 2.0,
    "meeting_hours": 1.5,
    "rework_hours": 3.0,
    "followup_hours": 0.5
  },
  "findings": [
    {
      "sequence_number": 1,
      "location": "src/mod.rs:10",
      "error_type": "LO",
      "category": "M",
      "severity": "MAJ",
      "classification": "LO/M/MAJ",
      "description": "missing bounds check",
      "resolution_note": ""
    },
    {
      "sequence_number": 2,
      "location": "src/mod.rs:55",
      "error_type": "TB",
      "category": "W",
      "severity": "MIN",
      "classification": "TB/W/MIN",
      "description": "branch never taken",
      "resolution_note": "drop the branch"
    }
  ]
}"#;

fn write_record(dir: &TempDir, text: &str) -> std::path::PathBuf {
    let path = dir.path().join("record.json");
    std::fs::write(&path, text).expect("write record fixture");
    path
}

fn inspeq() -> Command {
    Command::cargo_bin("inspeq").expect("binary built")
}

#[test]
fn report_all_writes_four_files() {
    let td = TempDir::new().expect("temp");
    let record = write_record(&td, RECORD_JSON);
    let out = td.path().join("reports");

    inspeq()
        .arg("report")
        .arg(&record)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    for suffix in ["error-list.txt", "module-detail.txt", "summary.txt", "data.json"] {
        let path = out.join(format!("I2-MOD123-2024-01_{suffix}"));
        assert!(path.exists(), "missing {}", path.display());
    }

    // 1000 -> 1051 is 5.1% rework, above the 5% threshold.
    let detail =
        std::fs::read_to_string(out.join("I2-MOD123-2024-01_module-detail.txt")).unwrap();
    assert!(detail.contains("Reinspection Required: YES"));
    assert!(detail.contains("5.1% of material reworked"));

    let summary = std::fs::read_to_string(out.join("I2-MOD123-2024-01_summary.txt")).unwrap();
    assert!(summary.contains("Bea (Moderator)"));
    assert!(summary.contains("Errors per K.LOC"));
}

#[test]
fn report_single_target_writes_only_that_file() {
    let td = TempDir::new().expect("temp");
    let record = write_record(&td, RECORD_JSON);
    let out = td.path().join("reports");

    inspeq()
        .arg("report")
        .arg(&record)
        .args(["--report-type", "summary"])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("I2-MOD123-2024-01_summary.txt").exists());
    assert!(!out.join("I2-MOD123-2024-01_error-list.txt").exists());
    assert!(!out.join("I2-MOD123-2024-01_data.json").exists());
}

#[test]
fn exported_json_reloads_through_the_cli() {
    let td = TempDir::new().expect("temp");
    let record = write_record(&td, RECORD_JSON);
    let out = td.path().join("first");

    inspeq()
        .arg("report")
        .arg(&record)
        .args(["--report-type", "json"])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    let exported = out.join("I2-MOD123-2024-01_data.json");
    let second = td.path().join("second");

    inspeq()
        .arg("report")
        .arg(&exported)
        .args(["--report-type", "json"])
        .arg("--output-dir")
        .arg(&second)
        .assert()
        .success();

    let first_bytes = std::fs::read_to_string(&exported).unwrap();
    let second_bytes =
        std::fs::read_to_string(second.join("I2-MOD123-2024-01_data.json")).unwrap();
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn report_on_missing_file_fails() {
    let td = TempDir::new().expect("temp");
    inspeq()
        .arg("report")
        .arg(td.path().join("nope.json"))
        .assert()
        .failure();
}

#[test]
fn validate_accepts_a_good_record() {
    let td = TempDir::new().expect("temp");
    let record = write_record(&td, RECORD_JSON);

    let assert = inspeq().arg("validate").arg(&record).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("OK"));
    assert!(stdout.contains("2 findings"));
}

#[test]
fn validate_rejects_bad_vocabulary_with_the_legal_set() {
    let td = TempDir::new().expect("temp");
    let bad = RECORD_JSON.replace("\"error_type\": \"LO\"", "\"error_type\": \"XX\"");
    let record = write_record(&td, &bad);

    let assert = inspeq().arg("validate").arg(&record).assert().code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("invalid error type 'XX'"));
    assert!(stderr.contains("LO"));
}

#[test]
fn validate_rejects_missing_identity_field() {
    let td = TempDir::new().expect("temp");
    let record = write_record(&td, r#"{"inspection_id": "I2-01"}"#);

    let assert = inspeq().arg("validate").arg(&record).assert().code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("missing field"));
}

#[test]
fn schema_prints_the_record_document_schema() {
    let assert = inspeq().arg("schema").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("inspection_id"));
    assert!(stdout.contains("sequence_number"));
}
