//! End-to-end tests for the `wasteops` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

const BATCH: &str = r#"{
    "message": "Closed 2 contracts",
    "terminated": [
        {"success": true,
         "oldContract": {"contract_number": "C-100", "new_end_date": "2025-01-15"},
         "calculation": {"original_quantity": 500, "adjusted_quantity": 320}},
        {"success": false,
         "oldContract": {"contract_number": "C-101", "new_end_date": "2025-01-15"}},
        {"success": true,
         "oldContract": {"contract_number": "C-102", "new_end_date": "2025-01-15"},
         "calculation": {"original_quantity": 10, "adjusted_quantity": 25}}
    ]
}"#;

fn wasteops(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("wasteops").unwrap();
    cmd.env("WASTEOPS_CONFIG", dir.path().join("missing.toml"))
        .env_remove("WASTEOPS_ROLE")
        .env("NO_COLOR", "1");
    cmd
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn access_reports_editor_capabilities() {
    let dir = TempDir::new().unwrap();
    let report = json_stdout(wasteops(&dir).args(["access", "--role", "EDITOR_INSTITUTION", "-o", "json"]));

    assert_eq!(report["role"], "EDITOR_INSTITUTION");
    assert_eq!(report["class"]["is_editor"], true);
    let allowed = |name: &str| {
        report["decisions"]
            .as_array()
            .unwrap()
            .iter()
            .find(|d| d["capability"] == name)
            .map(|d| d["allowed"].as_bool().unwrap())
            .unwrap()
    };
    assert!(!allowed("canEditData"));
    assert!(!allowed("canManageUsers"));
    assert!(allowed("canViewOperators"));
}

#[test]
fn access_denies_unknown_role_without_failing() {
    let dir = TempDir::new().unwrap();
    wasteops(&dir)
        .args(["access", "--role", "SUPERUSER"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unrecognized role"))
        .stdout(predicate::str::contains("yes").not());
}

#[test]
fn role_can_come_from_environment_or_config() {
    let dir = TempDir::new().unwrap();
    wasteops(&dir)
        .env("WASTEOPS_ROLE", "PLATFORM_ADMIN")
        .arg("access")
        .assert()
        .success()
        .stdout(predicate::str::contains("Role: PLATFORM_ADMIN"));

    let config = write(&dir, "config.toml", "default_role = \"REGULATOR_VIEWER\"\n");
    wasteops(&dir)
        .env("WASTEOPS_CONFIG", &config)
        .arg("access")
        .assert()
        .success()
        .stdout(predicate::str::contains("Role: REGULATOR_VIEWER"));
}

#[test]
fn surfaces_hide_pages_from_regulators() {
    let dir = TempDir::new().unwrap();
    let rows = json_stdout(wasteops(&dir).args(["surfaces", "--role", "REGULATOR_VIEWER", "-o", "json"]));
    let state = |surface: &str| {
        rows.as_array()
            .unwrap()
            .iter()
            .find(|r| r["surface"] == surface)
            .map(|r| r["state"].as_str().unwrap().to_string())
            .unwrap()
    };
    assert_eq!(state("SectorsPage"), "hidden");
    assert_eq!(state("EditButton"), "disabled");
}

#[test]
fn audit_counts_only_successful_terminations() {
    let dir = TempDir::new().unwrap();
    let batch = write(&dir, "batch.json", BATCH);
    let review = json_stdout(wasteops(&dir).args(["audit", batch.to_str().unwrap(), "-o", "json"]));

    assert_eq!(review["closed"].as_array().unwrap().len(), 1);
    assert_eq!(review["closed"][0]["contract_number"], "C-100");
    assert_eq!(review["closed"][0]["quantity"]["delta"], 180.0);
    assert_eq!(review["failed"][0]["contract_number"], "C-101");
    assert_eq!(review["flagged"][0]["position"], 2);
    assert_eq!(review["flagged"][0]["defect"]["kind"], "quantity_increased");
}

#[test]
fn audit_table_summarizes_batch() {
    let dir = TempDir::new().unwrap();
    let batch = write(&dir, "batch.json", BATCH);
    wasteops(&dir)
        .args(["audit", batch.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 contract(s) closed, 180.00 t released"))
        .stdout(predicate::str::contains("1 malformed record(s) excluded"));
}

#[test]
fn audit_reads_stdin_and_checks_snapshots() {
    let dir = TempDir::new().unwrap();
    let contracts = write(
        &dir,
        "contracts.json",
        r#"[{"contract_number": "C-100", "end_date": "2025-01-10", "committed_quantity": 500}]"#,
    );
    let mut cmd = wasteops(&dir);
    cmd.args(["audit", "-", "--contracts", contracts.to_str().unwrap(), "-o", "json"])
        .write_stdin(BATCH);
    let review = json_stdout(&mut cmd);

    assert!(review["closed"].as_array().unwrap().is_empty());
    assert_eq!(review["flagged"][0]["defect"]["kind"], "end_date_extended");
}

#[test]
fn audit_rejects_contracts_that_are_not_a_list() {
    let dir = TempDir::new().unwrap();
    let batch = write(&dir, "batch.json", BATCH);
    let contracts = write(
        &dir,
        "contracts.json",
        r#"{"contract_number": "C-100", "end_date": "2025-01-10", "committed_quantity": 500}"#,
    );
    wasteops(&dir)
        .args(["audit", batch.to_str().unwrap(), "--contracts", contracts.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"))
        .stderr(predicate::str::contains("must be a JSON array"));
}

#[test]
fn access_treats_padded_role_as_unknown() {
    let dir = TempDir::new().unwrap();
    let report = json_stdout(wasteops(&dir).args(["access", "--role", " PLATFORM_ADMIN", "-o", "json"]));

    assert!(report["role"].is_null());
    assert!(report["decisions"]
        .as_array()
        .unwrap()
        .iter()
        .all(|d| d["allowed"] == false));
}

#[test]
fn audit_rejects_non_batch_payload() {
    let dir = TempDir::new().unwrap();
    let batch = write(&dir, "batch.json", "[1, 2, 3]");
    wasteops(&dir)
        .args(["audit", batch.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid termination batch"));
}

#[test]
fn institutions_reject_duplicate_ids() {
    let dir = TempDir::new().unwrap();
    let ok = write(
        &dir,
        "ok.json",
        r#"{"results": [{"id": 1, "name": "City Council", "short_name": "CC"}]}"#,
    );
    wasteops(&dir)
        .args(["institutions", ok.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("CC - City Council"));

    let dup = write(
        &dir,
        "dup.json",
        r#"[{"id": 1, "name": "A"}, {"id": 1, "name": "B"}]"#,
    );
    wasteops(&dir)
        .args(["institutions", dup.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate institution id: 1"));
}
