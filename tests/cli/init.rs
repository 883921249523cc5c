use crate::cli::support::examforge;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_init_creates_store() {
    let dir = tempdir().unwrap();

    examforge()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized examforge store"));

    assert!(dir.path().join(".examforge/config.toml").exists());
    assert!(dir.path().join(".examforge/examforge.db").exists());

    let config = std::fs::read_to_string(dir.path().join(".examforge/config.toml")).unwrap();
    assert!(config.contains("triplet_target = 20"));
}

#[test]
fn test_init_idempotent() {
    let dir = tempdir().unwrap();

    for _ in 0..2 {
        examforge()
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .success();
    }
}

#[test]
fn test_init_explicit_store_json() {
    let dir = tempdir().unwrap();

    let output = examforge()
        .current_dir(dir.path())
        .args(["--store", "exams", "--format", "json", "init"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["schema_version"], 1);

    assert!(dir.path().join("exams/examforge.db").exists());
}

#[test]
fn test_command_without_store_exit_code_3() {
    let dir = tempdir().unwrap();

    examforge()
        .current_dir(dir.path())
        .arg("doctor")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("store not found"));
}
