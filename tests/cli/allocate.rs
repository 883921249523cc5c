use crate::cli::support::{examforge, init_store, seed_data_analyst, Catalog};
use predicates::prelude::*;

#[test]
fn test_allocate_json_quotas_sum_to_target() {
    let dir = init_store();
    let spec = seed_data_analyst(dir.path());

    let output = examforge()
        .current_dir(dir.path())
        .args([
            "--format",
            "json",
            "allocate",
            "--specialization",
            &spec.to_string(),
            "--seed",
            "3",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["target"], 20);
    let quotas = json["quotas"].as_array().unwrap();
    assert_eq!(quotas.len(), 3);
    assert_eq!(quotas[0]["name"], "SQL");
    let total: u64 = quotas.iter().map(|q| q["triplets"].as_u64().unwrap()).sum();
    assert_eq!(total, 20);
}

#[test]
fn test_allocate_custom_target_human() {
    let dir = init_store();
    let spec = seed_data_analyst(dir.path());

    examforge()
        .current_dir(dir.path())
        .args(["allocate", "--specialization", &spec.to_string(), "--triplets", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10 triplets (30 questions)"))
        .stdout(predicate::str::contains("Visualization"));
}

#[test]
fn test_allocate_without_competencies_exit_code_3() {
    let dir = init_store();
    let spec = Catalog::open(dir.path()).specialization("Empty");

    examforge()
        .current_dir(dir.path())
        .args(["--format", "json", "allocate", "--specialization", &spec.to_string()])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"type\":\"no_competencies\""));
}

#[test]
fn test_allocate_zero_triplets_exit_code_2() {
    let dir = init_store();
    let spec = seed_data_analyst(dir.path());

    examforge()
        .current_dir(dir.path())
        .args(["allocate", "--specialization", &spec.to_string(), "--triplets", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("triplet target must be at least 1"));
}

#[test]
fn test_allocate_oversized_triplets_exit_code_2() {
    let dir = init_store();
    let spec = seed_data_analyst(dir.path());

    examforge()
        .current_dir(dir.path())
        .args(["allocate", "--specialization", &spec.to_string(), "--triplets", "4000000000"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("exceeds the maximum of 10000"));
}
