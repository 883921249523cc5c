use crate::cli::support::{create_session, examforge, init_store, seed_data_analyst, Catalog};
use predicates::prelude::*;

#[test]
fn test_generate_full_test() {
    let dir = init_store();
    let spec = seed_data_analyst(dir.path());
    let session = create_session(dir.path(), 42, spec);

    let output = examforge()
        .current_dir(dir.path())
        .args([
            "--format",
            "json",
            "generate",
            "--session",
            &session.to_string(),
            "--seed",
            "17",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["session"], session);
    assert_eq!(report["generated_count"], 60);
    assert_eq!(report["generated_triplets"], 20);
    assert!(report["shortfalls"].as_array().unwrap().is_empty());

    let catalog = Catalog::open(dir.path());
    assert_eq!(catalog.assigned_count(session), 60);
    assert_eq!(catalog.generation_state(session), "completed");
}

#[test]
fn test_generate_twice_is_conflict() {
    let dir = init_store();
    let spec = seed_data_analyst(dir.path());
    let session = create_session(dir.path(), 1, spec);

    examforge()
        .current_dir(dir.path())
        .args(["generate", "--session", &session.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 60 questions"));

    examforge()
        .current_dir(dir.path())
        .args(["--format", "json", "generate", "--session", &session.to_string()])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"type\":\"already_generated\""));

    assert_eq!(Catalog::open(dir.path()).assigned_count(session), 60);
}

#[test]
fn test_generate_reports_shortfall() {
    let dir = init_store();
    let spec = {
        let catalog = Catalog::open(dir.path());
        let spec = catalog.specialization("Network Engineer");
        let comp = catalog.competency(spec, "Routing", 1.0);
        catalog.complete_topics(comp, 2);
        spec
    };
    let session = create_session(dir.path(), 7, spec);

    examforge()
        .current_dir(dir.path())
        .args(["generate", "--session", &session.to_string(), "--triplets", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 6 questions"))
        .stdout(predicate::str::contains("has 2 of 5 requested complete topics"));
}

#[test]
fn test_generate_without_complete_topics_fails_session() {
    let dir = init_store();
    let spec = {
        let catalog = Catalog::open(dir.path());
        let spec = catalog.specialization("Designer");
        let comp = catalog.competency(spec, "Typography", 1.0);
        let topic = catalog.topic(comp, "kerning");
        catalog.question(topic, "junior");
        spec
    };
    let session = create_session(dir.path(), 3, spec);

    examforge()
        .current_dir(dir.path())
        .args(["generate", "--session", &session.to_string()])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no topic with a complete"));

    let catalog = Catalog::open(dir.path());
    assert_eq!(catalog.assigned_count(session), 0);
    assert_eq!(catalog.generation_state(session), "failed");
}

#[test]
fn test_generate_unknown_session_exit_code_3() {
    let dir = init_store();

    examforge()
        .current_dir(dir.path())
        .args(["generate", "--session", "99"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("session not found: 99"));
}

#[test]
fn test_session_create_unknown_specialization() {
    let dir = init_store();

    examforge()
        .current_dir(dir.path())
        .args(["session", "create", "--user", "1", "--specialization", "12"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("specialization not found: 12"));
}
