use crate::cli::support::{examforge, init_store, seed_data_analyst, Catalog};
use predicates::prelude::*;

#[test]
fn test_doctor_empty_catalog() {
    let dir = init_store();

    examforge()
        .current_dir(dir.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("No specializations in catalog"));
}

#[test]
fn test_doctor_reports_verdicts() {
    let dir = init_store();
    seed_data_analyst(dir.path());
    {
        let catalog = Catalog::open(dir.path());
        let spec = catalog.specialization("Designer");
        let comp = catalog.competency(spec, "Typography", 1.0);
        let topic = catalog.topic(comp, "kerning");
        catalog.question(topic, "senior");
    }

    examforge()
        .current_dir(dir.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("Data Analyst (specialization 1): ready"))
        .stdout(predicate::str::contains("Designer (specialization 2): no_complete_topics"))
        .stdout(
            predicate::str::is_match(r"partial topic kerning \(\d+\): missing junior, middle")
                .unwrap(),
        )
        .stdout(predicate::str::contains("1 specialization(s) cannot generate a test"));
}

#[test]
fn test_doctor_json_flags_at_risk_competency() {
    let dir = init_store();
    {
        let catalog = Catalog::open(dir.path());
        let spec = catalog.specialization("Backend");
        let heavy = catalog.competency(spec, "Databases", 3.0);
        catalog.complete_topics(heavy, 4);
        let light = catalog.competency(spec, "Git", 1.0);
        catalog.complete_topics(light, 8);
    }

    let output = examforge()
        .current_dir(dir.path())
        .args(["--format", "json", "doctor"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let spec = &json["specializations"][0];
    assert_eq!(spec["verdict"], "insufficient");
    assert_eq!(spec["available_triplets"], 12);
    assert_eq!(spec["competencies"][0]["name"], "Databases");
    assert_eq!(spec["competencies"][0]["expected_triplets"], 15);
    assert_eq!(spec["competencies"][0]["at_risk"], true);
    assert_eq!(spec["competencies"][1]["at_risk"], false);
}
