use crate::cli::support::{create_session, examforge, init_store, seed_data_analyst};
use predicates::prelude::*;

#[test]
fn test_show_lists_questions_in_order() {
    let dir = init_store();
    let spec = seed_data_analyst(dir.path());
    let session = create_session(dir.path(), 5, spec);

    examforge()
        .current_dir(dir.path())
        .args(["generate", "--session", &session.to_string(), "--triplets", "4"])
        .assert()
        .success();

    let output = examforge()
        .current_dir(dir.path())
        .args(["--format", "json", "show", "--session", &session.to_string()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["session"]["generation_state"], "completed");
    let questions = json["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 12);
    for (i, q) in questions.iter().enumerate() {
        assert_eq!(q["order"], i as u64 + 1);
        let expected = ["junior", "middle", "senior"][i % 3];
        assert_eq!(q["level"], expected);
        assert_eq!(q["options"].as_array().unwrap().len(), 4);
    }
}

#[test]
fn test_show_before_generation() {
    let dir = init_store();
    let spec = seed_data_analyst(dir.path());
    let session = create_session(dir.path(), 5, spec);

    examforge()
        .current_dir(dir.path())
        .args(["show", "--session", &session.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("not_started, 0 questions"));
}
