use std::path::Path;

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use rusqlite::{params, Connection};
use tempfile::TempDir;

/// Get a Command for examforge
pub fn examforge() -> Command {
    cargo_bin_cmd!("examforge")
}

/// Temporary directory with an initialized store
pub fn init_store() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    examforge()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
    dir
}

/// Create a session through the CLI and return its id
pub fn create_session(dir: &Path, user: i64, specialization: i64) -> i64 {
    let output = examforge()
        .current_dir(dir)
        .args([
            "session",
            "create",
            "--user",
            &user.to_string(),
            "--specialization",
            &specialization.to_string(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);
    String::from_utf8_lossy(&output.stdout)
        .trim()
        .parse()
        .unwrap()
}

/// Direct writer for catalog rows, standing in for the import tooling
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    pub fn open(dir: &Path) -> Self {
        let conn = Connection::open(dir.join(".examforge").join("examforge.db")).unwrap();
        Catalog { conn }
    }

    pub fn specialization(&self, name: &str) -> i64 {
        self.conn
            .execute("INSERT INTO specializations (name) VALUES (?1)", params![name])
            .unwrap();
        self.conn.last_insert_rowid()
    }

    pub fn competency(&self, specialization: i64, name: &str, weight: f64) -> i64 {
        self.conn
            .execute(
                "INSERT INTO competencies (specialization_id, name, weight) VALUES (?1, ?2, ?3)",
                params![specialization, name, weight],
            )
            .unwrap();
        self.conn.last_insert_rowid()
    }

    pub fn topic(&self, competency: i64, name: &str) -> i64 {
        self.conn
            .execute(
                "INSERT INTO topics (competency_id, name) VALUES (?1, ?2)",
                params![competency, name],
            )
            .unwrap();
        self.conn.last_insert_rowid()
    }

    pub fn question(&self, topic: i64, level: &str) -> i64 {
        self.conn
            .execute(
                "INSERT INTO questions (topic_id, level, question_text, var_1, var_2, var_3, var_4, correct_answer)
                 VALUES (?1, ?2, ?3, 'a', 'b', 'c', 'd', 2)",
                params![topic, level, format!("{} question for topic {}", level, topic)],
            )
            .unwrap();
        self.conn.last_insert_rowid()
    }

    /// Add `count` topics with one question per level each
    pub fn complete_topics(&self, competency: i64, count: usize) -> Vec<i64> {
        (0..count)
            .map(|i| {
                let topic = self.topic(competency, &format!("topic {}", i));
                for level in ["junior", "middle", "senior"] {
                    self.question(topic, level);
                }
                topic
            })
            .collect()
    }

    pub fn assigned_count(&self, session: i64) -> i64 {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM assigned_questions WHERE session_id = ?1",
                params![session],
                |row| row.get(0),
            )
            .unwrap()
    }

    pub fn generation_state(&self, session: i64) -> String {
        self.conn
            .query_row(
                "SELECT generation_state FROM test_sessions WHERE id = ?1",
                params![session],
                |row| row.get(0),
            )
            .unwrap()
    }
}

/// Specialization with SQL/Statistics/Visualization weighted 0.5/0.3/0.2 and
/// ten complete topics each
pub fn seed_data_analyst(dir: &Path) -> i64 {
    let catalog = Catalog::open(dir);
    let spec = catalog.specialization("Data Analyst");
    for (name, weight) in [("SQL", 0.5), ("Statistics", 0.3), ("Visualization", 0.2)] {
        let comp = catalog.competency(spec, name, weight);
        catalog.complete_topics(comp, 10);
    }
    spec
}
