//! Database tests plus a catalog fixture shared with the assembler tests


use std::path::{Path, PathBuf};

use rusqlite::params;
use tempfile::TempDir;

use super::Database;
use crate::config::StorageConfig;
use crate::model::{
    CompetencyId, Level, QuestionId, SessionId, SpecializationId, TopicId, UserId,
};

/// Temporary database with helpers for writing catalog rows
pub(crate) struct Fixture {
    // Keeps the directory alive for the database's lifetime
    _dir: TempDir,
    path: PathBuf,
    pub db: Database,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("examforge.db");
        let db = Database::open(&path, &StorageConfig::default()).unwrap();
        Fixture {
            _dir: dir,
            path,
            db,
        }
    }

    /// Database file, for opening further connections
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn specialization(&self, name: &str) -> SpecializationId {
        self.db
            .conn
            .execute("INSERT INTO specializations (name) VALUES (?1)", params![name])
            .unwrap();
        SpecializationId(self.db.conn.last_insert_rowid())
    }

    pub fn competency(&self, spec: SpecializationId, name: &str, weight: f64) -> CompetencyId {
        self.db
            .conn
            .execute(
                "INSERT INTO competencies (specialization_id, name, weight) VALUES (?1, ?2, ?3)",
                params![spec.0, name, weight],
            )
            .unwrap();
        CompetencyId(self.db.conn.last_insert_rowid())
    }

    pub fn topic(&self, competency: CompetencyId, name: &str) -> TopicId {
        self.db
            .conn
            .execute(
                "INSERT INTO topics (competency_id, name) VALUES (?1, ?2)",
                params![competency.0, name],
            )
            .unwrap();
        TopicId(self.db.conn.last_insert_rowid())
    }

    pub fn question(&self, topic: TopicId, level: Level) -> QuestionId {
        self.db
            .conn
            .execute(
                "INSERT INTO questions (topic_id, level, question_text, var_1, var_2, correct_answer)
                 VALUES (?1, ?2, ?3, 'yes', 'no', 1)",
                params![topic.0, level.as_str(), format!("{} question on topic {}", level, topic)],
            )
            .unwrap();
        QuestionId(self.db.conn.last_insert_rowid())
    }

    /// Add `count` topics, each with `per_level` questions at every level
    pub fn complete_topics(
        &self,
        competency: CompetencyId,
        count: usize,
        per_level: usize,
    ) -> Vec<TopicId> {
        (0..count)
            .map(|i| {
                let topic = self.topic(competency, &format!("topic {}-{}", competency, i));
                for level in Level::ALL {
                    for _ in 0..per_level {
                        self.question(topic, level);
                    }
                }
                topic
            })
            .collect()
    }

    pub fn session(&self, spec: SpecializationId) -> SessionId {
        self.db.create_session(UserId(1), spec, Some(60)).unwrap()
    }
}
