//! SQLite database module for examforge

mod assignments;
mod catalog;
mod schema;
mod sessions;

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use crate::catalog::ExamStore;
use crate::config::StorageConfig;
use crate::error::{ExamError, Result};
use crate::model::{
    AssignmentRow, CompetencyId, CompetencyWeight, Level, QuestionId, SessionId,
    SpecializationId, TopicId,
};

pub use assignments::AssignedQuestion;
pub use schema::{create_schema, SchemaCreateResult, CURRENT_SCHEMA_VERSION};

/// SQLite database for examforge
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database file at `db_path`
    pub fn open(db_path: &Path, storage: &StorageConfig) -> Result<Self> {
        let conn = Connection::open(db_path).map_err(|e| {
            ExamError::Other(format!(
                "failed to open database at {}: {}",
                db_path.display(),
                e
            ))
        })?;

        conn.busy_timeout(Duration::from_millis(storage.busy_timeout_ms))
            .map_err(|e| ExamError::Other(format!("failed to set busy timeout: {}", e)))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| ExamError::Other(format!("failed to enable WAL mode: {}", e)))?;

        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| ExamError::Other(format!("failed to enable foreign keys: {}", e)))?;

        match create_schema(&conn)
            .map_err(|e| ExamError::Other(format!("failed to create database schema: {}", e)))?
        {
            SchemaCreateResult::Created => {
                tracing::info!(path = %db_path.display(), "created database schema");
            }
            SchemaCreateResult::Current => {}
            SchemaCreateResult::TooNew(version) => {
                return Err(ExamError::UsageError(format!(
                    "database schema version {} is newer than supported version {}",
                    version, CURRENT_SCHEMA_VERSION
                )));
            }
        }

        Ok(Database { conn })
    }

    pub fn get_schema_version(&self) -> Result<i64> {
        self.conn
            .query_row(
                "SELECT value FROM store_meta WHERE key = 'schema_version'",
                [],
                |r| {
                    let s: String = r.get(0)?;
                    Ok(s.parse().unwrap_or(0))
                },
            )
            .map_err(|e| ExamError::Other(format!("failed to get schema version: {}", e)))
    }
}

impl ExamStore for Database {
    fn competency_weights(
        &self,
        specialization: SpecializationId,
    ) -> Result<Vec<CompetencyWeight>> {
        self.list_competency_weights(specialization)
    }

    fn eligible_topics(&self, competency: CompetencyId) -> Result<Vec<TopicId>> {
        self.list_eligible_topics(competency)
    }

    fn questions_by_level(&self, topic: TopicId, level: Level) -> Result<Vec<QuestionId>> {
        self.list_questions_by_level(topic, level)
    }

    fn begin_generation(&self, session: SessionId) -> Result<()> {
        self.claim_session(session)
    }

    fn persist_assignments(&self, session: SessionId, rows: &[AssignmentRow]) -> Result<()> {
        self.insert_assignments(session, rows)
    }

    fn mark_generation_failed(&self, session: SessionId) -> Result<()> {
        self.release_failed_session(session)
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Checkpoint so rapid open/close cycles in tests see committed data
        let _ = self.conn.pragma_update(None, "wal_checkpoint", "TRUNCATE");
    }
}

#[cfg(test)]
pub(crate) mod tests;
