//! Test session rows

use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::{ExamError, Result};
use crate::map_db_err;
use crate::model::{GenerationState, SessionId, SpecializationId, TestSession, UserId};

impl Database {
    /// Create a session in `not_started` state
    pub fn create_session(
        &self,
        user: UserId,
        specialization: SpecializationId,
        max_score: Option<i64>,
    ) -> Result<SessionId> {
        if self.specialization_name(specialization)?.is_none() {
            return Err(ExamError::not_found("specialization", specialization));
        }

        let created_at = chrono::Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO test_sessions (user_id, specialization_id, created_at, max_score)
                 VALUES (?1, ?2, ?3, ?4)",
                params![user.0, specialization.0, created_at, max_score],
            )
            .map_err(|e| map_db_err!("insert session", e))?;

        let id = SessionId(self.conn.last_insert_rowid());
        tracing::debug!(session = %id, %user, %specialization, "created session");
        Ok(id)
    }

    pub fn get_session(&self, session: SessionId) -> Result<Option<TestSession>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, user_id, specialization_id, created_at, completed, score,
                        max_score, generation_state
                 FROM test_sessions WHERE id = ?1",
                params![session.0],
                |row| {
                    Ok((
                        TestSession {
                            id: SessionId(row.get(0)?),
                            user: UserId(row.get(1)?),
                            specialization: SpecializationId(row.get(2)?),
                            created_at: row.get(3)?,
                            completed: row.get::<_, i64>(4)? != 0,
                            score: row.get(5)?,
                            max_score: row.get(6)?,
                            generation_state: GenerationState::NotStarted,
                        },
                        row.get::<_, String>(7)?,
                    ))
                },
            )
            .optional()
            .map_err(|e| map_db_err!("query session", e))?;

        match row {
            Some((mut session, state)) => {
                session.generation_state = state.parse()?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }
}
