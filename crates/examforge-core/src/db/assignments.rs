//! Generation state transitions and assignment persistence

use rusqlite::{params, OptionalExtension, Transaction, TransactionBehavior};
use serde::Serialize;

use super::Database;
use crate::error::{ExamError, Result};
use crate::map_db_err;
use crate::model::{
    AssignmentRow, CompetencyId, GenerationState, Level, QuestionId, SessionId, TopicId,
};

/// Assigned question joined with its catalog context, for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignedQuestion {
    pub order: u32,
    pub level: Level,
    pub competency: CompetencyId,
    pub competency_name: String,
    pub topic: TopicId,
    pub topic_name: String,
    pub question: QuestionId,
    /// Opaque; may be encrypted by the import tooling
    pub question_text: String,
    pub options: Vec<String>,
}

/// UNIQUE and PRIMARY KEY violations mean another writer got there first
fn is_duplicate_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == rusqlite::ErrorCode::ConstraintViolation
                && (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
        }
        _ => false,
    }
}

impl Database {
    /// Atomically move a session from `not_started` or `failed` into `generating`
    pub fn claim_session(&self, session: SessionId) -> Result<()> {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)
            .map_err(|e| ExamError::transaction("begin claim", e))?;

        let state: Option<String> = tx
            .query_row(
                "SELECT generation_state FROM test_sessions WHERE id = ?1",
                params![session.0],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| map_db_err!("query session state", e))?;

        let state: GenerationState = match state {
            Some(s) => s.parse()?,
            None => return Err(ExamError::not_found("session", session)),
        };

        let existing: i64 = tx
            .query_row(
                "SELECT COUNT(*) FROM assigned_questions WHERE session_id = ?1",
                params![session.0],
                |row| row.get(0),
            )
            .map_err(|e| map_db_err!("count assignments", e))?;

        if !state.can_begin() || existing > 0 {
            tracing::debug!(%session, %state, existing, "refusing to claim session");
            return Err(ExamError::AlreadyGenerated { session });
        }

        tx.execute(
            "UPDATE test_sessions SET generation_state = 'generating' WHERE id = ?1",
            params![session.0],
        )
        .map_err(|e| map_db_err!("update session state", e))?;

        tx.commit()
            .map_err(|e| ExamError::transaction("commit claim", e))?;

        tracing::debug!(%session, from = %state, "session claimed for generation");
        Ok(())
    }

    /// Insert every row and complete the session, all or nothing
    pub fn insert_assignments(&self, session: SessionId, rows: &[AssignmentRow]) -> Result<()> {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)
            .map_err(|e| ExamError::persistence(session, e))?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO assigned_questions
                     (session_id, question_order, competency_id, topic_id, question_id)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .map_err(|e| ExamError::persistence(session, e))?;

            for row in rows {
                stmt.execute(params![
                    session.0,
                    row.order,
                    row.competency.0,
                    row.topic.0,
                    row.question.0
                ])
                .map_err(|e| {
                    if is_duplicate_violation(&e) {
                        ExamError::AlreadyGenerated { session }
                    } else {
                        ExamError::persistence(session, e)
                    }
                })?;
            }
        }

        tx.execute(
            "UPDATE test_sessions SET generation_state = 'completed' WHERE id = ?1",
            params![session.0],
        )
        .map_err(|e| ExamError::persistence(session, e))?;

        tx.commit()
            .map_err(|e| ExamError::persistence(session, e))?;

        tracing::info!(%session, rows = rows.len(), "assignments persisted");
        Ok(())
    }

    /// Move a `generating` session into `failed`; other states are left alone
    pub fn release_failed_session(&self, session: SessionId) -> Result<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE test_sessions SET generation_state = 'failed'
                 WHERE id = ?1 AND generation_state = 'generating'",
                params![session.0],
            )
            .map_err(|e| map_db_err!("mark session failed", e))?;

        if changed == 0 {
            tracing::debug!(%session, "session was not generating; state unchanged");
        }
        Ok(())
    }

    pub fn count_assignments(&self, session: SessionId) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM assigned_questions WHERE session_id = ?1",
                params![session.0],
                |row| row.get(0),
            )
            .map_err(|e| map_db_err!("count assignments", e))?;
        Ok(count as usize)
    }

    /// Assignments of a session in question order
    pub fn list_assignments(&self, session: SessionId) -> Result<Vec<AssignedQuestion>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT a.question_order, q.level, a.competency_id, c.name, a.topic_id, t.name,
                        a.question_id, q.question_text, q.var_1, q.var_2, q.var_3, q.var_4
                 FROM assigned_questions a
                 JOIN questions q ON q.id = a.question_id
                 JOIN competencies c ON c.id = a.competency_id
                 JOIN topics t ON t.id = a.topic_id
                 WHERE a.session_id = ?1
                 ORDER BY a.question_order",
            )
            .map_err(|e| map_db_err!("prepare assignments query", e))?;

        let rows = stmt
            .query_map(params![session.0], |row| {
                let options = (8..12)
                    .map(|i| row.get::<_, Option<String>>(i))
                    .collect::<rusqlite::Result<Vec<_>>>()?
                    .into_iter()
                    .flatten()
                    .collect();
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, String>(1)?,
                    AssignedQuestion {
                        order: 0,
                        level: Level::Junior,
                        competency: CompetencyId(row.get(2)?),
                        competency_name: row.get(3)?,
                        topic: TopicId(row.get(4)?),
                        topic_name: row.get(5)?,
                        question: QuestionId(row.get(6)?),
                        question_text: row.get(7)?,
                        options,
                    },
                ))
            })
            .map_err(|e| map_db_err!("query assignments", e))?;

        let mut assigned = Vec::new();
        for row in rows {
            let (order, level, mut question) =
                row.map_err(|e| map_db_err!("read assignment row", e))?;
            question.order = order;
            question.level = level.parse()?;
            assigned.push(question);
        }
        Ok(assigned)
    }
}
