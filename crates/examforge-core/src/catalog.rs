//! Storage contract consumed by the test assembler
//!
//! The engine only reads the question catalog and writes one batch of
//! assignments per session. [`crate::db::Database`] is the SQLite
//! implementation; tests can substitute their own.

use crate::error::Result;
use crate::model::{
    AssignmentRow, CompetencyId, CompetencyWeight, Level, QuestionId, SessionId,
    SpecializationId, TopicId,
};

pub trait ExamStore {
    /// Competencies of a specialization, heaviest first (ties by id)
    fn competency_weights(&self, specialization: SpecializationId)
        -> Result<Vec<CompetencyWeight>>;

    /// Topics of a competency with at least one question at every level
    fn eligible_topics(&self, competency: CompetencyId) -> Result<Vec<TopicId>>;

    /// Questions of a topic at one level
    fn questions_by_level(&self, topic: TopicId, level: Level) -> Result<Vec<QuestionId>>;

    /// Move a session into `generating`.
    ///
    /// Fails with `AlreadyGenerated` when the session is generating, completed,
    /// or already has assignments.
    fn begin_generation(&self, session: SessionId) -> Result<()>;

    /// Write all rows in one transaction and mark the session completed.
    /// On error no row remains.
    fn persist_assignments(&self, session: SessionId, rows: &[AssignmentRow]) -> Result<()>;

    /// Move a `generating` session into `failed`
    fn mark_generation_failed(&self, session: SessionId) -> Result<()>;
}
