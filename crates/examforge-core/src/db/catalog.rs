//! Read-only catalog queries

use rusqlite::params;

use super::Database;
use crate::error::Result;
use crate::map_db_err;
use crate::model::{CompetencyId, CompetencyWeight, Level, QuestionId, SpecializationId, TopicId};
use crate::selection::TopicLevelCounts;

impl Database {
    /// All specializations, by id
    pub fn list_specializations(&self) -> Result<Vec<(SpecializationId, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM specializations ORDER BY id")
            .map_err(|e| map_db_err!("prepare specializations query", e))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((SpecializationId(row.get(0)?), row.get::<_, String>(1)?))
            })
            .map_err(|e| map_db_err!("query specializations", e))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| map_db_err!("read specialization row", e))
    }

    pub fn specialization_name(&self, specialization: SpecializationId) -> Result<Option<String>> {
        use rusqlite::OptionalExtension;

        self.conn
            .query_row(
                "SELECT name FROM specializations WHERE id = ?1",
                params![specialization.0],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| map_db_err!("query specialization", e))
    }

    /// Competencies of a specialization, heaviest first (ties by id)
    pub fn list_competency_weights(
        &self,
        specialization: SpecializationId,
    ) -> Result<Vec<CompetencyWeight>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, weight FROM competencies
                 WHERE specialization_id = ?1
                 ORDER BY weight DESC, id ASC",
            )
            .map_err(|e| map_db_err!("prepare competency query", e))?;

        let rows = stmt
            .query_map(params![specialization.0], |row| {
                Ok(CompetencyWeight {
                    id: CompetencyId(row.get(0)?),
                    name: row.get(1)?,
                    weight: row.get(2)?,
                })
            })
            .map_err(|e| map_db_err!("query competencies", e))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| map_db_err!("read competency row", e))
    }

    /// Topics with at least one question at each of the three levels
    pub fn list_eligible_topics(&self, competency: CompetencyId) -> Result<Vec<TopicId>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT t.id FROM topics t
                 JOIN questions q ON q.topic_id = t.id
                 WHERE t.competency_id = ?1
                 GROUP BY t.id
                 HAVING COUNT(DISTINCT q.level) = 3
                 ORDER BY t.id",
            )
            .map_err(|e| map_db_err!("prepare eligible topics query", e))?;

        let rows = stmt
            .query_map(params![competency.0], |row| Ok(TopicId(row.get(0)?)))
            .map_err(|e| map_db_err!("query eligible topics", e))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| map_db_err!("read topic row", e))
    }

    pub fn list_questions_by_level(&self, topic: TopicId, level: Level) -> Result<Vec<QuestionId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM questions WHERE topic_id = ?1 AND level = ?2 ORDER BY id")
            .map_err(|e| map_db_err!("prepare questions query", e))?;

        let rows = stmt
            .query_map(params![topic.0, level.as_str()], |row| {
                Ok(QuestionId(row.get(0)?))
            })
            .map_err(|e| map_db_err!("query questions", e))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| map_db_err!("read question row", e))
    }

    /// Question counts per level for every topic of a competency
    pub fn topic_level_counts(&self, competency: CompetencyId) -> Result<Vec<TopicLevelCounts>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT t.id, t.name,
                        SUM(CASE WHEN q.level = 'junior' THEN 1 ELSE 0 END),
                        SUM(CASE WHEN q.level = 'middle' THEN 1 ELSE 0 END),
                        SUM(CASE WHEN q.level = 'senior' THEN 1 ELSE 0 END)
                 FROM topics t
                 LEFT JOIN questions q ON q.topic_id = t.id
                 WHERE t.competency_id = ?1
                 GROUP BY t.id, t.name
                 ORDER BY t.id",
            )
            .map_err(|e| map_db_err!("prepare topic level query", e))?;

        let rows = stmt
            .query_map(params![competency.0], |row| {
                Ok(TopicLevelCounts {
                    topic: TopicId(row.get(0)?),
                    name: row.get(1)?,
                    junior: row.get::<_, i64>(2)? as u32,
                    middle: row.get::<_, i64>(3)? as u32,
                    senior: row.get::<_, i64>(4)? as u32,
                })
            })
            .map_err(|e| map_db_err!("query topic levels", e))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| map_db_err!("read topic level row", e))
    }
}
