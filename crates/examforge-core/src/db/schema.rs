//! SQLite database schema for examforge

use rusqlite::{Connection, Result};

pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Result of schema creation
#[derive(Debug, PartialEq, Eq)]
pub enum SchemaCreateResult {
    /// Fresh database, schema created
    Created,
    /// Schema already at the current version
    Current,
    /// Database was written by a newer version of examforge
    TooNew(i32),
}

const SCHEMA_SQL: &str = r#"
-- Catalog (written by import tooling, read-only to the engine)
CREATE TABLE IF NOT EXISTS specializations (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS competencies (
    id INTEGER PRIMARY KEY,
    specialization_id INTEGER NOT NULL REFERENCES specializations(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    weight REAL NOT NULL DEFAULT 0 CHECK (weight >= 0)
);
CREATE INDEX IF NOT EXISTS idx_competencies_specialization ON competencies(specialization_id);

CREATE TABLE IF NOT EXISTS topics (
    id INTEGER PRIMARY KEY,
    competency_id INTEGER NOT NULL REFERENCES competencies(id) ON DELETE CASCADE,
    name TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_topics_competency ON topics(competency_id);

-- Question content is opaque (possibly encrypted) and never interpreted
CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY,
    topic_id INTEGER NOT NULL REFERENCES topics(id) ON DELETE CASCADE,
    level TEXT NOT NULL CHECK (level IN ('junior', 'middle', 'senior')),
    question_text TEXT NOT NULL,
    var_1 TEXT,
    var_2 TEXT,
    var_3 TEXT,
    var_4 TEXT,
    correct_answer INTEGER
);
CREATE INDEX IF NOT EXISTS idx_questions_topic_level ON questions(topic_id, level);

-- Sessions are created by the surrounding service before generation
CREATE TABLE IF NOT EXISTS test_sessions (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    specialization_id INTEGER NOT NULL REFERENCES specializations(id),
    created_at TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0,
    score INTEGER,
    max_score INTEGER,
    generation_state TEXT NOT NULL DEFAULT 'not_started'
        CHECK (generation_state IN ('not_started', 'generating', 'completed', 'failed'))
);

-- Engine output: one row per assigned question
CREATE TABLE IF NOT EXISTS assigned_questions (
    session_id INTEGER NOT NULL REFERENCES test_sessions(id) ON DELETE CASCADE,
    question_order INTEGER NOT NULL CHECK (question_order >= 1),
    competency_id INTEGER NOT NULL REFERENCES competencies(id),
    topic_id INTEGER NOT NULL REFERENCES topics(id),
    question_id INTEGER NOT NULL REFERENCES questions(id),
    PRIMARY KEY (session_id, question_order),
    UNIQUE (session_id, question_id)
);

-- Store metadata
CREATE TABLE IF NOT EXISTS store_meta (
    key TEXT PRIMARY KEY,
    value TEXT
);
"#;

pub fn create_schema(conn: &Connection) -> Result<SchemaCreateResult> {
    let has_meta: bool = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'store_meta'",
        [],
        |r| r.get::<_, i64>(0).map(|n| n > 0),
    )?;

    let current_version: Option<i32> = if has_meta {
        conn.query_row(
            "SELECT value FROM store_meta WHERE key = 'schema_version'",
            [],
            |r| r.get::<_, String>(0).map(|s| s.parse().unwrap_or(0)),
        )
        .ok()
    } else {
        None
    };

    match current_version {
        None => {
            conn.execute_batch(SCHEMA_SQL)?;
            conn.execute(
                "INSERT OR REPLACE INTO store_meta (key, value) VALUES ('schema_version', ?1)",
                [&CURRENT_SCHEMA_VERSION.to_string()],
            )?;
            Ok(SchemaCreateResult::Created)
        }
        Some(v) if v > CURRENT_SCHEMA_VERSION => Ok(SchemaCreateResult::TooNew(v)),
        Some(_) => {
            // Idempotent; picks up indexes added without a version bump
            conn.execute_batch(SCHEMA_SQL)?;
            Ok(SchemaCreateResult::Current)
        }
    }
}
