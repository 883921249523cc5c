//! Domain model: identifiers, difficulty levels, weights, assignments
//!
//! Catalog entities (competencies, topics, questions) are long-lived reference
//! data owned by import tooling. Quotas and the selection working set live for a
//! single generation call; only [`AssignmentRow`]s are persisted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ExamError, Result};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                $name(value)
            }
        }
    };
}

id_type!(
    /// Specialization (job family) a candidate is tested for
    SpecializationId
);
id_type!(
    /// Weighted skill category within a specialization
    CompetencyId
);
id_type!(
    /// Topic (theme) within a competency
    TopicId
);
id_type!(QuestionId);
id_type!(
    /// Test session created by the surrounding service
    SessionId
);
id_type!(UserId);

/// Question difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Junior,
    Middle,
    Senior,
}

impl Level {
    /// Levels in triplet order
    pub const ALL: [Level; 3] = [Level::Junior, Level::Middle, Level::Senior];

    /// All valid level names
    pub const VALID_LEVELS: &'static [&'static str] = &["junior", "middle", "senior"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Junior => "junior",
            Level::Middle => "middle",
            Level::Senior => "senior",
        }
    }
}

impl FromStr for Level {
    type Err = ExamError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "junior" => Ok(Level::Junior),
            "middle" => Ok(Level::Middle),
            "senior" => Ok(Level::Senior),
            other => Err(ExamError::invalid_input(format!(
                "unknown level: {} (expected: {})",
                other,
                Self::VALID_LEVELS.join(", ")
            ))),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw competency weight as stored by the import tooling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetencyWeight {
    pub id: CompetencyId,
    pub name: String,
    /// Non-negative, arbitrary scale
    pub weight: f64,
}

impl CompetencyWeight {
    pub fn new(id: impl Into<CompetencyId>, name: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            weight,
        }
    }
}

/// One junior/middle/senior question set drawn from a single topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Triplet {
    pub competency: CompetencyId,
    pub topic: TopicId,
    /// Questions in [`Level::ALL`] order
    pub questions: [QuestionId; 3],
}

/// A single persisted assignment: the engine's durable output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentRow {
    /// 1-based, dense within a session
    pub order: u32,
    pub competency: CompetencyId,
    pub topic: TopicId,
    pub question: QuestionId,
    pub level: Level,
}

/// Flatten triplets into ordered assignment rows numbered from 1
pub fn flatten_triplets(triplets: &[Triplet]) -> Vec<AssignmentRow> {
    triplets
        .iter()
        .flat_map(|t| {
            Level::ALL
                .iter()
                .zip(t.questions.iter())
                .map(move |(level, question)| (t.competency, t.topic, *question, *level))
        })
        .enumerate()
        .map(|(i, (competency, topic, question, level))| AssignmentRow {
            order: i as u32 + 1,
            competency,
            topic,
            question,
            level,
        })
        .collect()
}

/// Generation lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationState {
    #[default]
    NotStarted,
    Generating,
    Completed,
    Failed,
}

impl GenerationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationState::NotStarted => "not_started",
            GenerationState::Generating => "generating",
            GenerationState::Completed => "completed",
            GenerationState::Failed => "failed",
        }
    }

    /// Whether a generation attempt may start from this state
    pub fn can_begin(&self) -> bool {
        matches!(self, GenerationState::NotStarted | GenerationState::Failed)
    }
}

impl FromStr for GenerationState {
    type Err = ExamError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "not_started" => Ok(GenerationState::NotStarted),
            "generating" => Ok(GenerationState::Generating),
            "completed" => Ok(GenerationState::Completed),
            "failed" => Ok(GenerationState::Failed),
            other => Err(ExamError::Other(format!(
                "unknown generation state: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Test session as seen by the engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestSession {
    pub id: SessionId,
    pub user: UserId,
    pub specialization: SpecializationId,
    pub created_at: String,
    pub completed: bool,
    pub score: Option<i64>,
    pub max_score: Option<i64>,
    pub generation_state: GenerationState,
}
