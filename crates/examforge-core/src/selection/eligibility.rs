//! Complete-triplet eligibility of topics

use serde::Serialize;

use crate::model::{Level, TopicId};

/// Question counts per level for one topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicLevelCounts {
    pub topic: TopicId,
    pub name: String,
    pub junior: u32,
    pub middle: u32,
    pub senior: u32,
}

impl TopicLevelCounts {
    pub fn count(&self, level: Level) -> u32 {
        match level {
            Level::Junior => self.junior,
            Level::Middle => self.middle,
            Level::Senior => self.senior,
        }
    }

    /// A topic is complete when every level has at least one question
    pub fn is_complete(&self) -> bool {
        Level::ALL.iter().all(|&level| self.count(level) > 0)
    }

    pub fn missing_levels(&self) -> Vec<Level> {
        Level::ALL
            .iter()
            .copied()
            .filter(|&level| self.count(level) == 0)
            .collect()
    }
}

/// Selects the topics that can yield a full junior/middle/senior triplet.
///
/// Partial topics are dropped entirely; they never contribute a partial
/// triplet.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityFilter;

impl EligibilityFilter {
    pub fn eligible(&self, topics: &[TopicLevelCounts]) -> Vec<TopicId> {
        topics
            .iter()
            .filter(|t| t.is_complete())
            .map(|t| t.topic)
            .collect()
    }
}
