//! Catalog coverage diagnostics
//!
//! Reports, per specialization and competency, how many topics can yield a
//! complete junior/middle/senior triplet and whether that covers the share of
//! the configured target the competency would be allocated.

use serde::Serialize;

use crate::allocation::{Normalized, WeightNormalizer};
use crate::config::GenerationConfig;
use crate::db::Database;
use crate::error::Result;
use crate::model::{CompetencyId, Level, SpecializationId, TopicId};
use crate::selection::EligibilityFilter;

/// Overall readiness of a specialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Every competency can fill its expected quota
    Ready,
    /// Generation will succeed with shortfalls
    Insufficient,
    /// Weights would be rejected at allocation time
    InvalidWeights,
    /// Generation would fail with `NoEligibleTopics`
    NoCompleteTopics,
    /// Generation would fail with `NoCompetencies`
    NoCompetencies,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Ready => "ready",
            Verdict::Insufficient => "insufficient",
            Verdict::InvalidWeights => "invalid_weights",
            Verdict::NoCompleteTopics => "no_complete_topics",
            Verdict::NoCompetencies => "no_competencies",
        }
    }

    /// Whether a generation run would fail outright
    pub fn is_blocking(&self) -> bool {
        !matches!(self, Verdict::Ready | Verdict::Insufficient)
    }
}

/// A topic with questions that is missing at least one level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartialTopic {
    pub topic: TopicId,
    pub name: String,
    pub missing: Vec<Level>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetencyCoverage {
    pub competency: CompetencyId,
    pub name: String,
    pub weight: f64,
    pub topics: usize,
    pub complete_topics: usize,
    pub junior: u32,
    pub middle: u32,
    pub senior: u32,
    /// Quota rounded up, before the random tie-break
    pub expected_triplets: u32,
    pub at_risk: bool,
    /// Topics that cannot yield a triplet until the missing levels are added
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub partial_topics: Vec<PartialTopic>,
}

impl CompetencyCoverage {
    pub fn questions(&self, level: Level) -> u32 {
        match level {
            Level::Junior => self.junior,
            Level::Middle => self.middle,
            Level::Senior => self.senior,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecializationCoverage {
    pub specialization: SpecializationId,
    pub name: String,
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    /// Triplets producible if every complete topic were used once
    pub available_triplets: usize,
    pub competencies: Vec<CompetencyCoverage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    pub triplet_target: u32,
    pub specializations: Vec<SpecializationCoverage>,
}

impl CoverageReport {
    pub fn blocking_count(&self) -> usize {
        self.specializations
            .iter()
            .filter(|s| s.verdict.is_blocking())
            .count()
    }
}

/// Build a coverage report for every specialization in the database
#[tracing::instrument(skip(db, config), fields(triplet_target = config.triplet_target))]
pub fn coverage_report(db: &Database, config: &GenerationConfig) -> Result<CoverageReport> {
    let specializations = db
        .list_specializations()?
        .into_iter()
        .map(|(id, name)| specialization_coverage(db, config, id, name))
        .collect::<Result<Vec<_>>>()?;

    Ok(CoverageReport {
        triplet_target: config.triplet_target,
        specializations,
    })
}

fn specialization_coverage(
    db: &Database,
    config: &GenerationConfig,
    specialization: SpecializationId,
    name: String,
) -> Result<SpecializationCoverage> {
    let weights = db.list_competency_weights(specialization)?;
    let target = config.triplet_target;

    let (shares, problem) =
        match WeightNormalizer::new(config.zero_weight_policy).normalize(&weights, target) {
            Ok(Normalized::Proportional(shares)) => (shares, None),
            Ok(Normalized::EqualSplit) => (vec![1.0 / weights.len() as f64; weights.len()], None),
            Ok(Normalized::Empty) => (Vec::new(), None),
            Err(e) => (vec![0.0; weights.len()], Some(e.to_string())),
        };

    let mut competencies = Vec::with_capacity(weights.len());
    for (w, share) in weights.iter().zip(shares) {
        let counts = db.topic_level_counts(w.id)?;
        let complete_topics = EligibilityFilter.eligible(&counts).len();
        let expected_triplets = (share * f64::from(target)).ceil() as u32;
        let partial_topics = counts
            .iter()
            .filter(|c| !c.is_complete())
            .map(|c| PartialTopic {
                topic: c.topic,
                name: c.name.clone(),
                missing: c.missing_levels(),
            })
            .collect();

        competencies.push(CompetencyCoverage {
            competency: w.id,
            name: w.name.clone(),
            weight: w.weight,
            topics: counts.len(),
            complete_topics,
            junior: counts.iter().map(|c| c.junior).sum(),
            middle: counts.iter().map(|c| c.middle).sum(),
            senior: counts.iter().map(|c| c.senior).sum(),
            expected_triplets,
            at_risk: complete_topics < expected_triplets as usize,
            partial_topics,
        });
    }

    let available_triplets: usize = competencies.iter().map(|c| c.complete_topics).sum();
    let verdict = if competencies.is_empty() {
        Verdict::NoCompetencies
    } else if problem.is_some() {
        Verdict::InvalidWeights
    } else if available_triplets == 0 {
        Verdict::NoCompleteTopics
    } else if competencies.iter().any(|c| c.at_risk) {
        Verdict::Insufficient
    } else {
        Verdict::Ready
    };

    tracing::debug!(%specialization, verdict = verdict.as_str(), available_triplets, "coverage");

    Ok(SpecializationCoverage {
        specialization,
        name,
        verdict,
        problem,
        available_triplets,
        competencies,
    })
}
