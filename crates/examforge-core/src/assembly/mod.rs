//! Test assembly: allocation, per-competency selection and persistence
//!
//! One call to [`TestAssembler::generate`] is one unit of work. Catalog reads
//! happen before anything is written; the write phase is a single store
//! transaction. The session is claimed up front, so a second attempt on the
//! same session fails with `AlreadyGenerated` instead of doubling the rows.

use std::cmp::Ordering;
use std::time::Instant;

use rand::Rng;
use serde::Serialize;

use crate::allocation::{allocate_quotas, Allocation, Quota, RandomTieBreak};
use crate::catalog::ExamStore;
use crate::config::{GenerationConfig, MAX_TRIPLET_TARGET, QUESTIONS_PER_TRIPLET};
use crate::error::{ExamError, Result};
use crate::logging::GenerationMetrics;
use crate::model::{flatten_triplets, SessionId, SpecializationId, Triplet};
use crate::selection::{QuestionPicker, Shortfall, TopicSampler};
use crate::{bail_invalid, log_generation_metrics, trace_time};

/// Input to a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub session: SessionId,
    pub specialization: SpecializationId,
    /// Overrides `generation.triplet_target` when set
    pub triplet_target: Option<u32>,
}

/// Outcome of a successful generation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    pub session: SessionId,
    pub specialization: SpecializationId,
    pub target_triplets: u32,
    pub generated_triplets: u32,
    /// Questions persisted (three per triplet)
    pub generated_count: u32,
    pub quotas: Vec<Quota>,
    pub shortfalls: Vec<Shortfall>,
    pub equal_split: bool,
}

impl GenerationReport {
    pub fn is_complete(&self) -> bool {
        self.shortfalls.is_empty() && self.generated_triplets == self.target_triplets
    }
}

struct Selection {
    triplets: Vec<Triplet>,
    shortfalls: Vec<Shortfall>,
}

/// Generates a session's question set against an [`ExamStore`]
pub struct TestAssembler<'a, S: ExamStore + ?Sized> {
    store: &'a S,
    config: &'a GenerationConfig,
    metrics: &'a GenerationMetrics,
}

impl<'a, S: ExamStore + ?Sized> TestAssembler<'a, S> {
    pub fn new(store: &'a S, config: &'a GenerationConfig, metrics: &'a GenerationMetrics) -> Self {
        Self {
            store,
            config,
            metrics,
        }
    }

    /// Compute quotas for a specialization without touching any session
    pub fn plan<R: Rng>(
        &self,
        specialization: SpecializationId,
        triplet_target: Option<u32>,
        rng: &mut R,
    ) -> Result<Allocation> {
        let target = triplet_target.unwrap_or(self.config.triplet_target);
        if target == 0 {
            bail_invalid!("triplet target must be at least 1");
        }
        if target > MAX_TRIPLET_TARGET {
            bail_invalid!(
                "triplet target {} exceeds the maximum of {}",
                target,
                MAX_TRIPLET_TARGET
            );
        }

        let mut weights = self.store.competency_weights(specialization)?;
        if weights.is_empty() {
            return Err(ExamError::NoCompetencies { specialization });
        }
        // Heaviest first; stable so equal weights keep store order
        weights.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));

        let allocation = allocate_quotas(
            &weights,
            target,
            self.config.zero_weight_policy,
            &mut RandomTieBreak(&mut *rng),
        )?;
        if allocation.correction != 0 {
            self.metrics.record_quota_correction();
        }

        tracing::debug!(
            %specialization,
            target,
            competencies = allocation.quotas.len(),
            equal_split = allocation.equal_split,
            "allocated quotas"
        );
        Ok(allocation)
    }

    /// Generate and persist the question set for one session
    #[tracing::instrument(
        skip(self, request, rng),
        fields(session = %request.session, specialization = %request.specialization)
    )]
    pub fn generate<R: Rng>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> Result<GenerationReport> {
        let start = Instant::now();
        let allocation = self.plan(request.specialization, request.triplet_target, rng)?;
        trace_time!(start, "allocate");

        if let Err(e) = self.store.begin_generation(request.session) {
            if matches!(e, ExamError::AlreadyGenerated { .. }) {
                self.metrics.record_conflict();
            }
            return Err(e);
        }
        self.metrics.record_started();

        let result = self
            .select(&allocation, rng)
            .and_then(|selection| self.persist(request, &allocation, selection));

        match &result {
            Ok(report) => {
                let shortfall_units: u64 =
                    report.shortfalls.iter().map(|s| u64::from(s.missing())).sum();
                self.metrics
                    .record_completed(u64::from(report.generated_triplets), shortfall_units);
                tracing::info!(
                    generated = report.generated_count,
                    target = u64::from(report.target_triplets) * u64::from(QUESTIONS_PER_TRIPLET),
                    shortfalls = report.shortfalls.len(),
                    "test generated"
                );
            }
            Err(ExamError::AlreadyGenerated { .. }) => {
                // Another writer completed the session; its state is theirs
                self.metrics.record_conflict();
            }
            Err(e) => {
                self.metrics.record_failed();
                tracing::error!(error = %e, "generation failed");
                if let Err(mark_err) = self.store.mark_generation_failed(request.session) {
                    tracing::error!(error = %mark_err, "could not mark session failed");
                }
            }
        }

        trace_time!(start, "generate");
        log_generation_metrics!(self.metrics, "generate");
        result
    }

    /// Draw topics and questions for every competency with a positive quota
    fn select<R: Rng>(&self, allocation: &Allocation, rng: &mut R) -> Result<Selection> {
        let mut triplets = Vec::new();
        let mut shortfalls = Vec::new();

        for quota in allocation.quotas.iter().filter(|q| q.triplets > 0) {
            let start = Instant::now();
            let eligible = self.store.eligible_topics(quota.competency)?;
            let sample = TopicSampler.sample(quota, &eligible, rng);

            let mut produced = 0u32;
            for topic in &sample.topics {
                if let Some(triplet) =
                    QuestionPicker.pick(self.store, quota.competency, *topic, rng)?
                {
                    triplets.push(triplet);
                    produced += 1;
                }
            }

            if produced < quota.triplets {
                let shortfall = sample.shortfall.unwrap_or_else(|| Shortfall {
                    competency: quota.competency,
                    name: quota.name.clone(),
                    requested: quota.triplets,
                    available: produced,
                });
                shortfalls.push(Shortfall {
                    available: produced,
                    ..shortfall
                });
            }
            trace_time!(start, "select", competency = quota.competency.0);
        }

        Ok(Selection {
            triplets,
            shortfalls,
        })
    }

    fn persist(
        &self,
        request: &GenerationRequest,
        allocation: &Allocation,
        selection: Selection,
    ) -> Result<GenerationReport> {
        if selection.triplets.is_empty() {
            return Err(ExamError::NoEligibleTopics {
                specialization: request.specialization,
            });
        }

        let rows = flatten_triplets(&selection.triplets);
        self.store.persist_assignments(request.session, &rows)?;

        Ok(GenerationReport {
            session: request.session,
            specialization: request.specialization,
            target_triplets: allocation.target,
            generated_triplets: selection.triplets.len() as u32,
            generated_count: rows.len() as u32,
            quotas: allocation.quotas.clone(),
            shortfalls: selection.shortfalls,
            equal_split: allocation.equal_split,
        })
    }
}
