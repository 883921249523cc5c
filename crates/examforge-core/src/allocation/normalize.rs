//! Weight validation and normalization

use crate::config::ZeroWeightPolicy;
use crate::error::Result;
use crate::model::CompetencyWeight;

/// Outcome of normalizing a weight vector
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// Fractions in input order, summing to 1
    Proportional(Vec<f64>),
    /// Every weight was zero; quotas are split evenly in input order
    EqualSplit,
    /// No competencies and nothing to allocate
    Empty,
}

/// Validates raw competency weights and turns them into fractions
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightNormalizer {
    policy: ZeroWeightPolicy,
}

impl WeightNormalizer {
    pub fn new(policy: ZeroWeightPolicy) -> Self {
        Self { policy }
    }

    /// Normalize `weights` for a target of `target` triplets.
    ///
    /// Fails when a weight is negative or non-finite, when the collection is
    /// empty but `target > 0`, or when all weights are zero under
    /// [`ZeroWeightPolicy::Reject`].
    pub fn normalize(&self, weights: &[CompetencyWeight], target: u32) -> Result<Normalized> {
        for w in weights {
            if !w.weight.is_finite() || w.weight < 0.0 {
                crate::bail_invalid!(
                    "competency {} ({}) has invalid weight {}",
                    w.id,
                    w.name,
                    w.weight
                );
            }
        }

        if weights.is_empty() {
            if target > 0 {
                crate::bail_invalid!("cannot allocate {} triplets over zero competencies", target);
            }
            return Ok(Normalized::Empty);
        }

        let total: f64 = weights.iter().map(|w| w.weight).sum();
        if total > 0.0 {
            return Ok(Normalized::Proportional(
                weights.iter().map(|w| w.weight / total).collect(),
            ));
        }

        match self.policy {
            ZeroWeightPolicy::EqualSplit => {
                tracing::warn!(
                    competencies = weights.len(),
                    target,
                    "all competency weights are zero; falling back to an equal split"
                );
                Ok(Normalized::EqualSplit)
            }
            ZeroWeightPolicy::Reject => {
                crate::bail_invalid!(
                    "all {} competency weights are zero; re-import weights or set zero_weight_policy = \"equal_split\"",
                    weights.len()
                )
            }
        }
    }
}

/// Split `target` evenly over `count` buckets; the first `target % count`
/// buckets receive one extra unit.
pub fn equal_split(count: usize, target: u32) -> Vec<u32> {
    if count == 0 {
        return Vec::new();
    }
    let base = target / count as u32;
    let remainder = (target % count as u32) as usize;
    (0..count)
        .map(|i| base + u32::from(i < remainder))
        .collect()
}
