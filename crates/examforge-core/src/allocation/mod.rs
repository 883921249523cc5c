//! Turning competency weights into per-competency triplet quotas

pub mod normalize;
pub mod quota;

use serde::Serialize;

use crate::config::ZeroWeightPolicy;
use crate::error::Result;
use crate::model::{CompetencyId, CompetencyWeight};
pub use normalize::{equal_split, Normalized, WeightNormalizer};
pub use quota::{ProportionalAllocator, QuotaVector, RandomTieBreak, TieBreak};

/// Triplet quota for one competency
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quota {
    pub competency: CompetencyId,
    pub name: String,
    pub weight: f64,
    /// Normalized share of the target (`1 / n` under an equal split)
    pub share: f64,
    pub triplets: u32,
}

/// Quotas for a whole specialization; never persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    pub target: u32,
    pub quotas: Vec<Quota>,
    pub equal_split: bool,
    /// Non-zero when the rounding total had to be repaired
    pub correction: i64,
}

impl Allocation {
    pub fn total(&self) -> u64 {
        self.quotas.iter().map(|q| u64::from(q.triplets)).sum()
    }
}

/// Normalize `weights` and allocate `target` triplets across them.
///
/// Quotas are returned in the order of `weights`.
pub fn allocate_quotas<T: TieBreak + ?Sized>(
    weights: &[CompetencyWeight],
    target: u32,
    policy: ZeroWeightPolicy,
    tie_break: &mut T,
) -> Result<Allocation> {
    let normalized = WeightNormalizer::new(policy).normalize(weights, target)?;

    let (shares, counts, correction, equal) = match normalized {
        Normalized::Empty => (Vec::new(), Vec::new(), 0, false),
        Normalized::EqualSplit => {
            let share = 1.0 / weights.len() as f64;
            (
                vec![share; weights.len()],
                equal_split(weights.len(), target),
                0,
                true,
            )
        }
        Normalized::Proportional(shares) => {
            let quotas = ProportionalAllocator.allocate(&shares, target, tie_break);
            (shares, quotas.counts, quotas.correction, false)
        }
    };

    let quotas = weights
        .iter()
        .zip(shares)
        .zip(counts)
        .map(|((w, share), triplets)| Quota {
            competency: w.id,
            name: w.name.clone(),
            weight: w.weight,
            share,
            triplets,
        })
        .collect();

    Ok(Allocation {
        target,
        quotas,
        equal_split: equal,
        correction,
    })
}
