//! Sampling topics for a competency quota

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::allocation::Quota;
use crate::model::{CompetencyId, TopicId};

/// Gap between a competency's quota and the triplets actually produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    pub competency: CompetencyId,
    pub name: String,
    pub requested: u32,
    pub available: u32,
}

impl Shortfall {
    pub fn missing(&self) -> u32 {
        self.requested.saturating_sub(self.available)
    }
}

/// Topics drawn for one competency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSample {
    pub topics: Vec<TopicId>,
    pub shortfall: Option<Shortfall>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TopicSampler;

impl TopicSampler {
    /// Draw `min(quota, eligible.len())` distinct topics uniformly at random.
    ///
    /// A quota larger than the eligible set degrades to the eligible count and
    /// records a [`Shortfall`]; it never fails.
    pub fn sample<R: Rng>(&self, quota: &Quota, eligible: &[TopicId], rng: &mut R) -> TopicSample {
        let requested = quota.triplets;
        let take = (requested as usize).min(eligible.len());
        let topics: Vec<TopicId> = eligible.choose_multiple(rng, take).copied().collect();

        let shortfall = if take < requested as usize {
            tracing::warn!(
                competency = %quota.competency,
                name = %quota.name,
                requested,
                available = take,
                "not enough complete topics for competency quota"
            );
            Some(Shortfall {
                competency: quota.competency,
                name: quota.name.clone(),
                requested,
                available: take as u32,
            })
        } else {
            None
        };

        TopicSample { topics, shortfall }
    }
}
