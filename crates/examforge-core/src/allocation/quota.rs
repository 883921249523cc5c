//! Largest-remainder rounding with a randomized remainder ranking
//!
//! For shares `w_i` summing to 1 and a target `T`:
//!
//! 1. `cnt_i = T * w_i`, `int_i = floor(cnt_i)`, `frac_i = cnt_i - int_i`
//! 2. `remaining = T - sum(int_i)`
//! 3. `prob_i = uniform(0, frac_i)` (0 when `frac_i` is 0)
//! 4. the `remaining` buckets with the largest `prob_i` get one extra unit
//!
//! The draw in step 3 goes through [`TieBreak`] so callers can pin it.

use std::cmp::Ordering;

use rand::Rng;

/// Source of the per-bucket remainder draws
pub trait TieBreak {
    /// Draw a value in `[0, upper)`; `upper` is a fractional part in `(0, 1)`
    fn draw(&mut self, upper: f64) -> f64;
}

/// Production tie-break backed by any `rand` generator
pub struct RandomTieBreak<'a, R: Rng>(pub &'a mut R);

impl<R: Rng> TieBreak for RandomTieBreak<'_, R> {
    fn draw(&mut self, upper: f64) -> f64 {
        if upper > 0.0 {
            self.0.gen_range(0.0..upper)
        } else {
            0.0
        }
    }
}

/// Integer quotas produced by [`ProportionalAllocator::allocate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaVector {
    /// One count per input share, in input order
    pub counts: Vec<u32>,
    /// Units added (positive) or removed (negative) at the largest bucket to
    /// restore the exact total. Non-zero values indicate a rounding defect.
    pub correction: i64,
}

impl QuotaVector {
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProportionalAllocator;

impl ProportionalAllocator {
    /// Allocate `target` units over `shares` (normalized, summing to 1).
    pub fn allocate<T: TieBreak + ?Sized>(
        &self,
        shares: &[f64],
        target: u32,
        tie_break: &mut T,
    ) -> QuotaVector {
        let n = shares.len();
        if n == 0 {
            return QuotaVector {
                counts: Vec::new(),
                correction: 0,
            };
        }

        let total = f64::from(target);
        let mut counts = Vec::with_capacity(n);
        let mut fractions = Vec::with_capacity(n);
        for &share in shares {
            let cnt = total * share;
            let int = cnt.floor().max(0.0);
            counts.push(int as u32);
            fractions.push((cnt - int).max(0.0));
        }

        let floor_sum: i64 = counts.iter().map(|&c| i64::from(c)).sum();
        let remaining = (i64::from(target) - floor_sum).clamp(0, n as i64) as usize;

        let draws: Vec<f64> = fractions
            .iter()
            .map(|&frac| if frac > 0.0 { tie_break.draw(frac) } else { 0.0 })
            .collect();

        // Stable sort keeps input order among equal draws.
        let mut ranking: Vec<usize> = (0..n).collect();
        ranking.sort_by(|&a, &b| {
            draws[b]
                .partial_cmp(&draws[a])
                .unwrap_or(Ordering::Equal)
        });
        for &idx in ranking.iter().take(remaining) {
            counts[idx] += 1;
        }

        let correction = restore_total(&mut counts, target);
        QuotaVector { counts, correction }
    }
}

/// Force `sum(counts) == target` by adjusting the single largest bucket
/// (first in input order among equals). Returns the applied delta.
fn restore_total(counts: &mut [u32], target: u32) -> i64 {
    let sum: i64 = counts.iter().map(|&c| i64::from(c)).sum();
    let delta = i64::from(target) - sum;
    if delta == 0 || counts.is_empty() {
        return 0;
    }

    let mut largest = 0;
    for (i, &c) in counts.iter().enumerate() {
        if c > counts[largest] {
            largest = i;
        }
    }

    let adjusted = (i64::from(counts[largest]) + delta).max(0);
    tracing::error!(
        bucket = largest,
        before = counts[largest],
        after = adjusted,
        delta,
        target,
        "quota total drifted from target; corrected at largest bucket"
    );
    counts[largest] = adjusted as u32;
    delta
}
