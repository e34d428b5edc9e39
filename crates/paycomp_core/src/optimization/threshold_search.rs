//! Exhaustive threshold search with parallel evaluation

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::compensation::tier_schedule;
use crate::error::{ParameterError, Result};
use crate::model::{ParameterSet, PayMode};
use crate::tiers::TierSchedule;

/// Smallest tier-1 threshold considered, in packages
pub const MIN_TIER1_THRESHOLD: i64 = 10;

/// Grid spacing used when the caller has no preference
pub const DEFAULT_THRESHOLD_STEP: i64 = 5;

/// Best threshold pair found by [`suggest_thresholds`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSuggestion {
    pub mode: PayMode,
    /// Package count the search was run for
    pub packages: i64,
    pub tier1_limit: i64,
    pub tier2_limit: i64,
    /// Limits expressed as fractions of the historical baseline; `None` when
    /// the baseline is 0
    pub tier1_ratio: Option<f64>,
    pub tier2_ratio: Option<f64>,
    /// Tiered commission at the suggested limits
    pub commission: f64,
    /// `packages * tier1_unit`
    pub target: f64,
    /// `|commission - target|`
    pub difference: f64,
}

/// Largest `(t1, t2)` grid the search will scan
pub const MAX_THRESHOLD_CANDIDATES: u64 = 5_000_000;

/// Search integer threshold pairs on a `step` grid
///
/// Tier-1 limits run over `[10, packages)` and tier-2 limits over
/// `[t1 + step, packages + step)`. The pair minimising the distance to the
/// tier-1-only commission wins; ties go to the pair scanned first. Returns
/// `None` when the grid is empty (fewer than 11 packages) and `OutOfRange`
/// when it holds more than [`MAX_THRESHOLD_CANDIDATES`] pairs.
pub fn suggest_thresholds(
    params: &ParameterSet,
    mode: PayMode,
    step: i64,
) -> Result<Option<ThresholdSuggestion>> {
    params.validate()?;
    if step <= 0 {
        return Err(ParameterError::OutOfRange {
            field: "step",
            reason: "threshold step must be positive",
        }
        .into());
    }
    let schedule = tier_schedule(params, mode)?;

    // Thresholds are whole packages; fractional counts are truncated
    let packages = params.effective_packages().trunc() as i64;
    let target = packages as f64 * schedule.tier1_unit;

    let candidates = candidate_count(packages, step);
    if candidates > MAX_THRESHOLD_CANDIDATES {
        return Err(ParameterError::OutOfRange {
            field: "step",
            reason: "threshold grid too large for this package count; use a larger step",
        }
        .into());
    }
    tracing::debug!(
        mode = mode.key(),
        packages,
        candidates,
        "searching tier thresholds"
    );

    let tier1_limits: Vec<i64> = (MIN_TIER1_THRESHOLD..packages)
        .step_by(step as usize)
        .collect();
    let scan = |&t1: &i64| best_for_tier1(&schedule, packages, target, t1, step);

    // Reductions combine neighbours in scan order, so the earlier pair
    // survives a tie
    #[cfg(feature = "parallel")]
    let best = tier1_limits
        .par_iter()
        .filter_map(scan)
        .reduce_with(earlier_minimum);

    #[cfg(not(feature = "parallel"))]
    let best = tier1_limits.iter().filter_map(scan).reduce(earlier_minimum);

    Ok(best.map(|candidate| {
        let baseline = params.old_purchase_baseline;
        let ratio = |limit: i64| (baseline > 0.0).then(|| limit as f64 / baseline);
        ThresholdSuggestion {
            mode,
            packages,
            tier1_limit: candidate.tier1_limit,
            tier2_limit: candidate.tier2_limit,
            tier1_ratio: ratio(candidate.tier1_limit),
            tier2_ratio: ratio(candidate.tier2_limit),
            commission: candidate.commission,
            target,
            difference: candidate.difference,
        }
    }))
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    tier1_limit: i64,
    tier2_limit: i64,
    commission: f64,
    difference: f64,
}

/// Number of `(t1, t2)` pairs on the grid, saturating just past the cap
fn candidate_count(packages: i64, step: i64) -> u64 {
    let mut total: u64 = 0;
    for t1 in (MIN_TIER1_THRESHOLD..packages).step_by(step as usize) {
        total = total.saturating_add(((packages - t1) as u64).div_ceil(step as u64));
        if total > MAX_THRESHOLD_CANDIDATES {
            break;
        }
    }
    total
}

/// Closest tier-2 limit for one tier-1 limit, first minimum in scan order
fn best_for_tier1(
    schedule: &TierSchedule,
    packages: i64,
    target: f64,
    t1: i64,
    step: i64,
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for t2 in (t1.saturating_add(step)..packages.saturating_add(step)).step_by(step as usize) {
        let commission = commission_at(schedule, packages, t1, t2);
        let difference = (commission - target).abs();
        if best.is_none_or(|b| difference < b.difference) {
            best = Some(Candidate {
                tier1_limit: t1,
                tier2_limit: t2,
                commission,
                difference,
            });
        }
    }
    best
}

fn earlier_minimum(a: Candidate, b: Candidate) -> Candidate {
    if b.difference < a.difference { b } else { a }
}

fn commission_at(schedule: &TierSchedule, packages: i64, t1: i64, t2: i64) -> f64 {
    schedule
        .breakdown_with_limits(packages as f64, t1 as f64, t2 as f64)
        .total()
}
