//! Tiered commission calculation
//!
//! Commission is piecewise linear in the package count with three segments.
//! The tier limits are fractions of the historical package baseline. Each
//! segment starts where the previous one ended, so the function is
//! continuous at both limits.
//!
//! The tier-1 unit commission is never configured directly. It spreads the
//! gap between the old and the new base salary evenly over the baseline
//! volume, so an employee selling exactly the baseline recovers the old base.

use crate::model::TierBreakdown;

/// Per-package commission of the lowest tier
///
/// `(old_base - new_base) / baseline`, or 0 when the baseline is not
/// positive. A new base above the old one yields a negative unit commission;
/// the sign is preserved.
#[must_use]
pub fn compute_tier1_unit(old_base: f64, new_base: f64, baseline: f64) -> f64 {
    if baseline > 0.0 {
        (old_base - new_base) / baseline
    } else {
        0.0
    }
}

/// Tier limits and unit commissions for one pay mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierSchedule {
    pub baseline: f64,
    pub tier1_ratio: f64,
    pub tier2_ratio: f64,
    pub tier1_unit: f64,
    pub tier2_unit: f64,
    pub tier3_unit: f64,
}

impl TierSchedule {
    #[must_use]
    pub fn tier1_limit(&self) -> f64 {
        self.baseline * self.tier1_ratio
    }

    #[must_use]
    pub fn tier2_limit(&self) -> f64 {
        self.baseline * self.tier2_ratio
    }

    /// Split `packages` across the tiers
    #[must_use]
    pub fn breakdown(&self, packages: f64) -> TierBreakdown {
        self.breakdown_with_limits(packages, self.tier1_limit(), self.tier2_limit())
    }

    /// Split `packages` across tiers bounded by absolute package limits
    #[must_use]
    pub fn breakdown_with_limits(
        &self,
        packages: f64,
        tier1_limit: f64,
        tier2_limit: f64,
    ) -> TierBreakdown {
        let (tier1_packages, tier2_packages, tier3_packages) = if packages <= tier1_limit {
            (packages, 0.0, 0.0)
        } else if packages <= tier2_limit {
            (tier1_limit, packages - tier1_limit, 0.0)
        } else {
            (
                tier1_limit,
                tier2_limit - tier1_limit,
                packages - tier2_limit,
            )
        };

        TierBreakdown {
            tier1_limit,
            tier2_limit,
            tier1_unit: self.tier1_unit,
            tier1_packages,
            tier2_packages,
            tier3_packages,
            tier1_amount: tier1_packages * self.tier1_unit,
            tier2_amount: tier2_packages * self.tier2_unit,
            tier3_amount: tier3_packages * self.tier3_unit,
        }
    }

    /// Commission earned on `packages`
    #[must_use]
    pub fn commission(&self, packages: f64) -> f64 {
        self.breakdown(packages).total()
    }
}

/// Commission earned on `packages` under a three-tier schedule
#[allow(clippy::too_many_arguments)]
#[must_use]
pub fn compute_commission(
    packages: f64,
    baseline: f64,
    tier1_ratio: f64,
    tier2_ratio: f64,
    tier1_unit: f64,
    tier2_unit: f64,
    tier3_unit: f64,
) -> f64 {
    TierSchedule {
        baseline,
        tier1_ratio,
        tier2_ratio,
        tier1_unit,
        tier2_unit,
        tier3_unit,
    }
    .commission(packages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_packages_sum_to_input() {
        let schedule = TierSchedule {
            baseline: 40.0,
            tier1_ratio: 0.9,
            tier2_ratio: 1.0,
            tier1_unit: 7.5,
            tier2_unit: 50.0,
            tier3_unit: 60.0,
        };
        for packages in [0.0, 12.0, 36.0, 38.5, 40.0, 75.0] {
            let b = schedule.breakdown(packages);
            let sum = b.tier1_packages + b.tier2_packages + b.tier3_packages;
            assert!(
                (sum - packages).abs() < 1e-9,
                "packages {packages} split into {sum}"
            );
        }
    }
}
