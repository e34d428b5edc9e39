//! Tests for the commission tier engine

use super::{EPS, assert_close};
use crate::tiers::{TierSchedule, compute_commission, compute_tier1_unit};

fn schedule() -> TierSchedule {
    TierSchedule {
        baseline: 100.0,
        tier1_ratio: 0.9,
        tier2_ratio: 1.0,
        tier1_unit: 10.0,
        tier2_unit: 15.0,
        tier3_unit: 20.0,
    }
}

#[test]
fn test_tier1_unit_keeps_negative_sign() {
    let unit = compute_tier1_unit(2200.0, 3100.0, 58.0);
    assert!(unit < 0.0, "unit commission must not be clamped: {unit}");
    assert_close(unit, -900.0 / 58.0, "tier1 unit");
    assert!((unit + 15.517).abs() < 1e-3);
}

#[test]
fn test_tier1_unit_zero_without_baseline() {
    assert_eq!(compute_tier1_unit(3000.0, 2800.0, 0.0), 0.0);
}

#[test]
fn test_commission_in_middle_tier() {
    let commission = compute_commission(95.0, 100.0, 0.9, 1.0, 10.0, 15.0, 20.0);
    assert_close(commission, 90.0 * 10.0 + 5.0 * 15.0, "commission");
    assert_close(commission, 975.0, "commission");
}

#[test]
fn test_commission_in_each_tier() {
    let s = schedule();
    assert_close(s.commission(50.0), 500.0, "tier 1");
    assert_close(s.commission(90.0), 900.0, "tier 1 limit");
    assert_close(s.commission(100.0), 1050.0, "tier 2 limit");
    assert_close(s.commission(110.0), 1250.0, "tier 3");
}

#[test]
fn test_commission_continuous_at_limits() {
    let s = schedule();
    for limit in [s.tier1_limit(), s.tier2_limit()] {
        let below = s.commission(limit - 1e-9);
        let at = s.commission(limit);
        let above = s.commission(limit + 1e-9);
        assert!((at - below).abs() < 1e-6, "jump below {limit}: {below} vs {at}");
        assert!((above - at).abs() < 1e-6, "jump above {limit}: {at} vs {above}");
    }
}

#[test]
fn test_commission_non_decreasing_in_packages() {
    let s = TierSchedule {
        tier1_unit: 5.0,
        tier2_unit: 50.0,
        tier3_unit: 60.0,
        ..schedule()
    };
    let mut previous = f64::NEG_INFINITY;
    for i in 0..=400 {
        let packages = f64::from(i) * 0.5;
        let commission = s.commission(packages);
        assert!(
            commission + EPS >= previous,
            "commission fell at {packages}: {previous} -> {commission}"
        );
        previous = commission;
    }
}

#[test]
fn test_breakdown_amounts_sum_to_commission() {
    let s = schedule();
    let b = s.breakdown(120.0);
    assert_close(b.tier1_packages, 90.0, "tier1 packages");
    assert_close(b.tier2_packages, 10.0, "tier2 packages");
    assert_close(b.tier3_packages, 20.0, "tier3 packages");
    assert_close(b.total(), s.commission(120.0), "total");
}

#[test]
fn test_equal_limits_skip_middle_tier() {
    let s = TierSchedule {
        tier2_ratio: 0.9,
        ..schedule()
    };
    let b = s.breakdown(95.0);
    assert_eq!(b.tier2_packages, 0.0);
    assert_close(b.total(), 900.0 + 5.0 * 20.0, "commission");
}
