//! Tests for the mode comparison

use super::assert_close;
use crate::comparison::{compare, compare_for_role};
use crate::config::ParameterBuilder;
use crate::model::{ParameterSet, PayMode, Role};

#[test]
fn test_default_comparison_ranking() {
    let comparison = compare(&ParameterSet::default()).unwrap();

    let order: Vec<PayMode> = comparison.rows.iter().map(|r| r.mode).collect();
    assert_eq!(
        order,
        vec![
            PayMode::OldScheme,
            PayMode::NewFloor,
            PayMode::NewMid,
            PayMode::NewLow
        ]
    );
    let ranks: Vec<usize> = comparison.rows.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
}

#[test]
fn test_deltas_relative_to_old_scheme() {
    let comparison = compare(&ParameterSet::default()).unwrap();
    assert_close(comparison.old_salary, 4000.0, "old");

    let mid = comparison.row(PayMode::NewMid).unwrap();
    assert_close(mid.delta_vs_old, -150.0, "delta");
    assert_close(mid.delta_pct, -3.75, "delta pct");

    let old = comparison.row(PayMode::OldScheme).unwrap();
    assert_eq!(old.delta_vs_old, 0.0);
}

#[test]
fn test_high_volume_ranks_commission_first() {
    // 90 packages: mid 3500 + 2750, low 2800 + 3380, old ~4133
    let params = ParameterBuilder::new().packages(90.0).build().unwrap();
    let comparison = compare(&params).unwrap();

    assert_eq!(comparison.rows[0].mode, PayMode::NewMid);
    assert_eq!(comparison.rows[1].mode, PayMode::NewLow);
    assert_eq!(comparison.recommended, vec![PayMode::NewMid]);
    assert_close(
        comparison.best_new_salary,
        comparison.rows[0].salary,
        "best new salary",
    );
}

#[test]
fn test_recommended_lists_ties() {
    let comparison = compare(&ParameterSet::default()).unwrap();
    // Floor pays 4000, mid and low pay less
    assert_eq!(comparison.recommended, vec![PayMode::NewFloor]);
    assert_close(comparison.best_new_salary, 4000.0, "best");
}

#[test]
fn test_zero_old_salary_gives_zero_percentage() {
    let params = ParameterBuilder::new()
        .old_scheme(0.0, 0.0, 0.0, 0.0)
        .build()
        .unwrap();
    let comparison = compare(&params).unwrap();

    assert_eq!(comparison.old_salary, 0.0);
    assert!(comparison.rows.iter().all(|r| r.delta_pct == 0.0));
}

#[test]
fn test_below_min_conversion_flag() {
    let low = ParameterBuilder::new().packages(40.0).build().unwrap();
    assert!(compare(&low).unwrap().below_min_conversion);
    assert!(!compare(&ParameterSet::default()).unwrap().below_min_conversion);
}

#[test]
fn test_compare_for_role_includes_subsidy() {
    let params = ParameterSet::default();
    let staff = compare_for_role(&params, Role::Staff).unwrap();
    let manager = compare_for_role(&params, Role::CityManager).unwrap();

    assert_eq!(manager.role, Role::CityManager);
    for mode in PayMode::ALL {
        let diff = manager.row(mode).unwrap().salary - staff.row(mode).unwrap().salary;
        assert_close(diff, 1500.0, "city manager subsidy");
    }
}
