//! Tests for conversion metrics

use super::assert_close;
use crate::config::ParameterBuilder;
use crate::conversion::{compute, conversion_rate_pct};
use crate::error::{CalcError, DivisionByZero};
use crate::model::Role;

#[test]
fn test_rate_for_reference_store() {
    let params = ParameterBuilder::new()
        .delivery(175.0)
        .packages(102.0)
        .build()
        .unwrap();

    let metrics = compute(&params).unwrap();
    assert_close(metrics.conversion_rate_pct, 102.0 / 175.0 * 100.0, "rate");
    assert!((metrics.conversion_rate_pct - 58.2857).abs() < 1e-4);
}

#[test]
fn test_per_capita_packages_uses_total_headcount() {
    let params = ParameterBuilder::new()
        .packages(60.0)
        .only_headcount(&[(Role::Staff, 3), (Role::Supervisor, 1)])
        .build()
        .unwrap();

    let metrics = compute(&params).unwrap();
    assert_close(metrics.per_capita_packages, 15.0, "per capita");
}

#[test]
fn test_zero_headcount_is_division_by_zero() {
    let params = ParameterBuilder::new().only_headcount(&[]).build().unwrap();

    assert_eq!(
        compute(&params),
        Err(CalcError::DivisionByZero(DivisionByZero::TotalHeadcount))
    );
}

#[test]
fn test_zero_delivery_is_not_an_error() {
    let params = ParameterBuilder::new()
        .delivery(0.0)
        .packages(0.0)
        .build()
        .unwrap();

    let metrics = compute(&params).unwrap();
    assert_eq!(metrics.conversion_rate_pct, 0.0);
    assert_eq!(conversion_rate_pct(0.0, 5.0), 0.0);
}

#[test]
fn test_invalid_parameters_rejected_before_metrics() {
    let params = ParameterBuilder::new().delivery(-1.0).build_unchecked();
    assert!(matches!(
        compute(&params),
        Err(CalcError::InvalidParameter(_))
    ));
}
