//! Sweep evaluation.

use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::config::{SweepConfig, SweepTarget};
use crate::compensation::calculate_salary;
use crate::conversion::conversion_rate_pct;
use crate::error::Result;
use crate::model::{ParameterSet, PayMode, Role};
use crate::store::analyze;

/// Outcome at one sweep value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub value: f64,
    pub conversion_rate_pct: f64,
    /// Salary of one employee of the selected role, per mode
    pub salaries: BTreeMap<PayMode, f64>,
    /// Store net profit, per mode
    pub net_profit: BTreeMap<PayMode, f64>,
}

impl SweepPoint {
    #[must_use]
    pub fn salary(&self, mode: PayMode) -> Option<f64> {
        self.salaries.get(&mode).copied()
    }

    #[must_use]
    pub fn net_profit(&self, mode: PayMode) -> Option<f64> {
        self.net_profit.get(&mode).copied()
    }
}

/// All points of a sweep, in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResults {
    pub target: SweepTarget,
    pub role: Role,
    pub points: Vec<SweepPoint>,
}

impl SweepResults {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sweep values in order
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// `(value, salary)` pairs for one mode
    #[must_use]
    pub fn salary_series(&self, mode: PayMode) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.salary(mode).map(|s| (p.value, s)))
            .collect()
    }

    /// `(value, net profit)` pairs for one mode
    #[must_use]
    pub fn net_profit_series(&self, mode: PayMode) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.net_profit(mode).map(|n| (p.value, n)))
            .collect()
    }

    /// Smallest sweep value at which the store turns a profit under `mode`
    #[must_use]
    pub fn first_profitable(&self, mode: PayMode) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.net_profit(mode).is_some_and(|n| n > 0.0))
            .map(|p| p.value)
    }
}

/// Evaluate every pay mode at each sweep value
///
/// Points are evaluated in parallel when the `parallel` feature is enabled;
/// results keep the order of [`SweepConfig::sweep_values`]. The first failing
/// point aborts the sweep.
pub fn sweep(params: &ParameterSet, config: &SweepConfig) -> Result<SweepResults> {
    params.validate()?;
    config.validate()?;

    let values = config.sweep_values();
    tracing::debug!(
        target = config.target.key(),
        points = values.len(),
        "running sweep"
    );

    #[cfg(feature = "parallel")]
    let points = values
        .par_iter()
        .map(|&value| evaluate_point(params, config.target, value))
        .collect::<Result<Vec<_>>>()?;

    #[cfg(not(feature = "parallel"))]
    let points = values
        .iter()
        .map(|&value| evaluate_point(params, config.target, value))
        .collect::<Result<Vec<_>>>()?;

    Ok(SweepResults {
        target: config.target,
        role: params.selected_role,
        points,
    })
}

fn evaluate_point(params: &ParameterSet, target: SweepTarget, value: f64) -> Result<SweepPoint> {
    let scenario = target.apply(params, value);

    let mut salaries = BTreeMap::new();
    let mut net_profit = BTreeMap::new();
    for mode in PayMode::ALL {
        salaries.insert(mode, calculate_salary(&scenario, mode, scenario.selected_role)?);
        net_profit.insert(mode, analyze(&scenario, mode)?.net_profit);
    }

    Ok(SweepPoint {
        value,
        conversion_rate_pct: conversion_rate_pct(
            scenario.delivery_volume,
            scenario.purchased_packages,
        ),
        salaries,
        net_profit,
    })
}
