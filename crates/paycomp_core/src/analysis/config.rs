//! Configuration types for scenario sweeps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParameterError;
use crate::model::ParameterSet;

/// Which input a sweep varies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepTarget {
    PurchasedPackages,
    DeliveryVolume,
    /// Rewrites purchased packages as `delivery_volume * pct / 100`
    ConversionRatePct,
    PackPrice,
    OldPurchaseBaseline,
}

impl SweepTarget {
    pub const ALL: [SweepTarget; 5] = [
        SweepTarget::PurchasedPackages,
        SweepTarget::DeliveryVolume,
        SweepTarget::ConversionRatePct,
        SweepTarget::PackPrice,
        SweepTarget::OldPurchaseBaseline,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            SweepTarget::PurchasedPackages => "purchased_packages",
            SweepTarget::DeliveryVolume => "delivery_volume",
            SweepTarget::ConversionRatePct => "conversion_rate_pct",
            SweepTarget::PackPrice => "pack_price",
            SweepTarget::OldPurchaseBaseline => "old_purchase_baseline",
        }
    }

    /// Human readable axis label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            SweepTarget::PurchasedPackages => "Purchased packages",
            SweepTarget::DeliveryVolume => "Delivery volume",
            SweepTarget::ConversionRatePct => "Conversion rate (%)",
            SweepTarget::PackPrice => "Pack price",
            SweepTarget::OldPurchaseBaseline => "Old purchase baseline",
        }
    }

    /// Copy of `params` with this target set to `value`
    #[must_use]
    pub fn apply(self, params: &ParameterSet, value: f64) -> ParameterSet {
        match self {
            SweepTarget::PurchasedPackages => params.with_purchased_packages(value),
            SweepTarget::DeliveryVolume => params.with_delivery_volume(value),
            SweepTarget::ConversionRatePct => params.with_conversion_rate_pct(value),
            SweepTarget::PackPrice => {
                let mut params = params.clone();
                params.pack_price = value;
                params
            }
            SweepTarget::OldPurchaseBaseline => {
                let mut params = params.clone();
                params.old_purchase_baseline = value;
                params
            }
        }
    }
}

impl fmt::Display for SweepTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SweepTarget {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "purchased_packages" | "packages" => Ok(SweepTarget::PurchasedPackages),
            "delivery_volume" | "delivery" => Ok(SweepTarget::DeliveryVolume),
            "conversion_rate_pct" | "conversion_rate" | "conversion" => {
                Ok(SweepTarget::ConversionRatePct)
            }
            "pack_price" | "price" => Ok(SweepTarget::PackPrice),
            "old_purchase_baseline" | "baseline" => Ok(SweepTarget::OldPurchaseBaseline),
            _ => Err(ParameterError::Malformed(format!("unknown sweep target '{s}'"))),
        }
    }
}

/// One-dimensional sweep over a single input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub target: SweepTarget,
    pub min_value: f64,
    pub max_value: f64,
    /// Number of points, endpoints included
    pub step_count: usize,
}

impl SweepConfig {
    #[must_use]
    pub fn new(target: SweepTarget, min_value: f64, max_value: f64, step_count: usize) -> Self {
        Self {
            target,
            min_value,
            max_value,
            step_count,
        }
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        if !self.min_value.is_finite() {
            return Err(ParameterError::NonFinite { field: "min_value" });
        }
        if !self.max_value.is_finite() {
            return Err(ParameterError::NonFinite { field: "max_value" });
        }
        if self.step_count == 0 {
            return Err(ParameterError::OutOfRange {
                field: "step_count",
                reason: "a sweep needs at least one point",
            });
        }
        if self.min_value > self.max_value {
            return Err(ParameterError::OutOfRange {
                field: "min_value",
                reason: "must not exceed max_value",
            });
        }
        Ok(())
    }

    /// Linearly spaced sweep values; a single step sits at the midpoint
    #[must_use]
    pub fn sweep_values(&self) -> Vec<f64> {
        let (min, max) = (self.min_value, self.max_value);
        if self.step_count <= 1 {
            return vec![(min + max) / 2.0];
        }
        let step_size = (max - min) / (self.step_count - 1) as f64;
        (0..self.step_count)
            .map(|i| min + step_size * i as f64)
            .collect()
    }
}
