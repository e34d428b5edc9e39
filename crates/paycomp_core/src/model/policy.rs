//! Pay modes and the rule variants a caller selects between
//!
//! Several generations of the pay rules disagree on details (conversion-rate
//! bands, tier handling, shortfall discounts). Each variant is modelled here
//! as an explicit, serializable option instead of being hardcoded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Pay scheme used to compute a salary
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PayMode {
    /// Old pay scheme (base, bonuses and a performance part)
    OldScheme,
    /// New scheme floor: identical to the old scheme by business rule
    #[default]
    NewFloor,
    /// New scheme with the mid base salary plus tiered commission
    NewMid,
    /// New scheme with the low base salary plus tiered commission
    NewLow,
}

impl PayMode {
    /// All modes in enumeration order (also the tie-break order for rankings)
    pub const ALL: [PayMode; 4] = [
        PayMode::OldScheme,
        PayMode::NewFloor,
        PayMode::NewMid,
        PayMode::NewLow,
    ];

    /// Modes belonging to the new pay scheme
    pub const NEW: [PayMode; 3] = [PayMode::NewFloor, PayMode::NewMid, PayMode::NewLow];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            PayMode::OldScheme => "old_scheme",
            PayMode::NewFloor => "new_floor",
            PayMode::NewMid => "new_mid",
            PayMode::NewLow => "new_low",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PayMode::OldScheme => "Old scheme",
            PayMode::NewFloor => "New floor",
            PayMode::NewMid => "New base (mid)",
            PayMode::NewLow => "New base (low)",
        }
    }

    /// Whether the mode pays base + tiered commission
    #[must_use]
    pub const fn is_commissioned(self) -> bool {
        matches!(self, PayMode::NewMid | PayMode::NewLow)
    }
}

impl fmt::Display for PayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "old" | "old_scheme" => Ok(PayMode::OldScheme),
            "floor" | "new_floor" => Ok(PayMode::NewFloor),
            "mid" | "new_mid" => Ok(PayMode::NewMid),
            "low" | "new_low" => Ok(PayMode::NewLow),
            _ => Err(format!("unknown pay mode '{s}'")),
        }
    }
}

/// How the conversion rate adjusts the commission component
///
/// The floor (`min_conversion_rate_pct` / `penalty_rate` on the parameter
/// set) applies in both variants. The ceiling only exists when the caller
/// selects `FloorAndCeiling`; its multiplier may be a bonus (> 1) or a
/// discount (< 1).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversionPolicy {
    #[default]
    FloorOnly,
    FloorAndCeiling {
        max_conversion_rate_pct: f64,
        ceiling_multiplier: f64,
    },
}

/// How the commission is derived from the package count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommissionScheme {
    /// Three-tier piecewise-linear commission
    #[default]
    Tiered,
    /// Thresholds disabled: every package earns the tier-1 unit commission
    Flat,
}

/// Formula for the performance part of the old-scheme salary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OldSchemeVariant {
    /// Delivery/conversion term shared across headcount; below a 50%
    /// conversion rate the basic and position bonuses are halved
    #[default]
    VolumeTerm,
    /// Per-package rate looked up by pack price, station licence and
    /// conversion band, with the store total shared across headcount
    RateTable { has_station_license: bool },
}

/// Discount on base + commission when the package count falls short of a
/// fraction of the historical baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShortfallDiscount {
    /// Fraction of `old_purchase_baseline` below which the discount applies
    pub threshold_ratio: f64,
    /// Multiplier applied to base + commission
    pub multiplier: f64,
}

/// Which conversion-rate rule fired for a salary
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "multiplier", rename_all = "snake_case")]
pub enum ConversionAdjustment {
    #[default]
    None,
    /// Old scheme below 50%: basic + position bonus halved
    BonusHalved,
    /// Commission multiplied by the floor penalty rate
    FloorPenalty(f64),
    /// Commission multiplied by the ceiling multiplier
    CeilingMultiplier(f64),
    /// Old-scheme per-package rate picked by the conversion band
    PackageRate(f64),
}

impl ConversionAdjustment {
    /// Multiplier applied to the commission (1.0 when none)
    #[must_use]
    pub fn commission_multiplier(self) -> f64 {
        match self {
            ConversionAdjustment::FloorPenalty(m) | ConversionAdjustment::CeilingMultiplier(m) => m,
            ConversionAdjustment::None
            | ConversionAdjustment::BonusHalved
            | ConversionAdjustment::PackageRate(_) => 1.0,
        }
    }
}
