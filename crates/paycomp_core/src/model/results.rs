//! Structured engine output
//!
//! These records are what a presentation layer renders. They carry every
//! number it needs, so nothing has to be re-derived outside the engine.

use serde::{Deserialize, Serialize};

use super::policy::{ConversionAdjustment, PayMode};
use super::role::Role;
use crate::error::DivisionByZero;

/// Conversion rate and per-capita package volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionMetrics {
    pub conversion_rate_pct: f64,
    pub per_capita_packages: f64,
}

/// Package count and amount earned in each commission tier
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TierBreakdown {
    pub tier1_limit: f64,
    pub tier2_limit: f64,
    pub tier1_unit: f64,
    pub tier1_packages: f64,
    pub tier2_packages: f64,
    pub tier3_packages: f64,
    pub tier1_amount: f64,
    pub tier2_amount: f64,
    pub tier3_amount: f64,
}

impl TierBreakdown {
    /// Commission before any conversion-rate adjustment
    #[must_use]
    pub fn total(&self) -> f64 {
        self.tier1_amount + self.tier2_amount + self.tier3_amount
    }
}

/// Salary of one employee under one pay mode, split into components
///
/// `total = base + commission + subsidy + adjustment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    pub mode: PayMode,
    pub role: Role,
    pub base: f64,
    /// Performance pay: bonuses (old scheme) or commission after the
    /// conversion-rate adjustment (new scheme)
    pub commission: f64,
    pub subsidy: f64,
    /// Shortfall discount, zero or negative
    pub adjustment: f64,
    pub total: f64,
    pub conversion_rate_pct: f64,
    pub conversion_adjustment: ConversionAdjustment,
    /// Commission before the conversion-rate adjustment (new scheme only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_commission: Option<f64>,
    /// Per-tier detail (new scheme only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiers: Option<TierBreakdown>,
}

/// Employer social insurance cost per employee and in total
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SocialInsurance {
    pub base: f64,
    pub pension: f64,
    pub medical: f64,
    pub unemployment: f64,
    pub injury: f64,
    pub maternity: f64,
    pub housing_fund: f64,
    pub per_employee: f64,
    pub headcount: i64,
    pub total: f64,
}

/// Salary cost of all employees holding one role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleCostLine {
    pub role: Role,
    pub headcount: i64,
    pub breakdown: SalaryBreakdown,
    pub line_total: f64,
}

/// Package volume needed for net profit to reach zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakEven {
    pub packages: f64,
    /// Delivery volume yielding `packages` at the current conversion rate
    pub delivery_volume: Option<f64>,
    /// Conversion rate yielding `packages` at the current delivery volume
    pub conversion_rate_pct: Option<f64>,
}

/// Break-even outcome of a store report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BreakEvenStatus {
    /// Net profit already positive
    Profitable,
    Required(BreakEven),
    /// Break-even volume undefined (unit profit is zero)
    Undefined { reason: DivisionByZero },
    /// Every package loses money, more volume never helps
    Unreachable,
}

impl BreakEvenStatus {
    #[must_use]
    pub fn break_even(&self) -> Option<&BreakEven> {
        match self {
            BreakEvenStatus::Required(b) => Some(b),
            _ => None,
        }
    }
}

/// Store profit and loss under one pay mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreReport {
    pub mode: PayMode,
    pub conversion_rate_pct: f64,
    pub total_revenue: f64,
    pub unit_profit: f64,
    pub total_profit: f64,
    pub roles: Vec<RoleCostLine>,
    pub salary_total: f64,
    pub social_insurance: SocialInsurance,
    pub total_labor_cost: f64,
    pub city_fixed_cost: f64,
    /// Labor plus fixed city cost
    pub total_cost: f64,
    pub net_profit: f64,
    pub profitable: bool,
    pub break_even: BreakEvenStatus,
}

/// One mode's position in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub rank: usize,
    pub mode: PayMode,
    pub salary: f64,
    pub delta_vs_old: f64,
    pub delta_pct: f64,
}

/// All pay modes side by side for one role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub role: Role,
    pub conversion_rate_pct: f64,
    pub old_salary: f64,
    /// Ranked by salary, highest first
    pub rows: Vec<ComparisonRow>,
    /// New-scheme modes paying the best new-scheme salary
    pub recommended: Vec<PayMode>,
    pub best_new_salary: f64,
    pub below_min_conversion: bool,
}

impl Comparison {
    #[must_use]
    pub fn row(&self, mode: PayMode) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.mode == mode)
    }
}
