//! Store compensation engine
//!
//! This crate computes what an employee earns under two competing pay
//! schemes and what that means for the store paying them. It supports:
//! - Conversion rate and per-capita package metrics
//! - Three-tier package commission anchored on the old/new base salary gap
//! - Four pay modes (old scheme, new floor, new mid, new low) per role
//! - Store profit and loss with social insurance, city cost and break-even
//! - Ranked mode comparisons, scenario sweeps and tier threshold search
//!
//! Every calculation is a pure function of a [`ParameterSet`].
//!
//! # Builder DSL
//!
//! ```ignore
//! use paycomp_core::config::ParameterBuilder;
//! use paycomp_core::{PayMode, Role, calculate_salary};
//!
//! let params = ParameterBuilder::new()
//!     .delivery(175.0)
//!     .packages(102.0)
//!     .headcount(Role::Staff, 3)
//!     .build()?;
//!
//! let salary = calculate_salary(&params, PayMode::NewMid, Role::Staff)?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod comparison;
pub mod compensation;
pub mod conversion;
pub mod error;
pub mod store;
pub mod tiers;

// ============================================================================
// Scenario tooling
// ============================================================================

pub mod analysis;
pub mod optimization;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::ParameterBuilder;

pub use error::{CalcError, DivisionByZero, ParameterError, Result};

pub use model::{
    BreakEven, BreakEvenStatus, CommissionScheme, Comparison, ComparisonRow,
    ConversionAdjustment, ConversionMetrics, ConversionPolicy, OldSchemeVariant, ParameterSet,
    PayMode, Role, RoleCostLine, RoleTable, SalaryBreakdown, ShortfallDiscount, SocialInsurance, StoreReport,
    TierBreakdown,
};

pub use comparison::{compare, compare_for_role};
pub use compensation::{calculate_breakdown, calculate_salary, calculate_selected};
pub use store::{analyze, analyze_all, analyze_selected};
pub use tiers::{TierSchedule, compute_commission, compute_tier1_unit};

pub use analysis::{ScenarioCache, SweepConfig, SweepResults, SweepTarget, sweep};
pub use optimization::{ThresholdSuggestion, suggest_thresholds};
