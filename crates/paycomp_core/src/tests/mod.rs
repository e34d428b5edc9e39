//! Integration tests for the compensation engine
//!
//! Tests are organized by topic:
//! - `conversion` - Conversion rate and per-capita metrics
//! - `tiers` - Tier-1 unit derivation and tiered commission
//! - `compensation` - Salaries under each pay mode and policy variant
//! - `store` - Store profit and loss, social insurance, break-even
//! - `comparison` - Ranked mode comparison
//! - `analysis` - Scenario sweeps and the comparison cache
//! - `optimization` - Tier threshold suggestion
//! - `config` - JSON parameter bag and builder DSL

mod comparison;
mod config;
mod conversion;
mod tiers;

/// Tolerance for floating point comparisons
pub(crate) const EPS: f64 = 1e-9;

pub(crate) fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "{what}: expected {expected}, got {actual}"
    );
}
