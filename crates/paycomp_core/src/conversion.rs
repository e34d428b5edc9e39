//! Conversion rate and per-capita metrics
//!
//! The conversion rate is the share of deliveries that ended in a package
//! purchase, in percent. A store with no deliveries yet has a 0% rate; that
//! is a defined state, not an error.

use crate::error::{DivisionByZero, Result};
use crate::model::{ConversionMetrics, ParameterSet};

/// `packages / delivery_volume * 100`, or 0 when there were no deliveries
#[must_use]
pub fn conversion_rate_pct(delivery_volume: f64, packages: f64) -> f64 {
    if delivery_volume == 0.0 {
        return 0.0;
    }
    packages / delivery_volume * 100.0
}

/// Compute conversion rate and packages per employee
///
/// Fails with `DivisionByZero::TotalHeadcount` when no employees are
/// configured.
pub fn compute(params: &ParameterSet) -> Result<ConversionMetrics> {
    params.validate()?;

    let conversion_rate_pct = conversion_rate_pct(params.delivery_volume, params.purchased_packages);

    let headcount = params.total_headcount();
    if headcount == 0 {
        return Err(DivisionByZero::TotalHeadcount.into());
    }

    Ok(ConversionMetrics {
        conversion_rate_pct,
        per_capita_packages: params.purchased_packages / headcount as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_delivery_volume_is_zero_rate() {
        assert_eq!(conversion_rate_pct(0.0, 12.0), 0.0);
    }

    #[test]
    fn test_rate_is_percentage() {
        assert!((conversion_rate_pct(200.0, 50.0) - 25.0).abs() < 1e-12);
    }
}
