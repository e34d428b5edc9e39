//! Per-employee salary under each pay mode
//!
//! - **Old scheme**: old base salary, three bonuses and a performance part
//!   shared across the store's headcount. By default that part is a
//!   volume/conversion term, and below a 50% conversion rate the basic and
//!   position bonuses are halved. The rate-table variant instead pays a
//!   per-package rate picked by pack price, station licence and conversion
//!   band.
//! - **New floor**: by business rule the same figure as the old scheme.
//! - **New mid / new low**: a lower base salary plus tiered commission on the
//!   package count. The conversion policy scales only the commission.
//!
//! Every role except staff also receives its role subsidy.

use crate::conversion::conversion_rate_pct;
use crate::error::{DivisionByZero, ParameterError, Result};
use crate::model::{
    CommissionScheme, ConversionAdjustment, ConversionPolicy, OldSchemeVariant, ParameterSet,
    PayMode, Role, SalaryBreakdown,
};
use crate::tiers::{TierSchedule, compute_tier1_unit};

/// Conversion rate (percent) at and above which the old scheme pays full bonuses
pub const OLD_SCHEME_FULL_BONUS_RATE_PCT: f64 = 50.0;

/// Pack price above which the rate table pays the premium rates
pub const PREMIUM_PACK_PRICE: f64 = 450.0;

/// Conversion band edges (percent) of the old-scheme rate table
pub const RATE_TABLE_BANDS_PCT: [f64; 2] = [50.0, 60.0];

/// Old-scheme commission per package under the rate-table variant
///
/// | pack price | licence | < 50% | 50-60% | >= 60% |
/// |---|---|---|---|---|
/// | > 450 | no | 10 | 15 | 20 |
/// | > 450 | yes | 15 | 20 | 25 |
/// | <= 450 | no | 5 | 10 | 15 |
/// | <= 450 | yes | 10 | 15 | 20 |
#[must_use]
pub fn old_package_rate(
    pack_price: f64,
    has_station_license: bool,
    conversion_rate_pct: f64,
) -> f64 {
    let [low, mid, high] = match (pack_price > PREMIUM_PACK_PRICE, has_station_license) {
        (true, false) => [10.0, 15.0, 20.0],
        (true, true) => [15.0, 20.0, 25.0],
        (false, false) => [5.0, 10.0, 15.0],
        (false, true) => [10.0, 15.0, 20.0],
    };
    let [mid_from, high_from] = RATE_TABLE_BANDS_PCT;
    if conversion_rate_pct < mid_from {
        low
    } else if conversion_rate_pct < high_from {
        mid
    } else {
        high
    }
}

/// Salary of one employee of `role` under `mode`
pub fn calculate_salary(params: &ParameterSet, mode: PayMode, role: Role) -> Result<f64> {
    calculate_breakdown(params, mode, role).map(|b| b.total)
}

/// Salary of one employee of `role` under `mode`, split into components
pub fn calculate_breakdown(
    params: &ParameterSet,
    mode: PayMode,
    role: Role,
) -> Result<SalaryBreakdown> {
    params.validate()?;

    let breakdown = match mode {
        PayMode::OldScheme | PayMode::NewFloor => old_scheme_breakdown(params, mode, role)?,
        PayMode::NewMid => commissioned_breakdown(params, mode, params.new_base_mid, role)?,
        PayMode::NewLow => commissioned_breakdown(params, mode, params.new_base_low, role)?,
    };

    tracing::trace!(
        mode = mode.key(),
        role = role.key(),
        total = breakdown.total,
        "salary computed"
    );
    Ok(breakdown)
}

/// Breakdown for the mode and role selected on the parameter set
pub fn calculate_selected(params: &ParameterSet) -> Result<SalaryBreakdown> {
    calculate_breakdown(params, params.pay_mode, params.selected_role)
}

/// Tier schedule used by a commissioned mode
///
/// Returns `UnsupportedMode` for modes without commission.
pub fn tier_schedule(params: &ParameterSet, mode: PayMode) -> Result<TierSchedule> {
    let new_base = params
        .new_base_for(mode)
        .ok_or(ParameterError::UnsupportedMode {
            mode,
            reason: "mode has no tiered commission",
        })?;
    Ok(schedule_for(params, new_base))
}

/// Scale a commission by the conversion policy
///
/// The floor applies strictly below `min_conversion_rate_pct`, the ceiling
/// strictly above `max_conversion_rate_pct`.
#[must_use]
pub fn apply_conversion_policy(
    params: &ParameterSet,
    conversion_rate_pct: f64,
    raw_commission: f64,
) -> (f64, ConversionAdjustment) {
    let adjustment = if conversion_rate_pct < params.min_conversion_rate_pct {
        ConversionAdjustment::FloorPenalty(params.penalty_rate)
    } else {
        match params.conversion_policy {
            ConversionPolicy::FloorAndCeiling {
                max_conversion_rate_pct,
                ceiling_multiplier,
            } if conversion_rate_pct > max_conversion_rate_pct => {
                ConversionAdjustment::CeilingMultiplier(ceiling_multiplier)
            }
            _ => ConversionAdjustment::None,
        }
    };
    (raw_commission * adjustment.commission_multiplier(), adjustment)
}

fn schedule_for(params: &ParameterSet, new_base: f64) -> TierSchedule {
    TierSchedule {
        baseline: params.old_purchase_baseline,
        tier1_ratio: params.tier1_threshold_ratio,
        tier2_ratio: params.tier2_threshold_ratio,
        tier1_unit: compute_tier1_unit(
            params.old_base_salary,
            new_base,
            params.old_purchase_baseline,
        ),
        tier2_unit: params.tier2_unit_commission,
        tier3_unit: params.tier3_unit_commission,
    }
}

fn old_scheme_breakdown(
    params: &ParameterSet,
    mode: PayMode,
    role: Role,
) -> Result<SalaryBreakdown> {
    let headcount = params.total_headcount();
    if headcount == 0 {
        return Err(DivisionByZero::TotalHeadcount.into());
    }

    let delivery = params.delivery_volume;
    let rate = conversion_rate_pct(delivery, params.purchased_packages);
    let full_bonus = params.old_basic_bonus + params.old_position_bonus;

    let (performance, bonus, conversion_adjustment) = match params.old_scheme_variant {
        OldSchemeVariant::VolumeTerm => {
            let base_calc = (delivery * rate / 100.0 - delivery / 2.0) * 10.0 / headcount as f64;
            if rate >= OLD_SCHEME_FULL_BONUS_RATE_PCT {
                (base_calc, full_bonus, ConversionAdjustment::None)
            } else {
                (base_calc, full_bonus / 2.0, ConversionAdjustment::BonusHalved)
            }
        }
        OldSchemeVariant::RateTable {
            has_station_license,
        } => {
            let unit = old_package_rate(params.pack_price, has_station_license, rate);
            let per_capita = params.purchased_packages * unit / headcount as f64;
            (per_capita, full_bonus, ConversionAdjustment::PackageRate(unit))
        }
    };

    let commission = performance + bonus + params.old_extra_bonus;
    let subsidy = params.subsidy(role);

    Ok(SalaryBreakdown {
        mode,
        role,
        base: params.old_base_salary,
        commission,
        subsidy,
        adjustment: 0.0,
        total: params.old_base_salary + commission + subsidy,
        conversion_rate_pct: rate,
        conversion_adjustment,
        raw_commission: None,
        tiers: None,
    })
}

fn commissioned_breakdown(
    params: &ParameterSet,
    mode: PayMode,
    new_base: f64,
    role: Role,
) -> Result<SalaryBreakdown> {
    let rate = conversion_rate_pct(params.delivery_volume, params.purchased_packages);
    let packages = params.effective_packages();
    let schedule = schedule_for(params, new_base);

    let tiers = match params.commission_scheme {
        CommissionScheme::Tiered => schedule.breakdown(packages),
        CommissionScheme::Flat => {
            // Flat commission is paid on this employee's share of the packages
            let headcount = params.total_headcount();
            if headcount == 0 {
                return Err(DivisionByZero::TotalHeadcount.into());
            }
            let per_capita = packages / headcount as f64;
            schedule.breakdown_with_limits(per_capita, per_capita, per_capita)
        }
    };
    let raw_commission = tiers.total();
    let (commission, conversion_adjustment) = apply_conversion_policy(params, rate, raw_commission);

    let adjustment = match params.shortfall_discount {
        Some(discount) if packages < params.old_purchase_baseline * discount.threshold_ratio => {
            (new_base + commission) * (discount.multiplier - 1.0)
        }
        _ => 0.0,
    };

    let subsidy = params.subsidy(role);

    Ok(SalaryBreakdown {
        mode,
        role,
        base: new_base,
        commission,
        subsidy,
        adjustment,
        total: new_base + commission + subsidy + adjustment,
        conversion_rate_pct: rate,
        conversion_adjustment,
        raw_commission: Some(raw_commission),
        tiers: Some(tiers),
    })
}
