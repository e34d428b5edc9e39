//! Store-level financial reconciliation
//!
//! Aggregates per-role salaries over the headcount, adds employer social
//! insurance and the fixed city cost, and compares the result with the
//! profit earned on packages. Loss-making stores also get the package volume
//! they would need to break even at today's cost structure.

use crate::compensation::calculate_breakdown;
use crate::conversion::conversion_rate_pct;
use crate::error::{DivisionByZero, Result};
use crate::model::{
    BreakEven, BreakEvenStatus, ParameterSet, PayMode, RoleCostLine, SocialInsurance,
    StoreReport,
};

/// Employer social insurance cost for the whole store
#[must_use]
pub fn social_insurance(params: &ParameterSet) -> SocialInsurance {
    let base = params.social_insurance_base;
    let item = |rate: f64| base * rate / 100.0;

    let per_employee = base * params.social_insurance_rate_pct() / 100.0;
    let headcount = params.total_headcount();

    SocialInsurance {
        base,
        pension: item(params.pension_rate),
        medical: item(params.medical_rate),
        unemployment: item(params.unemployment_rate),
        injury: item(params.injury_rate),
        maternity: item(params.maternity_rate),
        housing_fund: item(params.housing_fund_rate),
        per_employee,
        headcount,
        total: per_employee * headcount as f64,
    }
}

/// Profit and loss of the store when every employee is paid under `mode`
pub fn analyze(params: &ParameterSet, mode: PayMode) -> Result<StoreReport> {
    params.validate()?;

    let conversion_rate_pct = conversion_rate_pct(params.delivery_volume, params.purchased_packages);
    let total_revenue = params.purchased_packages * params.pack_price;
    let unit_profit = params.pack_price - params.pack_cost;
    let total_profit = params.purchased_packages * unit_profit;

    let mut roles = Vec::new();
    for (role, headcount) in params.headcount_by_role.iter() {
        if headcount <= 0 {
            continue;
        }
        let breakdown = calculate_breakdown(params, mode, role)?;
        let line_total = breakdown.total * headcount as f64;
        roles.push(RoleCostLine {
            role,
            headcount,
            breakdown,
            line_total,
        });
    }

    let salary_total: f64 = roles.iter().map(|line| line.line_total).sum();
    let social_insurance = social_insurance(params);
    let total_labor_cost = salary_total + social_insurance.total;
    let total_cost = total_labor_cost + params.city_fixed_cost;
    let net_profit = total_profit - total_labor_cost - params.city_fixed_cost;

    let break_even = if net_profit > 0.0 {
        BreakEvenStatus::Profitable
    } else {
        break_even(params, total_cost, unit_profit, conversion_rate_pct)
    };

    tracing::debug!(
        mode = mode.key(),
        net_profit,
        total_labor_cost,
        "store analyzed"
    );

    Ok(StoreReport {
        mode,
        conversion_rate_pct,
        total_revenue,
        unit_profit,
        total_profit,
        roles,
        salary_total,
        social_insurance,
        total_labor_cost,
        city_fixed_cost: params.city_fixed_cost,
        total_cost,
        net_profit,
        profitable: net_profit > 0.0,
        break_even,
    })
}

/// One report per pay mode, in enumeration order
pub fn analyze_all(params: &ParameterSet) -> Result<Vec<StoreReport>> {
    PayMode::ALL
        .into_iter()
        .map(|mode| analyze(params, mode))
        .collect()
}

/// Report for the mode selected on the parameter set
pub fn analyze_selected(params: &ParameterSet) -> Result<StoreReport> {
    analyze(params, params.pay_mode)
}

fn break_even(
    params: &ParameterSet,
    total_cost: f64,
    unit_profit: f64,
    conversion_rate_pct: f64,
) -> BreakEvenStatus {
    if unit_profit == 0.0 {
        return BreakEvenStatus::Undefined {
            reason: DivisionByZero::UnitProfit,
        };
    }
    if unit_profit < 0.0 {
        return BreakEvenStatus::Unreachable;
    }

    let packages = total_cost / unit_profit;
    let delivery_volume =
        (conversion_rate_pct > 0.0).then(|| packages / (conversion_rate_pct / 100.0));
    let break_even_rate =
        (params.delivery_volume > 0.0).then(|| packages / params.delivery_volume * 100.0);

    BreakEvenStatus::Required(BreakEven {
        packages,
        delivery_volume,
        conversion_rate_pct: break_even_rate,
    })
}
