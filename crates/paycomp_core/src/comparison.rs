//! Side-by-side comparison of every pay mode for one role

use crate::compensation::calculate_salary;
use crate::conversion::conversion_rate_pct;
use crate::error::Result;
use crate::model::{Comparison, ComparisonRow, ParameterSet, PayMode, Role};

/// Compare all modes for the role selected on the parameter set
pub fn compare(params: &ParameterSet) -> Result<Comparison> {
    compare_for_role(params, params.selected_role)
}

/// Compare all modes for `role`
///
/// Rows are ranked by salary, highest first. Equal salaries keep mode
/// enumeration order. Deltas are relative to the old scheme; the percentage
/// is 0 when the old salary is 0.
pub fn compare_for_role(params: &ParameterSet, role: Role) -> Result<Comparison> {
    let salaries = PayMode::ALL
        .into_iter()
        .map(|mode| calculate_salary(params, mode, role).map(|salary| (mode, salary)))
        .collect::<Result<Vec<_>>>()?;

    let old_salary = salaries
        .iter()
        .find(|(mode, _)| *mode == PayMode::OldScheme)
        .map_or(0.0, |(_, salary)| *salary);

    let mut rows: Vec<ComparisonRow> = salaries
        .iter()
        .map(|&(mode, salary)| {
            let delta_vs_old = salary - old_salary;
            let delta_pct = if old_salary == 0.0 {
                0.0
            } else {
                delta_vs_old / old_salary * 100.0
            };
            ComparisonRow {
                rank: 0,
                mode,
                salary,
                delta_vs_old,
                delta_pct,
            }
        })
        .collect();

    // Stable sort: ties stay in enumeration order
    rows.sort_by(|a, b| b.salary.total_cmp(&a.salary));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }

    let best_new_salary = salaries
        .iter()
        .filter(|(mode, _)| *mode != PayMode::OldScheme)
        .map(|(_, salary)| *salary)
        .fold(f64::NEG_INFINITY, f64::max);
    let recommended = salaries
        .iter()
        .filter(|(mode, salary)| *mode != PayMode::OldScheme && *salary == best_new_salary)
        .map(|(mode, _)| *mode)
        .collect();

    let rate = conversion_rate_pct(params.delivery_volume, params.purchased_packages);

    Ok(Comparison {
        role,
        conversion_rate_pct: rate,
        old_salary,
        rows,
        recommended,
        best_new_salary,
        below_min_conversion: rate < params.min_conversion_rate_pct,
    })
}
