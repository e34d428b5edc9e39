//! Plain-text rendering of engine results
//!
//! Every renderer takes a structured result and returns the finished text;
//! no number is derived here that the engine did not already compute.

use std::fmt;

use paycomp_core::analysis::SweepResults;
use paycomp_core::model::{
    BreakEvenStatus, Comparison, ConversionAdjustment, PayMode, SalaryBreakdown, StoreReport,
};
use paycomp_core::optimization::ThresholdSuggestion;

use crate::util::format::{
    format_currency, format_delta, format_pct, format_quantity,
};

/// Column-aligned text table; the first column is left aligned, the rest
/// right aligned
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        let write_row = |f: &mut fmt::Formatter<'_>, cells: &[String]| -> fmt::Result {
            let mut line = String::new();
            for (i, width) in widths.iter().enumerate() {
                let cell = cells.get(i).map_or("", String::as_str);
                if i > 0 {
                    line.push_str("  ");
                    line.push_str(&format!("{cell:>width$}"));
                } else {
                    line.push_str(&format!("{cell:<width$}"));
                }
            }
            writeln!(f, "{}", line.trim_end())
        };

        if !self.headers.is_empty() {
            write_row(f, &self.headers)?;
            let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
            writeln!(f, "{}", "-".repeat(total))?;
        }
        for row in &self.rows {
            write_row(f, row)?;
        }
        Ok(())
    }
}

fn describe_adjustment(adjustment: ConversionAdjustment) -> String {
    match adjustment {
        ConversionAdjustment::None => "none".to_string(),
        ConversionAdjustment::BonusHalved => "basic and position bonus halved".to_string(),
        ConversionAdjustment::FloorPenalty(m) => format!("below floor, commission x{m}"),
        ConversionAdjustment::CeilingMultiplier(m) => format!("above ceiling, commission x{m}"),
        ConversionAdjustment::PackageRate(rate) => format!("{rate} per package"),
    }
}

/// Salary breakdown for one mode and role
pub fn render_breakdown(b: &SalaryBreakdown) -> String {
    let mut out = format!("Salary: {} / {}\n\n", b.mode.label(), b.role.label());

    let mut table = Table::new(["Component", "Amount"]);
    table.row(["Base".to_string(), format_currency(b.base)]);
    if let Some(raw) = b.raw_commission {
        table.row(["Commission (before adjustment)".to_string(), format_currency(raw)]);
        table.row(["Commission".to_string(), format_currency(b.commission)]);
    } else {
        table.row(["Bonuses and volume pay".to_string(), format_currency(b.commission)]);
    }
    table.row(["Role subsidy".to_string(), format_currency(b.subsidy)]);
    if b.adjustment != 0.0 {
        table.row(["Shortfall adjustment".to_string(), format_currency(b.adjustment)]);
    }
    table.row(["Total".to_string(), format_currency(b.total)]);
    out.push_str(&table.to_string());

    out.push_str(&format!(
        "\nConversion rate: {} ({})\n",
        format_pct(b.conversion_rate_pct),
        describe_adjustment(b.conversion_adjustment)
    ));

    if let Some(tiers) = &b.tiers {
        let mut table = Table::new(["Tier", "Up to", "Packages", "Unit", "Amount"]);
        table.row([
            "1".to_string(),
            format_quantity(tiers.tier1_limit),
            format_quantity(tiers.tier1_packages),
            format_currency(tiers.tier1_unit),
            format_currency(tiers.tier1_amount),
        ]);
        table.row([
            "2".to_string(),
            format_quantity(tiers.tier2_limit),
            format_quantity(tiers.tier2_packages),
            String::new(),
            format_currency(tiers.tier2_amount),
        ]);
        table.row([
            "3".to_string(),
            String::new(),
            format_quantity(tiers.tier3_packages),
            String::new(),
            format_currency(tiers.tier3_amount),
        ]);
        out.push('\n');
        out.push_str(&table.to_string());
    }
    out
}

/// Ranked comparison of every mode
pub fn render_comparison(c: &Comparison) -> String {
    let mut out = format!(
        "Pay mode comparison: {} (conversion rate {})\n\n",
        c.role.label(),
        format_pct(c.conversion_rate_pct)
    );

    let mut table = Table::new(["Rank", "Mode", "Salary", "vs old", "vs old %"]);
    for row in &c.rows {
        table.row([
            row.rank.to_string(),
            row.mode.label().to_string(),
            format_currency(row.salary),
            format_delta(row.delta_vs_old),
            format_pct(row.delta_pct),
        ]);
    }
    out.push_str(&table.to_string());

    let recommended: Vec<&str> = c.recommended.iter().map(|m| m.label()).collect();
    out.push_str(&format!(
        "\nBest new-scheme salary: {} ({})\n",
        format_currency(c.best_new_salary),
        recommended.join(", ")
    ));
    if c.below_min_conversion {
        out.push_str("Conversion rate is below the minimum; new-scheme commission is penalised\n");
    }
    out
}

fn describe_break_even(status: &BreakEvenStatus) -> String {
    match status {
        BreakEvenStatus::Profitable => "already profitable".to_string(),
        BreakEvenStatus::Required(be) => {
            let mut text = format!("{} packages", format_quantity(be.packages.ceil()));
            if let Some(delivery) = be.delivery_volume {
                text.push_str(&format!(
                    ", {} deliveries at the current rate",
                    format_quantity(delivery.ceil())
                ));
            }
            if let Some(rate) = be.conversion_rate_pct {
                text.push_str(&format!(
                    ", or a {} conversion rate at the current volume",
                    format_pct(rate)
                ));
            }
            text
        }
        BreakEvenStatus::Undefined { reason } => format!("undefined ({reason})"),
        BreakEvenStatus::Unreachable => {
            "unreachable: every package is sold below cost".to_string()
        }
    }
}

/// Full profit and loss for one mode
pub fn render_store(r: &StoreReport) -> String {
    let mut out = format!("Store report: {}\n\n", r.mode.label());

    let mut roles = Table::new(["Role", "Headcount", "Salary each", "Line total"]);
    for line in &r.roles {
        roles.row([
            line.role.label().to_string(),
            line.headcount.to_string(),
            format_currency(line.breakdown.total),
            format_currency(line.line_total),
        ]);
    }
    out.push_str(&roles.to_string());
    out.push('\n');

    let mut table = Table::new(["Item", "Amount"]);
    table
        .row(["Revenue".to_string(), format_currency(r.total_revenue)])
        .row(["Gross profit".to_string(), format_currency(r.total_profit)])
        .row(["Salaries".to_string(), format_currency(r.salary_total)])
        .row([
            format!(
                "Social insurance ({} x {})",
                r.social_insurance.headcount,
                format_currency(r.social_insurance.per_employee)
            ),
            format_currency(r.social_insurance.total),
        ])
        .row(["Labor cost".to_string(), format_currency(r.total_labor_cost)])
        .row(["City fixed cost".to_string(), format_currency(r.city_fixed_cost)])
        .row(["Net profit".to_string(), format_currency(r.net_profit)]);
    out.push_str(&table.to_string());

    out.push_str(&format!(
        "\nConversion rate: {}\nBreak-even: {}\n",
        format_pct(r.conversion_rate_pct),
        describe_break_even(&r.break_even)
    ));
    out
}

/// One summary line per mode followed by each full report
pub fn render_stores(reports: &[StoreReport]) -> String {
    let mut summary = Table::new(["Mode", "Labor cost", "Net profit", "Break-even"]);
    for r in reports {
        summary.row([
            r.mode.label().to_string(),
            format_currency(r.total_labor_cost),
            format_currency(r.net_profit),
            describe_break_even(&r.break_even),
        ]);
    }

    let mut out = format!("Store reports\n\n{summary}");
    for r in reports {
        out.push('\n');
        out.push_str(&render_store(r));
    }
    out
}

/// Salary and net profit per mode at each sweep value
pub fn render_sweep(results: &SweepResults) -> String {
    let mut out = format!(
        "Sweep: {} ({} salary)\n\n",
        results.target.label(),
        results.role.label()
    );

    let mut headers = vec![results.target.label().to_string(), "Rate".to_string()];
    headers.extend(PayMode::ALL.iter().map(|m| m.label().to_string()));
    headers.extend(PayMode::ALL.iter().map(|m| format!("Net: {}", m.key())));

    let mut table = Table::new(headers);
    for point in &results.points {
        let mut cells = vec![format_quantity(point.value), format_pct(point.conversion_rate_pct)];
        cells.extend(
            PayMode::ALL
                .iter()
                .map(|&m| point.salary(m).map(format_currency).unwrap_or_default()),
        );
        cells.extend(
            PayMode::ALL
                .iter()
                .map(|&m| point.net_profit(m).map(format_currency).unwrap_or_default()),
        );
        table.row(cells);
    }
    out.push_str(&table.to_string());

    for mode in PayMode::ALL {
        if let Some(value) = results.first_profitable(mode) {
            out.push_str(&format!(
                "{}: profitable from {}\n",
                mode.label(),
                format_quantity(value)
            ));
        }
    }
    out
}

/// Suggested tier thresholds, or why there are none
pub fn render_suggestion(mode: PayMode, suggestion: Option<&ThresholdSuggestion>) -> String {
    let Some(s) = suggestion else {
        return format!(
            "No threshold suggestion for {}: too few packages to place tier limits\n",
            mode.label()
        );
    };

    let ratio = |r: Option<f64>| r.map_or_else(|| "n/a".to_string(), |r| format!("{r:.3}"));
    let mut table = Table::new(["Threshold", "Packages", "Ratio of baseline"]);
    table
        .row(["Tier 1".to_string(), s.tier1_limit.to_string(), ratio(s.tier1_ratio)])
        .row(["Tier 2".to_string(), s.tier2_limit.to_string(), ratio(s.tier2_ratio)]);

    format!(
        "Threshold suggestion: {} at {} packages\n\n{}\nTiered commission: {}\nTier-1 only:       {}\nDifference:        {}\n",
        s.mode.label(),
        s.packages,
        table,
        format_currency(s.commission),
        format_currency(s.target),
        format_currency(s.difference)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use paycomp_core::analysis::{SweepConfig, SweepTarget, sweep};
    use paycomp_core::config::ParameterBuilder;
    use paycomp_core::model::{ParameterSet, Role};
    use paycomp_core::{analyze, analyze_all, calculate_breakdown, compare, suggest_thresholds};

    #[test]
    fn test_table_aligns_columns() {
        let mut table = Table::new(["Name", "Amount"]);
        table.row(["a", "1.00"]).row(["longer", "1,000.00"]);
        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Name      Amount");
        assert_eq!(lines[1], "----------------");
        assert_eq!(lines[2], "a           1.00");
        assert_eq!(lines[3], "longer  1,000.00");
    }

    #[test]
    fn test_breakdown_lists_tiers_for_commissioned_modes() {
        let params = ParameterSet::default();
        let b = calculate_breakdown(&params, PayMode::NewLow, Role::Staff).unwrap();
        let text = render_breakdown(&b);

        assert!(text.contains("New base (low) / Staff"));
        assert!(text.contains("3,780.00"));
        assert!(text.contains("Tier"));

        let old = calculate_breakdown(&params, PayMode::OldScheme, Role::Staff).unwrap();
        assert!(!render_breakdown(&old).contains("Tier"));
    }

    #[test]
    fn test_comparison_mentions_recommendation() {
        let text = render_comparison(&compare(&ParameterSet::default()).unwrap());
        assert!(text.contains("Best new-scheme salary: 4,000.00 (New floor)"));
        assert!(text.contains("-150.00"));
    }

    #[test]
    fn test_store_break_even_text() {
        let params = ParameterBuilder::new()
            .delivery(20.0)
            .packages(10.0)
            .pack(600.0, 100.0)
            .only_headcount(&[(Role::Staff, 1)])
            .old_scheme(6000.0, 0.0, 0.0, 0.0)
            .social_insurance_base(0.0)
            .city_cost(500.0)
            .build()
            .unwrap();
        let text = render_store(&analyze(&params, PayMode::OldScheme).unwrap());

        assert!(text.contains("-1,500.00"));
        assert!(text.contains("13 packages"));
        assert!(text.contains("26 deliveries"));
        assert!(text.contains("65.00%"));
    }

    #[test]
    fn test_stores_summary_has_every_mode() {
        let text = render_stores(&analyze_all(&ParameterSet::default()).unwrap());
        for mode in PayMode::ALL {
            assert!(text.contains(mode.label()));
        }
    }

    #[test]
    fn test_sweep_has_row_per_point() {
        let config = SweepConfig::new(SweepTarget::PurchasedPackages, 20.0, 80.0, 4);
        let results = sweep(&ParameterSet::default(), &config).unwrap();
        let text = render_sweep(&results);

        for value in ["20", "40", "60", "80"] {
            assert!(text.lines().any(|l| l.starts_with(value)), "missing row {value}");
        }
    }

    #[test]
    fn test_missing_suggestion_explained() {
        let text = render_suggestion(PayMode::NewMid, None);
        assert!(text.starts_with("No threshold suggestion"));

        let s = suggest_thresholds(&ParameterSet::default(), PayMode::NewLow, 5)
            .unwrap()
            .unwrap();
        let text = render_suggestion(PayMode::NewLow, Some(&s));
        assert!(text.contains("Tier 1"));
        assert!(text.contains("1.125"));
    }
}
