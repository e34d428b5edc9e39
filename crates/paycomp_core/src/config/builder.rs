//! Parameter Builder
//!
//! Fluent construction of a [`ParameterSet`] starting from the defaults.
//! `build` validates the result, so a builder chain either yields a usable
//! parameter set or the first validation failure.

use crate::error::ParameterError;
use crate::model::{
    CommissionScheme, ConversionPolicy, OldSchemeVariant, ParameterSet, PayMode, Role, RoleTable,
    ShortfallDiscount,
};

/// Builder for parameter sets
#[derive(Debug, Clone, Default)]
pub struct ParameterBuilder {
    params: ParameterSet,
}

impl ParameterBuilder {
    /// Start from the default parameter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing parameter set
    #[must_use]
    pub fn from_params(params: ParameterSet) -> Self {
        Self { params }
    }

    // =========================================================================
    // Store activity
    // =========================================================================

    #[must_use]
    pub fn delivery(mut self, volume: f64) -> Self {
        self.params.delivery_volume = volume;
        self
    }

    #[must_use]
    pub fn packages(mut self, packages: f64) -> Self {
        self.params.purchased_packages = packages;
        self
    }

    /// Package count used only for the new-scheme commission
    #[must_use]
    pub fn new_packages(mut self, packages: f64) -> Self {
        self.params.new_purchased_packages = Some(packages);
        self
    }

    #[must_use]
    pub fn pack(mut self, price: f64, cost: f64) -> Self {
        self.params.pack_price = price;
        self.params.pack_cost = cost;
        self
    }

    // =========================================================================
    // Staffing
    // =========================================================================

    #[must_use]
    pub fn headcount(mut self, role: Role, count: i64) -> Self {
        self.params.headcount_by_role.set(role, count);
        self
    }

    /// Replace the whole headcount table (roles not listed become 0)
    #[must_use]
    pub fn only_headcount(mut self, entries: &[(Role, i64)]) -> Self {
        let mut table = RoleTable::default();
        for &(role, count) in entries {
            table.set(role, count);
        }
        self.params.headcount_by_role = table;
        self
    }

    #[must_use]
    pub fn subsidy(mut self, role: Role, amount: f64) -> Self {
        self.params.role_subsidy.set(role, amount);
        self
    }

    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.params.selected_role = role;
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: PayMode) -> Self {
        self.params.pay_mode = mode;
        self
    }

    // =========================================================================
    // Pay schemes
    // =========================================================================

    /// Old-scheme base salary and bonuses
    #[must_use]
    pub fn old_scheme(mut self, base: f64, basic: f64, position: f64, extra: f64) -> Self {
        self.params.old_base_salary = base;
        self.params.old_basic_bonus = basic;
        self.params.old_position_bonus = position;
        self.params.old_extra_bonus = extra;
        self
    }

    #[must_use]
    pub fn old_scheme_variant(mut self, variant: OldSchemeVariant) -> Self {
        self.params.old_scheme_variant = variant;
        self
    }

    /// Base salaries of the mid and low commissioned modes
    #[must_use]
    pub fn new_bases(mut self, mid: f64, low: f64) -> Self {
        self.params.new_base_mid = mid;
        self.params.new_base_low = low;
        self
    }

    #[must_use]
    pub fn baseline(mut self, packages: f64) -> Self {
        self.params.old_purchase_baseline = packages;
        self
    }

    #[must_use]
    pub fn tier_ratios(mut self, tier1: f64, tier2: f64) -> Self {
        self.params.tier1_threshold_ratio = tier1;
        self.params.tier2_threshold_ratio = tier2;
        self
    }

    #[must_use]
    pub fn tier_units(mut self, tier2: f64, tier3: f64) -> Self {
        self.params.tier2_unit_commission = tier2;
        self.params.tier3_unit_commission = tier3;
        self
    }

    #[must_use]
    pub fn commission_scheme(mut self, scheme: CommissionScheme) -> Self {
        self.params.commission_scheme = scheme;
        self
    }

    // =========================================================================
    // Conversion policy
    // =========================================================================

    /// Commission multiplier applied below `min_pct`
    #[must_use]
    pub fn floor(mut self, min_pct: f64, penalty_rate: f64) -> Self {
        self.params.min_conversion_rate_pct = min_pct;
        self.params.penalty_rate = penalty_rate;
        self
    }

    /// Commission multiplier applied above `max_pct`
    #[must_use]
    pub fn ceiling(mut self, max_pct: f64, multiplier: f64) -> Self {
        self.params.conversion_policy = ConversionPolicy::FloorAndCeiling {
            max_conversion_rate_pct: max_pct,
            ceiling_multiplier: multiplier,
        };
        self
    }

    #[must_use]
    pub fn shortfall_discount(mut self, threshold_ratio: f64, multiplier: f64) -> Self {
        self.params.shortfall_discount = Some(ShortfallDiscount {
            threshold_ratio,
            multiplier,
        });
        self
    }

    // =========================================================================
    // Store costs
    // =========================================================================

    #[must_use]
    pub fn social_insurance_base(mut self, base: f64) -> Self {
        self.params.social_insurance_base = base;
        self
    }

    /// Set every social insurance rate to 0
    #[must_use]
    pub fn no_social_insurance(mut self) -> Self {
        self.params.pension_rate = 0.0;
        self.params.medical_rate = 0.0;
        self.params.unemployment_rate = 0.0;
        self.params.injury_rate = 0.0;
        self.params.maternity_rate = 0.0;
        self.params.housing_fund_rate = 0.0;
        self
    }

    #[must_use]
    pub fn city_cost(mut self, cost: f64) -> Self {
        self.params.city_fixed_cost = cost;
        self
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Validate and return the parameter set
    pub fn build(self) -> Result<ParameterSet, ParameterError> {
        self.params.validate()?;
        Ok(self.params)
    }

    /// Return the parameter set without validating it
    #[must_use]
    pub fn build_unchecked(self) -> ParameterSet {
        self.params
    }
}
