//! The parameter bag consumed by every engine calculation
//!
//! `ParameterSet` is a flat, serializable record. Every field has a default,
//! so a partially filled JSON object loads cleanly. The engine never mutates
//! a parameter set; scenario helpers (`with_*`) return modified copies.

use std::hash::Hasher;

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use super::policy::{
    CommissionScheme, ConversionPolicy, OldSchemeVariant, PayMode, ShortfallDiscount,
};
use super::role::{Role, RoleTable};
use crate::error::ParameterError;

/// Complete input for one calculation run
///
/// # Conceptual Organization
///
/// **Store activity**: delivery volume, packages, pack price/cost.
///
/// **Staffing**: headcount and subsidy per role, plus the role and mode
/// selected for single-employee views.
///
/// **Old scheme**: base salary, three bonus components and the formula
/// variant for the performance part.
///
/// **New scheme**: mid/low base salaries, the historical package baseline,
/// tier thresholds and unit commissions, conversion-rate policy.
///
/// **Store costs**: social insurance base and rates, fixed city cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    // === Store activity ===
    #[serde(alias = "delivery_amount")]
    pub delivery_volume: f64,
    #[serde(alias = "purchase_amount")]
    pub purchased_packages: f64,
    /// Package count for the new-scheme commission; falls back to
    /// `purchased_packages` when absent or 0
    #[serde(alias = "new_purchase_amount", skip_serializing_if = "Option::is_none")]
    pub new_purchased_packages: Option<f64>,
    #[serde(alias = "service_price")]
    pub pack_price: f64,
    #[serde(alias = "service_cost")]
    pub pack_cost: f64,

    // === Staffing ===
    pub headcount_by_role: RoleTable<i64>,
    pub role_subsidy: RoleTable<f64>,
    pub selected_role: Role,
    pub pay_mode: PayMode,

    // === Old scheme ===
    pub old_base_salary: f64,
    pub old_basic_bonus: f64,
    pub old_position_bonus: f64,
    pub old_extra_bonus: f64,
    pub old_scheme_variant: OldSchemeVariant,

    // === New scheme ===
    #[serde(alias = "new_base_salary_mid")]
    pub new_base_mid: f64,
    #[serde(alias = "new_base_salary_low")]
    pub new_base_low: f64,
    pub old_purchase_baseline: f64,
    #[serde(alias = "bonus_tier1_threshold")]
    pub tier1_threshold_ratio: f64,
    #[serde(alias = "bonus_tier2_threshold")]
    pub tier2_threshold_ratio: f64,
    #[serde(alias = "bonus_tier2_amount")]
    pub tier2_unit_commission: f64,
    #[serde(alias = "bonus_tier3_amount")]
    pub tier3_unit_commission: f64,
    pub commission_scheme: CommissionScheme,

    // === Conversion-rate policy ===
    #[serde(alias = "min_conversion_rate")]
    pub min_conversion_rate_pct: f64,
    pub penalty_rate: f64,
    pub conversion_policy: ConversionPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortfall_discount: Option<ShortfallDiscount>,

    // === Store costs ===
    pub social_insurance_base: f64,
    pub pension_rate: f64,
    pub medical_rate: f64,
    pub unemployment_rate: f64,
    pub injury_rate: f64,
    pub maternity_rate: f64,
    pub housing_fund_rate: f64,
    #[serde(alias = "city_cost")]
    pub city_fixed_cost: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            delivery_volume: 100.0,
            purchased_packages: 50.0,
            new_purchased_packages: None,
            pack_price: 1000.0,
            pack_cost: 300.0,
            headcount_by_role: RoleTable {
                staff: 2,
                supervisor: 1,
                ..RoleTable::default()
            },
            role_subsidy: RoleTable {
                staff: 0.0,
                supervisor: 500.0,
                consultant: 800.0,
                regional_manager: 1200.0,
                city_manager: 1500.0,
            },
            selected_role: Role::Staff,
            pay_mode: PayMode::NewFloor,
            old_base_salary: 3000.0,
            old_basic_bonus: 500.0,
            old_position_bonus: 300.0,
            old_extra_bonus: 200.0,
            old_scheme_variant: OldSchemeVariant::VolumeTerm,
            new_base_mid: 3500.0,
            new_base_low: 2800.0,
            old_purchase_baseline: 40.0,
            tier1_threshold_ratio: 0.9,
            tier2_threshold_ratio: 1.0,
            tier2_unit_commission: 50.0,
            tier3_unit_commission: 60.0,
            commission_scheme: CommissionScheme::Tiered,
            min_conversion_rate_pct: 45.0,
            penalty_rate: 0.8,
            conversion_policy: ConversionPolicy::FloorOnly,
            shortfall_discount: None,
            social_insurance_base: 10_000.0,
            pension_rate: 8.0,
            medical_rate: 2.0,
            unemployment_rate: 0.2,
            injury_rate: 0.0,
            maternity_rate: 0.0,
            housing_fund_rate: 12.0,
            city_fixed_cost: 10_000.0,
        }
    }
}

impl ParameterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Validation ===

    /// Check every invariant the engine relies on
    ///
    /// Called by each engine entry point before any arithmetic.
    pub fn validate(&self) -> Result<(), ParameterError> {
        for (field, value) in self.numeric_fields() {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { field });
            }
        }

        for (field, value) in [
            ("delivery_volume", self.delivery_volume),
            ("purchased_packages", self.purchased_packages),
            ("pack_price", self.pack_price),
            ("pack_cost", self.pack_cost),
            ("old_purchase_baseline", self.old_purchase_baseline),
            (
                "new_purchased_packages",
                self.new_purchased_packages.unwrap_or(0.0),
            ),
        ] {
            if value < 0.0 {
                return Err(ParameterError::Negative { field, value });
            }
        }

        if let Some((role, count)) = self.headcount_by_role.iter().find(|(_, c)| *c < 0) {
            return Err(ParameterError::NegativeHeadcount { role, count });
        }

        if self.role_subsidy.staff != 0.0 {
            return Err(ParameterError::StaffSubsidy {
                value: self.role_subsidy.staff,
            });
        }

        if self.tier2_threshold_ratio < self.tier1_threshold_ratio {
            return Err(ParameterError::InvertedTierThresholds {
                tier1_ratio: self.tier1_threshold_ratio,
                tier2_ratio: self.tier2_threshold_ratio,
            });
        }

        if let ConversionPolicy::FloorAndCeiling {
            max_conversion_rate_pct,
            ..
        } = self.conversion_policy
        {
            if max_conversion_rate_pct < self.min_conversion_rate_pct {
                return Err(ParameterError::InvalidCeiling {
                    min_pct: self.min_conversion_rate_pct,
                    max_pct: max_conversion_rate_pct,
                });
            }
        }

        if let Some(discount) = self.shortfall_discount {
            for (field, value) in [
                ("shortfall_discount.threshold_ratio", discount.threshold_ratio),
                ("shortfall_discount.multiplier", discount.multiplier),
            ] {
                if value < 0.0 {
                    return Err(ParameterError::Negative { field, value });
                }
            }
        }

        Ok(())
    }

    /// Every floating point field with its key, in declaration order
    fn numeric_fields(&self) -> Vec<(&'static str, f64)> {
        let mut fields = vec![
            ("delivery_volume", self.delivery_volume),
            ("purchased_packages", self.purchased_packages),
            ("pack_price", self.pack_price),
            ("pack_cost", self.pack_cost),
            ("old_base_salary", self.old_base_salary),
            ("old_basic_bonus", self.old_basic_bonus),
            ("old_position_bonus", self.old_position_bonus),
            ("old_extra_bonus", self.old_extra_bonus),
            ("new_base_mid", self.new_base_mid),
            ("new_base_low", self.new_base_low),
            ("old_purchase_baseline", self.old_purchase_baseline),
            ("tier1_threshold_ratio", self.tier1_threshold_ratio),
            ("tier2_threshold_ratio", self.tier2_threshold_ratio),
            ("tier2_unit_commission", self.tier2_unit_commission),
            ("tier3_unit_commission", self.tier3_unit_commission),
            ("min_conversion_rate_pct", self.min_conversion_rate_pct),
            ("penalty_rate", self.penalty_rate),
            ("social_insurance_base", self.social_insurance_base),
            ("pension_rate", self.pension_rate),
            ("medical_rate", self.medical_rate),
            ("unemployment_rate", self.unemployment_rate),
            ("injury_rate", self.injury_rate),
            ("maternity_rate", self.maternity_rate),
            ("housing_fund_rate", self.housing_fund_rate),
            ("city_fixed_cost", self.city_fixed_cost),
        ];
        if let Some(packages) = self.new_purchased_packages {
            fields.push(("new_purchased_packages", packages));
        }
        fields.extend(self.role_subsidy.iter().map(|(role, v)| (subsidy_field(role), v)));
        if let ConversionPolicy::FloorAndCeiling {
            max_conversion_rate_pct,
            ceiling_multiplier,
        } = self.conversion_policy
        {
            fields.push(("conversion_policy.max_conversion_rate_pct", max_conversion_rate_pct));
            fields.push(("conversion_policy.ceiling_multiplier", ceiling_multiplier));
        }
        if let Some(discount) = self.shortfall_discount {
            fields.push(("shortfall_discount.threshold_ratio", discount.threshold_ratio));
            fields.push(("shortfall_discount.multiplier", discount.multiplier));
        }
        fields
    }

    // === Convenience Getters ===

    /// Package count the new-scheme commission is computed on
    ///
    /// A new-scheme count of 0 means "not entered", the same as absent.
    #[must_use]
    pub fn effective_packages(&self) -> f64 {
        self.new_purchased_packages
            .filter(|packages| *packages > 0.0)
            .unwrap_or(self.purchased_packages)
    }

    /// Headcount summed over every role
    #[must_use]
    pub fn total_headcount(&self) -> i64 {
        self.headcount_by_role.total()
    }

    #[must_use]
    pub fn headcount(&self, role: Role) -> i64 {
        self.headcount_by_role.get(role)
    }

    /// Subsidy paid to the given role (always 0 for staff)
    #[must_use]
    pub fn subsidy(&self, role: Role) -> f64 {
        match role {
            Role::Staff => 0.0,
            _ => self.role_subsidy.get(role),
        }
    }

    /// Base salary of a new-scheme mode; `None` for modes without one
    #[must_use]
    pub fn new_base_for(&self, mode: PayMode) -> Option<f64> {
        match mode {
            PayMode::NewMid => Some(self.new_base_mid),
            PayMode::NewLow => Some(self.new_base_low),
            PayMode::OldScheme | PayMode::NewFloor => None,
        }
    }

    /// Sum of the social insurance rates, in percent
    #[must_use]
    pub fn social_insurance_rate_pct(&self) -> f64 {
        self.pension_rate
            + self.medical_rate
            + self.unemployment_rate
            + self.injury_rate
            + self.maternity_rate
            + self.housing_fund_rate
    }

    /// Stable 64-bit fingerprint of every field
    ///
    /// Identical parameter sets always hash identically, so callers can key
    /// caches of repeated scenario evaluations on it.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        for (field, value) in self.numeric_fields() {
            hasher.write(field.as_bytes());
            hasher.write_u64(value.to_bits());
        }
        hasher.write_u8(u8::from(self.new_purchased_packages.is_some()));
        hasher.write_u8(u8::from(self.shortfall_discount.is_some()));
        for (_, count) in self.headcount_by_role.iter() {
            hasher.write_i64(count);
        }
        hasher.write_u8(self.selected_role as u8);
        hasher.write_u8(self.pay_mode as u8);
        hasher.write_u8(self.commission_scheme as u8);
        hasher.write_u8(match self.old_scheme_variant {
            OldSchemeVariant::VolumeTerm => 0,
            OldSchemeVariant::RateTable {
                has_station_license: false,
            } => 1,
            OldSchemeVariant::RateTable {
                has_station_license: true,
            } => 2,
        });
        hasher.write_u8(match self.conversion_policy {
            ConversionPolicy::FloorOnly => 0,
            ConversionPolicy::FloorAndCeiling { .. } => 1,
        });
        hasher.finish()
    }

    // === Scenario Helpers ===

    /// Variant with a different package count
    #[must_use]
    pub fn with_purchased_packages(&self, packages: f64) -> Self {
        let mut params = self.clone();
        params.purchased_packages = packages;
        params
    }

    /// Variant with a different delivery volume
    #[must_use]
    pub fn with_delivery_volume(&self, volume: f64) -> Self {
        let mut params = self.clone();
        params.delivery_volume = volume;
        params
    }

    /// Variant whose package count yields the given conversion rate at the
    /// current delivery volume
    #[must_use]
    pub fn with_conversion_rate_pct(&self, rate_pct: f64) -> Self {
        self.with_purchased_packages(self.delivery_volume * rate_pct / 100.0)
    }

    /// Variant with a different selected role
    #[must_use]
    pub fn with_role(&self, role: Role) -> Self {
        let mut params = self.clone();
        params.selected_role = role;
        params
    }

    /// Variant with a different selected pay mode
    #[must_use]
    pub fn with_mode(&self, mode: PayMode) -> Self {
        let mut params = self.clone();
        params.pay_mode = mode;
        params
    }
}

const fn subsidy_field(role: Role) -> &'static str {
    match role {
        Role::Staff => "role_subsidy.staff",
        Role::Supervisor => "role_subsidy.supervisor",
        Role::Consultant => "role_subsidy.consultant",
        Role::RegionalManager => "role_subsidy.regional_manager",
        Role::CityManager => "role_subsidy.city_manager",
    }
}
