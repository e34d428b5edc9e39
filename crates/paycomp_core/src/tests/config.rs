//! Tests for the JSON parameter bag and the builder DSL

use crate::config::{ParameterBuilder, default_json, from_json_str, from_json_value, to_json_string};
use crate::error::{CalcError, ParameterError};
use crate::model::{CommissionScheme, ConversionPolicy, ParameterSet, PayMode, Role};

#[test]
fn test_empty_object_loads_defaults() {
    assert_eq!(from_json_str("{}").unwrap(), ParameterSet::default());
}

#[test]
fn test_saved_file_loads_back() {
    let params = ParameterBuilder::new()
        .delivery(175.0)
        .packages(102.0)
        .new_packages(110.0)
        .role(Role::Consultant)
        .mode(PayMode::NewLow)
        .ceiling(80.0, 1.1)
        .shortfall_discount(0.8, 0.9)
        .commission_scheme(CommissionScheme::Flat)
        .build()
        .unwrap();

    let json = to_json_string(&params).unwrap();
    assert_eq!(from_json_str(&json).unwrap(), params);
}

#[test]
fn test_default_json_has_every_top_level_key() {
    let json = default_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let object = value.as_object().unwrap();
    for key in [
        "delivery_volume",
        "purchased_packages",
        "headcount_by_role",
        "role_subsidy",
        "tier1_threshold_ratio",
        "min_conversion_rate_pct",
        "city_fixed_cost",
    ] {
        assert!(object.contains_key(key), "missing {key}");
    }
    assert!(!object.contains_key("new_purchased_packages"));
}

#[test]
fn test_legacy_keys_accepted() {
    let params = from_json_str(
        r#"{
            "delivery_amount": 175,
            "purchase_amount": 102,
            "new_purchase_amount": 99,
            "service_price": 800,
            "service_cost": 250,
            "new_base_salary_mid": 3100,
            "bonus_tier1_threshold": 0.8,
            "bonus_tier2_amount": 55,
            "min_conversion_rate": 40,
            "city_cost": 9000
        }"#,
    )
    .unwrap();

    assert_eq!(params.delivery_volume, 175.0);
    assert_eq!(params.purchased_packages, 102.0);
    assert_eq!(params.new_purchased_packages, Some(99.0));
    assert_eq!(params.pack_price, 800.0);
    assert_eq!(params.pack_cost, 250.0);
    assert_eq!(params.new_base_mid, 3100.0);
    assert_eq!(params.tier1_threshold_ratio, 0.8);
    assert_eq!(params.tier2_unit_commission, 55.0);
    assert_eq!(params.min_conversion_rate_pct, 40.0);
    assert_eq!(params.city_fixed_cost, 9000.0);
}

#[test]
fn test_desktop_calculator_file_loads() {
    let params = from_json_str(
        r#"{
            "delivery_amount": 175.0,
            "purchase_amount": 102.0,
            "service_price": 900.0,
            "service_cost": 280.0,
            "employee_count": 5,
            "supervisor_count": 0,
            "consultant_count": 1,
            "regional_manager_count": 0,
            "city_manager_count": 1.0,
            "supervisor_bonus": 900.0,
            "consultant_bonus": 800.0,
            "regional_manager_bonus": 1200.0,
            "city_manager_bonus": 1600.0,
            "employee_type": "顾问",
            "old_base_salary": 2200.0,
            "old_basic_bonus": 500.0,
            "old_position_bonus": 300.0,
            "old_extra_bonus": 200.0,
            "new_base_salary_mid": 3100.0,
            "new_base_salary_low": 2600.0,
            "old_purchase_baseline": 58.0,
            "bonus_tier1_threshold": 0.9,
            "bonus_tier1_amount": -15.5,
            "bonus_tier2_threshold": 1.0,
            "bonus_tier2_amount": 50.0,
            "bonus_tier3_amount": 60.0,
            "new_purchase_amount": 0.0,
            "min_conversion_rate": 45.0,
            "penalty_rate": 0.8,
            "salary_mode": "新底薪（中）",
            "social_insurance_base": 4000.0,
            "pension_rate": 16.0,
            "medical_rate": 8.0,
            "unemployment_rate": 0.5,
            "injury_rate": 0.2,
            "maternity_rate": 0.8,
            "housing_fund_rate": 5.0,
            "current_month": "2024-06",
            "avg_total_salary": 4200.0,
            "avg_delivery": 160.0,
            "avg_purchase": 90.0,
            "avg_conversion_rate": 56.0,
            "city_cost": 8000.0
        }"#,
    )
    .unwrap();

    assert_eq!(params.headcount(Role::Staff), 5);
    assert_eq!(params.headcount(Role::Supervisor), 0);
    assert_eq!(params.headcount(Role::Consultant), 1);
    assert_eq!(params.headcount(Role::CityManager), 1);
    assert_eq!(params.total_headcount(), 7);
    assert_eq!(params.subsidy(Role::Supervisor), 900.0);
    assert_eq!(params.subsidy(Role::CityManager), 1600.0);
    assert_eq!(params.subsidy(Role::Staff), 0.0);
    assert_eq!(params.selected_role, Role::Consultant);
    assert_eq!(params.pay_mode, PayMode::NewMid);
    assert_eq!(params.pack_price, 900.0);
    assert_eq!(params.social_insurance_base, 4000.0);
    assert_eq!(params.city_fixed_cost, 8000.0);

    // The file's 0.0 means "no separate new-scheme count"
    assert_eq!(params.effective_packages(), 102.0);
}

#[test]
fn test_flat_role_keys_fill_defaults() {
    let params =
        from_json_str(r#"{"employee_count": 5, "supervisor_count": 0, "supervisor_bonus": 900}"#)
            .unwrap();
    assert_eq!(params.headcount(Role::Staff), 5);
    assert_eq!(params.headcount(Role::Supervisor), 0);
    assert_eq!(params.subsidy(Role::Supervisor), 900.0);
    // Roles the file leaves out keep their defaults
    assert_eq!(params.subsidy(Role::Consultant), 800.0);
}

#[test]
fn test_unknown_keys_ignored() {
    let params = from_json_str(r#"{"chart_theme": "dark", "delivery_volume": 10}"#).unwrap();
    assert_eq!(params.delivery_volume, 10.0);
}

#[test]
fn test_partial_role_table() {
    let params = from_json_str(r#"{"headcount_by_role": {"staff": 4}}"#).unwrap();
    assert_eq!(params.headcount(Role::Staff), 4);
    assert_eq!(params.headcount(Role::Supervisor), 0);
}

#[test]
fn test_type_error_is_malformed() {
    let result = from_json_str(r#"{"delivery_volume": "lots"}"#);
    assert!(matches!(
        result,
        Err(CalcError::InvalidParameter(ParameterError::Malformed(_)))
    ));

    let not_object = from_json_value(serde_json::json!("not a parameter set"));
    assert!(matches!(
        not_object,
        Err(CalcError::InvalidParameter(ParameterError::Malformed(_)))
    ));
}

#[test]
fn test_loaded_values_are_validated() {
    let result = from_json_str(r#"{"tier1_threshold_ratio": 1.2, "tier2_threshold_ratio": 1.0}"#);
    assert!(matches!(
        result,
        Err(CalcError::InvalidParameter(
            ParameterError::InvertedTierThresholds { .. }
        ))
    ));
}

#[test]
fn test_ceiling_policy_from_json() {
    let params = from_json_str(
        r#"{"conversion_policy": {"kind": "floor_and_ceiling",
            "max_conversion_rate_pct": 60, "ceiling_multiplier": 1.1}}"#,
    )
    .unwrap();
    assert_eq!(
        params.conversion_policy,
        ConversionPolicy::FloorAndCeiling {
            max_conversion_rate_pct: 60.0,
            ceiling_multiplier: 1.1,
        }
    );
}

#[test]
fn test_builder_starts_from_defaults() {
    let params = ParameterBuilder::new().build().unwrap();
    assert_eq!(params, ParameterSet::default());
}

#[test]
fn test_builder_reports_first_failure() {
    let result = ParameterBuilder::new().packages(-3.0).build();
    assert_eq!(
        result,
        Err(ParameterError::Negative {
            field: "purchased_packages",
            value: -3.0,
        })
    );
}
