//! Key mapping for parameter files written by the older desktop calculator
//!
//! Those files store staffing as one flat key per role (`employee_count`,
//! `supervisor_bonus`, ...) and the selected role and mode as display labels.
//! [`upgrade`] folds them into the nested `headcount_by_role`, `role_subsidy`,
//! `selected_role` and `pay_mode` fields before deserialization. Keys already
//! in the current layout take precedence over their legacy counterparts.

use serde_json::{Map, Value};

use crate::error::ParameterError;
use crate::model::{ParameterSet, PayMode, Role};

/// Flat headcount keys, per role
const HEADCOUNT_KEYS: [(&str, Role); 5] = [
    ("employee_count", Role::Staff),
    ("supervisor_count", Role::Supervisor),
    ("consultant_count", Role::Consultant),
    ("regional_manager_count", Role::RegionalManager),
    ("city_manager_count", Role::CityManager),
];

/// Flat subsidy keys, per role (staff never had one)
const SUBSIDY_KEYS: [(&str, Role); 4] = [
    ("supervisor_bonus", Role::Supervisor),
    ("consultant_bonus", Role::Consultant),
    ("regional_manager_bonus", Role::RegionalManager),
    ("city_manager_bonus", Role::CityManager),
];

/// Rewrite legacy keys of a parameter object in place
///
/// Non-object documents are returned untouched so deserialization reports
/// them as malformed.
pub fn upgrade(value: Value) -> Result<Value, ParameterError> {
    let Value::Object(mut map) = value else {
        return Ok(value);
    };

    let defaults = ParameterSet::default();

    let headcounts = take_role_entries(&mut map, &HEADCOUNT_KEYS, whole_number)?;
    if !headcounts.is_empty() {
        merge_table(
            &mut map,
            "headcount_by_role",
            serde_json::to_value(defaults.headcount_by_role),
            headcounts,
        )?;
    }

    let subsidies = take_role_entries(&mut map, &SUBSIDY_KEYS, Ok)?;
    if !subsidies.is_empty() {
        merge_table(
            &mut map,
            "role_subsidy",
            serde_json::to_value(defaults.role_subsidy),
            subsidies,
        )?;
    }

    if let Some(label) = map.remove("employee_type") {
        if !map.contains_key("selected_role") {
            let role = role_from_label(&label)?;
            map.insert("selected_role".into(), Value::String(role.key().into()));
        }
    }

    if let Some(label) = map.remove("salary_mode") {
        if !map.contains_key("pay_mode") {
            let mode = mode_from_label(&label)?;
            map.insert("pay_mode".into(), Value::String(mode.key().into()));
        }
    }

    Ok(Value::Object(map))
}

/// Remove the flat keys present in `map`, returning `(role key, value)` pairs
fn take_role_entries(
    map: &mut Map<String, Value>,
    keys: &[(&str, Role)],
    convert: impl Fn(Value) -> Result<Value, ParameterError>,
) -> Result<Vec<(&'static str, Value)>, ParameterError> {
    let mut entries = Vec::new();
    for &(key, role) in keys {
        if let Some(value) = map.remove(key) {
            entries.push((role.key(), convert(value)?));
        }
    }
    Ok(entries)
}

/// Fold role entries into a nested table, filling only roles the table lacks
///
/// When the document has no table yet, the defaults seed it so roles the
/// legacy file omits keep their default value.
fn merge_table(
    map: &mut Map<String, Value>,
    field: &str,
    defaults: serde_json::Result<Value>,
    entries: Vec<(&'static str, Value)>,
) -> Result<(), ParameterError> {
    let table = match map.remove(field) {
        Some(existing) => existing,
        None => defaults.map_err(|e| ParameterError::Malformed(e.to_string()))?,
    };
    let Value::Object(mut table) = table else {
        return Err(ParameterError::Malformed(format!("{field} must be an object")));
    };

    for (role_key, value) in entries {
        table.entry(role_key).or_insert(value);
    }
    map.insert(field.into(), Value::Object(table));
    Ok(())
}

/// Headcounts were stored as floats by some versions (`5.0`)
fn whole_number(value: Value) -> Result<Value, ParameterError> {
    match value.as_f64() {
        Some(n) if n.fract() == 0.0 && value.as_i64().is_none() => Ok(Value::from(n as i64)),
        _ => Ok(value),
    }
}

fn role_from_label(label: &Value) -> Result<Role, ParameterError> {
    let text = label
        .as_str()
        .ok_or_else(|| ParameterError::Malformed("employee_type must be a string".into()))?;
    let role = match text.trim() {
        "员工" => Some(Role::Staff),
        "主管" => Some(Role::Supervisor),
        "顾问" => Some(Role::Consultant),
        "区总" => Some(Role::RegionalManager),
        "市总" => Some(Role::CityManager),
        other => other.parse().ok(),
    };
    role.ok_or_else(|| ParameterError::Malformed(format!("unknown employee_type '{text}'")))
}

fn mode_from_label(label: &Value) -> Result<PayMode, ParameterError> {
    let text = label
        .as_str()
        .ok_or_else(|| ParameterError::Malformed("salary_mode must be a string".into()))?;
    let mode = match text.trim() {
        "旧薪资" | "旧薪资体系" => Some(PayMode::OldScheme),
        "新保底" => Some(PayMode::NewFloor),
        "新底薪（中）" | "新底薪(中)" | "新底薪中" => Some(PayMode::NewMid),
        "新底薪（低）" | "新底薪(低)" | "新底薪低" => Some(PayMode::NewLow),
        other => other.parse().ok(),
    };
    mode.ok_or_else(|| ParameterError::Malformed(format!("unknown salary_mode '{text}'")))
}
