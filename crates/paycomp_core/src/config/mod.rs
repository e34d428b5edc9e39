//! Parameter bag persistence and construction
//!
//! Parameter sets travel as flat JSON objects. Every key is optional and
//! defaults to the value in [`ParameterSet::default`] and unknown keys are
//! ignored. Files written by the older desktop calculator load as well: its
//! scalar key names are serde aliases, and its flat per-role keys and display
//! labels are folded into the current layout by [`legacy::upgrade`].
//!
//! # Builder DSL
//!
//! For programmatic construction use [`ParameterBuilder`]:
//!
//! ```ignore
//! use paycomp_core::config::ParameterBuilder;
//! use paycomp_core::model::Role;
//!
//! let params = ParameterBuilder::new()
//!     .delivery(175.0)
//!     .packages(102.0)
//!     .headcount(Role::Staff, 3)
//!     .old_scheme(2200.0, 500.0, 300.0, 200.0)
//!     .new_bases(3100.0, 2600.0)
//!     .baseline(58.0)
//!     .build()?;
//! ```

pub mod builder;
pub mod legacy;

pub use builder::ParameterBuilder;

use crate::error::{CalcError, ParameterError};
use crate::model::ParameterSet;

/// Parse a parameter set from JSON and validate it
///
/// Type errors (a string where a number is expected, a non-object
/// document) surface as `ParameterError::Malformed`.
pub fn from_json_str(json: &str) -> Result<ParameterSet, CalcError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| ParameterError::Malformed(e.to_string()))?;
    from_json_value(value)
}

/// Parse a parameter set from an already decoded JSON value
pub fn from_json_value(value: serde_json::Value) -> Result<ParameterSet, CalcError> {
    let value = legacy::upgrade(value)?;
    let params: ParameterSet =
        serde_json::from_value(value).map_err(|e| ParameterError::Malformed(e.to_string()))?;
    params.validate()?;
    Ok(params)
}

/// Pretty-printed JSON with every field present
pub fn to_json_string(params: &ParameterSet) -> Result<String, CalcError> {
    serde_json::to_string_pretty(params)
        .map_err(|e| ParameterError::Malformed(e.to_string()).into())
}

/// The default parameter file contents
pub fn default_json() -> Result<String, CalcError> {
    to_json_string(&ParameterSet::default())
}
