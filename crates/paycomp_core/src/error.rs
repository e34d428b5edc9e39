use std::fmt;

use crate::model::{PayMode, Role};

/// Errors raised when a parameter set fails validation
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A field that must be non-negative is negative
    Negative { field: &'static str, value: f64 },
    /// A field is NaN or infinite
    NonFinite { field: &'static str },
    /// `tier2_threshold_ratio < tier1_threshold_ratio`
    InvertedTierThresholds { tier1_ratio: f64, tier2_ratio: f64 },
    /// A role has a negative headcount
    NegativeHeadcount { role: Role, count: i64 },
    /// Staff never receive a role subsidy
    StaffSubsidy { value: f64 },
    /// Ceiling conversion threshold below the floor threshold
    InvalidCeiling { min_pct: f64, max_pct: f64 },
    /// Operation needs a different pay mode
    UnsupportedMode { mode: PayMode, reason: &'static str },
    /// Field with an unusable value for the requested operation
    OutOfRange { field: &'static str, reason: &'static str },
    /// Input could not be parsed into a parameter set
    Malformed(String),
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::Negative { field, value } => {
                write!(f, "{field} must not be negative (got {value})")
            }
            ParameterError::NonFinite { field } => write!(f, "{field} must be a finite number"),
            ParameterError::InvertedTierThresholds {
                tier1_ratio,
                tier2_ratio,
            } => write!(
                f,
                "tier2_threshold_ratio ({tier2_ratio}) must be >= tier1_threshold_ratio ({tier1_ratio})"
            ),
            ParameterError::NegativeHeadcount { role, count } => {
                write!(f, "headcount for {} must not be negative (got {count})", role.key())
            }
            ParameterError::StaffSubsidy { value } => {
                write!(f, "staff role subsidy must be 0 (got {value})")
            }
            ParameterError::InvalidCeiling { min_pct, max_pct } => write!(
                f,
                "max_conversion_rate_pct ({max_pct}) must be >= min_conversion_rate_pct ({min_pct})"
            ),
            ParameterError::UnsupportedMode { mode, reason } => {
                write!(f, "pay mode {} not supported: {reason}", mode.key())
            }
            ParameterError::OutOfRange { field, reason } => write!(f, "{field}: {reason}"),
            ParameterError::Malformed(msg) => write!(f, "malformed parameters: {msg}"),
        }
    }
}

impl std::error::Error for ParameterError {}

/// Denominators that may legitimately be zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivisionByZero {
    /// No employees configured across all roles
    TotalHeadcount,
    /// Pack price equals pack cost
    UnitProfit,
}

impl fmt::Display for DivisionByZero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DivisionByZero::TotalHeadcount => write!(f, "division by zero: total headcount is 0"),
            DivisionByZero::UnitProfit => write!(f, "division by zero: unit profit is 0"),
        }
    }
}

impl std::error::Error for DivisionByZero {}

/// Errors returned by engine calculations
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    InvalidParameter(ParameterError),
    DivisionByZero(DivisionByZero),
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::InvalidParameter(e) => write!(f, "invalid parameter: {e}"),
            CalcError::DivisionByZero(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CalcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CalcError::InvalidParameter(e) => Some(e),
            CalcError::DivisionByZero(e) => Some(e),
        }
    }
}

impl From<ParameterError> for CalcError {
    fn from(err: ParameterError) -> Self {
        CalcError::InvalidParameter(err)
    }
}

impl From<DivisionByZero> for CalcError {
    fn from(err: DivisionByZero) -> Self {
        CalcError::DivisionByZero(err)
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
