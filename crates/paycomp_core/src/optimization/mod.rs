//! Tier threshold search
//!
//! Finds integer package thresholds for the tiered commission that best
//! reproduce the commission an employee would earn if every package were
//! paid at the tier-1 unit rate.
//!
//! # Example
//!
//! ```ignore
//! use paycomp_core::optimization::{DEFAULT_THRESHOLD_STEP, suggest_thresholds};
//!
//! if let Some(s) = suggest_thresholds(&params, PayMode::NewMid, DEFAULT_THRESHOLD_STEP)? {
//!     println!("tier 1 up to {}, tier 2 up to {}", s.tier1_limit, s.tier2_limit);
//! }
//! ```

mod threshold_search;

pub use threshold_search::{
    DEFAULT_THRESHOLD_STEP, MAX_THRESHOLD_CANDIDATES, MIN_TIER1_THRESHOLD, ThresholdSuggestion,
    suggest_thresholds,
};
