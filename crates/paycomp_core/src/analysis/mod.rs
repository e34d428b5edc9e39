//! Scenario sweep analysis.
//!
//! A sweep varies one input across a linear range and records, at each
//! value, the selected role's salary and the store's net profit under every
//! pay mode:
//!
//! ```ignore
//! use paycomp_core::analysis::{SweepConfig, SweepTarget, sweep};
//!
//! let config = SweepConfig::new(SweepTarget::ConversionRatePct, 30.0, 70.0, 9);
//! let results = sweep(&params, &config)?;
//! let breakeven = results.first_profitable(PayMode::NewMid);
//! ```
//!
//! `ScenarioCache` memoises full comparisons when the same scenarios are
//! evaluated repeatedly, evicting the oldest entry once it is full.

mod cache;
mod config;
mod evaluator;

pub use cache::{DEFAULT_CACHE_CAPACITY, ScenarioCache};
pub use config::{SweepConfig, SweepTarget};
pub use evaluator::{SweepPoint, SweepResults, sweep};
