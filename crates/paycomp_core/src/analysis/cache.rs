//! Memoised comparisons for interactive what-if exploration.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::comparison::compare;
use crate::error::Result;
use crate::model::{Comparison, ParameterSet};

/// Entries kept by [`ScenarioCache::new`]
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Bounded cache of comparisons keyed by parameter fingerprint
///
/// A hit is only returned when the stored parameter set is equal to the
/// requested one, so fingerprint collisions recompute instead of returning
/// stale data. Once `capacity` entries are held, the oldest entry is evicted
/// for each new one.
#[derive(Debug)]
pub struct ScenarioCache {
    entries: FxHashMap<u64, (ParameterSet, Comparison)>,
    /// Keys in insertion order, oldest first
    order: VecDeque<u64>,
    capacity: usize,
    hits: usize,
    misses: usize,
}

impl Default for ScenarioCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl ScenarioCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache holding at most `capacity` comparisons (at least one)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Comparison for `params`, computed at most once while it stays cached
    pub fn compare(&mut self, params: &ParameterSet) -> Result<Comparison> {
        let key = params.fingerprint();
        if let Some((cached_params, comparison)) = self.entries.get(&key) {
            if cached_params == params {
                self.hits += 1;
                return Ok(comparison.clone());
            }
        }

        self.misses += 1;
        let comparison = compare(params)?;
        self.insert(key, params.clone(), comparison.clone());
        Ok(comparison)
    }

    fn insert(&mut self, key: u64, params: ParameterSet, comparison: Comparison) {
        // A colliding key replaces its entry in place
        if self.entries.insert(key, (params, comparison)).is_some() {
            return;
        }
        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                tracing::trace!(key = oldest, "evicted cached comparison");
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits
    }

    #[must_use]
    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
