#![forbid(unsafe_code)]

//! Memoized lenient parsing.
//!
//! Hosts that rebuild layouts from the same handful of constraint strings
//! can keep a [`ConstraintCache`] around and skip re-tokenizing them. A hit
//! returns exactly what the uncached lenient parser would have produced.

use flexgrid_core::debug;
use flexgrid_layout::{EntityConstraints, FlexGridLayout};
use rustc_hash::FxHashMap;

use crate::lenient::{
    ConfigOption, apply_container_configuration, parse_container_configuration_string,
    parse_entity_constraints_string,
};

/// Counters for one of the two tables of a [`ConstraintCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl TableStats {
    fn record(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }
}

/// Snapshot of a [`ConstraintCache`], split by string kind.
///
/// Container hits still re-apply their options, so a high container hit
/// count saves tokenizing but not configuration work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entity: TableStats,
    pub container: TableStats,
}

impl CacheStats {
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.entity.hits + self.container.hits
    }

    #[must_use]
    pub fn misses(&self) -> u64 {
        self.entity.misses + self.container.misses
    }

    /// Share of lookups, over both tables, served without parsing.
    /// `0.0` before the first lookup.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        match self.hits() + self.misses() {
            0 => 0.0,
            lookups => self.hits() as f64 / lookups as f64,
        }
    }
}

/// Parse results keyed by the exact constraint string.
///
/// Entity strings map to fully parsed [`EntityConstraints`]; container
/// strings map to their option list, which is re-applied to the target
/// layout on every call. The cache is unbounded and owned by the caller.
#[derive(Debug, Default)]
pub struct ConstraintCache {
    entities: FxHashMap<String, EntityConstraints>,
    containers: FxHashMap<String, Vec<ConfigOption>>,
    stats: CacheStats,
}

impl ConstraintCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lenient entity parse, memoized by string.
    ///
    /// An empty string yields default constraints and is not cached.
    pub fn parse_entity_constraints_with_cache(&mut self, text: &str) -> EntityConstraints {
        if text.is_empty() {
            return EntityConstraints::new();
        }
        let cached = self.entities.get(text);
        self.stats.entity.record(cached.is_some());
        if let Some(cached) = cached {
            return cached.clone();
        }
        debug!(text, "constraint cache miss (entity)");
        let mut constraints = EntityConstraints::new();
        parse_entity_constraints_string(&mut constraints, text);
        self.entities.insert(text.to_owned(), constraints.clone());
        constraints
    }

    /// Lenient container parse, memoized by string, applied to `layout`.
    pub fn parse_container_configuration_with_cache(
        &mut self,
        layout: &mut FlexGridLayout,
        text: &str,
    ) {
        if text.is_empty() {
            return;
        }
        let cached = self.containers.get(text);
        self.stats.container.record(cached.is_some());
        if let Some(options) = cached {
            apply_container_configuration(layout, options);
            return;
        }
        debug!(text, "constraint cache miss (container)");
        let options = parse_container_configuration_string(text);
        apply_container_configuration(layout, &options);
        self.containers.insert(text.to_owned(), options);
    }

    /// Drop every cached entry. Statistics are kept.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.containers.clear();
    }

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Entries across the entity and container tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len() + self.containers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.containers.is_empty()
    }

    /// Current counters, with entry counts read from the tables.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats;
        stats.entity.entries = self.entities.len();
        stats.container.entries = self.containers.len();
        stats
    }
}
