//! Pluggable memoization of generated tube fields.
//!
//! Field generation is a pure function of its inputs, so a cache only saves
//! time. [`NoCache`] is the default; [`MemoCache`] keeps every field it has
//! seen, which suits the small parameter space of one interactive session or
//! one minimum-diameter search.

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use super::{LayoutError, LayoutPattern, OffsetMode, TubeField, TubeGeometry};

/// Outcome of generating one field, shared between the cache and callers.
pub type FieldOutcome = Result<Arc<TubeField>, LayoutError>;

/// Exact input tuple identifying a generated field.
///
/// Floats are keyed by bit pattern, so only bit-identical inputs hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldKey {
    shell_id: u64,
    tube_od: u64,
    pitch_ratio: u64,
    clearance: u64,
    pattern: LayoutPattern,
    offset: OffsetMode,
}

impl FieldKey {
    /// Builds the key for a field request.
    #[must_use]
    pub fn new(
        shell_id: f64,
        geometry: &TubeGeometry,
        pattern: LayoutPattern,
        offset: OffsetMode,
    ) -> Self {
        Self {
            shell_id: shell_id.to_bits(),
            tube_od: geometry.tube_od().to_bits(),
            pitch_ratio: geometry.pitch_ratio().to_bits(),
            clearance: geometry.clearance().to_bits(),
            pattern,
            offset,
        }
    }
}

/// A store consulted before generating a field.
///
/// Implementations must return exactly what was inserted for a key, or
/// nothing at all.
pub trait FieldCache {
    /// Returns the stored outcome for `key`, if any.
    fn get(&self, key: &FieldKey) -> Option<FieldOutcome>;

    /// Stores the outcome for `key`.
    fn insert(&self, key: FieldKey, outcome: FieldOutcome);
}

/// A cache that never stores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl FieldCache for NoCache {
    fn get(&self, _key: &FieldKey) -> Option<FieldOutcome> {
        None
    }

    fn insert(&self, _key: FieldKey, _outcome: FieldOutcome) {}
}

/// An unbounded, thread-safe map from inputs to generated fields.
///
/// A poisoned lock is treated as a miss and inserts are skipped.
#[derive(Debug, Default)]
pub struct MemoCache {
    entries: Mutex<FxHashMap<FieldKey, FieldOutcome>>,
}

impl MemoCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FieldCache for MemoCache {
    fn get(&self, key: &FieldKey) -> Option<FieldOutcome> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn insert(&self, key: FieldKey, outcome: FieldOutcome) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::tubesheet::Tube;

    fn key(shell_id: f64) -> FieldKey {
        let geometry = TubeGeometry::new(10.0, 1.25, 1.0).unwrap();
        FieldKey::new(shell_id, &geometry, LayoutPattern::Square90, OffsetMode::NoOffset)
    }

    #[test]
    fn no_cache_forgets() {
        let cache = NoCache;
        cache.insert(key(50.0), Ok(Arc::new(TubeField::default())));
        assert!(cache.get(&key(50.0)).is_none());
    }

    #[test]
    fn memo_cache_round_trips() {
        let cache = MemoCache::new();
        assert!(cache.is_empty());

        let field = Arc::new(TubeField::new(vec![Tube::new(0.0, 0.0)]));
        cache.insert(key(50.0), Ok(Arc::clone(&field)));
        cache.insert(key(5.0), Err(LayoutError::InvalidField));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&key(50.0)), Some(Ok(field)));
        assert_eq!(cache.get(&key(5.0)), Some(Err(LayoutError::InvalidField)));
        assert!(cache.get(&key(50.000_000_01)).is_none());
    }
}
