//! Entry weigher — assigns a cost (weight) to each stored entry.
//!
//! The map enforces `Σ weight(entry) ≤ capacity`.  By default every entry
//! costs 1 unit (`UnitWeigher`), so `capacity` is simply the maximum number
//! of entries.  A custom weigher lets the map bound memory consumption (or
//! any other additive resource) instead of entry count.
//!
//! # Example
//! ```
//! use cortado::MapBuilder;
//!
//! // Cap at ~10 MB total value size (keys are not counted).
//! let map: cortado::BoundedMap<String, Vec<u8>, _> = MapBuilder::new(10 * 1024 * 1024)
//!     .weigher(|_key: &String, val: &Vec<u8>| val.len() as u64 + 1)
//!     .build();
//! ```

/// Computes the cost of an entry.
///
/// The result must be deterministic for a given `(key, value)` pair: the
/// weight is recomputed on [`assign`](crate::BoundedMap::assign) and the
/// cached copy must agree with what the weigher reported at insert time.
/// Returning 0 is legal — such entries occupy no budget and always fit —
/// but a map full of zero-weight entries is effectively unbounded.
pub trait Weigher<K, V> {
    fn weigh(&self, key: &K, value: &V) -> u64;
}

// ---------------------------------------------------------------------------
// Built-in implementations
// ---------------------------------------------------------------------------

/// Every entry costs exactly 1 unit.  This is the default weigher.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnitWeigher;

impl<K, V> Weigher<K, V> for UnitWeigher {
    #[inline]
    fn weigh(&self, _key: &K, _value: &V) -> u64 {
        1
    }
}

/// A weigher backed by a closure.
///
/// Created via [`MapBuilder::weigher`](crate::MapBuilder::weigher).
#[derive(Clone, Copy, Debug)]
pub struct FnWeigher<F>(pub F);

impl<K, V, F> Weigher<K, V> for FnWeigher<F>
where
    F: Fn(&K, &V) -> u64,
{
    #[inline]
    fn weigh(&self, key: &K, value: &V) -> u64 {
        (self.0)(key, value)
    }
}
