/// Plain counters updated by map operations.
///
/// The map is single-threaded by contract, so these are ordinary integers
/// rather than atomics.
#[derive(Clone, Debug, Default)]
pub(crate) struct StatsCounter {
    hits: u64,
    misses: u64,
    evictions: u64,
    rejections: u64,
}

impl StatsCounter {
    pub(crate) fn new() -> Self {
        StatsCounter::default()
    }

    #[inline]
    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    #[inline]
    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    #[inline]
    pub(crate) fn record_evictions(&mut self, count: u64) {
        self.evictions += count;
    }

    #[inline]
    pub(crate) fn record_rejection(&mut self) {
        self.rejections += 1;
    }

    /// Returns a point-in-time snapshot of the statistics.
    pub(crate) fn snapshot(&self) -> Stats {
        let total = self.hits + self.misses;
        let hit_rate = if total == 0 {
            0.0_f64
        } else {
            self.hits as f64 / total as f64
        };
        Stats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            rejections: self.rejections,
            hit_rate,
        }
    }
}

/// A point-in-time snapshot of map statistics.
///
/// Only non-quiet lookups contribute to `hits`/`misses`; quiet lookups are
/// invisible here just as they are invisible to the replacement order.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    /// Number of non-quiet lookups that found their key.
    pub hits: u64,
    /// Number of non-quiet lookups that missed.
    pub misses: u64,
    /// Number of entries evicted to make room.
    pub evictions: u64,
    /// Number of operations that failed with `NoSpace`.
    pub rejections: u64,
    /// `hits / (hits + misses)`, or `0.0` if no lookups have been made.
    pub hit_rate: f64,
}

impl Stats {
    pub fn request_count(&self) -> u64 {
        self.hits + self.misses
    }
}
