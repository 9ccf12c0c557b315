use std::hash::BuildHasher;
use std::hash::Hash;
use std::marker::PhantomData;

use ahash::RandomState;

use crate::map::BoundedMap;
use crate::policy::{Lru, Policy};
use crate::weigher::{FnWeigher, UnitWeigher, Weigher};

/// Builder for configuring and constructing a [`BoundedMap`].
///
/// The weigher, policy, and hasher setters change the builder's type, so
/// the finished map is fully monomorphized — no boxing anywhere.
///
/// # Example
/// ```
/// use cortado::policy::Fifo;
/// use cortado::MapBuilder;
///
/// let map: cortado::BoundedMap<String, Vec<u8>, _, Fifo> = MapBuilder::new(1 << 20)
///     .weigher(|_k: &String, v: &Vec<u8>| v.len() as u64)
///     .policy(Fifo)
///     .build();
/// ```
pub struct MapBuilder<K, V, W = UnitWeigher, P = Lru, S = RandomState> {
    capacity: u64,
    bucket_count: usize,
    max_load_factor: f32,
    weigher: W,
    policy: P,
    hasher: S,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> MapBuilder<K, V> {
    /// Starts a builder with the given weight capacity and the defaults:
    /// unit weigher, LRU policy, `ahash` hasher.
    pub fn new(capacity: u64) -> Self {
        MapBuilder {
            capacity,
            bucket_count: 8,
            max_load_factor: 1.0,
            weigher: UnitWeigher,
            policy: Lru,
            hasher: RandomState::new(),
            _marker: PhantomData,
        }
    }
}

impl<K, V, W, P, S> MapBuilder<K, V, W, P, S> {
    /// Sets a weigher from a closure.
    pub fn weigher<F>(self, f: F) -> MapBuilder<K, V, FnWeigher<F>, P, S>
    where
        F: Fn(&K, &V) -> u64,
    {
        self.weigher_impl(FnWeigher(f))
    }

    /// Sets a weigher from any [`Weigher`] implementation.
    pub fn weigher_impl<W2>(self, weigher: W2) -> MapBuilder<K, V, W2, P, S>
    where
        W2: Weigher<K, V>,
    {
        MapBuilder {
            capacity: self.capacity,
            bucket_count: self.bucket_count,
            max_load_factor: self.max_load_factor,
            weigher,
            policy: self.policy,
            hasher: self.hasher,
            _marker: PhantomData,
        }
    }

    /// Sets the replacement policy.
    pub fn policy<P2>(self, policy: P2) -> MapBuilder<K, V, W, P2, S>
    where
        P2: Policy<K, V>,
    {
        MapBuilder {
            capacity: self.capacity,
            bucket_count: self.bucket_count,
            max_load_factor: self.max_load_factor,
            weigher: self.weigher,
            policy,
            hasher: self.hasher,
            _marker: PhantomData,
        }
    }

    /// Sets the hash builder used by the keyed index.
    pub fn hasher<S2>(self, hasher: S2) -> MapBuilder<K, V, W, P, S2>
    where
        S2: BuildHasher,
    {
        MapBuilder {
            capacity: self.capacity,
            bucket_count: self.bucket_count,
            max_load_factor: self.max_load_factor,
            weigher: self.weigher,
            policy: self.policy,
            hasher,
            _marker: PhantomData,
        }
    }

    /// Sets the initial bucket count (rounded up to a power of two).
    pub fn bucket_count(mut self, count: usize) -> Self {
        self.bucket_count = count;
        self
    }

    /// Sets the maximum load factor of the keyed index (default 1.0).
    pub fn max_load_factor(mut self, mlf: f32) -> Self {
        assert!(mlf > 0.0, "max load factor must be positive");
        self.max_load_factor = mlf;
        self
    }

    pub fn build(self) -> BoundedMap<K, V, W, P, S>
    where
        K: Hash + Eq,
        W: Weigher<K, V>,
        P: Policy<K, V>,
        S: BuildHasher,
    {
        BoundedMap::from_parts(
            self.capacity,
            self.weigher,
            self.policy,
            self.hasher,
            self.bucket_count,
            self.max_load_factor,
        )
    }
}
