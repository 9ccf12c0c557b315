//! Keyed index: a separate-chaining hash table over arena handles.
//!
//! Buckets hold the head slot of a chain threaded through the entries'
//! `hash_next` links, so an entry reference is enough to unlink it — there
//! is no side table.  The bucket array is always a power of two and is
//! addressed with the high hash bits (better avalanche from ahash).
//! Rehashing rebuilds chains only; slots never move, which is what keeps
//! handles stable across growth.
//!
//! Hashing and equality consult the key alone: the hasher is the injected
//! `BuildHasher`, equality is the key's `Eq` impl.

use std::hash::{BuildHasher, Hash};

use crate::arena::{Arena, NodeId, NULL};

const MIN_BUCKETS: usize = 8;

#[derive(Clone, Debug)]
pub(crate) struct KeyIndex<S> {
    /// Head slot index per bucket; `NULL` when the bucket is empty.
    buckets: Vec<usize>,
    /// Always `buckets.len() - 1`; buckets.len() is a power of two.
    mask: usize,
    build_hasher: S,
    max_load_factor: f32,
}

impl<S: BuildHasher> KeyIndex<S> {
    pub(crate) fn new(bucket_count: usize, build_hasher: S, max_load_factor: f32) -> Self {
        assert!(max_load_factor > 0.0, "max load factor must be positive");
        let count = bucket_count.max(MIN_BUCKETS).next_power_of_two();
        KeyIndex {
            buckets: vec![NULL; count],
            mask: count - 1,
            build_hasher,
            max_load_factor,
        }
    }

    #[inline]
    fn bucket_of(&self, hash: u64) -> usize {
        ((hash >> 32) as usize ^ hash as usize) & self.mask
    }

    pub(crate) fn hasher(&self) -> &S {
        &self.build_hasher
    }

    pub(crate) fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub(crate) fn max_load_factor(&self) -> f32 {
        self.max_load_factor
    }

    pub(crate) fn bucket_head(&self, bucket: usize) -> usize {
        self.buckets[bucket]
    }

    pub(crate) fn buckets(&self) -> &[usize] {
        &self.buckets
    }

    pub(crate) fn bucket<K: Hash>(&self, key: &K) -> usize {
        self.bucket_of(self.build_hasher.hash_one(key))
    }

    pub(crate) fn bucket_size<K, V>(&self, arena: &Arena<K, V>, bucket: usize) -> usize {
        let mut count = 0;
        let mut cur = self.buckets[bucket];
        while cur != NULL {
            count += 1;
            cur = arena.hash_next(NodeId(cur));
        }
        count
    }

    pub(crate) fn find<K, V>(&self, arena: &Arena<K, V>, key: &K) -> Option<NodeId>
    where
        K: Hash + Eq,
    {
        let mut cur = self.buckets[self.bucket(key)];
        while cur != NULL {
            let id = NodeId(cur);
            if arena.key(id) == key {
                return Some(id);
            }
            cur = arena.hash_next(id);
        }
        None
    }

    /// Chains a freshly allocated slot into its bucket.  The key must not
    /// already be present.  Grows the bucket array when the load factor is
    /// exceeded.
    pub(crate) fn insert<K, V>(&mut self, arena: &mut Arena<K, V>, id: NodeId)
    where
        K: Hash,
    {
        if arena.len() as f32 > self.max_load_factor * self.buckets.len() as f32 {
            // The slot is already occupied, so the rebuild chains it along
            // with everything else; chaining it again would cycle the bucket.
            self.rebuild(arena, self.buckets.len() * 2);
            return;
        }
        let bucket = self.bucket(arena.key(id));
        let head = self.buckets[bucket];
        arena.set_hash_next(id, head);
        self.buckets[bucket] = id.0;
    }

    /// Unlinks a slot from its bucket chain.  The slot must still hold its
    /// key (call this before freeing it from the arena).
    pub(crate) fn remove<K, V>(&mut self, arena: &mut Arena<K, V>, id: NodeId)
    where
        K: Hash,
    {
        let bucket = self.bucket(arena.key(id));
        let mut cur = self.buckets[bucket];
        if cur == id.0 {
            self.buckets[bucket] = arena.hash_next(id);
            return;
        }
        while cur != NULL {
            let next = arena.hash_next(NodeId(cur));
            if next == id.0 {
                let after = arena.hash_next(id);
                arena.set_hash_next(NodeId(cur), after);
                return;
            }
            cur = next;
        }
        debug_assert!(false, "slot missing from its bucket chain");
    }

    /// Rehashes to at least `count` buckets, never dropping below what the
    /// load factor requires for the current entry count.
    pub(crate) fn rehash<K, V>(&mut self, arena: &mut Arena<K, V>, count: usize)
    where
        K: Hash,
    {
        let floor = (arena.len() as f32 / self.max_load_factor).ceil() as usize;
        self.rebuild(arena, count.max(floor));
    }

    /// Prepares the index for `count` entries without further growth.
    pub(crate) fn reserve<K, V>(&mut self, arena: &mut Arena<K, V>, count: usize)
    where
        K: Hash,
    {
        let target = (count as f32 / self.max_load_factor).ceil() as usize;
        self.rebuild(arena, target);
    }

    pub(crate) fn set_max_load_factor<K, V>(&mut self, arena: &mut Arena<K, V>, mlf: f32)
    where
        K: Hash,
    {
        assert!(mlf > 0.0, "max load factor must be positive");
        self.max_load_factor = mlf;
        if arena.len() as f32 > mlf * self.buckets.len() as f32 {
            let floor = (arena.len() as f32 / mlf).ceil() as usize;
            self.rebuild(arena, floor.max(self.buckets.len()));
        }
    }

    fn rebuild<K, V>(&mut self, arena: &mut Arena<K, V>, count: usize)
    where
        K: Hash,
    {
        let count = count.max(MIN_BUCKETS).next_power_of_two();
        self.buckets.clear();
        self.buckets.resize(count, NULL);
        self.mask = count - 1;
        for idx in 1..arena.slot_count() {
            if !arena.is_occupied(idx) {
                continue;
            }
            let id = NodeId(idx);
            let bucket = self.bucket(arena.key(id));
            let head = self.buckets[bucket];
            arena.set_hash_next(id, head);
            self.buckets[bucket] = idx;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.buckets.fill(NULL);
    }
}
