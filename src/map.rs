use std::hash::{BuildHasher, Hash};

use ahash::RandomState;
use tracing::trace;

use crate::arena::{Arena, NodeId};
use crate::builder::MapBuilder;
use crate::error::Error;
use crate::index::KeyIndex;
use crate::iter::{BucketIter, EqualRange, Iter, ReplacementIter};
use crate::list;
use crate::manager::Manager;
use crate::metrics::{Stats, StatsCounter};
use crate::policy::{Lru, Policy};
use crate::weigher::{UnitWeigher, Weigher};

// ---------------------------------------------------------------------------
// Extracted nodes
// ---------------------------------------------------------------------------

/// An entry that has been removed from the map but keeps its storage, ready
/// to be put back with [`BoundedMap::insert_node`].
///
/// While extracted, the entry is owned by the caller and occupies none of
/// the map's weight budget.
#[derive(Debug)]
pub struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> Node<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// The value may be changed freely while the node is outside the map;
    /// it is re-weighed on reinsertion.
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Result of [`BoundedMap::insert_node`].
#[derive(Debug)]
pub struct InsertReturn<K, V> {
    /// Handle of the entry now associated with the node's key.
    pub position: NodeId,
    /// Whether the node itself was inserted.
    pub inserted: bool,
    /// The node handed back when its key was already present.
    pub node: Option<Node<K, V>>,
}

// ---------------------------------------------------------------------------
// BoundedMap
// ---------------------------------------------------------------------------

/// A bounded associative map with weighted capacity and a pluggable
/// replacement policy.
///
/// Each entry is assigned a weight by the configured [`Weigher`]; the map
/// keeps the total weight within `capacity` by evicting entries in the
/// order dictated by the [`Policy`].  Inserting something that cannot be
/// made to fit fails with [`Error::NoSpace`] and leaves the map untouched.
///
/// Lookups come in two flavors: the plain ones count as an access and let
/// the policy reshuffle the replacement order (`get`, `find`, `contains`,
/// ...), while the `quiet_` ones observe without leaving a trace.
///
/// # Example
/// ```
/// use cortado::BoundedMap;
///
/// // Capacity 2, unit weights, LRU replacement (the defaults).
/// let mut map: BoundedMap<&str, u32> = BoundedMap::new(2);
/// map.insert("a", 1).unwrap();
/// map.insert("b", 2).unwrap();
/// assert_eq!(map.get(&"a"), Some(&1)); // "a" is now the most recently used
/// map.insert("c", 3).unwrap();         // evicts "b"
/// assert!(map.quiet_contains(&"a"));
/// assert!(!map.quiet_contains(&"b"));
/// assert!(map.quiet_contains(&"c"));
/// ```
pub struct BoundedMap<K, V, W = UnitWeigher, P = Lru, S = RandomState> {
    arena: Arena<K, V>,
    index: KeyIndex<S>,
    manager: Manager<W, P>,
    stats: StatsCounter,
}

impl<K, V> BoundedMap<K, V>
where
    K: Hash + Eq,
{
    /// Creates a map with the given weight capacity and the default
    /// weigher (unit), policy (LRU), and hasher.
    pub fn new(capacity: u64) -> Self {
        MapBuilder::new(capacity).build()
    }

    /// Returns a [`MapBuilder`] for configuring a new map.
    pub fn builder(capacity: u64) -> MapBuilder<K, V> {
        MapBuilder::new(capacity)
    }
}

impl<K, V, W, P, S> BoundedMap<K, V, W, P, S>
where
    K: Hash + Eq,
    W: Weigher<K, V>,
    P: Policy<K, V>,
    S: BuildHasher,
{
    pub(crate) fn from_parts(
        capacity: u64,
        weigher: W,
        policy: P,
        hasher: S,
        bucket_count: usize,
        max_load_factor: f32,
    ) -> Self {
        BoundedMap {
            arena: Arena::new(),
            index: KeyIndex::new(bucket_count, hasher, max_load_factor),
            manager: Manager::new(capacity, weigher, policy),
            stats: StatsCounter::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Insertion
    // -----------------------------------------------------------------------

    /// Inserts a new entry.
    ///
    /// Returns the entry's handle and whether it was inserted.  When the
    /// key is already present nothing changes (not even the replacement
    /// order) and the existing handle is returned with `false`.
    ///
    /// # Errors
    /// [`Error::NoSpace`] when the new entry cannot fit even after
    /// eviction; the map is left unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Result<(NodeId, bool), Error> {
        if let Some(id) = self.index.find(&self.arena, &key) {
            return Ok((id, false));
        }
        let weight = self.manager.weigh(&key, &value);
        self.ensure_free(weight, None)?;
        let id = self.arena.alloc(key, value, weight);
        self.index.insert(&mut self.arena, id);
        self.manager.insert(&mut self.arena, id);
        Ok((id, true))
    }

    /// Inserts an entry whose value is built only if the key is absent.
    ///
    /// Useful when constructing the value is expensive: on a hit the
    /// closure is never called and the map is unchanged.
    pub fn insert_with<F>(&mut self, key: K, make: F) -> Result<(NodeId, bool), Error>
    where
        F: FnOnce() -> V,
    {
        if let Some(id) = self.index.find(&self.arena, &key) {
            return Ok((id, false));
        }
        self.insert(key, make())
    }

    /// Inserts the entry, or replaces the value (via [`assign`] semantics)
    /// when the key is already present.
    ///
    /// [`assign`]: Self::assign
    pub fn insert_or_assign(&mut self, key: K, value: V) -> Result<(NodeId, bool), Error> {
        match self.index.find(&self.arena, &key) {
            Some(id) => {
                self.assign(id, value)?;
                Ok((id, false))
            }
            None => self.insert(key, value),
        }
    }

    /// Replaces the value of a resident entry and recomputes its weight.
    ///
    /// Also counts as an access.  When the weight grows, room is made by
    /// evicting *other* entries — this one is excluded from victim
    /// selection.  Returns the previous value.
    ///
    /// # Errors
    /// [`Error::NoSpace`] when the grown entry cannot fit; the entry (and
    /// the rest of the map) is left unchanged.
    pub fn assign(&mut self, id: NodeId, value: V) -> Result<V, Error> {
        let old_weight = self.arena.weight(id);
        let new_weight = self.manager.weigh(self.arena.key(id), &value);
        if new_weight > old_weight {
            self.ensure_free(new_weight - old_weight, Some(id))?;
        }
        let old = self.arena.replace_value(id, value);
        self.manager
            .update_weight(&mut self.arena, id, old_weight, new_weight);
        self.manager.access(&mut self.arena, id);
        Ok(old)
    }

    /// Inserts a batch of entries, all or none.
    ///
    /// Keys already present are left untouched (value and replacement
    /// position both).  The new entries are first staged in the index,
    /// then — once enough space has been freed for their total weight —
    /// threaded into the replacement order one by one.
    ///
    /// # Errors
    /// [`Error::NoSpace`] when the batch as a whole cannot fit.  The map
    /// is then exactly as it was: staged entries are deleted, and any
    /// eviction performed while trying to make room is rewound.
    pub fn insert_many<I>(&mut self, entries: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut pending: Vec<NodeId> = Vec::new();
        let mut need: u64 = 0;
        for (key, value) in entries {
            if self.index.find(&self.arena, &key).is_some() {
                continue;
            }
            let weight = self.manager.weigh(&key, &value);
            let id = self.arena.alloc(key, value, weight);
            self.index.insert(&mut self.arena, id);
            pending.push(id);
            need = need.saturating_add(weight);
            if need > self.manager.capacity() {
                break;
            }
        }
        if self.ensure_free(need, None).is_err() {
            trace!(staged = pending.len(), need, "batch insert rolled back");
            for id in pending {
                self.index.remove(&mut self.arena, id);
                self.arena.free(id);
            }
            return Err(Error::NoSpace);
        }
        for id in pending {
            self.manager.insert(&mut self.arena, id);
        }
        Ok(())
    }

    /// Re-inserts an extracted node, with the same fit enforcement as
    /// [`insert`](Self::insert).
    ///
    /// When the key is already present the node is handed back untouched in
    /// [`InsertReturn::node`].
    ///
    /// # Errors
    /// The node itself is returned when it cannot fit, so no data is lost.
    pub fn insert_node(&mut self, node: Node<K, V>) -> Result<InsertReturn<K, V>, Node<K, V>> {
        if let Some(id) = self.index.find(&self.arena, &node.key) {
            return Ok(InsertReturn {
                position: id,
                inserted: false,
                node: Some(node),
            });
        }
        let weight = self.manager.weigh(&node.key, &node.value);
        if self.ensure_free(weight, None).is_err() {
            return Err(node);
        }
        let id = self.arena.alloc(node.key, node.value, weight);
        self.index.insert(&mut self.arena, id);
        self.manager.insert(&mut self.arena, id);
        Ok(InsertReturn {
            position: id,
            inserted: true,
            node: None,
        })
    }

    // -----------------------------------------------------------------------
    // Removal
    // -----------------------------------------------------------------------

    /// Removes the entry for `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.find(&self.arena, key)?;
        Some(self.remove_at(id).1)
    }

    /// Removes the entry behind a handle, returning the pair.
    pub fn remove_at(&mut self, id: NodeId) -> (K, V) {
        self.manager.erase(&mut self.arena, id);
        self.index.remove(&mut self.arena, id);
        self.arena.free(id)
    }

    /// Removes every entry in the replacement-order range `[first, last)`.
    pub fn remove_range(&mut self, first: NodeId, last: NodeId) {
        let mut ids = Vec::new();
        let mut it = first;
        while it != last {
            ids.push(it);
            it = self.arena.next(it);
        }
        self.manager.erase_range(&mut self.arena, first, last);
        for id in ids {
            self.index.remove(&mut self.arena, id);
            self.arena.free(id);
        }
    }

    /// Removes the entry for `key` and returns it as an owned [`Node`].
    pub fn extract(&mut self, key: &K) -> Option<Node<K, V>> {
        let id = self.index.find(&self.arena, key)?;
        Some(self.extract_at(id))
    }

    /// Extracts the entry behind a handle.
    pub fn extract_at(&mut self, id: NodeId) -> Node<K, V> {
        self.manager.erase(&mut self.arena, id);
        self.index.remove(&mut self.arena, id);
        let (key, value) = self.arena.free(id);
        Node { key, value }
    }

    /// Removes all entries.  Capacity, policy, and bucket count survive.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.index.clear();
        self.manager.clear();
    }

    // -----------------------------------------------------------------------
    // Lookup — non-quiet variants count as an access
    // -----------------------------------------------------------------------

    /// Returns the value for `key` and lets the policy note the access.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.index.find(&self.arena, key) {
            Some(id) => {
                self.stats.record_hit();
                self.manager.access(&mut self.arena, id);
                Some(self.arena.value(id))
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Returns the value for `key` without touching the replacement order.
    pub fn quiet_get(&self, key: &K) -> Option<&V> {
        let id = self.index.find(&self.arena, key)?;
        Some(self.arena.value(id))
    }

    /// Returns the handle for `key` and lets the policy note the access.
    pub fn find(&mut self, key: &K) -> Option<NodeId> {
        match self.index.find(&self.arena, key) {
            Some(id) => {
                self.stats.record_hit();
                self.manager.access(&mut self.arena, id);
                Some(id)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Returns the handle for `key` without touching the replacement order.
    pub fn quiet_find(&self, key: &K) -> Option<NodeId> {
        self.index.find(&self.arena, key)
    }

    pub fn contains(&mut self, key: &K) -> bool {
        self.find(key).is_some()
    }

    pub fn quiet_contains(&self, key: &K) -> bool {
        self.quiet_find(key).is_some()
    }

    /// Number of entries with this key: 0 or 1.
    pub fn count(&mut self, key: &K) -> usize {
        usize::from(self.find(key).is_some())
    }

    pub fn quiet_count(&self, key: &K) -> usize {
        usize::from(self.quiet_find(key).is_some())
    }

    /// Returns the value for `key`, failing loudly on absence.
    ///
    /// # Errors
    /// [`Error::KeyNotFound`] when the key is not resident.
    pub fn at(&mut self, key: &K) -> Result<&V, Error> {
        match self.index.find(&self.arena, key) {
            Some(id) => {
                self.stats.record_hit();
                self.manager.access(&mut self.arena, id);
                Ok(self.arena.value(id))
            }
            None => {
                self.stats.record_miss();
                Err(Error::KeyNotFound)
            }
        }
    }

    /// Quiet variant of [`at`](Self::at).
    pub fn quiet_at(&self, key: &K) -> Result<&V, Error> {
        match self.index.find(&self.arena, key) {
            Some(id) => Ok(self.arena.value(id)),
            None => Err(Error::KeyNotFound),
        }
    }

    /// Iterator over the entries matching `key` — at most one.
    pub fn equal_range(&mut self, key: &K) -> EqualRange<'_, K, V> {
        match self.index.find(&self.arena, key) {
            Some(id) => {
                self.stats.record_hit();
                self.manager.access(&mut self.arena, id);
                EqualRange::new(Some(self.arena.pair(id)))
            }
            None => {
                self.stats.record_miss();
                EqualRange::new(None)
            }
        }
    }

    /// Quiet variant of [`equal_range`](Self::equal_range).
    pub fn quiet_equal_range(&self, key: &K) -> EqualRange<'_, K, V> {
        EqualRange::new(self.index.find(&self.arena, key).map(|id| self.arena.pair(id)))
    }

    /// Returns the value for `key`, inserting `V::default()` when absent.
    ///
    /// # Errors
    /// [`Error::NoSpace`] when the inserted default cannot fit.
    pub fn get_or_insert_default(&mut self, key: K) -> Result<&V, Error>
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Returns the value for `key`, inserting `make()` when absent.
    ///
    /// A hit counts as an access; a miss inserts subject to the usual fit
    /// enforcement.
    pub fn get_or_insert_with<F>(&mut self, key: K, make: F) -> Result<&V, Error>
    where
        F: FnOnce() -> V,
    {
        if let Some(id) = self.index.find(&self.arena, &key) {
            self.stats.record_hit();
            self.manager.access(&mut self.arena, id);
            return Ok(self.arena.value(id));
        }
        self.stats.record_miss();
        let value = make();
        let weight = self.manager.weigh(&key, &value);
        self.ensure_free(weight, None)?;
        let id = self.arena.alloc(key, value, weight);
        self.index.insert(&mut self.arena, id);
        self.manager.insert(&mut self.arena, id);
        Ok(self.arena.value(id))
    }

    /// The entry behind a handle.
    pub fn entry_at(&self, id: NodeId) -> (&K, &V) {
        self.arena.pair(id)
    }

    // -----------------------------------------------------------------------
    // Explicit access and replacement-order navigation
    // -----------------------------------------------------------------------

    /// Invokes the policy's access hook for `key`.  Returns whether the key
    /// was present.
    pub fn access(&mut self, key: &K) -> bool {
        match self.index.find(&self.arena, key) {
            Some(id) => {
                self.manager.access(&mut self.arena, id);
                true
            }
            None => false,
        }
    }

    /// Invokes the policy's access hook for a handle.
    pub fn access_at(&mut self, id: NodeId) {
        self.manager.access(&mut self.arena, id);
    }

    /// First position in replacement order (evicted soonest), or
    /// [`replacement_end`](Self::replacement_end) when empty.
    pub fn replacement_begin(&self) -> NodeId {
        self.arena.next(NodeId::SENTINEL)
    }

    /// The past-the-end position of the replacement order.
    pub fn replacement_end(&self) -> NodeId {
        NodeId::SENTINEL
    }

    pub fn replacement_next(&self, id: NodeId) -> NodeId {
        self.arena.next(id)
    }

    pub fn replacement_prev(&self, id: NodeId) -> NodeId {
        self.arena.prev(id)
    }

    /// The entry the policy would evict next, or `None` when the map is
    /// empty or every entry is protected.
    pub fn next_victim(&self) -> Option<NodeId> {
        let id = self.manager.next(&self.arena);
        (id != NodeId::SENTINEL).then_some(id)
    }

    // -----------------------------------------------------------------------
    // Replacement-order surgery
    // -----------------------------------------------------------------------

    /// Splices the replacement-order range `[first, last)` to just before
    /// `dest`.  `dest` must lie outside the range.
    pub fn move_range(&mut self, first: NodeId, last: NodeId, dest: NodeId) {
        list::move_range(&mut self.arena, first, last, dest);
    }

    /// Swaps two entries' replacement-order positions.
    pub fn iter_swap(&mut self, a: NodeId, b: NodeId) {
        list::iter_swap(&mut self.arena, a, b);
    }

    /// Swaps two non-overlapping replacement-order ranges.
    pub fn swap_ranges(&mut self, first1: NodeId, last1: NodeId, first2: NodeId, last2: NodeId) {
        list::swap_ranges(&mut self.arena, first1, last1, first2, last2);
    }

    /// Reverses the replacement-order range `[first, last)`.
    pub fn reverse(&mut self, first: NodeId, last: NodeId) {
        list::reverse(&mut self.arena, first, last);
    }

    /// Rotates `[first, last)` so that `n_first` comes first.
    pub fn rotate(&mut self, first: NodeId, n_first: NodeId, last: NodeId) {
        list::rotate(&mut self.arena, first, n_first, last);
    }

    // -----------------------------------------------------------------------
    // Space management
    // -----------------------------------------------------------------------

    /// Evicts until at least `amount` weight has been freed.
    ///
    /// # Errors
    /// [`Error::NoSpace`] when the policy runs out of victims first; any
    /// eviction already performed is rewound.
    pub fn free_space(&mut self, amount: u64) -> Result<(), Error> {
        self.evict(amount, None)
    }

    /// Ensures at least `amount` weight of free budget, evicting only the
    /// shortfall.
    ///
    /// # Errors
    /// [`Error::NoSpace`] as for [`free_space`](Self::free_space).
    pub fn provide_space(&mut self, amount: u64) -> Result<(), Error> {
        self.ensure_free(amount, None)
    }

    fn ensure_free(&mut self, need: u64, except: Option<NodeId>) -> Result<(), Error> {
        if need > self.manager.capacity() {
            self.stats.record_rejection();
            return Err(Error::NoSpace);
        }
        let free = self.manager.capacity() - self.manager.weight();
        if free >= need {
            return Ok(());
        }
        self.evict(need - free, except)
    }

    /// The eviction loop: pop victims one at a time, keeping the erased
    /// handles on a stack so the whole thing can be rewound if the policy
    /// reports "none" before enough weight is freed.
    fn evict(&mut self, amount: u64, except: Option<NodeId>) -> Result<(), Error> {
        if self.manager.weight() < amount {
            self.stats.record_rejection();
            return Err(Error::NoSpace);
        }
        let mut freed: u64 = 0;
        let mut removed: Vec<NodeId> = Vec::new();
        let mut next = match except {
            Some(e) => self.manager.next_except(&mut self.arena, e),
            None => self.manager.next(&self.arena),
        };
        while freed < amount {
            if next == NodeId::SENTINEL {
                // The hint may simply have run past the end; retry once
                // from the top before giving up.
                next = match except {
                    Some(e) => self.manager.next_except(&mut self.arena, e),
                    None => self.manager.next(&self.arena),
                };
                if next == NodeId::SENTINEL {
                    for id in removed.iter().rev() {
                        self.manager.reinsert(&mut self.arena, *id);
                    }
                    trace!(amount, freed, "eviction rewound, no eligible victims");
                    self.stats.record_rejection();
                    return Err(Error::NoSpace);
                }
            }
            freed += self.arena.weight(next);
            removed.push(next);
            let hint = self.manager.erase(&mut self.arena, next);
            next = match except {
                Some(e) => self.manager.next_except_from(&mut self.arena, hint, e),
                None => self.manager.next_from(&self.arena, hint),
            };
        }
        trace!(amount, freed, victims = removed.len(), "evicted for space");
        self.stats.record_evictions(removed.len() as u64);
        for id in removed {
            self.index.remove(&mut self.arena, id);
            self.arena.free(id);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Iterators
    // -----------------------------------------------------------------------

    /// Iterates entries in index (bucket) order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.arena, self.index.buckets())
    }

    /// Iterates entries in replacement order, soonest victim first.
    pub fn replacement_iter(&self) -> ReplacementIter<'_, K, V> {
        ReplacementIter::new(&self.arena)
    }

    /// Iterates the entries of bucket `n`.
    pub fn bucket_iter(&self, n: usize) -> BucketIter<'_, K, V> {
        BucketIter::new(&self.arena, self.index.bucket_head(n))
    }

    // -----------------------------------------------------------------------
    // Hash-table controls
    // -----------------------------------------------------------------------

    /// The bucket a key falls into.
    pub fn bucket(&self, key: &K) -> usize {
        self.index.bucket(key)
    }

    pub fn bucket_count(&self) -> usize {
        self.index.bucket_count()
    }

    pub fn bucket_size(&self, n: usize) -> usize {
        self.index.bucket_size(&self.arena, n)
    }

    /// Rehashes to at least `count` buckets.  Entry handles stay valid.
    pub fn rehash(&mut self, count: usize) {
        self.index.rehash(&mut self.arena, count);
    }

    /// Prepares the index for `count` entries.
    pub fn reserve(&mut self, count: usize) {
        self.index.reserve(&mut self.arena, count);
    }

    pub fn max_load_factor(&self) -> f32 {
        self.index.max_load_factor()
    }

    pub fn set_max_load_factor(&mut self, mlf: f32) {
        self.index.set_max_load_factor(&mut self.arena, mlf);
    }

    // -----------------------------------------------------------------------
    // Observers
    // -----------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// Current total weight of resident entries.
    pub fn weight(&self) -> u64 {
        self.manager.weight()
    }

    /// Maximum total weight.
    pub fn capacity(&self) -> u64 {
        self.manager.capacity()
    }

    /// Changes the capacity.  Panics if set below the current weight.
    pub fn set_capacity(&mut self, capacity: u64) {
        self.manager.set_capacity(capacity);
    }

    /// True when an additional `weight` would fit without eviction.
    pub fn can_fit(&self, weight: u64) -> bool {
        self.manager.can_fit(weight)
    }

    pub fn hasher(&self) -> &S {
        self.index.hasher()
    }

    pub fn weigher(&self) -> &W {
        self.manager.weigher()
    }

    pub fn policy(&self) -> &P {
        self.manager.policy()
    }

    /// Point-in-time statistics snapshot.
    pub fn stats(&self) -> Stats {
        self.stats.snapshot()
    }
}

// ---------------------------------------------------------------------------
// Standard trait plumbing
// ---------------------------------------------------------------------------

impl<K, V, W, P, S> Clone for BoundedMap<K, V, W, P, S>
where
    K: Clone,
    V: Clone,
    W: Clone,
    P: Clone,
    S: Clone,
{
    /// Structural copy: membership, weights, bucket layout, and the exact
    /// replacement order are all preserved.
    fn clone(&self) -> Self {
        BoundedMap {
            arena: self.arena.clone(),
            index: self.index.clone(),
            manager: self.manager.clone(),
            stats: self.stats.clone(),
        }
    }
}

impl<K, V, W, P, S> PartialEq for BoundedMap<K, V, W, P, S>
where
    K: Hash + Eq,
    V: PartialEq,
    W: Weigher<K, V>,
    P: Policy<K, V>,
    S: BuildHasher,
{
    /// Same membership with equal values; replacement order is not part of
    /// map equality.
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|(k, v)| other.quiet_get(k) == Some(v))
    }
}

impl<'a, K, V, W, P, S> IntoIterator for &'a BoundedMap<K, V, W, P, S>
where
    K: Hash + Eq,
    W: Weigher<K, V>,
    P: Policy<K, V>,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
