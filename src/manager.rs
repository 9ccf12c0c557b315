//! Replacement manager: owns the weight budget and drives the circular
//! replacement order through the policy's hook points.
//!
//! The entries themselves live in the arena; every operation here takes the
//! arena alongside `&self`/`&mut self` and rewires links in place.  An
//! erased node keeps its `prev`/`next` fields, so a matched `erase` →
//! `reinsert` pair (with no mutation in between) restores the node to
//! exactly its original position — the eviction loop in the facade relies
//! on this to rewind when the policy runs out of victims.

use crate::arena::{Arena, NodeId};
use crate::policy::{Order, OrderMut, Policy};
use crate::weigher::Weigher;

#[derive(Clone, Debug)]
pub(crate) struct Manager<W, P> {
    capacity: u64,
    weight: u64,
    weigher: W,
    policy: P,
}

impl<W, P> Manager<W, P> {
    pub(crate) fn new(capacity: u64, weigher: W, policy: P) -> Self {
        Manager {
            capacity,
            weight: 0,
            weigher,
            policy,
        }
    }

    pub(crate) fn capacity(&self) -> u64 {
        self.capacity
    }

    pub(crate) fn weight(&self) -> u64 {
        self.weight
    }

    pub(crate) fn set_capacity(&mut self, capacity: u64) {
        assert!(
            capacity >= self.weight,
            "capacity {capacity} below current weight {}",
            self.weight
        );
        self.capacity = capacity;
    }

    /// True when an additional `weight` fits the remaining budget.
    pub(crate) fn can_fit(&self, weight: u64) -> bool {
        match self.weight.checked_add(weight) {
            Some(total) => total <= self.capacity,
            None => false,
        }
    }

    pub(crate) fn weigher(&self) -> &W {
        &self.weigher
    }

    pub(crate) fn policy(&self) -> &P {
        &self.policy
    }

    pub(crate) fn weigh<K, V>(&self, key: &K, value: &V) -> u64
    where
        W: Weigher<K, V>,
    {
        self.weigher.weigh(key, value)
    }

    pub(crate) fn clear(&mut self) {
        self.weight = 0;
    }

    fn begin<K, V>(arena: &Arena<K, V>) -> NodeId {
        arena.next(NodeId::SENTINEL)
    }
}

impl<W, P> Manager<W, P> {
    /// Splices an allocated (but unlinked) node at the policy's insert
    /// position and charges its weight.  The weight must already fit.
    pub(crate) fn insert<K, V>(&mut self, arena: &mut Arena<K, V>, id: NodeId) -> NodeId
    where
        W: Weigher<K, V>,
        P: Policy<K, V>,
    {
        let weight = arena.weight(id);
        debug_assert!(self.can_fit(weight));
        let place = if P::PROVIDES_INSERT {
            self.policy
                .insert_position(Order::new(arena), Self::begin(arena), NodeId::SENTINEL)
        } else {
            NodeId::SENTINEL
        };
        let before = arena.prev(place);
        arena.link(before, id);
        arena.link(id, place);
        self.weight += weight;
        id
    }

    /// Re-links a previously erased node using its preserved neighbors.
    ///
    /// Matched-pair contract: reinsertions must happen in the reverse order
    /// of the erasures, with no other list mutation in between.
    pub(crate) fn reinsert<K, V>(&mut self, arena: &mut Arena<K, V>, id: NodeId) {
        self.weight += arena.weight(id);
        let prev = arena.prev(id);
        let next = arena.next(id);
        arena.link(prev, id);
        arena.link(id, next);
    }

    /// Unlinks a node and refunds its weight.  Returns the successor.
    ///
    /// The node's own `prev`/`next` are left pointing at its former
    /// neighbors for [`reinsert`](Self::reinsert).
    pub(crate) fn erase<K, V>(&mut self, arena: &mut Arena<K, V>, id: NodeId) -> NodeId {
        let prev = arena.prev(id);
        let next = arena.next(id);
        arena.link(prev, next);
        self.weight -= arena.weight(id);
        next
    }

    /// Unlinks `[first, last)` in one splice after a weight scan.
    pub(crate) fn erase_range<K, V>(
        &mut self,
        arena: &mut Arena<K, V>,
        first: NodeId,
        last: NodeId,
    ) -> NodeId {
        let before = arena.prev(first);
        let mut sum = 0u64;
        let mut it = first;
        while it != last {
            sum += arena.weight(it);
            it = arena.next(it);
        }
        self.weight -= sum;
        arena.link(before, last);
        last
    }

    /// Swaps a resident entry's cached weight and adjusts the total.
    pub(crate) fn update_weight<K, V>(
        &mut self,
        arena: &mut Arena<K, V>,
        id: NodeId,
        old_weight: u64,
        new_weight: u64,
    ) {
        debug_assert_eq!(arena.weight(id), old_weight);
        self.weight = self.weight - old_weight + new_weight;
        debug_assert!(self.weight <= self.capacity);
        arena.set_weight(id, new_weight);
    }

    /// Runs the policy's access hook for `id`, if it has one.
    pub(crate) fn access<K, V>(&mut self, arena: &mut Arena<K, V>, id: NodeId)
    where
        P: Policy<K, V>,
    {
        if P::PROVIDES_ACCESS {
            let first = Self::begin(arena);
            self.policy
                .access(OrderMut::new(arena), first, NodeId::SENTINEL, id);
        }
    }

    /// The policy's current victim, or the sentinel when the order is empty
    /// or nothing may be evicted.
    pub(crate) fn next<K, V>(&self, arena: &Arena<K, V>) -> NodeId
    where
        P: Policy<K, V>,
    {
        let first = Self::begin(arena);
        if first == NodeId::SENTINEL {
            return NodeId::SENTINEL;
        }
        if P::PROVIDES_ERASE {
            self.policy
                .erase_position(Order::new(arena), first, NodeId::SENTINEL)
        } else {
            first
        }
    }

    /// Like [`next`](Self::next) but searching from `hint` onward.
    pub(crate) fn next_from<K, V>(&self, arena: &Arena<K, V>, hint: NodeId) -> NodeId
    where
        P: Policy<K, V>,
    {
        if hint == NodeId::SENTINEL {
            return NodeId::SENTINEL;
        }
        if P::PROVIDES_ERASE {
            self.policy
                .erase_position(Order::new(arena), hint, NodeId::SENTINEL)
        } else {
            hint
        }
    }

    /// Victim selection that never returns `except`.
    ///
    /// The excluded node is unlinked for the duration of the policy query
    /// and restored to exactly its original position before returning.
    /// Passing the sentinel as `except` is equivalent to plain
    /// [`next`](Self::next).
    pub(crate) fn next_except<K, V>(&self, arena: &mut Arena<K, V>, except: NodeId) -> NodeId
    where
        P: Policy<K, V>,
    {
        if except == NodeId::SENTINEL {
            return self.next(arena);
        }
        if Self::begin(arena) == NodeId::SENTINEL {
            return NodeId::SENTINEL;
        }
        let prev = arena.prev(except);
        let next = arena.next(except);
        arena.link(prev, next);
        let found = self.next(arena);
        debug_assert!(found != except);
        arena.link(prev, except);
        arena.link(except, next);
        found
    }

    /// Hinted variant of [`next_except`](Self::next_except).  A hint equal
    /// to the excluded node is advanced past it first.
    pub(crate) fn next_except_from<K, V>(
        &self,
        arena: &mut Arena<K, V>,
        hint: NodeId,
        except: NodeId,
    ) -> NodeId
    where
        P: Policy<K, V>,
    {
        if except == NodeId::SENTINEL {
            return self.next_from(arena, hint);
        }
        if Self::begin(arena) == NodeId::SENTINEL {
            return NodeId::SENTINEL;
        }
        let hint = if hint == except { arena.next(except) } else { hint };
        let prev = arena.prev(except);
        let next = arena.next(except);
        arena.link(prev, next);
        let found = self.next_from(arena, hint);
        debug_assert!(found != except);
        arena.link(prev, except);
        arena.link(except, next);
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Fifo, Lifo, Lru};
    use crate::weigher::UnitWeigher;

    type M<P> = Manager<UnitWeigher, P>;

    fn fill<P: Policy<u32, u32>>(
        manager: &mut M<P>,
        arena: &mut Arena<u32, u32>,
        keys: &[u32],
    ) -> Vec<NodeId> {
        keys.iter()
            .map(|&k| {
                let id = arena.alloc(k, k * 10, 1);
                manager.insert(arena, id)
            })
            .collect()
    }

    fn order(arena: &Arena<u32, u32>) -> Vec<u32> {
        let mut out = Vec::new();
        let mut cur = arena.next(NodeId::SENTINEL);
        while cur != NodeId::SENTINEL {
            out.push(*arena.key(cur));
            cur = arena.next(cur);
        }
        out
    }

    #[test]
    fn default_insert_goes_to_the_end() {
        let mut arena = Arena::new();
        let mut manager: M<Fifo> = Manager::new(10, UnitWeigher, Fifo);
        fill(&mut manager, &mut arena, &[1, 2, 3]);
        assert_eq!(order(&arena), vec![1, 2, 3]);
        assert_eq!(manager.weight(), 3);
    }

    #[test]
    fn lifo_insert_goes_to_the_front() {
        let mut arena = Arena::new();
        let mut manager: M<Lifo> = Manager::new(10, UnitWeigher, Lifo);
        fill(&mut manager, &mut arena, &[1, 2, 3]);
        assert_eq!(order(&arena), vec![3, 2, 1]);
    }

    #[test]
    fn erase_then_reinsert_restores_exact_position() {
        let mut arena = Arena::new();
        let mut manager: M<Fifo> = Manager::new(10, UnitWeigher, Fifo);
        let ids = fill(&mut manager, &mut arena, &[1, 2, 3, 4]);

        let successor = manager.erase(&mut arena, ids[1]);
        assert_eq!(successor, ids[2]);
        assert_eq!(order(&arena), vec![1, 3, 4]);
        assert_eq!(manager.weight(), 3);

        manager.reinsert(&mut arena, ids[1]);
        assert_eq!(order(&arena), vec![1, 2, 3, 4]);
        assert_eq!(manager.weight(), 4);
    }

    #[test]
    fn stacked_erases_rewind_in_reverse_order() {
        let mut arena = Arena::new();
        let mut manager: M<Fifo> = Manager::new(10, UnitWeigher, Fifo);
        let ids = fill(&mut manager, &mut arena, &[1, 2, 3, 4]);

        manager.erase(&mut arena, ids[0]);
        manager.erase(&mut arena, ids[1]);
        manager.erase(&mut arena, ids[2]);
        assert_eq!(order(&arena), vec![4]);

        manager.reinsert(&mut arena, ids[2]);
        manager.reinsert(&mut arena, ids[1]);
        manager.reinsert(&mut arena, ids[0]);
        assert_eq!(order(&arena), vec![1, 2, 3, 4]);
        assert_eq!(manager.weight(), 4);
    }

    #[test]
    fn erase_range_refunds_summed_weight() {
        let mut arena = Arena::new();
        let mut manager: Manager<UnitWeigher, Fifo> = Manager::new(10, UnitWeigher, Fifo);
        let ids = fill(&mut manager, &mut arena, &[1, 2, 3, 4, 5]);

        let after = manager.erase_range(&mut arena, ids[1], ids[4]);
        assert_eq!(after, ids[4]);
        assert_eq!(order(&arena), vec![1, 5]);
        assert_eq!(manager.weight(), 2);
    }

    #[test]
    fn next_on_empty_returns_end() {
        let arena: Arena<u32, u32> = Arena::new();
        let manager: M<Fifo> = Manager::new(10, UnitWeigher, Fifo);
        assert_eq!(manager.next(&arena), NodeId::SENTINEL);
    }

    #[test]
    fn next_defaults_to_begin_and_respects_hint() {
        let mut arena = Arena::new();
        let mut manager: M<Fifo> = Manager::new(10, UnitWeigher, Fifo);
        let ids = fill(&mut manager, &mut arena, &[1, 2, 3]);
        assert_eq!(manager.next(&arena), ids[0]);
        assert_eq!(manager.next_from(&arena, ids[1]), ids[1]);
        assert_eq!(manager.next_from(&arena, NodeId::SENTINEL), NodeId::SENTINEL);
    }

    #[test]
    fn next_except_skips_and_restores() {
        let mut arena = Arena::new();
        let mut manager: M<Fifo> = Manager::new(10, UnitWeigher, Fifo);
        let ids = fill(&mut manager, &mut arena, &[1, 2, 3]);

        assert_eq!(manager.next_except(&mut arena, ids[0]), ids[1]);
        assert_eq!(order(&arena), vec![1, 2, 3], "excluded node must be restored");

        // Excluding the sole entry leaves no victim.
        let mut arena2 = Arena::new();
        let mut manager2: M<Fifo> = Manager::new(10, UnitWeigher, Fifo);
        let only = fill(&mut manager2, &mut arena2, &[7]);
        assert_eq!(manager2.next_except(&mut arena2, only[0]), NodeId::SENTINEL);
        assert_eq!(order(&arena2), vec![7]);
    }

    #[test]
    fn next_except_end_behaves_like_plain_next() {
        let mut arena = Arena::new();
        let mut manager: M<Fifo> = Manager::new(10, UnitWeigher, Fifo);
        let ids = fill(&mut manager, &mut arena, &[1, 2]);
        assert_eq!(manager.next_except(&mut arena, NodeId::SENTINEL), ids[0]);
    }

    #[test]
    fn next_except_from_advances_hint_past_excluded() {
        let mut arena = Arena::new();
        let mut manager: M<Fifo> = Manager::new(10, UnitWeigher, Fifo);
        let ids = fill(&mut manager, &mut arena, &[1, 2, 3]);
        assert_eq!(manager.next_except_from(&mut arena, ids[1], ids[1]), ids[2]);
        assert_eq!(order(&arena), vec![1, 2, 3]);
    }

    #[test]
    fn update_weight_moves_the_total() {
        let mut arena = Arena::new();
        let mut manager: M<Fifo> = Manager::new(10, UnitWeigher, Fifo);
        let ids = fill(&mut manager, &mut arena, &[1, 2]);
        manager.update_weight(&mut arena, ids[0], 1, 5);
        assert_eq!(manager.weight(), 6);
        assert_eq!(arena.weight(ids[0]), 5);
    }

    #[test]
    fn lru_access_moves_entry_to_the_end() {
        let mut arena = Arena::new();
        let mut manager: M<Lru> = Manager::new(10, UnitWeigher, Lru);
        let ids = fill(&mut manager, &mut arena, &[1, 2, 3]);
        manager.access(&mut arena, ids[0]);
        assert_eq!(order(&arena), vec![2, 3, 1]);
        // Accessing the tail is a no-op.
        manager.access(&mut arena, ids[0]);
        assert_eq!(order(&arena), vec![2, 3, 1]);
    }

    #[test]
    fn moving_the_manager_keeps_the_list_valid() {
        let mut arena = Arena::new();
        let mut manager: M<Fifo> = Manager::new(10, UnitWeigher, Fifo);
        fill(&mut manager, &mut arena, &[1, 2, 3]);

        // Handles are arena-relative, so plain moves cannot dangle.
        let moved_arena = arena;
        let moved_manager = manager;
        assert_eq!(order(&moved_arena), vec![1, 2, 3]);
        assert_eq!(moved_manager.weight(), 3);

        // Same for an empty pair: the sentinel keeps self-looping.
        let empty: Arena<u32, u32> = Arena::new();
        let empty_manager: M<Fifo> = Manager::new(10, UnitWeigher, Fifo);
        let moved_empty = empty;
        assert_eq!(moved_empty.next(NodeId::SENTINEL), NodeId::SENTINEL);
        assert_eq!(moved_empty.prev(NodeId::SENTINEL), NodeId::SENTINEL);
        assert_eq!(empty_manager.next(&moved_empty), NodeId::SENTINEL);
    }
}
