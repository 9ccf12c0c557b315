use super::{Order, OrderMut, Policy};
use crate::arena::NodeId;

/// First in, first out: new entries go to the end, eviction takes the
/// beginning.  This is exactly the default hook behavior, so the policy
/// defines nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fifo;

impl<K, V> Policy<K, V> for Fifo {}

/// Last in, first out: new entries go to the beginning, where eviction
/// also starts.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lifo;

impl<K, V> Policy<K, V> for Lifo {
    const PROVIDES_INSERT: bool = true;

    fn insert_position(&self, _order: Order<'_, K, V>, first: NodeId, _last: NodeId) -> NodeId {
        first
    }
}

/// Least recently used: an accessed entry moves to the end, so the
/// beginning always holds the coldest entry.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lru;

impl<K, V> Policy<K, V> for Lru {
    const PROVIDES_ACCESS: bool = true;

    fn access(&mut self, mut order: OrderMut<'_, K, V>, _first: NodeId, last: NodeId, accessed: NodeId) {
        let next = order.next(accessed);
        if next != last {
            order.move_range(accessed, next, last);
        }
    }
}

/// Most recently used: an accessed entry moves to the beginning and is the
/// first to go.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mru;

impl<K, V> Policy<K, V> for Mru {
    const PROVIDES_INSERT: bool = true;
    const PROVIDES_ACCESS: bool = true;

    fn insert_position(&self, _order: Order<'_, K, V>, first: NodeId, _last: NodeId) -> NodeId {
        first
    }

    fn access(&mut self, mut order: OrderMut<'_, K, V>, first: NodeId, _last: NodeId, accessed: NodeId) {
        if accessed != first {
            let next = order.next(accessed);
            order.move_range(accessed, next, first);
        }
    }
}

/// Gradual promotion: an accessed entry swaps places with its successor,
/// drifting one step toward the safe end per hit.
#[derive(Clone, Copy, Debug, Default)]
pub struct Swapping;

impl<K, V> Policy<K, V> for Swapping {
    const PROVIDES_INSERT: bool = true;
    const PROVIDES_ACCESS: bool = true;

    fn insert_position(&self, _order: Order<'_, K, V>, first: NodeId, _last: NodeId) -> NodeId {
        first
    }

    fn access(&mut self, mut order: OrderMut<'_, K, V>, _first: NodeId, last: NodeId, accessed: NodeId) {
        let next = order.next(accessed);
        if next != last {
            order.iter_swap(next, accessed);
        }
    }
}
