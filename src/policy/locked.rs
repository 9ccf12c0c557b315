use super::{Order, OrderMut, Policy};
use crate::arena::NodeId;

/// Decides whether an entry may currently be evicted.
pub trait Locker<K, V> {
    fn is_locked(&self, key: &K, value: &V) -> bool;
}

/// A [`Locker`] backed by a closure.
#[derive(Clone, Copy, Debug)]
pub struct FnLocker<F>(pub F);

impl<K, V, F> Locker<K, V> for FnLocker<F>
where
    F: Fn(&K, &V) -> bool,
{
    #[inline]
    fn is_locked(&self, key: &K, value: &V) -> bool {
        (self.0)(key, value)
    }
}

/// Policy adaptor that refuses to evict locked entries.
///
/// Insert and access behavior come from the parent policy; the victim is
/// the first unlocked entry scanning from the beginning, which makes
/// victim selection O(n) when long runs of entries are locked.  When every
/// entry is locked there is no victim and the manager reports none.
///
/// The parent must not define its own erase position; wrapping one that
/// does fails to compile as soon as the combination is used.
///
/// # Example
/// ```
/// use cortado::policy::{FnLocker, Locked, Lru};
/// use cortado::MapBuilder;
///
/// // Entries with odd keys can never be evicted.
/// let mut map: cortado::BoundedMap<u64, u64, _, _> = MapBuilder::new(100)
///     .policy(Locked::new(Lru, FnLocker(|k: &u64, _v: &u64| k % 2 == 1)))
///     .build();
/// map.insert(1, 10).unwrap();
/// assert_eq!(map.next_victim(), None); // the only entry is locked
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Locked<P, L> {
    parent: P,
    locker: L,
}

impl<P, L> Locked<P, L> {
    pub fn new(parent: P, locker: L) -> Self {
        Locked { parent, locker }
    }
}

impl<K, V, P, L> Policy<K, V> for Locked<P, L>
where
    P: Policy<K, V>,
    L: Locker<K, V>,
{
    const PROVIDES_INSERT: bool = P::PROVIDES_INSERT;
    const PROVIDES_ERASE: bool = {
        assert!(
            !P::PROVIDES_ERASE,
            "cannot apply a locked policy over a parent that defines an erase position"
        );
        true
    };
    const PROVIDES_ACCESS: bool = P::PROVIDES_ACCESS;

    fn insert_position(&self, order: Order<'_, K, V>, first: NodeId, last: NodeId) -> NodeId {
        self.parent.insert_position(order, first, last)
    }

    fn erase_position(&self, order: Order<'_, K, V>, first: NodeId, last: NodeId) -> NodeId {
        let mut it = first;
        while it != last {
            let (key, value) = order.get(it);
            if !self.locker.is_locked(key, value) {
                return it;
            }
            it = order.next(it);
        }
        last
    }

    fn access(&mut self, order: OrderMut<'_, K, V>, first: NodeId, last: NodeId, accessed: NodeId) {
        self.parent.access(order, first, last, accessed);
    }
}
