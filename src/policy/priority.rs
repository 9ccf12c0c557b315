use super::{Order, OrderMut, Policy};
use crate::arena::NodeId;

/// Assigns an eviction priority to an entry.
///
/// `u64::MAX` means the entry may never be evicted; `0` means it should be
/// evicted as soon as it is encountered.  Everything in between trades
/// position against priority (see [`Priority`]).
pub trait Prioritizer<K, V> {
    fn priority(&self, key: &K, value: &V) -> u64;
}

/// A [`Prioritizer`] backed by a closure.
#[derive(Clone, Copy, Debug)]
pub struct FnPrioritizer<F>(pub F);

impl<K, V, F> Prioritizer<K, V> for FnPrioritizer<F>
where
    F: Fn(&K, &V) -> u64,
{
    #[inline]
    fn priority(&self, key: &K, value: &V) -> u64 {
        (self.0)(key, value)
    }
}

/// Policy adaptor that picks victims by priority with bounded lookahead.
///
/// Victim selection walks from the beginning:
///
/// 1. Entries with priority `u64::MAX` are skipped outright.  If nothing
///    else remains there is no victim.
/// 2. The first remaining entry becomes the candidate.  The scan then
///    advances, spending one unit of the candidate's priority per step; an
///    entry with a strictly lower priority becomes the new candidate (and
///    resets the budget to its priority).
/// 3. The scan stops when the budget reaches zero or the range ends, and
///    the current candidate is the victim.
///
/// A priority-0 entry is therefore evicted on sight, while a high-priority
/// entry near the beginning can only be displaced by a cheaper entry
/// within its lookahead window.
///
/// Insert and access behavior come from the parent policy, which must not
/// define its own erase position; wrapping one that does fails to compile
/// as soon as the combination is used.
#[derive(Clone, Copy, Debug, Default)]
pub struct Priority<P, F> {
    parent: P,
    prioritizer: F,
}

impl<P, F> Priority<P, F> {
    pub fn new(parent: P, prioritizer: F) -> Self {
        Priority { parent, prioritizer }
    }
}

impl<K, V, P, F> Policy<K, V> for Priority<P, F>
where
    P: Policy<K, V>,
    F: Prioritizer<K, V>,
{
    const PROVIDES_INSERT: bool = P::PROVIDES_INSERT;
    const PROVIDES_ERASE: bool = {
        assert!(
            !P::PROVIDES_ERASE,
            "cannot apply a priority policy over a parent that defines an erase position"
        );
        true
    };
    const PROVIDES_ACCESS: bool = P::PROVIDES_ACCESS;

    fn insert_position(&self, order: Order<'_, K, V>, first: NodeId, last: NodeId) -> NodeId {
        self.parent.insert_position(order, first, last)
    }

    fn erase_position(&self, order: Order<'_, K, V>, first: NodeId, last: NodeId) -> NodeId {
        let mut candidate = first;
        loop {
            if candidate == last {
                return last;
            }
            let (key, value) = order.get(candidate);
            if self.prioritizer.priority(key, value) != u64::MAX {
                break;
            }
            candidate = order.next(candidate);
        }

        let (key, value) = order.get(candidate);
        let mut budget = self.prioritizer.priority(key, value);
        let mut it = candidate;
        while budget > 0 && it != last {
            let (key, value) = order.get(it);
            let priority = self.prioritizer.priority(key, value);
            if priority < budget {
                candidate = it;
                budget = priority;
            } else {
                budget -= 1;
            }
            it = order.next(it);
        }
        candidate
    }

    fn access(&mut self, order: OrderMut<'_, K, V>, first: NodeId, last: NodeId, accessed: NodeId) {
        self.parent.access(order, first, last, accessed);
    }
}
