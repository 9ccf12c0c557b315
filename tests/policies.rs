//! Per-policy behavior: where each built-in inserts, what it evicts, and
//! how the locking/priority adaptors protect entries.

use std::hash::BuildHasher;

use cortado::policy::{Fifo, FnLocker, FnPrioritizer, Lifo, Locked, Lru, Mru, Policy, Priority, Swapping};
use cortado::weigher::Weigher;
use cortado::{BoundedMap, Error, MapBuilder};

fn order_of<W, P, S>(map: &BoundedMap<u64, u64, W, P, S>) -> Vec<u64>
where
    W: Weigher<u64, u64>,
    P: Policy<u64, u64>,
    S: BuildHasher,
{
    map.replacement_iter().map(|(k, _)| *k).collect()
}

// ---------------------------------------------------------------------------
// Basic policies
// ---------------------------------------------------------------------------

#[test]
fn fifo_evicts_in_arrival_order() {
    let mut map: BoundedMap<u64, u64, _, Fifo> = MapBuilder::new(2).policy(Fifo).build();
    map.insert(1, 0).unwrap();
    map.insert(2, 0).unwrap();
    map.get(&1); // FIFO ignores accesses
    assert_eq!(order_of(&map), vec![1, 2]);

    map.insert(3, 0).unwrap();
    assert_eq!(order_of(&map), vec![2, 3]);
}

#[test]
fn lifo_evicts_the_newest() {
    let mut map: BoundedMap<u64, u64, _, Lifo> = MapBuilder::new(2).policy(Lifo).build();
    map.insert(1, 0).unwrap();
    map.insert(2, 0).unwrap();
    assert_eq!(order_of(&map), vec![2, 1]);

    map.insert(3, 0).unwrap(); // evicts 2, the most recent arrival
    assert_eq!(order_of(&map), vec![3, 1]);
}

#[test]
fn lru_keeps_recently_used_entries() {
    let mut map: BoundedMap<u64, u64, _, Lru> = MapBuilder::new(2).policy(Lru).build();
    map.insert(1, 0).unwrap();
    map.insert(2, 0).unwrap();
    map.get(&1); // 1 is now the most recently used
    map.insert(3, 0).unwrap(); // evicts 2
    assert!(map.quiet_contains(&1));
    assert!(!map.quiet_contains(&2));
}

#[test]
fn mru_evicts_the_most_recently_used() {
    let mut map: BoundedMap<u64, u64, _, Mru> = MapBuilder::new(2).policy(Mru).build();
    map.insert(1, 0).unwrap();
    map.insert(2, 0).unwrap();
    assert_eq!(order_of(&map), vec![2, 1]);

    map.get(&1);
    assert_eq!(order_of(&map), vec![1, 2]);

    map.insert(3, 0).unwrap(); // evicts 1, the most recently used
    assert_eq!(order_of(&map), vec![3, 2]);
}

#[test]
fn swapping_promotes_one_step_per_hit() {
    let mut map: BoundedMap<u64, u64, _, Swapping> = MapBuilder::new(3).policy(Swapping).build();
    map.insert(1, 0).unwrap();
    map.insert(2, 0).unwrap();
    map.insert(3, 0).unwrap();
    assert_eq!(order_of(&map), vec![3, 2, 1]);

    map.get(&3); // swaps with its successor
    assert_eq!(order_of(&map), vec![2, 3, 1]);
    map.get(&3);
    assert_eq!(order_of(&map), vec![2, 1, 3]);
    map.get(&3); // already at the back: no-op
    assert_eq!(order_of(&map), vec![2, 1, 3]);
}

// ---------------------------------------------------------------------------
// Locked
// ---------------------------------------------------------------------------

#[test]
fn locked_skips_locked_entries() {
    // Odd keys are locked.
    let mut map: BoundedMap<u64, u64, _, _> = MapBuilder::new(3)
        .policy(Locked::new(Fifo, FnLocker(|k: &u64, _v: &u64| k % 2 == 1)))
        .build();
    map.insert(1, 0).unwrap();
    map.insert(2, 0).unwrap();
    map.insert(3, 0).unwrap();

    map.insert(4, 0).unwrap(); // victim must be 2, the first unlocked entry
    assert_eq!(order_of(&map), vec![1, 3, 4]);
    assert!(map.quiet_contains(&1));
    assert!(!map.quiet_contains(&2));
}

#[test]
fn locked_with_everything_locked_rejects_inserts() {
    let mut map: BoundedMap<u64, u64, _, _> = MapBuilder::new(2)
        .policy(Locked::new(Fifo, FnLocker(|_k: &u64, _v: &u64| true)))
        .build();
    map.insert(1, 0).unwrap();
    map.insert(2, 0).unwrap();

    assert_eq!(map.next_victim(), None);
    assert_eq!(map.insert(3, 0), Err(Error::NoSpace));
    assert_eq!(map.free_space(1), Err(Error::NoSpace));

    // State byte-for-byte as before the failures.
    assert_eq!(order_of(&map), vec![1, 2]);
    assert_eq!(map.weight(), 2);
}

#[test]
fn locked_over_lru_still_reorders_on_access() {
    let mut map: BoundedMap<u64, u64, _, _> = MapBuilder::new(3)
        .policy(Locked::new(Lru, FnLocker(|_k: &u64, v: &u64| *v == 1)))
        .build();
    map.insert(1, 0).unwrap();
    map.insert(2, 1).unwrap(); // locked
    map.insert(3, 0).unwrap();

    map.get(&1); // parent LRU moves 1 to the back
    assert_eq!(order_of(&map), vec![2, 3, 1]);

    map.insert(4, 0).unwrap(); // 2 is locked, so 3 is the victim
    assert_eq!(order_of(&map), vec![2, 1, 4]);
}

#[test]
fn unlocking_makes_entries_evictable_again() {
    // Lock follows the value, and assign can change the value.
    let mut map: BoundedMap<u64, u64, _, _> = MapBuilder::new(2)
        .policy(Locked::new(Fifo, FnLocker(|_k: &u64, v: &u64| *v == 1)))
        .build();
    map.insert(1, 1).unwrap();
    map.insert(2, 1).unwrap();
    assert_eq!(map.insert(3, 0), Err(Error::NoSpace));

    let id = map.quiet_find(&1).unwrap();
    map.assign(id, 0).unwrap(); // unlock entry 1
    map.insert(3, 0).unwrap();
    assert!(!map.quiet_contains(&1));
    assert!(map.quiet_contains(&2));
    assert!(map.quiet_contains(&3));
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

fn priority_map(cap: u64) -> BoundedMap<u64, u64, cortado::weigher::UnitWeigher, Priority<Fifo, FnPrioritizer<fn(&u64, &u64) -> u64>>> {
    MapBuilder::new(cap)
        .policy(Priority::new(
            Fifo,
            FnPrioritizer((|_k: &u64, v: &u64| *v) as fn(&u64, &u64) -> u64),
        ))
        .build()
}

#[test]
fn priority_selects_the_cheapest_entry_in_the_window() {
    let mut map = priority_map(5);
    // Keys 0..5, priorities carried in the values.
    for (key, prio) in [(0u64, 5u64), (1, 5), (2, 1), (3, 5), (4, 5)] {
        map.insert(key, prio).unwrap();
    }

    let victim = map.next_victim().unwrap();
    assert_eq!(map.entry_at(victim).0, &2);

    map.insert(5, 5).unwrap(); // forces one eviction
    assert_eq!(order_of(&map), vec![0, 1, 3, 4, 5], "FIFO base order of survivors");
}

#[test]
fn priority_zero_is_evicted_on_sight() {
    let mut map = priority_map(3);
    map.insert(1, 9).unwrap();
    map.insert(2, 0).unwrap();
    map.insert(3, 9).unwrap();

    map.insert(4, 9).unwrap();
    assert!(!map.quiet_contains(&2));
    assert_eq!(order_of(&map), vec![1, 3, 4]);
}

#[test]
fn priority_max_is_never_evicted() {
    let mut map = priority_map(2);
    map.insert(1, u64::MAX).unwrap();
    map.insert(2, u64::MAX).unwrap();

    assert_eq!(map.next_victim(), None);
    assert_eq!(map.insert(3, 1), Err(Error::NoSpace));
    assert_eq!(map.free_space(1), Err(Error::NoSpace));
    assert_eq!(order_of(&map), vec![1, 2]);
    assert_eq!(map.weight(), 2);
}

#[test]
fn priority_mix_protects_max_entries_under_pressure() {
    let mut map = priority_map(3);
    map.insert(1, u64::MAX).unwrap();
    map.insert(2, 3).unwrap();
    map.insert(3, u64::MAX).unwrap();

    map.insert(4, 2).unwrap(); // only 2 is evictable
    assert!(map.quiet_contains(&1));
    assert!(!map.quiet_contains(&2));
    assert!(map.quiet_contains(&3));
    assert!(map.quiet_contains(&4));
}

// ---------------------------------------------------------------------------
// Custom policies through the public trait
// ---------------------------------------------------------------------------

#[test]
fn a_user_policy_can_evict_from_the_tail() {
    use cortado::policy::Order;
    use cortado::NodeId;

    #[derive(Clone, Copy, Default)]
    struct FromTail;

    impl<K, V> Policy<K, V> for FromTail {
        const PROVIDES_ERASE: bool = true;

        fn erase_position(&self, order: Order<'_, K, V>, first: NodeId, last: NodeId) -> NodeId {
            if first == last {
                last
            } else {
                order.prev(last)
            }
        }
    }

    let mut map: BoundedMap<u64, u64, _, FromTail> = MapBuilder::new(2).policy(FromTail).build();
    map.insert(1, 0).unwrap();
    map.insert(2, 0).unwrap();
    map.insert(3, 0).unwrap(); // evicts 2, the newest (tail) entry
    assert_eq!(order_of(&map), vec![1, 3]);
}
