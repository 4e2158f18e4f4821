use std::collections::HashMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

#[test]
fn colliding_keys_probe_past_each_other() {
    let home = bucket(&0u32, MIN_CAPACITY);
    let colliding: Vec<u32> = (0u32..)
        .filter(|key| bucket(key, MIN_CAPACITY) == home)
        .take(3)
        .collect();

    let mut table = OpenTable::new();
    for &key in &colliding {
        table.set(key, key + 1);
    }
    assert_eq!(table.capacity(), MIN_CAPACITY);
    assert_eq!(table.del(&colliding[1]), Some(colliding[1] + 1));
    assert_eq!(table.get(&colliding[2]), Some(&(colliding[2] + 1)));
    assert_eq!(table.get(&colliding[1]), None);
}

#[test]
fn first_set_allocates_minimum_capacity() {
    let mut table = OpenTable::new();
    assert_eq!(table.capacity(), 0);
    assert!(table.set(1u32, "one"));
    assert_eq!(table.capacity(), MIN_CAPACITY);
    assert!(!table.set(1, "uno"));
    assert_eq!(table.get(&1), Some(&"uno"));
    assert_eq!(table.len(), 1);
}

#[test]
fn capacity_doubles_past_three_quarters() {
    let mut table = OpenTable::new();
    for key in 0u32..6 {
        table.set(key, key);
    }
    assert_eq!(table.capacity(), 8);
    table.set(6, 6);
    assert_eq!(table.capacity(), 16);
    assert!((0..7).all(|key| table.get(&key) == Some(&key)));
}

#[test]
fn tombstones_keep_probe_chains() {
    let mut table = OpenTable::new();
    for key in 0u32..5 {
        table.set(key, key * 10);
    }
    assert_eq!(table.del(&2), Some(20));
    assert_eq!(table.del(&2), None);
    assert_eq!(table.len(), 4);
    assert_eq!(table.used(), 5);
    assert!((0..5).filter(|&k| k != 2).all(|key| table.contains(&key)));

    // Reinsertion reuses the tombstone.
    assert!(table.set(2, 99));
    assert_eq!(table.used(), 5);
}

#[test]
fn retain_and_add_all() {
    let mut a = OpenTable::new();
    let mut b = OpenTable::new();
    for key in 0u32..4 {
        a.set(key, key);
        b.set(key + 2, key + 100);
    }
    a.retain(|key, _| key % 2 == 0);
    assert_eq!(a.len(), 2);
    a.add_all(&b);
    let mut entries: Vec<_> = a.iter().map(|(&k, &v)| (k, v)).collect();
    entries.sort_unstable();
    assert_eq!(entries, vec![(0, 0), (2, 100), (3, 101), (4, 102), (5, 103)]);
}

#[derive(Clone, Debug)]
enum Op {
    Set(u8),
    Del(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![(0u8..48).prop_map(Op::Set), (0u8..48).prop_map(Op::Del)]
}

proptest! {
    #[test]
    fn len_tracks_live_keys_and_load_is_bounded(ops in prop::collection::vec(op(), 0..400)) {
        let mut table = OpenTable::new();
        let mut model = HashMap::new();
        for (step, op) in ops.into_iter().enumerate() {
            match op {
                Op::Set(key) => {
                    let fresh = table.set(key, step);
                    prop_assert_eq!(fresh, model.insert(key, step).is_none());
                    prop_assert!(table.used() * MAX_LOAD_DENOM <= table.capacity() * MAX_LOAD_NUMER);
                }
                Op::Del(key) => {
                    prop_assert_eq!(table.del(&key), model.remove(&key));
                }
            }
            prop_assert_eq!(table.len(), model.len());
        }
        for (key, value) in &model {
            prop_assert_eq!(table.get(key), Some(value));
        }
    }
}
