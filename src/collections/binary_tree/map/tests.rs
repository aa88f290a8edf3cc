#![cfg(test)]

use std::collections::BTreeMap;
use std::hash::{BuildHasher, RandomState};

use proptest::collection::vec;
use proptest::prelude::*;

use super::*;
use crate::collections::compare::{NaturalOrder, Reversed};
use crate::util::alloc::CountedDrop;
use crate::util::panic::assert_panics;

#[test]
fn test_insert_and_get() {
    let mut map = AvlMap::new();
    assert!(map.is_empty(), "A new map should be empty.");

    for (i, key) in [3, 1, 4, 1, 5, 9, 2, 6].into_iter().enumerate() {
        let _ = map.insert(key, i);
    }
    assert_eq!(map.len(), 7, "Only the first insertion of 1 should count.");
    map.verify_invariants();

    assert_eq!(
        map.get(&1),
        Some(&1),
        "The first value inserted for a key should be kept."
    );
    assert_eq!(map.get(&9), Some(&5));
    assert_eq!(map.get(&7), None, "Absent keys should return None.");
    assert!(map.contains_key(&4));
    assert!(!map.contains_key(&8));
    assert_eq!(
        map.get_key_value(&5),
        Some((&5, &4)),
        "get_key_value should return the stored key as well."
    );

    let rejected = map.insert(5, 100);
    assert!(
        matches!(rejected, Err(DuplicateKey { key: 5, value: 100 })),
        "Inserting a duplicate should hand the pair back."
    );
    assert_eq!(map.len(), 7, "A rejected insertion shouldn't change the map.");
    assert_eq!(map.get(&5), Some(&4), "The old value should survive.");

    *map.get_mut(&5).unwrap() = 50;
    assert_eq!(map.get(&5), Some(&50), "get_mut should allow overwriting.");
}

#[test]
fn test_get_or_insert() {
    let mut map = AvlMap::new();
    assert_eq!(
        *map.get_or_insert_with(1, || 10),
        10,
        "An absent key should be inserted."
    );
    assert_eq!(
        *map.get_or_insert_with(1, || unreachable!()),
        10,
        "A present key shouldn't run the closure."
    );

    *map.get_or_insert_default(2) += 5;
    assert_eq!(map.get(&2), Some(&5), "Defaulted entry should be mutable in place.");
    map.verify_invariants();
}

#[test]
fn test_remove() {
    let mut map = AvlMap::from([(4, "d"), (2, "b"), (6, "f"), (1, "a"), (3, "c"), (5, "e"), (7, "g")]);
    map.verify_invariants();

    assert_eq!(map.remove(&1), Some("a"), "Removing a leaf should work.");
    map.verify_invariants();

    assert_eq!(
        map.remove_entry(&2),
        Some((2, "b")),
        "Removing a node with one child should work."
    );
    map.verify_invariants();

    assert_eq!(
        map.remove(&4),
        Some("d"),
        "Removing a node with two children should work."
    );
    map.verify_invariants();

    assert_eq!(map.remove(&4), None, "Removing an absent key should return None.");
    assert_eq!(map.len(), 4);
    assert_eq!(
        map.keys().copied().collect::<Vec<_>>(),
        [3, 5, 6, 7],
        "The remaining keys should still iterate in order."
    );
}

#[test]
fn test_first_last_and_pop() {
    let mut map = AvlMap::from([(2, 'b'), (3, 'c'), (1, 'a')]);
    assert_eq!(map.first_key_value(), Some((&1, &'a')));
    assert_eq!(map.last_key_value(), Some((&3, &'c')));

    assert_eq!(map.pop_first(), Some((1, 'a')));
    assert_eq!(map.pop_last(), Some((3, 'c')));
    map.verify_invariants();
    assert_eq!(map.pop_first(), Some((2, 'b')));
    assert_eq!(map.pop_first(), None, "Popping an empty map should return None.");
    assert_eq!(map.last_key_value(), None);
}

#[test]
fn test_bounds() {
    let map = AvlMap::from([(1, "one"), (3, "three"), (5, "five")]);

    assert_eq!(
        map.lower_bound(&3).next(),
        Some((&3, &"three")),
        "lower_bound should include an exact match."
    );
    assert_eq!(
        map.upper_bound(&3).next(),
        Some((&5, &"five")),
        "upper_bound should skip an exact match."
    );
    assert_eq!(
        map.lower_bound(&2).next(),
        Some((&3, &"three")),
        "Bounds between keys should land on the next larger key."
    );
    assert_eq!(map.lower_bound(&0).next(), Some((&1, &"one")));
    assert_eq!(
        map.upper_bound(&5).next(),
        None,
        "A bound past the largest key should be an empty iterator."
    );

    assert_eq!(
        map.lower_bound(&3).collect::<Vec<_>>(),
        [(&3, &"three"), (&5, &"five")],
        "A bound iterator should run to the end of the map."
    );
    assert_eq!(
        map.equal_range(&3).collect::<Vec<_>>(),
        [(&3, &"three")],
        "equal_range of a present key should yield exactly that entry."
    );
    assert_eq!(
        map.equal_range(&2).next(),
        None,
        "equal_range of an absent key should be empty."
    );
}

#[test]
fn test_index() {
    let map = AvlMap::from([(1, 'a'), (2, 'b')]);
    assert_eq!(map[&2], 'b', "Indexing a present key should work.");

    assert_panics!(
        {
            let map = AvlMap::from([(1, 'a')]);
            map[&9]
        },
        "Indexing an absent key should panic."
    );
}

#[test]
fn test_iterators() {
    let mut map: AvlMap<i32, i32> = (0..10).map(|i| (i, i * i)).collect();

    assert_eq!(
        map.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
        (0..10).collect::<Vec<_>>(),
        "Iteration should be in ascending key order regardless of insertion order."
    );
    assert_eq!(
        map.iter().rev().next(),
        Some((&9, &81)),
        "Reversed iteration should start from the largest key."
    );

    let mut iter = map.iter();
    assert_eq!(iter.len(), 10);
    assert_eq!(iter.next(), Some((&0, &0)));
    assert_eq!(iter.next_back(), Some((&9, &81)));
    assert_eq!(iter.next(), Some((&1, &1)));
    assert_eq!(iter.len(), 7, "len should track both ends.");

    for value in map.values_mut() {
        *value += 1;
    }
    assert_eq!(map.get(&3), Some(&10), "values_mut should mutate in place.");

    let iter: Iter<'_, i32, i32> = Iter::from(map.iter_mut());
    assert_eq!(
        iter.map(|(_, v)| *v).collect::<Vec<_>>(),
        (0..10).map(|i| i * i + 1).collect::<Vec<_>>(),
        "A mutable iterator should downgrade to a shared one."
    );

    assert_eq!(
        map.values().copied().sum::<i32>(),
        (0..10).map(|i| i * i + 1).sum::<i32>(),
        "values should visit every entry exactly once."
    );

    let owned: Vec<(i32, i32)> = map.into_iter().collect();
    assert_eq!(owned[0], (0, 1), "into_iter should also run in key order.");
    assert_eq!(owned.len(), 10);
}

#[test]
fn test_comparator() {
    let mut map = AvlMap::with_comparator(Reversed(NaturalOrder));
    map.extend([(1, 'a'), (3, 'c'), (2, 'b')]);
    map.verify_invariants();

    assert_eq!(
        map.keys().copied().collect::<Vec<_>>(),
        [3, 2, 1],
        "A reversed comparator should invert the iteration order."
    );
    assert_eq!(map.first_key_value(), Some((&3, &'c')));
    assert_eq!(map.get(&2), Some(&'b'), "Lookups should still find every key.");

    let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
    let mut map = AvlMap::with_comparator(by_len);
    map.extend([("aaa", 3), ("a", 1), ("bb", 2)]);
    assert!(
        map.insert("ccc", 9).is_err(),
        "Keys which compare equal under the comparator should collide."
    );
    assert_eq!(
        map.keys().copied().collect::<Vec<_>>(),
        ["a", "bb", "aaa"],
        "A closure comparator should drive the order."
    );
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new(0);
    let map: AvlMap<i32, CountedDrop> = (0..10).map(|i| (i, counter.clone())).collect();

    drop(map);
    assert_eq!(counter.take(), 10, "10 values should have been dropped.");

    let mut map: AvlMap<i32, CountedDrop> = (0..10).map(|i| (i, counter.clone())).collect();
    map.clear();
    assert_eq!(counter.take(), 10, "clear should drop every value.");
    assert!(map.is_empty());
    map.verify_invariants();

    let mut map: AvlMap<i32, CountedDrop> = (0..10).map(|i| (i, counter.clone())).collect();
    assert!(map.insert(5, counter.clone()).is_err());
    assert_eq!(
        counter.take(),
        1,
        "A rejected insertion should drop only the rejected value."
    );
}

#[test]
fn test_equality_and_hash() {
    let map = AvlMap::from([(1, 'a'), (2, 'b'), (3, 'c')]);

    assert_eq!(
        map,
        AvlMap::from([(3, 'c'), (1, 'a'), (2, 'b')]),
        "Maps with the same entries should be equal regardless of insertion order."
    );
    assert_ne!(map, AvlMap::from([(1, 'a'), (2, 'b')]));
    assert_ne!(map, AvlMap::from([(1, 'a'), (2, 'b'), (4, 'c')]));

    let state = RandomState::new();
    assert_eq!(
        state.hash_one(&map),
        state.hash_one(AvlMap::from([(2, 'b'), (3, 'c'), (1, 'a')])),
        "Equal maps should produce the same hash."
    );

    assert!(
        AvlMap::from([(1, 'a')]) < AvlMap::from([(1, 'b')]),
        "Ordering should be lexicographic over entries."
    );
}

#[test]
fn test_clone() {
    let map: AvlMap<i32, String> = (0..20).map(|i| (i, i.to_string())).collect();
    let copy = map.clone();
    copy.verify_invariants();

    assert_eq!(map, copy, "A clone should compare equal to the original.");
    assert_eq!(copy.len(), 20);
}

#[test]
fn test_display() {
    let map = AvlMap::from([(2, 'b'), (1, 'a')]);
    assert_eq!(format!("{map}"), r#"{1: 'a', 2: 'b'}"#);
    assert_eq!(format!("{map:?}"), format!("{map}"));
}

proptest! {
    /// Any interleaving of insertions and removals leaves the tree balanced, parent links
    /// consistent and the contents identical to a model map.
    #[test]
    fn prop_matches_model(ops in vec((any::<bool>(), 0_u16..200), 0..300)) {
        let mut map = AvlMap::new();
        let mut model = BTreeMap::new();

        for (remove, key) in ops {
            if remove {
                prop_assert_eq!(map.remove(&key), model.remove(&key));
            } else {
                let expected = !model.contains_key(&key);
                prop_assert_eq!(map.insert(key, key as u32).is_ok(), expected);
                model.entry(key).or_insert(key as u32);
            }
            map.verify_invariants();
        }

        prop_assert_eq!(map.len(), model.len());
        prop_assert!(map.iter().eq(model.iter()));
    }

    /// Removing every key in a random order always succeeds and always rebalances.
    #[test]
    fn prop_drain(mut keys in vec(0_u16..1000, 1..200)) {
        let mut map: AvlMap<u16, ()> = keys.iter().map(|key| (*key, ())).collect();
        map.verify_invariants();

        keys.sort_unstable();
        keys.dedup();
        prop_assert_eq!(map.len(), keys.len());

        for key in keys.iter().rev() {
            prop_assert_eq!(map.remove(key), Some(()));
            map.verify_invariants();
        }
        prop_assert!(map.is_empty());
    }

    /// lower_bound and upper_bound agree with a linear scan for any probe.
    #[test]
    fn prop_bounds(keys in vec(0_u16..100, 0..50), probe in 0_u16..110) {
        let map: AvlMap<u16, ()> = keys.iter().map(|key| (*key, ())).collect();

        let lower: Vec<u16> = map.lower_bound(&probe).map(|(k, _)| *k).collect();
        let upper: Vec<u16> = map.upper_bound(&probe).map(|(k, _)| *k).collect();
        let sorted: Vec<u16> = map.keys().copied().collect();

        let from_scan: Vec<u16> = sorted.iter().copied().filter(|k| *k >= probe).collect();
        prop_assert_eq!(lower, from_scan);
        let from_scan: Vec<u16> = sorted.iter().copied().filter(|k| *k > probe).collect();
        prop_assert_eq!(upper, from_scan);
    }
}
