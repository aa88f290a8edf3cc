#![cfg(test)]

use std::hash::{BuildHasher, RandomState};
use std::iter;

use proptest::collection::vec;
use proptest::prelude::*;

use super::*;
use crate::util::alloc::CountedDrop;
use crate::util::panic::assert_panics;

#[test]
fn test_push_and_pop() {
    let mut list = LinkedList::new();
    assert!(list.is_empty(), "A new list should be empty.");
    assert_eq!(list.front(), None);
    assert_eq!(list.back(), None);

    list.push_back(2);
    list.push_back(3);
    list.push_front(1);
    list.verify_links();

    assert_eq!(list.len(), 3);
    assert_eq!(list.front(), Some(&1));
    assert_eq!(list.back(), Some(&3));

    *list.front_mut().unwrap() = 10;
    *list.back_mut().unwrap() = 30;
    assert_eq!(
        list.pop_front(),
        Some(10),
        "pop_front should return the mutated front."
    );
    assert_eq!(list.pop_back(), Some(30));
    assert_eq!(list.pop_back(), Some(2));
    assert_eq!(list.pop_back(), None, "Popping an empty list should return None.");
    list.verify_links();
}

#[test]
fn test_get_and_replace() {
    let mut list = LinkedList::from([10, 20, 30, 40, 50]);

    assert_eq!(*list.get(0), 10, "Seeking from the front should work.");
    assert_eq!(*list.get(4), 50, "Seeking from the back should work.");
    assert_eq!(list[2], 30, "Indexing should work.");

    list[1] = 21;
    assert_eq!(
        list.try_get(1),
        Ok(&21),
        "Mutation through IndexMut should be visible."
    );
    assert_eq!(
        list.try_get(5),
        Err(IndexOutOfBounds { index: 5, len: 5 }),
        "try_get past the end should describe the failure."
    );

    assert_eq!(list.replace(2, 31), 30, "replace should return the old value.");
    assert_eq!(list[2], 31);
    assert!(list.try_replace(9, 0).is_err());

    assert_panics!(
        {
            let list = LinkedList::from([1, 2, 3]);
            *list.get(3)
        },
        "get past the end should panic."
    );
}

#[test]
fn test_insert_and_remove() {
    let mut list = LinkedList::from([1, 3]);

    list.insert(1, 2);
    list.insert(3, 4);
    list.insert(0, 0);
    list.verify_links();
    assert_eq!(
        list,
        LinkedList::from([0, 1, 2, 3, 4]),
        "insert at the ends and in the middle should all work."
    );

    assert_eq!(list.remove(2), 2, "remove should return the unlinked value.");
    assert_eq!(list.remove(0), 0);
    list.verify_links();
    assert_eq!(list, LinkedList::from([1, 3, 4]));

    assert!(
        list.try_insert(5, 9).is_err(),
        "Inserting past len should be rejected."
    );
    assert!(list.try_remove(3).is_err());

    assert_eq!(list.index_of(&3), Some(1));
    assert_eq!(list.index_of(&9), None);
    assert!(list.contains(&4));
    assert!(!list.contains(&2));
}

#[test]
fn test_append_and_split() {
    let mut list = LinkedList::from([1, 2, 3]);
    let mut other = LinkedList::from([4, 5]);

    list.append(&mut other);
    list.verify_links();
    other.verify_links();
    assert_eq!(
        list,
        LinkedList::from([1, 2, 3, 4, 5]),
        "append should move every element across."
    );
    assert!(other.is_empty(), "append should leave the source empty.");

    let back = list.split_off(2);
    list.verify_links();
    back.verify_links();
    assert_eq!(list, LinkedList::from([1, 2]));
    assert_eq!(back, LinkedList::from([3, 4, 5]));

    let empty = list.split_off(2);
    assert!(empty.is_empty(), "split_off(len) should return an empty list.");
    let whole = list.split_off(0);
    assert!(list.is_empty(), "split_off(0) should empty the list.");
    assert_eq!(whole, LinkedList::from([1, 2]));

    assert_panics!(
        {
            let mut list = LinkedList::from([1]);
            list.split_off(2)
        },
        "split_off past len should panic."
    );
}

#[test]
fn test_merge_and_sort() {
    let mut list = LinkedList::from([1, 3, 5]);
    let mut other = LinkedList::from([2, 3, 6]);
    list.merge(&mut other);
    list.verify_links();
    assert_eq!(
        list,
        LinkedList::from([1, 2, 3, 3, 5, 6]),
        "merge should interleave two sorted lists."
    );
    assert!(other.is_empty());

    let mut list = LinkedList::from([5, 1, 4, 2, 3, 2]);
    list.sort();
    list.verify_links();
    assert_eq!(list, LinkedList::from([1, 2, 2, 3, 4, 5]));

    let mut list = LinkedList::from([1_i32, -2, 3, -4]);
    list.sort_by(|a, b| a.abs().cmp(&b.abs()));
    assert_eq!(
        list,
        LinkedList::from([1, -2, 3, -4]),
        "sort_by should use the provided order (already sorted by magnitude here)."
    );

    // Stability: equal keys keep their original relative order.
    let mut list = LinkedList::from([(2, 'a'), (1, 'x'), (2, 'b'), (1, 'y')]);
    list.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(list, LinkedList::from([(1, 'x'), (1, 'y'), (2, 'a'), (2, 'b')]));
}

#[test]
fn test_unique_and_retain() {
    let mut list = LinkedList::from([1, 2, 2, 1]);
    assert_eq!(
        list.unique(),
        1,
        "unique should only collapse adjacent duplicates."
    );
    assert_eq!(list, LinkedList::from([1, 2, 1]));
    list.verify_links();

    let mut list = LinkedList::from([3, 3, 3, 3]);
    assert_eq!(list.unique(), 3, "A run should collapse to its first element.");
    assert_eq!(list, LinkedList::from([3]));

    let mut list = LinkedList::from([1, 2, 3, 4, 5, 6]);
    list.retain(|v| v % 2 == 0);
    list.verify_links();
    assert_eq!(list, LinkedList::from([2, 4, 6]));

    let mut list = LinkedList::from([7, 1, 7, 2, 7]);
    assert_eq!(list.remove_all(&7), 3, "remove_all should count removals.");
    assert_eq!(list, LinkedList::from([1, 2]));
}

#[test]
fn test_reverse() {
    let mut list = LinkedList::from([1, 2, 3, 4]);
    list.reverse();
    list.verify_links();
    assert_eq!(list, LinkedList::from([4, 3, 2, 1]));

    let mut empty: LinkedList<i32> = LinkedList::new();
    empty.reverse();
    empty.verify_links();
    assert!(empty.is_empty(), "Reversing an empty list should be a no-op.");
}

#[test]
fn test_cursor_movement() {
    let mut list = LinkedList::from([1, 2, 3]);
    let mut cursor = list.cursor_front_mut();

    assert_eq!(cursor.index(), Some(0));
    assert_eq!(cursor.current(), Some(&mut 1));
    assert_eq!(cursor.peek_prev(), None, "Nothing before the front element.");
    assert_eq!(cursor.peek_next(), Some(&mut 2));

    cursor.move_next();
    cursor.move_next();
    assert_eq!(cursor.index(), Some(2));
    cursor.move_next();
    assert_eq!(cursor.index(), None, "Past the back is the end position.");
    assert_eq!(cursor.current(), None);
    assert_eq!(
        cursor.peek_next(),
        Some(&mut 1),
        "From the end position, next wraps to the front."
    );
    assert_eq!(cursor.peek_prev(), Some(&mut 3));

    cursor.move_next();
    assert_eq!(cursor.index(), Some(0), "Moving on wraps back to the front.");
    cursor.move_prev();
    cursor.move_prev();
    assert_eq!(cursor.index(), Some(2));

    let mut cursor = list.cursor_back_mut();
    assert_eq!(cursor.index(), Some(2));
    assert_eq!(cursor.current(), Some(&mut 3));
}

#[test]
fn test_cursor_mutation() {
    let mut list = LinkedList::from([1, 4]);
    let mut cursor = list.cursor_front_mut();

    cursor.move_next();
    cursor.insert_before(2);
    cursor.insert_before(3);
    assert_eq!(
        cursor.index(),
        Some(3),
        "insert_before should keep the cursor over the same element."
    );
    assert_eq!(cursor.current(), Some(&mut 4));
    cursor.insert_after(5);
    assert_eq!(cursor.current(), Some(&mut 4), "insert_after shouldn't move the cursor.");

    list.verify_links();
    assert_eq!(list, LinkedList::from([1, 2, 3, 4, 5]));

    let mut cursor = list.cursor_front_mut();
    cursor.move_next();
    assert_eq!(
        cursor.remove_current(),
        Some(2),
        "remove_current should return the removed value."
    );
    assert_eq!(
        cursor.current(),
        Some(&mut 3),
        "The cursor should land on the element which followed."
    );
    assert_eq!(cursor.index(), Some(1));

    while cursor.remove_current().is_some() {}
    assert_eq!(cursor.index(), None, "Draining should end at the end position.");
    assert_eq!(cursor.remove_current(), None);

    list.verify_links();
    assert_eq!(list, LinkedList::from([1]));
}

#[test]
fn test_cursor_splice_and_split() {
    let mut list = LinkedList::from([1, 5]);
    let mut incoming = LinkedList::from([2, 3, 4]);

    let mut cursor = list.cursor_front_mut();
    cursor.move_next();
    cursor.splice_before(&mut incoming);
    assert_eq!(
        cursor.current(),
        Some(&mut 5),
        "Splicing shouldn't move the cursor off its element."
    );
    assert_eq!(cursor.index(), Some(4), "The spliced elements shift the index.");
    assert!(incoming.is_empty());

    let before = cursor.split_before();
    assert_eq!(cursor.index(), Some(0), "After a split the cursor is at the front.");
    assert_eq!(before, LinkedList::from([1, 2, 3, 4]));
    before.verify_links();

    list.verify_links();
    assert_eq!(list, LinkedList::from([5]));
}

#[test]
fn test_iterators() {
    let list: LinkedList<usize> = (0..5).collect();

    assert_eq!(
        list.iter().copied().collect::<Vec<_>>(),
        [0, 1, 2, 3, 4],
        "Iteration should run front to back."
    );
    assert_eq!(
        list.iter().rev().copied().collect::<Vec<_>>(),
        [4, 3, 2, 1, 0],
        "Reversed iteration should run back to front."
    );

    let mut iter = list.iter();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some(&0));
    assert_eq!(iter.next_back(), Some(&4));
    assert_eq!(iter.next_back(), Some(&3));
    assert_eq!(iter.next(), Some(&1));
    assert_eq!(iter.next(), Some(&2));
    assert_eq!(iter.next(), None, "Both ends should meet without overlap.");
    assert_eq!(iter.next_back(), None);

    let mut list = list;
    for item in list.iter_mut() {
        *item *= 2;
    }
    assert_eq!(list, (0..5).map(|i| i * 2).collect());

    let iter: Iter<'_, usize> = Iter::from(list.iter_mut());
    assert_eq!(
        iter.copied().sum::<usize>(),
        20,
        "A mutable iterator should downgrade to a shared one."
    );

    let mut owned = list.into_iter();
    assert_eq!(owned.next(), Some(0));
    assert_eq!(owned.next_back(), Some(8));
    assert_eq!(owned.len(), 3);
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new(0);
    let list: LinkedList<CountedDrop> = iter::repeat_with(|| counter.clone()).take(10).collect();

    drop(list);
    assert_eq!(counter.take(), 10, "10 elements should have been dropped.");

    let mut list: LinkedList<CountedDrop> = iter::repeat_with(|| counter.clone()).take(10).collect();
    list.clear();
    assert_eq!(counter.take(), 10, "clear should drop every element.");
    assert!(list.is_empty());
    list.verify_links();

    let list: LinkedList<CountedDrop> = iter::repeat_with(|| counter.clone()).take(10).collect();
    drop(list.into_iter());
    assert_eq!(
        counter.take(),
        10,
        "Dropping an owned iterator should drop the remaining elements."
    );
}

#[test]
fn test_equality_and_hash() {
    let list = LinkedList::from([1, 2, 3]);

    assert_eq!(
        list,
        (1..4).collect(),
        "Different construction methods should produce equal results."
    );
    assert_ne!(list, LinkedList::from([1, 2]));
    assert_ne!(list, LinkedList::from([1, 2, 4]));

    let state = RandomState::new();
    assert_eq!(
        state.hash_one(&list),
        state.hash_one(LinkedList::from([1, 2, 3])),
        "Equal lists should produce the same hash."
    );

    assert!(
        LinkedList::from([1, 2]) < LinkedList::from([1, 3]),
        "Ordering should be lexicographic."
    );
    assert!(LinkedList::from([1, 2]) < LinkedList::from([1, 2, 0]));
}

#[test]
fn test_clone() {
    let list = LinkedList::from(["a".to_string(), "b".to_string()]);
    let copy = list.clone();
    copy.verify_links();
    assert_eq!(list, copy, "A clone should compare equal to the original.");
}

#[test]
fn test_display() {
    let list = LinkedList::from([1, 2, 3]);
    assert_eq!(format!("{list}"), "(1) -> (2) -> (3)");
    assert_eq!(format!("{list:?}"), "[1, 2, 3]");

    let empty: LinkedList<i32> = LinkedList::new();
    assert_eq!(format!("{empty}"), "()");
}

proptest! {
    /// Any interleaving of pushes, pops, inserts and removals keeps the ring closed in both
    /// directions and matches a model Vec.
    #[test]
    fn prop_matches_model(ops in vec((0_u8..6, any::<u16>()), 0..200)) {
        let mut list = LinkedList::new();
        let mut model = Vec::new();

        for (op, value) in ops {
            match op {
                0 => {
                    list.push_front(value);
                    model.insert(0, value);
                },
                1 => {
                    list.push_back(value);
                    model.push(value);
                },
                2 => prop_assert_eq!(list.pop_front(), if model.is_empty() {
                    None
                } else {
                    Some(model.remove(0))
                }),
                3 => prop_assert_eq!(list.pop_back(), model.pop()),
                4 => {
                    let at = value as usize % (model.len() + 1);
                    list.insert(at, value);
                    model.insert(at, value);
                },
                _ => {
                    if !model.is_empty() {
                        let at = value as usize % model.len();
                        prop_assert_eq!(list.remove(at), model.remove(at));
                    }
                },
            }
            list.verify_links();
        }

        prop_assert_eq!(list.len(), model.len());
        prop_assert!(list.iter().eq(model.iter()));
    }

    /// Sorting any list yields the same order as the standard sort, including duplicates.
    #[test]
    fn prop_sort(values in vec(any::<i32>(), 0..100)) {
        let mut list: LinkedList<i32> = values.iter().copied().collect();
        list.sort();
        list.verify_links();

        let mut model = values;
        model.sort();
        prop_assert!(list.iter().eq(model.iter()));
    }

    /// split_off then append is the identity.
    #[test]
    fn prop_split_roundtrip(values in vec(any::<u8>(), 0..50), at in 0_usize..51) {
        let mut list: LinkedList<u8> = values.iter().copied().collect();
        let at = at.min(list.len());

        let mut back = list.split_off(at);
        list.verify_links();
        back.verify_links();
        prop_assert_eq!(list.len(), at);

        list.append(&mut back);
        list.verify_links();
        prop_assert!(list.iter().eq(values.iter()));
    }
}
