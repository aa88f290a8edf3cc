//! Comparator injection for the ordered collections.

use std::cmp::Ordering;

/// A total order over `K`, supplied to ordered containers at construction.
///
/// Containers route every key comparison through their comparator rather than through
/// [`Ord`] directly, so custom key orderings (reversed, case-folded, by a projection) behave
/// consistently across insert, remove, lookup and bound probes. Two keys are equivalent exactly
/// when the comparator returns [`Ordering::Equal`] - the [`Ordering`] form of "neither key
/// compares less than the other".
pub trait Comparator<K> {
    fn cmp(&self, a: &K, b: &K) -> Ordering;
}

/// The default comparator: `K`'s own [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord> Comparator<K> for NaturalOrder {
    fn cmp(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Reverses another comparator. `Reversed(NaturalOrder)` yields a descending map.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<K, C: Comparator<K>> Comparator<K> for Reversed<C> {
    fn cmp(&self, a: &K, b: &K) -> Ordering {
        self.0.cmp(a, b).reverse()
    }
}

impl<K, F: Fn(&K, &K) -> Ordering> Comparator<K> for F {
    fn cmp(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
