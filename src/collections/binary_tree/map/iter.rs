use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::{AvlMap, Link};

impl<K, V, C> IntoIterator for AvlMap<K, V, C> {
    type Item = (K, V);

    type IntoIter = IntoIter<K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            map: self,
        }
    }
}

pub struct IntoIter<K, V, C> {
    // There is no point rewriting the traversal when the iterator can just hold the map and pop
    // from either end.
    pub(crate) map: AvlMap<K, V, C>,
}

impl<K, V, C> Iterator for IntoIter<K, V, C> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.map.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<K, V, C> DoubleEndedIterator for IntoIter<K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.map.pop_last()
    }
}

impl<K, V, C> FusedIterator for IntoIter<K, V, C> {}

impl<K, V, C> ExactSizeIterator for IntoIter<K, V, C> {
    fn len(&self) -> usize {
        self.map.len()
    }
}

impl<'a, K, V, C> IntoIterator for &'a AvlMap<K, V, C> {
    type Item = (&'a K, &'a V);

    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            front: self.root.map(|root| root.leftmost()),
            back: self.root.map(|root| root.rightmost()),
            remaining: self.len,
            _phantom: PhantomData,
        }
    }
}

/// A borrowing in-order iterator over a map, double ended and exact sized. The extreme nodes are
/// captured once and each step follows a successor or predecessor link; `remaining` hitting zero
/// is the only termination condition, so the front and back never walk past each other.
pub struct Iter<'a, K, V> {
    pub(crate) front: Link<K, V>,
    pub(crate) back: Link<K, V>,
    pub(crate) remaining: usize,
    pub(crate) _phantom: PhantomData<(&'a K, &'a V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: remaining is nonzero, so front is a live node of the map borrowed for 'a.
        let node = unsafe { self.front.unwrap_unchecked() };
        self.front = node.successor();
        self.remaining -= 1;
        // SAFETY: As above.
        Some(unsafe { node.entry() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: As in next.
        let node = unsafe { self.back.unwrap_unchecked() };
        self.back = node.predecessor();
        self.remaining -= 1;
        // SAFETY: As in next.
        Some(unsafe { node.entry() })
    }
}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter {
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            _phantom: PhantomData,
        }
    }
}

impl<'a, K: Debug, V: Debug> Debug for Iter<'a, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.clone()).finish()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut AvlMap<K, V, C> {
    type Item = (&'a K, &'a mut V);

    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut {
            front: self.root.map(|root| root.leftmost()),
            back: self.root.map(|root| root.rightmost()),
            remaining: self.len,
            _phantom: PhantomData,
        }
    }
}

/// As [`Iter`], but yielding mutable value references. Keys stay shared: mutating one would break
/// the search order.
pub struct IterMut<'a, K, V> {
    pub(crate) front: Link<K, V>,
    pub(crate) back: Link<K, V>,
    pub(crate) remaining: usize,
    pub(crate) _phantom: PhantomData<(&'a K, &'a mut V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: remaining is nonzero, so front is a live node; the iterator holds the map's
        // unique borrow and yields each node at most once, so the references never alias.
        let node = unsafe { self.front.unwrap_unchecked() };
        self.front = node.successor();
        self.remaining -= 1;
        // SAFETY: As above.
        Some(unsafe { node.entry_mut() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: As in next.
        let node = unsafe { self.back.unwrap_unchecked() };
        self.back = node.predecessor();
        self.remaining -= 1;
        // SAFETY: As in next.
        Some(unsafe { node.entry_mut() })
    }
}

impl<'a, K, V> FusedIterator for IterMut<'a, K, V> {}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

/// A mutable iterator downgrades to a shared one; the opposite conversion doesn't exist.
impl<'a, K, V> From<IterMut<'a, K, V>> for Iter<'a, K, V> {
    fn from(value: IterMut<'a, K, V>) -> Self {
        Iter {
            front: value.front,
            back: value.back,
            remaining: value.remaining,
            _phantom: PhantomData,
        }
    }
}

/// An in-order iterator from a bound to the end of the map (or to a second, exclusive bound).
/// Unlike [`Iter`] it doesn't know its length up front: it stops when it reaches `until` or runs
/// off the end of the map.
pub struct Range<'a, K, V> {
    pub(crate) next: Link<K, V>,
    pub(crate) until: Link<K, V>,
    pub(crate) _phantom: PhantomData<(&'a K, &'a V)>,
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        if Some(node) == self.until {
            self.next = None;
            return None;
        }
        self.next = node.successor();
        // SAFETY: Live node of the map borrowed for 'a.
        Some(unsafe { node.entry() })
    }
}

impl<'a, K, V> FusedIterator for Range<'a, K, V> {}

impl<'a, K, V> Clone for Range<'a, K, V> {
    fn clone(&self) -> Self {
        Range {
            next: self.next,
            until: self.until,
            _phantom: PhantomData,
        }
    }
}

impl<'a, K: Debug, V: Debug> Debug for Range<'a, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.clone()).finish()
    }
}

/// [`Iter`] narrowed to keys.
#[derive(Clone)]
pub struct Keys<'a, K, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(key, _)| key)
    }
}

impl<'a, K, V> FusedIterator for Keys<'a, K, V> {}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {
    fn len(&self) -> usize {
        self.0.len()
    }
}

/// [`Iter`] narrowed to values.
#[derive(Clone)]
pub struct Values<'a, K, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(_, value)| value)
    }
}

impl<'a, K, V> FusedIterator for Values<'a, K, V> {}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {
    fn len(&self) -> usize {
        self.0.len()
    }
}

/// [`IterMut`] narrowed to values.
pub struct ValuesMut<'a, K, V>(pub(crate) IterMut<'a, K, V>);

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for ValuesMut<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(_, value)| value)
    }
}

impl<'a, K, V> FusedIterator for ValuesMut<'a, K, V> {}

impl<'a, K, V> ExactSizeIterator for ValuesMut<'a, K, V> {
    fn len(&self) -> usize {
        self.0.len()
    }
}

// SAFETY: Shared iteration only reads; the iterator moves between threads soundly exactly when
// shared references to the entries do.
unsafe impl<'a, K: Sync, V: Sync> Send for Iter<'a, K, V> {}
// SAFETY: As above.
unsafe impl<'a, K: Sync, V: Sync> Sync for Iter<'a, K, V> {}
// SAFETY: IterMut is an exclusive borrow of the map; it may move between threads when the
// references it yields may.
unsafe impl<'a, K: Sync, V: Send> Send for IterMut<'a, K, V> {}
// SAFETY: As for Iter.
unsafe impl<'a, K: Sync, V: Sync> Send for Range<'a, K, V> {}
// SAFETY: As for Iter.
unsafe impl<'a, K: Sync, V: Sync> Sync for Range<'a, K, V> {}
