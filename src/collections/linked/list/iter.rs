use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::{LinkedList, NodePtr};

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            list: self,
        }
    }
}

pub struct IntoIter<T> {
    // There is no point rewriting the traversal when the iterator can just hold the list and
    // call pop front/back.
    pub(crate) list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.list.len()
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            front: self.sentinel.next(),
            back: self.sentinel.prev(),
            remaining: self.len,
            _phantom: PhantomData,
        }
    }
}

/// A borrowing iterator over a list, double ended and exact sized. The node handles are captured
/// once; `remaining` hitting zero is the only termination condition, so the front and back never
/// walk past each other.
pub struct Iter<'a, T> {
    pub(crate) front: NodePtr<T>,
    pub(crate) back: NodePtr<T>,
    pub(crate) remaining: usize,
    pub(crate) _phantom: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front;
        self.front = node.next();
        self.remaining -= 1;
        // SAFETY: remaining was nonzero, so node is a value node of the list borrowed for 'a.
        Some(unsafe { node.value() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back;
        self.back = node.prev();
        self.remaining -= 1;
        // SAFETY: As in next.
        Some(unsafe { node.value() })
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            _phantom: PhantomData,
        }
    }
}

impl<'a, T: Debug> Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;

    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut {
            front: self.sentinel.next(),
            back: self.sentinel.prev(),
            remaining: self.len,
            _phantom: PhantomData,
        }
    }
}

pub struct IterMut<'a, T> {
    pub(crate) front: NodePtr<T>,
    pub(crate) back: NodePtr<T>,
    pub(crate) remaining: usize,
    pub(crate) _phantom: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front;
        self.front = node.next();
        self.remaining -= 1;
        // SAFETY: remaining was nonzero, so node is a value node; the iterator holds the list's
        // unique borrow and yields each node at most once, so the references never alias.
        Some(unsafe { node.value_mut() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back;
        self.back = node.prev();
        self.remaining -= 1;
        // SAFETY: As in next.
        Some(unsafe { node.value_mut() })
    }
}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

/// A mutable iterator downgrades to a shared one; the opposite conversion doesn't exist.
impl<'a, T> From<IterMut<'a, T>> for Iter<'a, T> {
    fn from(value: IterMut<'a, T>) -> Self {
        Iter {
            front: value.front,
            back: value.back,
            remaining: value.remaining,
            _phantom: PhantomData,
        }
    }
}

// SAFETY: Shared iteration only reads; sending it between threads is sound exactly when &T is.
unsafe impl<'a, T: Sync> Send for Iter<'a, T> {}
// SAFETY: As above.
unsafe impl<'a, T: Sync> Sync for Iter<'a, T> {}
// SAFETY: IterMut is an exclusive borrow of the list; it may move between threads when &mut T
// may.
unsafe impl<'a, T: Send> Send for IterMut<'a, T> {}
