use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem;
use std::ops::{Index, IndexMut};

use super::{CursorMut, Iter, IterMut, NodePtr, link};
#[doc(inline)]
pub use crate::util::error::{CapacityOverflow, IndexOutOfBounds};
use crate::util::result::ResultExtension;

/// A list with links in both directions, closed into a ring by a sentinel node. See also:
/// [`CursorMut`] for position-based traversal and O(1) mutation anywhere in the list.
///
/// The sentinel never holds a value; its `next` is the first element and its `prev` the last (or
/// itself when the list is empty), so no link in the ring is ever null and none of the edge
/// operations need a special case.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the LinkedList.
/// - `i`: The index of the item in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `front/back` | `O(1)` |
/// | `push_front/back` | `O(1)` |
/// | `pop_front/back` | `O(1)` |
/// | `get` | `O(min(i, n-i))` |
/// | `insert` | `O(min(i, n-i))` |
/// | `remove` | `O(min(i, n-i))` |
/// | `append` | `O(1)` |
/// | `split_off` | `O(min(i, n-i))` |
/// | `merge` | `O(n+m)` |
/// | `sort` | `O(n log n)` |
/// | `reverse` | `O(n)` |
/// | `contains` | `O(n)` |
///
/// As a general note, modern computer architecture isn't kind to linked lists (or more
/// importantly, favours contiguous collections) because all `O(i)` or `O(n)` operations will
/// consist primarily of cache misses. For this reason,
/// [`Vector`](crate::collections::contiguous::Vector) should be preferred unless the `O(1)`
/// relinking methods here - append, splice, merge, sort - are being heavily utilized.
pub struct LinkedList<T> {
    pub(crate) sentinel: NodePtr<T>,
    pub(crate) len: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> LinkedList<T> {
    /// Creates a new LinkedList with no elements. This allocates the sentinel node which closes
    /// the ring for the lifetime of the list.
    pub fn new() -> LinkedList<T> {
        LinkedList {
            sentinel: NodePtr::sentinel(),
            len: 0,
            _phantom: PhantomData,
        }
    }

    /// Returns the length of the LinkedList.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the LinkedList contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a reference to the first element in the list, if it exists.
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            // SAFETY: The list is non-empty, so the sentinel's next is a value node. The shared
            // borrow is tied to &self.
            Some(unsafe { self.sentinel.next().value() })
        }
    }

    /// Returns a mutable reference to the first element in the list, if it exists.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            None
        } else {
            // SAFETY: As in front, and &mut self guarantees exclusive access.
            Some(unsafe { self.sentinel.next().value_mut() })
        }
    }

    /// Returns a reference to the last element in the list, if it exists.
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            // SAFETY: The list is non-empty, so the sentinel's prev is a value node.
            Some(unsafe { self.sentinel.prev().value() })
        }
    }

    /// Returns a mutable reference to the last element in the list, if it exists.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            None
        } else {
            // SAFETY: As in back, and &mut self guarantees exclusive access.
            Some(unsafe { self.sentinel.prev().value_mut() })
        }
    }

    /// Add the provided element to the front of the LinkedList.
    pub fn push_front(&mut self, value: T) {
        let node = NodePtr::new(value);
        self.link_before(node, self.sentinel.next());
    }

    /// Add the provided element to the back of the LinkedList.
    pub fn push_back(&mut self, value: T) {
        let node = NodePtr::new(value);
        self.link_before(node, self.sentinel);
    }

    /// Removes the first element from the list and returns it, if the list isn't empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            let node = self.sentinel.next();
            Some(self.unlink(node))
        }
    }

    /// Removes the last element from the list and returns it, if the list isn't empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            let node = self.sentinel.prev();
            Some(self.unlink(node))
        }
    }

    /// Returns a reference to the element at the provided `index`, panicking on a failure.
    ///
    /// The same functionality can be achieved using the [`Index`] operator.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the LinkedList.
    pub fn get(&self, index: usize) -> &T {
        self.try_get(index).throw()
    }

    /// Returns a reference to the element at the provided `index`, returning an [`Err`] on a
    /// failure rather than panicking.
    pub fn try_get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        let node = self.checked_seek(index)?;
        // SAFETY: checked_seek only returns value nodes; the borrow is tied to &self.
        Ok(unsafe { node.value() })
    }

    /// Returns a mutable reference to the element at the provided `index`, panicking on a
    /// failure.
    ///
    /// The same functionality can be achieved using the [`IndexMut`] operator.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the LinkedList.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        self.try_get_mut(index).throw()
    }

    /// Returns a mutable reference to the element at the provided `index`, returning an [`Err`]
    /// on a failure rather than panicking.
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        let node = self.checked_seek(index)?;
        // SAFETY: checked_seek only returns value nodes; &mut self guarantees exclusivity.
        Ok(unsafe { node.value_mut() })
    }

    /// Inserts `value` at the given index, shifting all later elements one position back.
    /// `insert(len, value)` is equivalent to `push_back`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value).throw()
    }

    /// Non-panicking version of [`insert`](LinkedList::insert).
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), IndexOutOfBounds> {
        if index > self.len {
            return Err(IndexOutOfBounds { index, len: self.len });
        }
        let pos = if index == self.len {
            self.sentinel
        } else {
            self.seek(index)
        };
        let node = NodePtr::new(value);
        self.link_before(node, pos);
        Ok(())
    }

    /// Removes and returns the element at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the LinkedList.
    pub fn remove(&mut self, index: usize) -> T {
        self.try_remove(index).throw()
    }

    /// Non-panicking version of [`remove`](LinkedList::remove).
    pub fn try_remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        let node = self.checked_seek(index)?;
        Ok(self.unlink(node))
    }

    /// Replaces the element at the given index, returning the old value.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the LinkedList.
    pub fn replace(&mut self, index: usize, new_value: T) -> T {
        self.try_replace(index, new_value).throw()
    }

    /// Non-panicking version of [`replace`](LinkedList::replace).
    pub fn try_replace(&mut self, index: usize, new_value: T) -> Result<T, IndexOutOfBounds> {
        let node = self.checked_seek(index)?;
        // SAFETY: checked_seek only returns value nodes; &mut self guarantees exclusivity.
        Ok(mem::replace(unsafe { node.value_mut() }, new_value))
    }

    /// Removes all elements, destroying their values. The sentinel (and therefore the list
    /// itself) remains usable.
    pub fn clear(&mut self) {
        let mut cur = self.sentinel.next();
        while cur != self.sentinel {
            let next = cur.next();
            // SAFETY: cur is a value node; the whole ring is being torn down, so no handle to it
            // survives.
            drop(unsafe { cur.take() });
            cur = next;
        }
        link(self.sentinel, self.sentinel);
        self.len = 0;
    }

    /// Moves all elements of `other` to the back of `self`, leaving `other` empty. This relinks
    /// the two rings in `O(1)`: no element is copied, moved in memory, or reallocated, and any
    /// cursor position inside `other`'s elements remains structurally valid.
    pub fn append(&mut self, other: &mut LinkedList<T>) {
        if other.is_empty() {
            return;
        }
        let first = other.sentinel.next();
        let last = other.sentinel.prev();
        link(self.sentinel.prev(), first);
        link(last, self.sentinel);
        link(other.sentinel, other.sentinel);
        self.len = self.len.checked_add(other.len).ok_or(CapacityOverflow).throw();
        other.len = 0;
    }

    /// Splits the list in two, returning everything from `at` onwards. `split_off(0)` empties
    /// the list, `split_off(len)` returns an empty list. The split itself is a constant number of
    /// pointer updates after seeking to `at`.
    ///
    /// # Panics
    /// Panics if `at > len`.
    pub fn split_off(&mut self, at: usize) -> LinkedList<T> {
        if at > self.len {
            Err(IndexOutOfBounds { index: at, len: self.len }).throw()
        }
        let mut other = LinkedList::new();
        if at == self.len {
            return other;
        }
        let first = self.seek(at);
        let last = self.sentinel.prev();
        link(first.prev(), self.sentinel);
        link(other.sentinel, first);
        link(last, other.sentinel);
        other.len = self.len - at;
        self.len = at;
        other
    }

    /// Merges `other` into `self`, preserving the order given by `T`'s [`Ord`]. Both lists are
    /// assumed to already be sorted; the merge is stable, with equal elements from `self` placed
    /// first. Nodes are relinked, never reallocated.
    pub fn merge(&mut self, other: &mut LinkedList<T>)
    where
        T: Ord,
    {
        self.merge_by(other, T::cmp);
    }

    /// Merges `other` into `self` using the provided comparison. See
    /// [`merge`](LinkedList::merge).
    pub fn merge_by<F>(&mut self, other: &mut LinkedList<T>, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.merge_by_inner(other, &mut compare);
    }

    fn merge_by_inner<F>(&mut self, other: &mut LinkedList<T>, compare: &mut F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut cur = self.sentinel.next();
        while !other.is_empty() {
            if cur == self.sentinel {
                self.append(other);
                return;
            }
            let front = other.sentinel.next();
            // SAFETY: cur is a value node (checked against the sentinel above) and front is a
            // value node because other is non-empty.
            let take = unsafe { compare(front.value(), cur.value()) } == Ordering::Less;
            if take {
                link(other.sentinel, front.next());
                other.len -= 1;
                link(cur.prev(), front);
                link(front, cur);
                self.len += 1;
            } else {
                cur = cur.next();
            }
        }
    }

    /// Sorts the list in place by `T`'s [`Ord`]. This is a merge sort over the node links:
    /// `O(n log n)`, stable, and no element is ever copied or reallocated.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp);
    }

    /// Sorts the list in place with the provided comparison. See [`sort`](LinkedList::sort).
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.sort_by_inner(&mut compare);
    }

    fn sort_by_inner<F>(&mut self, compare: &mut F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.len < 2 {
            return;
        }
        let mut back = self.split_off(self.len / 2);
        self.sort_by_inner(compare);
        back.sort_by_inner(compare);
        self.merge_by_inner(&mut back, compare);
    }

    /// Removes consecutive duplicate elements, keeping the first of each run, and returns how
    /// many were removed.
    ///
    /// Only *adjacent* equal elements collapse: `[1, 2, 2, 1]` becomes `[1, 2, 1]`, not `[1, 2]`.
    /// Sort first to deduplicate globally.
    pub fn unique(&mut self) -> usize
    where
        T: PartialEq,
    {
        self.unique_by(|a, b| a == b)
    }

    /// Removes each element for which `same` returns true against its immediate predecessor.
    /// See [`unique`](LinkedList::unique).
    pub fn unique_by<F>(&mut self, mut same: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        if self.len < 2 {
            return 0;
        }
        let mut removed = 0;
        let mut prev = self.sentinel.next();
        let mut cur = prev.next();
        while cur != self.sentinel {
            let next = cur.next();
            // SAFETY: prev and cur are distinct value nodes.
            if unsafe { same(prev.value(), cur.value()) } {
                drop(self.unlink(cur));
                removed += 1;
            } else {
                prev = cur;
            }
            cur = next;
        }
        removed
    }

    /// Keeps only the elements for which the predicate returns true.
    pub fn retain<F>(&mut self, mut pred: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut cur = self.sentinel.next();
        while cur != self.sentinel {
            let next = cur.next();
            // SAFETY: cur is a value node.
            if !unsafe { pred(cur.value()) } {
                drop(self.unlink(cur));
            }
            cur = next;
        }
    }

    /// Removes every element equal to `value`, returning how many were removed.
    pub fn remove_all(&mut self, value: &T) -> usize
    where
        T: PartialEq,
    {
        let before = self.len;
        self.retain(|v| v != value);
        before - self.len
    }

    /// Reverses the list in place by flipping `next`/`prev` on every node, the sentinel
    /// included: `O(n)` with no reallocation.
    pub fn reverse(&mut self) {
        let mut cur = self.sentinel;
        loop {
            let next = cur.next();
            cur.set_next(cur.prev());
            cur.set_prev(next);
            cur = next;
            if cur == self.sentinel {
                break;
            }
        }
    }

    /// Returns a cursor positioned at the first element (or at the end position if the list is
    /// empty).
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        let node = self.sentinel.next();
        CursorMut { node, index: 0, list: self }
    }

    /// Returns a cursor positioned at the last element (or at the end position if the list is
    /// empty).
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T> {
        let node = self.sentinel.prev();
        let index = self.len.saturating_sub(1);
        CursorMut { node, index, list: self }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.into_iter()
    }
}

impl<T: PartialEq> LinkedList<T> {
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.iter().position(|element| element == item)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.iter().any(|element| element == item)
    }
}

impl<T> LinkedList<T> {
    /// Links `node` into the ring immediately before `pos` (four pointer updates) and then bumps
    /// the length. The node already holds its value, so a failure before this point leaves the
    /// list untouched.
    pub(crate) fn link_before(&mut self, node: NodePtr<T>, pos: NodePtr<T>) {
        link(pos.prev(), node);
        link(node, pos);
        self.len = self.len.checked_add(1).ok_or(CapacityOverflow).throw();
    }

    /// Unlinks a value node from the ring and moves its value out.
    pub(crate) fn unlink(&mut self, node: NodePtr<T>) -> T {
        link(node.prev(), node.next());
        self.len -= 1;
        // SAFETY: node was a linked value node of this list and has just been unlinked, so no
        // other handle will reach it.
        unsafe { node.take() }
    }

    /// Walks to the node at `index` from whichever end is closer.
    pub(crate) fn seek(&self, index: usize) -> NodePtr<T> {
        debug_assert!(index < self.len);
        if index < self.len / 2 {
            let mut node = self.sentinel.next();
            for _ in 0..index {
                node = node.next();
            }
            node
        } else {
            let mut node = self.sentinel.prev();
            for _ in 0..(self.len - 1 - index) {
                node = node.prev();
            }
            node
        }
    }

    pub(crate) fn checked_seek(&self, index: usize) -> Result<NodePtr<T>, IndexOutOfBounds> {
        if index < self.len {
            Ok(self.seek(index))
        } else {
            Err(IndexOutOfBounds { index, len: self.len })
        }
    }

    #[cfg(test)]
    pub(crate) fn verify_links(&self) {
        let mut count = 0;
        let mut cur = self.sentinel;
        loop {
            let next = cur.next();
            assert!(next.prev() == cur, "Broken prev link walking forwards.");
            cur = next;
            if cur == self.sentinel {
                break;
            }
            count += 1;
        }
        assert_eq!(count, self.len, "Forward walk saw the wrong number of nodes.");

        count = 0;
        cur = self.sentinel;
        loop {
            let prev = cur.prev();
            assert!(prev.next() == cur, "Broken next link walking backwards.");
            cur = prev;
            if cur == self.sentinel {
                break;
            }
            count += 1;
        }
        assert_eq!(count, self.len, "Backward walk saw the wrong number of nodes.");
    }
}

impl<T> Index<usize> for LinkedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index)
    }
}

impl<T> IndexMut<usize> for LinkedList<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index)
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

impl<T, const N: usize> From<[T; N]> for LinkedList<T> {
    fn from(value: [T; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: All value nodes are gone and the list is never used again.
        unsafe { self.sentinel.free(); }
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T: PartialOrd> PartialOrd for LinkedList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for LinkedList<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for LinkedList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<T: Debug> Debug for LinkedList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Debug> Display for LinkedList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ") -> (")?;
            }
            write!(f, "{item:?}")?;
        }
        write!(f, ")")
    }
}

// SAFETY: A LinkedList exclusively owns its nodes and its safe API obeys the borrow checker, so
// sending it between threads moves T and nothing else.
unsafe impl<T: Send> Send for LinkedList<T> {}
// SAFETY: No interior mutability; shared access only ever reads.
unsafe impl<T: Sync> Sync for LinkedList<T> {}
