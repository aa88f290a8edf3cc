use super::{LinkedList, NodePtr, link};
use crate::util::error::CapacityOverflow;
use crate::util::result::ResultExtension;

/// A position inside a borrowed [`LinkedList`], supporting O(1) insertion, removal and splicing
/// at that position - the operations an index can't give without a seek.
///
/// The cursor is either over an element or over the "end" position between the last and first
/// elements (the sentinel's slot in the ring). Moving past either end wraps through that end
/// position, so `move_next`/`move_prev` never get stuck.
pub struct CursorMut<'a, T> {
    pub(crate) node: NodePtr<T>,
    pub(crate) index: usize,
    pub(crate) list: &'a mut LinkedList<T>,
}

impl<'a, T> CursorMut<'a, T> {
    /// Returns the index of the current element, or [`None`] when over the end position.
    pub fn index(&self) -> Option<usize> {
        if self.at_end() { None } else { Some(self.index) }
    }

    /// Returns a mutable reference to the current element, or [`None`] when over the end
    /// position.
    pub fn current(&mut self) -> Option<&mut T> {
        if self.at_end() {
            None
        } else {
            // SAFETY: Not the sentinel, so the node holds a value; &mut self borrows the list
            // exclusively.
            Some(unsafe { self.node.value_mut() })
        }
    }

    /// Returns a mutable reference to the element after the cursor. From the end position this
    /// is the first element.
    pub fn peek_next(&mut self) -> Option<&mut T> {
        let next = self.node.next();
        if next == self.list.sentinel {
            None
        } else {
            // SAFETY: As in current.
            Some(unsafe { next.value_mut() })
        }
    }

    /// Returns a mutable reference to the element before the cursor. From the end position this
    /// is the last element.
    pub fn peek_prev(&mut self) -> Option<&mut T> {
        let prev = self.node.prev();
        if prev == self.list.sentinel {
            None
        } else {
            // SAFETY: As in current.
            Some(unsafe { prev.value_mut() })
        }
    }

    /// Moves to the next position, wrapping through the end position after the last element.
    pub fn move_next(&mut self) {
        let was_end = self.at_end();
        self.node = self.node.next();
        if self.at_end() {
            self.index = self.list.len;
        } else if was_end {
            self.index = 0;
        } else {
            self.index += 1;
        }
    }

    /// Moves to the previous position, wrapping through the end position before the first
    /// element.
    pub fn move_prev(&mut self) {
        let was_end = self.at_end();
        self.node = self.node.prev();
        if self.at_end() {
            self.index = self.list.len;
        } else if was_end {
            self.index = self.list.len - 1;
        } else {
            self.index -= 1;
        }
    }

    /// Inserts `value` immediately before the cursor in O(1). At the end position this appends.
    pub fn insert_before(&mut self, value: T) {
        let node = NodePtr::new(value);
        self.list.link_before(node, self.node);
        if self.at_end() {
            self.index = self.list.len;
        } else {
            self.index += 1;
        }
    }

    /// Inserts `value` immediately after the cursor in O(1). At the end position this prepends.
    pub fn insert_after(&mut self, value: T) {
        let node = NodePtr::new(value);
        let pos = self.node.next();
        self.list.link_before(node, pos);
        if self.at_end() {
            self.index = self.list.len;
        }
    }

    /// Removes and returns the current element, leaving the cursor over the element that
    /// followed it (or the end position if it was the last). Returns [`None`] at the end
    /// position.
    pub fn remove_current(&mut self) -> Option<T> {
        if self.at_end() {
            return None;
        }
        let node = self.node;
        self.node = node.next();
        Some(self.list.unlink(node))
    }

    /// Moves every element of `other` to immediately before the cursor, leaving `other` empty.
    /// Pure relinking: O(1) regardless of how many elements move, and positions into the moved
    /// elements stay structurally valid.
    pub fn splice_before(&mut self, other: &mut LinkedList<T>) {
        if other.is_empty() {
            return;
        }
        let first = other.sentinel.next();
        let last = other.sentinel.prev();
        link(self.node.prev(), first);
        link(last, self.node);
        link(other.sentinel, other.sentinel);
        self.list.len = self.list.len
            .checked_add(other.len)
            .ok_or(CapacityOverflow)
            .throw();
        self.index += other.len;
        other.len = 0;
    }

    /// Splits off everything before the cursor into a new list, leaving the cursor over the
    /// (unchanged) current element at index 0.
    pub fn split_before(&mut self) -> LinkedList<T> {
        let count = self.index;
        let mut other = LinkedList::new();
        if count == 0 {
            return other;
        }
        let first = self.list.sentinel.next();
        let last = self.node.prev();
        link(self.list.sentinel, self.node);
        link(other.sentinel, first);
        link(last, other.sentinel);
        other.len = count;
        self.list.len -= count;
        self.index = if self.at_end() { self.list.len } else { 0 };
        other
    }

    fn at_end(&self) -> bool {
        self.node == self.list.sentinel
    }
}
