use std::fmt::{self, Debug, Display, Formatter};

use crate::collections::linked::LinkedList;

/// A first-in-first-out adaptor over a [`LinkedList`]. All operations are `O(1)`.
///
/// Values enter at the list's back and leave from its front.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Queue<T> {
    list: LinkedList<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    /// Creates a new Queue with no elements.
    pub fn new() -> Queue<T> {
        Queue {
            list: LinkedList::new(),
        }
    }

    /// Returns the number of elements in the Queue.
    pub const fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns true if the Queue contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Pushes a value onto the back of the Queue.
    pub fn push(&mut self, value: T) {
        self.list.push_back(value);
    }

    /// Removes and returns the oldest value in the Queue, if any.
    pub fn pop(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    /// Returns a reference to the oldest value in the Queue, if any.
    pub fn front(&self) -> Option<&T> {
        self.list.front()
    }

    /// Returns a mutable reference to the oldest value in the Queue, if any.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.list.front_mut()
    }

    /// Returns a reference to the most recently pushed value, if any.
    pub fn back(&self) -> Option<&T> {
        self.list.back()
    }

    /// Returns a mutable reference to the most recently pushed value, if any.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.list.back_mut()
    }

    /// Removes all elements, destroying their values.
    pub fn clear(&mut self) {
        self.list.clear();
    }
}

/// Adapts an existing list; its front becomes the front of the queue.
impl<T> From<LinkedList<T>> for Queue<T> {
    fn from(value: LinkedList<T>) -> Self {
        Queue { list: value }
    }
}

/// Recovers the underlying list, oldest element first.
impl<T> From<Queue<T>> for LinkedList<T> {
    fn from(value: Queue<T>) -> Self {
        value.list
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Queue::new();
        queue.extend(iter);
        queue
    }
}

impl<T: Debug> Debug for Queue<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue").field("list", &self.list).finish()
    }
}

impl<T: Debug> Display for Queue<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.list, f)
    }
}
