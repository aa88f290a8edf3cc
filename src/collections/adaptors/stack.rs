use std::fmt::{self, Debug, Display, Formatter};

use crate::collections::linked::LinkedList;

/// A last-in-first-out adaptor over a [`LinkedList`]. All four operations are `O(1)`.
///
/// The list's front is the top of the stack, so neither push nor pop ever seeks.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stack<T> {
    list: LinkedList<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> {
    /// Creates a new Stack with no elements.
    pub fn new() -> Stack<T> {
        Stack {
            list: LinkedList::new(),
        }
    }

    /// Returns the number of elements on the Stack.
    pub const fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns true if the Stack contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Pushes a value onto the top of the Stack.
    pub fn push(&mut self, value: T) {
        self.list.push_front(value);
    }

    /// Removes and returns the most recently pushed value, if any.
    pub fn pop(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    /// Returns a reference to the most recently pushed value, if any.
    pub fn top(&self) -> Option<&T> {
        self.list.front()
    }

    /// Returns a mutable reference to the most recently pushed value, if any.
    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.list.front_mut()
    }

    /// Removes all elements, destroying their values.
    pub fn clear(&mut self) {
        self.list.clear();
    }
}

/// Adapts an existing list; its front becomes the top of the stack.
impl<T> From<LinkedList<T>> for Stack<T> {
    fn from(value: LinkedList<T>) -> Self {
        Stack { list: value }
    }
}

/// Recovers the underlying list, top first.
impl<T> From<Stack<T>> for LinkedList<T> {
    fn from(value: Stack<T>) -> Self {
        value.list
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Stack::new();
        stack.extend(iter);
        stack
    }
}

impl<T: Debug> Debug for Stack<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack").field("list", &self.list).finish()
    }
}

impl<T: Debug> Display for Stack<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.list, f)
    }
}
