use std::alloc::{self, Layout};
use std::borrow::{Borrow, BorrowMut};
use std::cmp::{self, Ordering};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop};
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};

#[doc(inline)]
pub use crate::util::error::{CapacityOverflow, IndexOutOfBounds};
use crate::util::result::ResultExtension;

pub(crate) const MIN_CAP: usize = 2;
pub(crate) const MAX_CAP: usize = isize::MAX as usize;

pub(crate) const GROWTH_FACTOR: usize = 2;

/// A variable size contiguous collection.
///
/// Elements live in one allocation of `cap` slots, the first `len` of which are initialized.
/// Pushing past the capacity reallocates with doubling growth, so a sequence of pushes is
/// amortised `O(1)`. [`Deref`] exposes the initialized prefix as a slice, which is where the
/// random access iterators, subslicing and the search methods come from.
///
/// Zero sized types never allocate; only the length and capacity bookkeeping changes.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Vector.
/// - `i`: The index of the item in question.
/// - `m`: The number of items in the second Vector.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `insert` | `O(n-i)` |
/// | `remove` | `O(n-i)` |
/// | `replace` | `O(1)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `shrink_to_fit` | `O(n)` |
/// | `truncate` | `O(n)` |
/// | `append` | `O(n+m)` |
///
/// \* If the Vector doesn't have enough capacity for the new element, `push` will take `O(n)`.
///
/// \** If the Vector already has enough capacity for the additional items, `reserve` is `O(1)`.
pub struct Vector<T> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) cap: usize,
    pub(crate) len: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> Vector<T> {
    /// Creates a new Vector with length and capacity 0. Memory will be allocated when the
    /// capacity changes.
    pub const fn new() -> Vector<T> {
        Vector {
            ptr: NonNull::dangling(),
            cap: 0,
            len: 0,
            _phantom: PhantomData,
        }
    }

    /// Creates a new Vector with capacity exactly equal to the provided value, allowing that many
    /// values to be added without reallocation.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    pub fn with_cap(cap: usize) -> Vector<T> {
        let mut vec = Vector::new();
        vec.realloc_with_cap(cap);
        vec
    }

    /// Returns the length of the Vector.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Vector contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the Vector. Unlike [`Vec`], the capacity is guaranteed to
    /// be exactly the value produced by the capacity manipulation methods.
    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Push the provided value onto the end of the Vector, growing the capacity if required.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub fn push(&mut self, value: T) {
        if self.len == self.cap {
            self.grow();
        }
        // SAFETY: The capacity has just been adjusted to make the slot at len available. For a
        // zero sized T the write is a no-op at the dangling (aligned, nonnull) pointer.
        unsafe { self.ptr.as_ptr().add(self.len).write(value); }
        self.len += 1;
    }

    /// Pops the last value off the end of the Vector, returning an owned value if the Vector has
    /// length greater than 0.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            // SAFETY: The slot at the decremented len holds an initialized value which the Vector
            // no longer considers its own, so reading it out is a move.
            Some(unsafe { self.ptr.as_ptr().add(self.len).read() })
        }
    }

    /// Inserts the provided value at the given index, shifting all later elements one position
    /// back. `insert(len, value)` is equivalent to `push`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value).throw()
    }

    /// Non-panicking version of [`insert`](Vector::insert).
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), IndexOutOfBounds> {
        if index > self.len {
            return Err(IndexOutOfBounds { index, len: self.len });
        }
        if self.len == self.cap {
            self.grow();
        }
        // SAFETY: index <= len < cap after growth; the copy shifts the tail one slot towards the
        // back and the write fills the vacated slot.
        unsafe {
            let base = self.ptr.as_ptr().add(index);
            ptr::copy(base, base.add(1), self.len - index);
            base.write(value);
        }
        self.len += 1;
        Ok(())
    }

    /// Removes the element at the provided index, moving all following values to fill the gap.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub fn remove(&mut self, index: usize) -> T {
        self.try_remove(index).throw()
    }

    /// Non-panicking version of [`remove`](Vector::remove).
    pub fn try_remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        if index >= self.len {
            return Err(IndexOutOfBounds { index, len: self.len });
        }
        // SAFETY: index < len, so the slot is initialized; the copy shifts the tail over the
        // vacated slot, after which the read value is the only copy.
        let value = unsafe {
            let base = self.ptr.as_ptr().add(index);
            let value = base.read();
            ptr::copy(base.add(1), base, self.len - index - 1);
            value
        };
        self.len -= 1;
        Ok(value)
    }

    /// Replaces the element at the provided index with `new_value`, returning the old value.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub fn replace(&mut self, index: usize, new_value: T) -> T {
        self.try_replace(index, new_value).throw()
    }

    /// Non-panicking version of [`replace`](Vector::replace).
    pub fn try_replace(&mut self, index: usize, new_value: T) -> Result<T, IndexOutOfBounds> {
        if index >= self.len {
            return Err(IndexOutOfBounds { index, len: self.len });
        }
        Ok(mem::replace(&mut self[index], new_value))
    }

    /// Ensures that the Vector has capacity to hold `extra` additional elements. After invoking
    /// this method, the capacity will be >= len + extra.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub fn reserve(&mut self, extra: usize) {
        let new_cap = self.len.checked_add(extra).ok_or(CapacityOverflow).throw();
        if new_cap <= self.cap {
            return;
        }
        self.realloc_with_cap(new_cap);
    }

    /// Shrinks the Vector so that its capacity is equal to its length.
    pub fn shrink_to_fit(&mut self) {
        self.realloc_with_cap(self.len);
    }

    /// Shortens the Vector to `new_len` elements, dropping the rest. Does nothing if `new_len`
    /// isn't less than the current length. The capacity doesn't change.
    pub fn truncate(&mut self, new_len: usize) {
        while self.len > new_len {
            self.len -= 1;
            // SAFETY: The slot at the decremented len is initialized and will never be read
            // again.
            unsafe { ptr::drop_in_place(self.ptr.as_ptr().add(self.len)); }
        }
    }

    /// Removes all elements, destroying their values. The capacity doesn't change.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Moves all elements from `other` to the back of `self`, leaving `other` empty (with its
    /// capacity intact).
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub fn append(&mut self, other: &mut Vector<T>) {
        self.reserve(other.len);
        // SAFETY: reserve guaranteed room for other.len more elements, and the two allocations
        // don't overlap. other's slots are treated as uninitialized afterwards, so the values
        // move rather than duplicate.
        unsafe {
            ptr::copy_nonoverlapping(
                other.ptr.as_ptr(),
                self.ptr.as_ptr().add(self.len),
                other.len,
            );
        }
        self.len += other.len;
        other.len = 0;
    }

    /// Reallocates the buffer to hold exactly `new_cap` elements. Never called with fewer than
    /// `len` slots.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub(crate) fn realloc_with_cap(&mut self, new_cap: usize) {
        debug_assert!(new_cap >= self.len);
        if size_of::<T>() == 0 || new_cap == self.cap {
            // Zero sized types only ever need the bookkeeping.
            self.cap = new_cap;
            return;
        }

        let new_layout = Layout::array::<T>(new_cap)
            .map_err(|_| CapacityOverflow)
            .throw();
        if new_layout.size() > MAX_CAP {
            Err(CapacityOverflow).throw()
        }

        let ptr = if self.cap == 0 {
            // SAFETY: new_cap != self.cap, so the layout size is nonzero.
            unsafe { alloc::alloc(new_layout) }
        } else {
            // SAFETY: The layout was checked when the current buffer was allocated.
            let old_layout = unsafe { Layout::array::<T>(self.cap).unwrap_unchecked() };
            if new_cap == 0 {
                // SAFETY: The buffer was allocated with old_layout and no element is live.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), old_layout); }
                self.ptr = NonNull::dangling();
                self.cap = 0;
                return;
            }
            // SAFETY: The buffer was allocated with old_layout and the new size is nonzero and
            // doesn't overflow isize::MAX.
            unsafe { alloc::realloc(self.ptr.as_ptr().cast(), old_layout, new_layout.size()) }
        };

        self.ptr = match NonNull::new(ptr.cast::<T>()) {
            Some(ptr) => ptr,
            None => alloc::handle_alloc_error(new_layout),
        };
        self.cap = new_cap;
    }

    /// Grows the buffer so that at least one more element fits: doubling, from a small minimum.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub(crate) fn grow(&mut self) {
        // cap is at most isize::MAX in bytes, so doubling the element count can't overflow usize.
        let mut new_cap = cmp::max(self.cap * GROWTH_FACTOR, MIN_CAP);

        // If doubling would overshoot the maximum layout, settle for the maximum as long as it
        // still represents growth.
        if size_of::<T>() > 0 {
            let max_elements = MAX_CAP / size_of::<T>();
            if new_cap > max_elements && max_elements > self.cap {
                new_cap = max_elements;
            }
        }

        self.realloc_with_cap(new_cap);
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut vec = Vector::with_cap(iter.size_hint().0);
        for item in iter {
            vec.push(item);
        }
        vec
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(value: [T; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(value: Vec<T>) -> Self {
        let mut value = ManuallyDrop::new(value);
        Vector {
            // SAFETY: A Vec's buffer pointer is never null.
            ptr: unsafe { NonNull::new_unchecked(value.as_mut_ptr()) },
            cap: value.capacity(),
            len: value.len(),
            _phantom: PhantomData,
        }
    }
}

impl<T> From<Vector<T>> for Vec<T> {
    fn from(value: Vector<T>) -> Self {
        let value = ManuallyDrop::new(value);
        // SAFETY: The buffer was allocated by the global allocator for exactly cap elements and
        // holds len initialized values, which is what Vec requires.
        unsafe { Vec::from_raw_parts(value.ptr.as_ptr(), value.len, value.cap) }
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        self.clear();
        if size_of::<T>() > 0 && self.cap > 0 {
            // SAFETY: The layout was checked when the buffer was allocated, every element has
            // been dropped and the Vector is never used again.
            unsafe {
                let layout = Layout::array::<T>(self.cap).unwrap_unchecked();
                alloc::dealloc(self.ptr.as_ptr().cast(), layout);
            }
        }
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The first len slots are initialized, the pointer is nonnull and properly
        // aligned, and the total size can't exceed isize::MAX for a valid Vector. The borrow
        // checker prevents mutation through this shared view.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: As in deref, and &mut self guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Borrow<[T]> for Vector<T> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T> BorrowMut<[T]> for Vector<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        let mut vec = Self::with_cap(self.len);
        for value in self.iter() {
            vec.push(value.clone());
        }
        vec
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: PartialOrd> PartialOrd for Vector<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (**self).partial_cmp(other)
    }
}

impl<T: Ord> Ord for Vector<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (**self).cmp(other)
    }
}

impl<T: Hash> Hash for Vector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for Vector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap)
            .finish()
    }
}

impl<T: Debug> Display for Vector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// SAFETY: A Vector exclusively owns its buffer, so sending it between threads moves T and
// nothing else.
unsafe impl<T: Send> Send for Vector<T> {}
// SAFETY: No interior mutability; shared access only ever reads.
unsafe impl<T: Sync> Sync for Vector<T> {}
