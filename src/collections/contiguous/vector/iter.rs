use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ptr::NonNull;
use std::{alloc, slice};

use super::Vector;

impl<T> IntoIterator for Vector<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let vec = ManuallyDrop::new(self);
        IntoIter {
            ptr: vec.ptr,
            cap: vec.cap,
            front: 0,
            back: vec.len,
            _phantom: PhantomData,
        }
    }
}

/// An owned iterator over a Vector's elements, double ended and exact sized.
///
/// The buffer is taken over wholesale; elements are moved out by index, which keeps the two ends
/// independent and works for zero sized types, where pointer arithmetic carries no information.
/// Anything not consumed is dropped along with the buffer.
pub struct IntoIter<T> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) cap: usize,
    pub(crate) front: usize,
    // One past the last remaining element.
    pub(crate) back: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let index = self.front;
        self.front += 1;
        // SAFETY: index is within the remaining initialized range and will never be touched
        // again.
        Some(unsafe { self.ptr.as_ptr().add(index).read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: As in next.
        Some(unsafe { self.ptr.as_ptr().add(self.back).read() })
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.back - self.front
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // Drop whatever wasn't consumed, then release the buffer.
        // SAFETY: The elements in front..back are initialized and owned by the iterator.
        unsafe {
            std::ptr::drop_in_place(slice::from_raw_parts_mut(
                self.ptr.as_ptr().add(self.front),
                self.back - self.front,
            ));
        }
        if size_of::<T>() > 0 && self.cap > 0 {
            // SAFETY: The layout was checked when the Vector allocated the buffer.
            unsafe {
                let layout = alloc::Layout::array::<T>(self.cap).unwrap_unchecked();
                alloc::dealloc(self.ptr.as_ptr().cast(), layout);
            }
        }
    }
}

impl<T: Debug> Debug for IntoIter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // SAFETY: The remaining range is initialized; this is a read-only view.
        let remaining =
            unsafe { slice::from_raw_parts(self.ptr.as_ptr().add(self.front), self.len()) };
        f.debug_list().entries(remaining).finish()
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;

    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// SAFETY: The iterator exclusively owns its buffer; moving it between threads moves T and
// nothing else.
unsafe impl<T: Send> Send for IntoIter<T> {}
// SAFETY: No interior mutability; shared access only ever reads.
unsafe impl<T: Sync> Sync for IntoIter<T> {}
