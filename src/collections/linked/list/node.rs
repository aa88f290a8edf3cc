use std::mem::MaybeUninit;
use std::ptr::NonNull;

// NOTE: Nodes are allocated through Box and immediately leaked into a raw NonNull, so storage
// acquisition and value construction stay separate steps: the value is written into the node
// before any neighbour's pointer is touched, and taking a value back out reconstitutes the Box so
// deallocation can't be missed.

/// The storage record for one list element. The sentinel node uses the same layout with `value`
/// left uninitialised, which is what lets the ring close without null links.
pub(crate) struct Node<T> {
    pub(crate) value: MaybeUninit<T>,
    pub(crate) prev: NodePtr<T>,
    pub(crate) next: NodePtr<T>,
}

/// A copyable handle to a [`Node`] owned by some list. All access goes through these handles; the
/// owning list upholds that a handle is only dereferenced while its node is alive.
pub(crate) struct NodePtr<T>(NonNull<Node<T>>);

impl<T> NodePtr<T> {
    /// Allocates a node whose links dangle. The caller must link it into a ring before either
    /// link is followed.
    fn alloc(value: MaybeUninit<T>) -> NodePtr<T> {
        NodePtr(NonNull::from(Box::leak(Box::new(Node {
            value,
            prev: NodePtr(NonNull::dangling()),
            next: NodePtr(NonNull::dangling()),
        }))))
    }

    pub(crate) fn new(value: T) -> NodePtr<T> {
        Self::alloc(MaybeUninit::new(value))
    }

    /// Allocates a sentinel: no value, linked to itself in both directions (the empty ring).
    pub(crate) fn sentinel() -> NodePtr<T> {
        let node = Self::alloc(MaybeUninit::uninit());
        node.set_next(node);
        node.set_prev(node);
        node
    }

    pub(crate) fn next(self) -> NodePtr<T> {
        // SAFETY: Handles are only dereferenced while the pointee is owned by a live list.
        unsafe { (*self.0.as_ptr()).next }
    }

    pub(crate) fn prev(self) -> NodePtr<T> {
        // SAFETY: As in next.
        unsafe { (*self.0.as_ptr()).prev }
    }

    pub(crate) fn set_next(self, node: NodePtr<T>) {
        // SAFETY: As in next.
        unsafe { (*self.0.as_ptr()).next = node; }
    }

    pub(crate) fn set_prev(self, node: NodePtr<T>) {
        // SAFETY: As in next.
        unsafe { (*self.0.as_ptr()).prev = node; }
    }

    /// Returns a reference to the node's value with an unbounded lifetime.
    ///
    /// # Safety
    /// The node must hold an initialised value (i.e. not be the sentinel) and must outlive the
    /// lifetime the caller assigns to the reference, with no aliasing mutable access.
    pub(crate) unsafe fn value<'a>(self) -> &'a T {
        // SAFETY: Upheld by the caller.
        unsafe { (*self.0.as_ptr()).value.assume_init_ref() }
    }

    /// Mutable counterpart of [`value`](NodePtr::value).
    ///
    /// # Safety
    /// As for [`value`](NodePtr::value), and the reference must be the only access to the node's
    /// value for the assigned lifetime.
    pub(crate) unsafe fn value_mut<'a>(self) -> &'a mut T {
        // SAFETY: Upheld by the caller.
        unsafe { (*self.0.as_ptr()).value.assume_init_mut() }
    }

    /// Moves the value out of the node and deallocates it.
    ///
    /// # Safety
    /// The node must hold an initialised value, must already be unlinked (no other handle will be
    /// followed to it again) and must not be freed twice.
    pub(crate) unsafe fn take(self) -> T {
        // SAFETY: The Box was created in alloc and leaked; reconstituting it here both reads the
        // value and releases the storage.
        let node = unsafe { Box::from_raw(self.0.as_ptr()) };
        // SAFETY: Initialisation is upheld by the caller.
        unsafe { node.value.assume_init() }
    }

    /// Deallocates the node without reading its value. Used for the sentinel, whose value slot
    /// was never initialised.
    ///
    /// # Safety
    /// The node must not be accessed through any handle afterwards.
    pub(crate) unsafe fn free(self) {
        // SAFETY: Reconstituting the leaked Box; MaybeUninit has no drop, so an uninitialised
        // value slot is fine.
        drop(unsafe { Box::from_raw(self.0.as_ptr()) });
    }
}

/// Links `a -> b`, updating both directions.
pub(crate) fn link<T>(a: NodePtr<T>, b: NodePtr<T>) {
    a.set_next(b);
    b.set_prev(a);
}

impl<T> Clone for NodePtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodePtr<T> {}

impl<T> PartialEq for NodePtr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for NodePtr<T> {}
