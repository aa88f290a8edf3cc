use std::cmp;
use std::ptr::NonNull;

pub(crate) type Link<K, V> = Option<NodePtr<K, V>>;

/// The storage record for one map entry. `parent` is a non-owning back-reference used for
/// in-order traversal and rebalancing; ownership flows strictly downwards through `left` and
/// `right`. `height` is the cached height of the subtree rooted here (a leaf has height 1),
/// maintained incrementally so that balance checks never walk the subtree.
pub(crate) struct Node<K, V> {
    pub(crate) parent: Link<K, V>,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    pub(crate) height: usize,
    pub(crate) key: K,
    pub(crate) value: V,
}

/// A copyable handle to a [`Node`] owned by some tree, in the same style as the list's node
/// handle: the owning tree upholds that a handle is only dereferenced while its node is alive.
pub(crate) struct NodePtr<K, V>(NonNull<Node<K, V>>);

impl<K, V> NodePtr<K, V> {
    /// Allocates a detached leaf. The caller attaches it by setting its parent and the parent's
    /// child link.
    pub(crate) fn new(key: K, value: V) -> NodePtr<K, V> {
        NodePtr(NonNull::from(Box::leak(Box::new(Node {
            parent: None,
            left: None,
            right: None,
            height: 1,
            key,
            value,
        }))))
    }

    pub(crate) fn parent(self) -> Link<K, V> {
        // SAFETY: Handles are only dereferenced while the pointee is owned by a live tree.
        unsafe { (*self.0.as_ptr()).parent }
    }

    pub(crate) fn left(self) -> Link<K, V> {
        // SAFETY: As in parent.
        unsafe { (*self.0.as_ptr()).left }
    }

    pub(crate) fn right(self) -> Link<K, V> {
        // SAFETY: As in parent.
        unsafe { (*self.0.as_ptr()).right }
    }

    pub(crate) fn set_parent(self, link: Link<K, V>) {
        // SAFETY: As in parent.
        unsafe { (*self.0.as_ptr()).parent = link; }
    }

    pub(crate) fn set_left(self, link: Link<K, V>) {
        // SAFETY: As in parent.
        unsafe { (*self.0.as_ptr()).left = link; }
    }

    pub(crate) fn set_right(self, link: Link<K, V>) {
        // SAFETY: As in parent.
        unsafe { (*self.0.as_ptr()).right = link; }
    }

    pub(crate) fn height(self) -> usize {
        // SAFETY: As in parent.
        unsafe { (*self.0.as_ptr()).height }
    }

    pub(crate) fn set_height(self, height: usize) {
        // SAFETY: As in parent.
        unsafe { (*self.0.as_ptr()).height = height; }
    }

    /// Recomputes the cached height from the children's cached heights: O(1).
    pub(crate) fn update_height(self) {
        self.set_height(1 + cmp::max(height(self.left()), height(self.right())));
    }

    /// height(left) - height(right), from the cached heights.
    pub(crate) fn balance_factor(self) -> isize {
        height(self.left()) as isize - height(self.right()) as isize
    }

    pub(crate) fn leftmost(self) -> NodePtr<K, V> {
        let mut node = self;
        while let Some(left) = node.left() {
            node = left;
        }
        node
    }

    pub(crate) fn rightmost(self) -> NodePtr<K, V> {
        let mut node = self;
        while let Some(right) = node.right() {
            node = right;
        }
        node
    }

    /// The next node in key order: the leftmost node of the right subtree when there is one,
    /// otherwise the nearest ancestor whose left subtree contains this node.
    pub(crate) fn successor(self) -> Link<K, V> {
        if let Some(right) = self.right() {
            return Some(right.leftmost());
        }
        let mut cur = self;
        while let Some(parent) = cur.parent() {
            if parent.left() == Some(cur) {
                return Some(parent);
            }
            cur = parent;
        }
        None
    }

    /// Mirror of [`successor`](NodePtr::successor).
    pub(crate) fn predecessor(self) -> Link<K, V> {
        if let Some(left) = self.left() {
            return Some(left.rightmost());
        }
        let mut cur = self;
        while let Some(parent) = cur.parent() {
            if parent.right() == Some(cur) {
                return Some(parent);
            }
            cur = parent;
        }
        None
    }

    /// Returns a reference to the node's key with an unbounded lifetime.
    ///
    /// # Safety
    /// The node must outlive the lifetime the caller assigns, with no aliasing mutable access.
    pub(crate) unsafe fn key<'a>(self) -> &'a K {
        // SAFETY: Upheld by the caller.
        unsafe { &(*self.0.as_ptr()).key }
    }

    /// Shared references to the entry with an unbounded lifetime.
    ///
    /// # Safety
    /// As for [`key`](NodePtr::key).
    pub(crate) unsafe fn entry<'a>(self) -> (&'a K, &'a V) {
        // SAFETY: Upheld by the caller.
        unsafe { (&(*self.0.as_ptr()).key, &(*self.0.as_ptr()).value) }
    }

    /// Key reference plus mutable value reference with unbounded lifetimes. The key stays
    /// shared: mutating it would break the search order.
    ///
    /// # Safety
    /// As for [`key`](NodePtr::key), and the value reference must be the only access to the
    /// value for the assigned lifetime.
    pub(crate) unsafe fn entry_mut<'a>(self) -> (&'a K, &'a mut V) {
        // SAFETY: Upheld by the caller.
        unsafe { (&(*self.0.as_ptr()).key, &mut (*self.0.as_ptr()).value) }
    }

    /// Mutable reference to the value with an unbounded lifetime.
    ///
    /// # Safety
    /// As for [`entry_mut`](NodePtr::entry_mut).
    pub(crate) unsafe fn value_mut<'a>(self) -> &'a mut V {
        // SAFETY: Upheld by the caller.
        unsafe { &mut (*self.0.as_ptr()).value }
    }

    /// Moves the entry out of the node and deallocates it.
    ///
    /// # Safety
    /// The node must already be unlinked from the tree and must not be freed twice.
    pub(crate) unsafe fn free(self) -> (K, V) {
        // SAFETY: The Box was created in new and leaked; reconstituting it releases the storage.
        let node = unsafe { Box::from_raw(self.0.as_ptr()) };
        (node.key, node.value)
    }
}

/// Height of an optional subtree; the empty subtree has height 0.
pub(crate) fn height<K, V>(link: Link<K, V>) -> usize {
    match link {
        Some(node) => node.height(),
        None => 0,
    }
}

impl<K, V> Clone for NodePtr<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodePtr<K, V> {}

impl<K, V> PartialEq for NodePtr<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<K, V> Eq for NodePtr<K, V> {}
