use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::Index;

use super::{Iter, IterMut, Keys, Link, NodePtr, Range, Values, ValuesMut};
use crate::collections::compare::{Comparator, NaturalOrder};
#[doc(inline)]
pub use crate::util::error::{DuplicateKey, KeyNotFound};
use crate::util::result::ResultExtension;

/// An ordered map backed by an AVL tree: a binary search tree which rebalances itself with local
/// rotations so that every node's subtree heights differ by at most one, keeping every operation
/// `O(log n)`.
///
/// Nodes carry parent back-pointers, so iteration walks successor/predecessor links without a
/// stack, and a cached height, so rebalancing never re-measures a subtree. The key order comes
/// from an injected [`Comparator`] ([`NaturalOrder`], i.e. `K`'s own [`Ord`], by default); every
/// comparison in the map routes through it.
///
/// Inserting an already-present key does *not* overwrite: the rejected pair comes back in the
/// error. Use [`get_or_insert_with`](AvlMap::get_or_insert_with) or
/// [`get_mut`](AvlMap::get_mut) for overwriting semantics.
///
/// # Time Complexity
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(log n)` |
/// | `remove` | `O(log n)` |
/// | `get` | `O(log n)` |
/// | `first/last_key_value` | `O(log n)` |
/// | `lower/upper_bound` | `O(log n)` |
/// | `iter` (whole pass) | `O(n)` |
pub struct AvlMap<K, V, C = NaturalOrder> {
    pub(crate) root: Link<K, V>,
    pub(crate) len: usize,
    pub(crate) comp: C,
    pub(crate) _phantom: PhantomData<(K, V)>,
}

impl<K: Ord, V> AvlMap<K, V> {
    /// Creates an empty map ordered by `K`'s [`Ord`].
    pub fn new() -> AvlMap<K, V> {
        AvlMap::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> AvlMap<K, V, C> {
    /// Creates an empty map ordered by the provided comparator.
    pub const fn with_comparator(comp: C) -> AvlMap<K, V, C> {
        AvlMap {
            root: None,
            len: 0,
            comp,
            _phantom: PhantomData,
        }
    }

    /// Returns the number of entries in the map.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the comparator the map orders its keys with.
    pub const fn comparator(&self) -> &C {
        &self.comp
    }

    /// The entry with the smallest key, if any.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        // SAFETY: Live node; the borrow is tied to &self.
        self.root.map(|root| unsafe { root.leftmost().entry() })
    }

    /// The entry with the largest key, if any.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        // SAFETY: As in first_key_value.
        self.root.map(|root| unsafe { root.rightmost().entry() })
    }

    /// Removes and returns the entry with the smallest key, if any.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let node = self.root?.leftmost();
        Some(self.remove_node(node))
    }

    /// Removes and returns the entry with the largest key, if any.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let node = self.root?.rightmost();
        Some(self.remove_node(node))
    }

    /// Removes all entries, destroying their keys and values.
    pub fn clear(&mut self) {
        fn drop_subtree<K, V>(link: Link<K, V>) {
            if let Some(node) = link {
                drop_subtree(node.left());
                drop_subtree(node.right());
                // SAFETY: Both children are already freed and nothing traverses to this node
                // again.
                drop(unsafe { node.free() });
            }
        }
        // Recursion depth is the tree height, which the balance invariant keeps logarithmic.
        drop_subtree(self.root.take());
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.into_iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.into_iter()
    }

    /// An iterator over the keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// An iterator over the values, in ascending order of their keys.
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// A mutable iterator over the values, in ascending order of their keys.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut(self.iter_mut())
    }
}

impl<K, V, C: Comparator<K>> AvlMap<K, V, C> {
    /// Inserts a new entry, failing without modification if the key is already present. The
    /// rejected pair travels back in the error so nothing is silently dropped. On success,
    /// returns a mutable reference to the inserted value.
    pub fn insert(&mut self, key: K, value: V) -> Result<&mut V, DuplicateKey<K, V>> {
        let mut parent = None;
        let mut ordering = Ordering::Equal;
        let mut cur = self.root;
        while let Some(node) = cur {
            // SAFETY: Live node; the shared borrow ends within this iteration.
            ordering = self.comp.cmp(&key, unsafe { node.key() });
            parent = Some(node);
            cur = match ordering {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Err(DuplicateKey { key, value }),
            };
        }

        let node = NodePtr::new(key, value);
        node.set_parent(parent);
        match parent {
            None => self.root = Some(node),
            Some(p) => {
                if ordering == Ordering::Less {
                    p.set_left(Some(node));
                } else {
                    p.set_right(Some(node));
                }
            },
        }
        self.len += 1;
        self.rebalance_from(parent);

        // SAFETY: The handle stays valid across rotations (only links move, nodes don't); the
        // borrow is tied to &mut self.
        Ok(unsafe { node.value_mut() })
    }

    /// Returns a mutable reference to the value for `key`, inserting `f()` first if the key is
    /// absent. This (and not [`insert`](AvlMap::insert)) is the overwriting entry point:
    /// `*map.get_or_insert_with(k, Default::default) = v`.
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, f: F) -> &mut V {
        if let Some(node) = self.find(&key) {
            // SAFETY: Live node; the borrow is tied to &mut self.
            return unsafe { node.value_mut() };
        }
        match self.insert(key, f()) {
            Ok(value) => value,
            // The key was just probed absent and we hold the only borrow.
            Err(_) => unreachable!(),
        }
    }

    /// [`get_or_insert_with`](AvlMap::get_or_insert_with) using `V`'s default.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Removes the entry for `key`, returning both key and value if it was present.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let node = self.find(key)?;
        Some(self.remove_node(node))
    }

    /// Removes the entry for `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let node = self.find(key)?;
        // SAFETY: Live node; the borrow is tied to &self.
        Some(unsafe { node.entry() })
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let node = self.find(key)?;
        // SAFETY: Live node; the borrow is tied to &mut self.
        Some(unsafe { node.value_mut() })
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// An iterator starting at the first entry whose key is not less than `key` (equal counts),
    /// running to the end of the map.
    pub fn lower_bound(&self, key: &K) -> Range<'_, K, V> {
        Range {
            next: self.bound(key, true),
            until: None,
            _phantom: PhantomData,
        }
    }

    /// An iterator starting at the first entry whose key is strictly greater than `key`, running
    /// to the end of the map.
    pub fn upper_bound(&self, key: &K) -> Range<'_, K, V> {
        Range {
            next: self.bound(key, false),
            until: None,
            _phantom: PhantomData,
        }
    }

    /// The entries between [`lower_bound`](AvlMap::lower_bound) and
    /// [`upper_bound`](AvlMap::upper_bound): since keys are unique, at most one.
    pub fn equal_range(&self, key: &K) -> Range<'_, K, V> {
        Range {
            next: self.bound(key, true),
            until: self.bound(key, false),
            _phantom: PhantomData,
        }
    }

    /// Standard BST descent for `key`, routed through the comparator.
    pub(crate) fn find(&self, key: &K) -> Link<K, V> {
        let mut cur = self.root;
        while let Some(node) = cur {
            // SAFETY: Live node; the shared borrow ends within this iteration.
            cur = match self.comp.cmp(key, unsafe { node.key() }) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Descends to the leftmost node whose key is `>= key` (inclusive) or `> key` (exclusive),
    /// recording the best candidate while steering.
    fn bound(&self, key: &K, inclusive: bool) -> Link<K, V> {
        let mut best = None;
        let mut cur = self.root;
        while let Some(node) = cur {
            // SAFETY: Live node; the shared borrow ends within this iteration.
            let ordering = self.comp.cmp(unsafe { node.key() }, key);
            let descend_right = match ordering {
                Ordering::Less => true,
                Ordering::Equal => !inclusive,
                Ordering::Greater => false,
            };
            if descend_right {
                cur = node.right();
            } else {
                best = Some(node);
                cur = node.left();
            }
        }
        best
    }
}

impl<K, V, C> AvlMap<K, V, C> {
    /// Unlinks `node` from the tree, rebalances from the vacated position upwards and returns
    /// the entry. For a node with two children the in-order successor *node* is relinked into
    /// its place - values are never copied or reconstructed.
    pub(crate) fn remove_node(&mut self, node: NodePtr<K, V>) -> (K, V) {
        let rebalance_from;

        if let (Some(left), Some(right)) = (node.left(), node.right()) {
            let succ = right.leftmost();
            if succ == right {
                // The successor is the direct right child: it keeps its own right subtree and
                // rebalancing starts at the successor itself.
                rebalance_from = Some(succ);
            } else {
                // Detach the successor from deeper in the right subtree. It has no left child,
                // so its right child (possibly none) takes its slot.
                // SAFETY: succ != right, so succ has a parent inside the subtree.
                let succ_parent = unsafe { succ.parent().unwrap_unchecked() };
                rebalance_from = Some(succ_parent);
                succ_parent.set_left(succ.right());
                if let Some(r) = succ.right() {
                    r.set_parent(Some(succ_parent));
                }
                succ.set_right(Some(right));
                right.set_parent(Some(succ));
            }
            // The successor adopts the victim's left subtree, slot and cached height.
            succ.set_left(Some(left));
            left.set_parent(Some(succ));
            self.replace_child(node, succ);
            succ.set_height(node.height());
        } else {
            // At most one child: splice it (or nothing) into the vacated slot.
            rebalance_from = node.parent();
            let child = node.left().or(node.right());
            if let Some(c) = child {
                c.set_parent(node.parent());
            }
            match node.parent() {
                None => self.root = child,
                Some(p) => {
                    if p.left() == Some(node) {
                        p.set_left(child);
                    } else {
                        p.set_right(child);
                    }
                },
            }
        }

        self.len -= 1;
        self.rebalance_from(rebalance_from);
        // SAFETY: node is fully unlinked; no handle reaches it again.
        unsafe { node.free() }
    }

    /// Retraces the parent chain from `start` to the root, refreshing cached heights and
    /// rotating wherever a node's balance factor leaves `[-1, 1]`. The heavy child's factor
    /// picks single vs. double rotation: `>= 0` on the left (resp. `<= 0` on the right) means a
    /// single rotation restores balance; after an insertion that factor can never be 0 when the
    /// parent is out of balance, so the inclusive rule is exact for both growth and shrinkage.
    fn rebalance_from(&mut self, start: Link<K, V>) {
        let mut cur = start;
        while let Some(node) = cur {
            node.update_height();
            // Rotations reattach node below its replacement; capture the continuation first.
            let parent = node.parent();
            let factor = node.balance_factor();
            if factor > 1 {
                // SAFETY: A positive factor requires a left child.
                let left = unsafe { node.left().unwrap_unchecked() };
                if left.balance_factor() >= 0 {
                    self.rotate_right(node);
                } else {
                    self.rotate_left(left);
                    self.rotate_right(node);
                }
            } else if factor < -1 {
                // SAFETY: A negative factor requires a right child.
                let right = unsafe { node.right().unwrap_unchecked() };
                if right.balance_factor() <= 0 {
                    self.rotate_left(node);
                } else {
                    self.rotate_right(right);
                    self.rotate_left(node);
                }
            }
            cur = parent;
        }
    }

    /// Left rotation around `node`: its right child is promoted into `node`'s slot and `node`
    /// becomes the left child. Exactly three nodes change parents - the pivot, the promoted
    /// child and the child's displaced inner subtree - and all three back-pointers are updated
    /// here.
    fn rotate_left(&mut self, node: NodePtr<K, V>) {
        // SAFETY: Callers only rotate left around a node with a right child.
        let pivot = unsafe { node.right().unwrap_unchecked() };
        let inner = pivot.left();

        node.set_right(inner);
        if let Some(displaced) = inner {
            displaced.set_parent(Some(node));
        }
        self.replace_child(node, pivot);
        pivot.set_left(Some(node));
        node.set_parent(Some(pivot));

        node.update_height();
        pivot.update_height();
    }

    /// Mirror of [`rotate_left`](AvlMap::rotate_left).
    fn rotate_right(&mut self, node: NodePtr<K, V>) {
        // SAFETY: Callers only rotate right around a node with a left child.
        let pivot = unsafe { node.left().unwrap_unchecked() };
        let inner = pivot.right();

        node.set_left(inner);
        if let Some(displaced) = inner {
            displaced.set_parent(Some(node));
        }
        self.replace_child(node, pivot);
        pivot.set_right(Some(node));
        node.set_parent(Some(pivot));

        node.update_height();
        pivot.update_height();
    }

    /// Puts `new` into `old`'s slot: same parent, same side (or the root).
    fn replace_child(&mut self, old: NodePtr<K, V>, new: NodePtr<K, V>) {
        let parent = old.parent();
        new.set_parent(parent);
        match parent {
            None => self.root = Some(new),
            Some(p) => {
                if p.left() == Some(old) {
                    p.set_left(Some(new));
                } else {
                    p.set_right(Some(new));
                }
            },
        }
    }

    #[cfg(test)]
    pub(crate) fn verify_invariants(&self) {
        use super::node::height;

        fn check<K, V>(link: Link<K, V>, parent: Link<K, V>) -> usize {
            match link {
                None => 0,
                Some(node) => {
                    assert!(
                        node.parent() == parent,
                        "Node's parent back-pointer doesn't match the node it hangs off."
                    );
                    let count = check(node.left(), Some(node)) + check(node.right(), Some(node));
                    let expected = 1 + std::cmp::max(height(node.left()), height(node.right()));
                    assert_eq!(node.height(), expected, "Cached height is stale.");
                    assert!(
                        node.balance_factor().abs() <= 1,
                        "AVL balance invariant violated."
                    );
                    count + 1
                },
            }
        }

        assert_eq!(check(self.root, None), self.len, "Node count doesn't match len.");
    }
}

impl<K: Ord, V> Default for AvlMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> Drop for AvlMap<K, V, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Clone, V: Clone, C: Comparator<K> + Clone> Clone for AvlMap<K, V, C> {
    fn clone(&self) -> Self {
        let mut map = AvlMap::with_comparator(self.comp.clone());
        for (key, value) in self.iter() {
            let _ = map.insert(key.clone(), value.clone());
        }
        map
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for AvlMap<K, V, C> {
    /// Inserts every pair from the iterator. Pairs whose key is already present are skipped
    /// (first insertion wins), matching [`insert`](AvlMap::insert).
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            let _ = self.insert(key, value);
        }
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for AvlMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = AvlMap::with_comparator(C::default());
        map.extend(iter);
        map
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for AvlMap<K, V> {
    fn from(value: [(K, V); N]) -> Self {
        value.into_iter().collect()
    }
}

impl<K, V, C: Comparator<K>> Index<&K> for AvlMap<K, V, C> {
    type Output = V;

    /// Returns a reference to the value for `key`.
    ///
    /// # Panics
    /// Panics if the key is not present in the map.
    fn index(&self, key: &K) -> &Self::Output {
        match self.get(key) {
            Some(value) => value,
            None => Err(KeyNotFound).throw(),
        }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for AvlMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for AvlMap<K, V, C> {}

impl<K: PartialOrd, V: PartialOrd, C> PartialOrd for AvlMap<K, V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord, C> Ord for AvlMap<K, V, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: Hash, V: Hash, C> Hash for AvlMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for entry in self.iter() {
            entry.hash(state);
        }
    }
}

impl<K: Debug, V: Debug, C> Debug for AvlMap<K, V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Debug, V: Debug, C> Display for AvlMap<K, V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// SAFETY: An AvlMap exclusively owns its nodes and comparator; moving it between threads moves K,
// V and C and nothing else.
unsafe impl<K: Send, V: Send, C: Send> Send for AvlMap<K, V, C> {}
// SAFETY: No interior mutability; shared access only ever reads.
unsafe impl<K: Sync, V: Sync, C: Sync> Sync for AvlMap<K, V, C> {}
