//! Ordered collections backed by a self-balancing (AVL) binary search tree.

pub mod map;

#[doc(inline)]
pub use map::AvlMap;
