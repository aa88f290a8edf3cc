//! General-purpose container types: sequence containers, an ordered map and the adaptors built on
//! top of them.
//!
//! # Layout
//! Each collection family lives in its own submodule and is gated behind a feature of the same
//! name, with everything enabled by default. [`contiguous`] types implement
//! [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut), which provides the whole
//! random-access surface - slicing, indexing and the slice iterators - for free.

#[cfg(feature = "adaptors")]
pub mod adaptors;
#[cfg(feature = "binary-tree")]
pub mod binary_tree;
#[cfg(feature = "collections")]
pub mod compare;
#[cfg(feature = "contiguous")]
pub mod contiguous;
#[cfg(feature = "linked")]
pub mod linked;
