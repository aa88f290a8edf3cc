//! Contiguous collections: [`Vector`] and its iterators.

pub mod vector;

#[doc(inline)]
pub use vector::Vector;
