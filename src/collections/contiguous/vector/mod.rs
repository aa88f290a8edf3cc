//! A module containing [`Vector`] and associated types.
//!
//! The only other included type is [`IntoIter`] for owned iteration.
//! [`Iter`](std::slice::Iter) and [`IterMut`](std::slice::IterMut) from [`std::slice`] are used
//! for borrowed iteration, through the [`Deref`](std::ops::Deref) implementation.
//!
//! [`Vector`] is also re-exported under the parent module.

mod iter;
mod vector;

pub use iter::*;
pub use vector::*;
