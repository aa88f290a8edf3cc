//! Container adaptors: [`Stack`] and [`Queue`].
//!
//! Both are thin wrappers over [`LinkedList`](crate::collections::linked::LinkedList) which
//! expose only their access protocol - no indexing, no iteration, no access to the middle. If the
//! restriction isn't wanted, convert back to the underlying list with [`From`].

mod queue;
mod stack;

pub use queue::*;
pub use stack::*;
