//! Linked collection types. Primarily revolves around [`LinkedList`] and its accompanying
//! [`CursorMut`](list::CursorMut) type for position-based traversal and mutation.

pub mod list;

#[doc(inline)]
pub use list::LinkedList;
