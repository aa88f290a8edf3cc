//! This crate is my from-scratch take on the classic sequence and ordered containers: a doubly
//! linked list, an AVL-balanced ordered map, a growable contiguous vector and the stack/queue
//! adaptors built on top of the list.
//!
//! # Purpose
//! Writing these data structures is the best way I know to actually understand them - the pointer
//! relinking behind an O(1) splice, or why a single missed parent pointer in a tree rotation
//! corrupts every later traversal. The containers are written to be usable, not just educational:
//! invariants are documented, the unsafe code is annotated and the test suites check the
//! structural invariants directly.
//!
//! # Method
//! Each container owns its nodes outright and hands out access through iterators and cursors. The
//! list closes its node ring with a sentinel so that `next`/`prev` are never null; the map keeps
//! parent back-pointers and a cached height per node so that insert and remove are true
//! `O(log n)`; the vector is a plain pointer + len + cap triple that grows by doubling. None of
//! them are built on [`Vec`] or the [`std`] collections.
//!
//! # Error Handling
//! Errors are strongly typed: small structs (often ZSTs) implementing
//! [`Error`](std::error::Error), composed into enums with static dispatch where a method can fail
//! in more than one way. Methods come in pairs where it matters - a `try_` variant returning a
//! [`Result`] and a panicking variant that throws the error's own message - because nobody wants
//! to handle a capacity overflow on every push.
//!
//! # Non-goals
//! No internal locking or any other concurrency support: a container is owned by one logical
//! owner at a time and the borrow checker enforces the rest. No persistence and no I/O.

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;

pub(crate) mod util;
