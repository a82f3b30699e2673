//! Sentinel-based circular string queues with in-place transforms.
//!
//! This crate provides a double-ended byte-string queue built on an
//! intrusive circular doubly linked list, plus a family of whole-list
//! transforms that re-link nodes in place: mid-delete, sorted dedup,
//! pair swap, reversal, block reversal, stable merge sort, descend-filter,
//! and k-way queue merge.
//!
//! # Design Philosophy
//!
//! Links are integer keys into slot storage, not pointers:
//!
//! ```text
//! Storage (Arena)    - owns node slots, provides stable keys
//! ring               - link surgery on keys, the only code touching links
//! Queue / QueueSet   - lifecycle, transforms, payload comparison
//! ```
//!
//! Every list is circular through a payload-free sentinel node, so "empty"
//! is the sentinel linking to itself and traversal never checks for a null
//! terminator. The transforms move nodes by rewriting keys; no payload is
//! copied or reallocated once inserted.
//!
//! # Quick Start
//!
//! ```
//! use ringq::{Queue, QueueArena};
//!
//! // Storage owns the nodes; the queue handle coordinates keys into it.
//! let mut arena: QueueArena = QueueArena::with_capacity(1024);
//! let q = Queue::try_new(&mut arena).unwrap();
//!
//! q.try_push_back(&mut arena, b"gamma").unwrap();
//! q.try_push_back(&mut arena, b"alpha").unwrap();
//! q.try_push_front(&mut arena, b"beta").unwrap();
//!
//! q.sort(&mut arena);
//! assert_eq!(q.front(&arena), Some(b"alpha".as_slice()));
//!
//! let mut buf = [0u8; 16];
//! let value = q.pop_front(&mut arena, Some(&mut buf)).unwrap();
//! assert_eq!(&*value, b"alpha");
//! assert_eq!(&buf[..6], b"alpha\0");
//!
//! q.destroy(&mut arena);
//! ```
//!
//! # Storage Options
//!
//! | Storage | Capacity | Insertion failure |
//! |---------|----------|-------------------|
//! | [`Arena`] | Fixed (runtime) | [`Full`] when out of slots |
//! | `slab::Slab` | Growable | Never (feature `slab`) |
//!
//! A queue must always be used with the storage instance it was created
//! in; this is the caller's responsibility (same discipline as the `slab`
//! crate).
//!
//! # Concurrency
//!
//! None. A queue and its storage are owned by a single caller; every
//! operation runs to completion synchronously.
//!
//! # Feature Flags
//!
//! - `slab` - [`Storage`] impl for `slab::Slab`

#![warn(missing_docs)]

pub mod key;
pub mod merge;
pub mod queue;
pub mod ring;
pub mod storage;

pub use key::Key;
pub use merge::{QueueCtx, QueueSet};
pub use queue::{Queue, QueueArena, QueueFull};
pub use ring::Node;
pub use storage::{Arena, Full, Storage};
