//! Multi-queue merge: a ring of queue contexts reduced by splice + sort.
//!
//! Whole queues are treated as values one level up: each [`QueueCtx`]
//! couples a queue handle with its recorded size and is stored as the
//! payload of a second ring, traversed with the same primitives as
//! ordinary elements. Merging splices every queue into the first in O(1)
//! each, then sorts the accumulator once. The single-sort design is a
//! deliberate simplicity trade against a k-way heap merge: splicing is
//! O(1), so deferring all ordering work to one O(n log n) pass costs
//! nothing asymptotically per element.
//!
//! # Example
//!
//! ```
//! use ringq::{Arena, Queue, QueueArena, QueueCtx, QueueSet};
//!
//! let mut arena: QueueArena = QueueArena::with_capacity(16);
//! let mut ctxs = Arena::with_capacity(4);
//!
//! let a = Queue::try_new(&mut arena).unwrap();
//! a.try_push_back(&mut arena, b"1").unwrap();
//! a.try_push_back(&mut arena, b"3").unwrap();
//!
//! let b = Queue::try_new(&mut arena).unwrap();
//! b.try_push_back(&mut arena, b"2").unwrap();
//!
//! let set = QueueSet::try_new(&mut ctxs).unwrap();
//! set.try_attach(&mut ctxs, a, 2).unwrap();
//! set.try_attach(&mut ctxs, b, 1).unwrap();
//!
//! assert_eq!(set.merge_sorted(&mut ctxs, &mut arena), 3);
//! let merged: Vec<&[u8]> = a.iter(&arena).collect();
//! assert_eq!(merged, [b"1".as_slice(), b"2", b"3"]);
//! assert!(b.is_empty(&arena));
//! ```

use std::marker::PhantomData;

use crate::queue::QueueFull;
use crate::ring::{self, Node};
use crate::{Key, Queue, Storage};

/// A queue context: one queue handle plus its recorded element count.
///
/// The recorded size is maintained by the caller (and by
/// [`QueueSet::merge_sorted`], which resets drained queues to 0 and
/// recomputes the accumulator); it is not implicitly synchronized with the
/// queue.
pub struct QueueCtx<S, K: Key = u32>
where
    S: Storage<Node<Box<[u8]>, K>, Key = K>,
{
    /// The queue this context tracks.
    pub queue: Queue<S, K>,
    /// Element count as last recorded.
    pub size: usize,
}

/// A ring of [`QueueCtx`] payloads, addressed by its own sentinel.
///
/// Context nodes live in their own storage, independent of the element
/// arena the queues link through.
pub struct QueueSet<S, K: Key = u32>
where
    S: Storage<Node<Box<[u8]>, K>, Key = K>,
{
    sentinel: K,
    _marker: PhantomData<S>,
}

impl<S, K: Key> Clone for QueueSet<S, K>
where
    S: Storage<Node<Box<[u8]>, K>, Key = K>,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, K: Key> Copy for QueueSet<S, K> where S: Storage<Node<Box<[u8]>, K>, Key = K> {}

impl<S, K: Key> QueueSet<S, K>
where
    S: Storage<Node<Box<[u8]>, K>, Key = K>,
{
    /// Creates an empty set, allocating its sentinel in `ctxs`.
    ///
    /// # Errors
    ///
    /// Returns `Err(QueueFull)` if the context storage has no free slot.
    pub fn try_new<C>(ctxs: &mut C) -> Result<Self, QueueFull>
    where
        C: Storage<Node<QueueCtx<S, K>, K>, Key = K>,
    {
        let sentinel = ctxs.try_insert(Node::sentinel()).map_err(|_| QueueFull)?;
        ring::init(ctxs, sentinel);
        Ok(Self {
            sentinel,
            _marker: PhantomData,
        })
    }

    /// Appends a queue to the set with its recorded size.
    ///
    /// Returns the context's key.
    ///
    /// # Errors
    ///
    /// Returns `Err(QueueFull)` if the context storage has no free slot.
    pub fn try_attach<C>(
        &self,
        ctxs: &mut C,
        queue: Queue<S, K>,
        size: usize,
    ) -> Result<K, QueueFull>
    where
        C: Storage<Node<QueueCtx<S, K>, K>, Key = K>,
    {
        let key = ctxs
            .try_insert(Node::element(QueueCtx { queue, size }))
            .map_err(|_| QueueFull)?;
        ring::link_before(ctxs, key, self.sentinel);
        Ok(key)
    }

    /// Returns the context stored under `key`, if present.
    pub fn get<'a, C>(&self, ctxs: &'a C, key: K) -> Option<&'a QueueCtx<S, K>>
    where
        C: Storage<Node<QueueCtx<S, K>, K>, Key = K>,
    {
        ctxs.get(key).and_then(|n| n.data.as_ref())
    }

    /// Returns the number of attached contexts by traversal.
    pub fn len<C>(&self, ctxs: &C) -> usize
    where
        C: Storage<Node<QueueCtx<S, K>, K>, Key = K>,
    {
        let mut count = 0;
        let mut cur = ring::next(ctxs, self.sentinel);
        while cur != self.sentinel {
            count += 1;
            cur = ring::next(ctxs, cur);
        }
        count
    }

    /// Merges every attached queue into the first and sorts it ascending.
    ///
    /// Returns 0 on an empty set. With a single context, returns its
    /// recorded size unchanged. Otherwise every other context's queue is
    /// spliced wholesale into the first (O(1) each) and its recorded size
    /// reset to 0; the accumulator is then sorted once and its size
    /// recomputed by traversal, recorded, and returned.
    pub fn merge_sorted<C>(&self, ctxs: &mut C, arena: &mut S) -> usize
    where
        C: Storage<Node<QueueCtx<S, K>, K>, Key = K>,
    {
        let s = self.sentinel;
        if ring::is_empty(ctxs, s) {
            return 0;
        }

        let first = ring::next(ctxs, s);
        let acc = ctx(ctxs, first).queue;
        if ring::is_singular(ctxs, s) {
            return ctx(ctxs, first).size;
        }

        let mut cur = ring::next(ctxs, first);
        while cur != s {
            let src = ctx(ctxs, cur).queue;
            ring::splice_after(arena, src.sentinel, acc.sentinel);
            ctx_mut(ctxs, cur).size = 0;
            cur = ring::next(ctxs, cur);
        }

        acc.sort(arena);
        let size = acc.len(arena);
        ctx_mut(ctxs, first).size = size;
        size
    }

    /// Detaches and returns the first context, or `None` if the set is
    /// empty. Lets callers recover queue handles after a merge.
    pub fn pop<C>(&self, ctxs: &mut C) -> Option<QueueCtx<S, K>>
    where
        C: Storage<Node<QueueCtx<S, K>, K>, Key = K>,
    {
        if ring::is_empty(ctxs, self.sentinel) {
            return None;
        }
        let first = ring::next(ctxs, self.sentinel);
        ring::unlink(ctxs, first);
        let node = ctxs.remove(first).expect("invalid key");
        node.data
    }

    /// Tears the set down, releasing every context node and the sentinel.
    ///
    /// The queues themselves are untouched; their handles are dropped with
    /// the contexts, so detach any queue you still need with
    /// [`QueueSet::pop`] first.
    pub fn destroy<C>(self, ctxs: &mut C)
    where
        C: Storage<Node<QueueCtx<S, K>, K>, Key = K>,
    {
        while self.pop(ctxs).is_some() {}
        ctxs.remove(self.sentinel);
    }
}

fn ctx<'a, S, K, C>(ctxs: &'a C, key: K) -> &'a QueueCtx<S, K>
where
    K: Key,
    S: Storage<Node<Box<[u8]>, K>, Key = K>,
    C: Storage<Node<QueueCtx<S, K>, K>, Key = K>,
{
    ctxs.get(key)
        .expect("invalid key")
        .data
        .as_ref()
        .expect("sentinel holds no context")
}

fn ctx_mut<'a, S, K, C>(ctxs: &'a mut C, key: K) -> &'a mut QueueCtx<S, K>
where
    K: Key,
    S: Storage<Node<Box<[u8]>, K>, Key = K>,
    C: Storage<Node<QueueCtx<S, K>, K>, Key = K>,
{
    ctxs.get_mut(key)
        .expect("invalid key")
        .data
        .as_mut()
        .expect("sentinel holds no context")
}
