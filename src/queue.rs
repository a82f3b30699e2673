//! Double-ended string queue over a sentinel-based ring.
//!
//! A [`Queue`] is a handle holding one sentinel key into node storage; all
//! element state lives in the arena, so the handle is `Copy` and every
//! operation takes the storage explicitly (same discipline as the `slab`
//! crate: a queue must always be used with the storage it was created in).
//!
//! Payloads are opaque byte strings, copied from the caller's slice on
//! insertion and owned by their arena slot until popped. Transforms re-link
//! the same nodes in place; no payload is copied or reallocated by any of
//! them.
//!
//! # Example
//!
//! ```
//! use ringq::{Queue, QueueArena};
//!
//! let mut arena: QueueArena = QueueArena::with_capacity(16);
//! let q = Queue::try_new(&mut arena).unwrap();
//!
//! q.try_push_back(&mut arena, b"banana").unwrap();
//! q.try_push_back(&mut arena, b"apple").unwrap();
//! q.try_push_front(&mut arena, b"cherry").unwrap();
//!
//! q.sort(&mut arena);
//!
//! let order: Vec<&[u8]> = q.iter(&arena).collect();
//! assert_eq!(order, [b"apple".as_slice(), b"banana", b"cherry"]);
//!
//! q.destroy(&mut arena);
//! assert!(arena.is_empty());
//! ```

use std::marker::PhantomData;

use crate::ring::{self, Node};
use crate::{Arena, Key, Storage};

/// Type alias for arena storage holding queue nodes.
pub type QueueArena<K = u32> = Arena<Node<Box<[u8]>, K>, K>;

/// Error returned when queue construction or insertion finds storage full.
///
/// The queue and the arena are left exactly as they were before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull;

impl core::fmt::Display for QueueFull {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "queue storage is full")
    }
}

impl std::error::Error for QueueFull {}

/// A double-ended byte-string queue on a circular doubly linked ring.
///
/// The queue is empty exactly when its sentinel links to itself. Element
/// count is not cached; [`Queue::len`] traverses.
///
/// # Storage Invariant
///
/// A queue must always be used with the storage instance it was created
/// in. This is the caller's responsibility to enforce.
///
/// # Example
///
/// ```
/// use ringq::{Queue, QueueArena};
///
/// let mut arena: QueueArena = QueueArena::with_capacity(16);
/// let q = Queue::try_new(&mut arena).unwrap();
///
/// q.try_push_back(&mut arena, b"hello").unwrap();
/// assert_eq!(q.len(&arena), 1);
///
/// let value = q.pop_front(&mut arena, None).unwrap();
/// assert_eq!(&*value, b"hello");
/// assert!(q.is_empty(&arena));
/// ```
pub struct Queue<S, K: Key = u32>
where
    S: Storage<Node<Box<[u8]>, K>, Key = K>,
{
    pub(crate) sentinel: K,
    _marker: PhantomData<S>,
}

impl<S, K: Key> Clone for Queue<S, K>
where
    S: Storage<Node<Box<[u8]>, K>, Key = K>,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, K: Key> Copy for Queue<S, K> where S: Storage<Node<Box<[u8]>, K>, Key = K> {}

impl<S, K: Key> core::fmt::Debug for Queue<S, K>
where
    S: Storage<Node<Box<[u8]>, K>, Key = K>,
    K: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Queue").field("sentinel", &self.sentinel).finish()
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

impl<S, K: Key> Queue<S, K>
where
    S: Storage<Node<Box<[u8]>, K>, Key = K>,
{
    /// Creates an empty queue, allocating its sentinel in `arena`.
    ///
    /// # Errors
    ///
    /// Returns `Err(QueueFull)` if the arena has no free slot. This is
    /// distinct from a queue that merely has zero elements.
    pub fn try_new(arena: &mut S) -> Result<Self, QueueFull> {
        let sentinel = arena.try_insert(Node::sentinel()).map_err(|_| QueueFull)?;
        ring::init(arena, sentinel);
        Ok(Self {
            sentinel,
            _marker: PhantomData,
        })
    }

    /// Returns the sentinel key, for use with the [`ring`](crate::ring)
    /// primitives.
    #[inline]
    pub fn sentinel(&self) -> K {
        self.sentinel
    }

    /// Copies `value` into owned storage and links it at the head.
    ///
    /// Returns the new element's key.
    ///
    /// # Errors
    ///
    /// Returns `Err(QueueFull)` if the arena has no free slot; the queue is
    /// left unmodified.
    pub fn try_push_front(&self, arena: &mut S, value: &[u8]) -> Result<K, QueueFull> {
        let key = arena
            .try_insert(Node::element(Box::from(value)))
            .map_err(|_| QueueFull)?;
        ring::link_after(arena, key, self.sentinel);
        Ok(key)
    }

    /// Copies `value` into owned storage and links it at the tail.
    ///
    /// Returns the new element's key.
    ///
    /// # Errors
    ///
    /// Returns `Err(QueueFull)` if the arena has no free slot; the queue is
    /// left unmodified.
    pub fn try_push_back(&self, arena: &mut S, value: &[u8]) -> Result<K, QueueFull> {
        let key = arena
            .try_insert(Node::element(Box::from(value)))
            .map_err(|_| QueueFull)?;
        ring::link_before(arena, key, self.sentinel);
        Ok(key)
    }

    /// Removes the head element, transferring its value to the caller.
    ///
    /// If `out` is supplied, up to `out.len() - 1` bytes of the value are
    /// copied into it first, followed by a forced NUL terminator.
    ///
    /// Returns `None` on an empty queue.
    pub fn pop_front(&self, arena: &mut S, out: Option<&mut [u8]>) -> Option<Box<[u8]>> {
        if self.is_empty(arena) {
            return None;
        }
        let head = ring::next(arena, self.sentinel);
        self.take(arena, head, out)
    }

    /// Removes the tail element, transferring its value to the caller.
    ///
    /// If `out` is supplied, up to `out.len() - 1` bytes of the value are
    /// copied into it first, followed by a forced NUL terminator.
    ///
    /// Returns `None` on an empty queue.
    pub fn pop_back(&self, arena: &mut S, out: Option<&mut [u8]>) -> Option<Box<[u8]>> {
        if self.is_empty(arena) {
            return None;
        }
        let tail = ring::prev(arena, self.sentinel);
        self.take(arena, tail, out)
    }

    fn take(&self, arena: &mut S, key: K, out: Option<&mut [u8]>) -> Option<Box<[u8]>> {
        ring::unlink(arena, key);
        let node = arena.remove(key).expect("invalid key");
        let value = node.data.expect("sentinel holds no value");

        if let Some(buf) = out {
            if !buf.is_empty() {
                let n = value.len().min(buf.len() - 1);
                buf[..n].copy_from_slice(&value[..n]);
                buf[n] = 0;
            }
        }
        Some(value)
    }

    /// Returns the element count by full traversal; nothing is cached.
    pub fn len(&self, arena: &S) -> usize {
        self.iter(arena).count()
    }

    /// Returns `true` if the queue holds no elements.
    #[inline]
    pub fn is_empty(&self, arena: &S) -> bool {
        ring::is_empty(arena, self.sentinel)
    }

    /// Returns `true` if the queue holds exactly one element.
    #[inline]
    pub fn is_singular(&self, arena: &S) -> bool {
        ring::is_singular(arena, self.sentinel)
    }

    /// Returns the head element's value without removing it.
    pub fn front<'a>(&self, arena: &'a S) -> Option<&'a [u8]> {
        let first = ring::next(arena, self.sentinel);
        if first == self.sentinel {
            return None;
        }
        arena.get(first).and_then(|n| n.data.as_deref())
    }

    /// Returns the tail element's value without removing it.
    pub fn back<'a>(&self, arena: &'a S) -> Option<&'a [u8]> {
        let last = ring::prev(arena, self.sentinel);
        if last == self.sentinel {
            return None;
        }
        arena.get(last).and_then(|n| n.data.as_deref())
    }

    /// Returns an iterator over element values, head to tail.
    pub fn iter<'a>(&self, arena: &'a S) -> Iter<'a, S, K> {
        Iter {
            arena,
            sentinel: self.sentinel,
            cur: ring::next(arena, self.sentinel),
        }
    }

    /// Releases every element, leaving the queue empty but usable.
    pub fn clear(&self, arena: &mut S) {
        while self.pop_front(arena, None).is_some() {}
    }

    /// Tears the queue down: releases every element, then the sentinel.
    ///
    /// Each slot is released exactly once. The handle is `Copy`, so a
    /// copy can still name the dead sentinel afterwards; any use of one
    /// panics on the invalid key instead of releasing a slot twice.
    pub fn destroy(self, arena: &mut S) {
        self.clear(arena);
        arena.remove(self.sentinel);
    }
}

// =============================================================================
// Structural transforms
//
// Each transform mutates links in place through the ring primitives and
// releases removed elements through storage. Aside from the sort's
// recursion stack, all of them run in O(1) auxiliary space.
// =============================================================================

impl<S, K: Key> Queue<S, K>
where
    S: Storage<Node<Box<[u8]>, K>, Key = K>,
{
    /// Deletes the structural middle element.
    ///
    /// The middle is found with a fast/slow walk from the head; for even
    /// lengths the second of the two central elements is removed.
    ///
    /// Returns `false` on an empty queue.
    pub fn delete_middle(&self, arena: &mut S) -> bool {
        if self.is_empty(arena) {
            return false;
        }
        let s = self.sentinel;
        let mut slow = ring::next(arena, s);
        let mut fast = slow;
        while fast != s && ring::next(arena, fast) != s {
            slow = ring::next(arena, slow);
            fast = ring::next(arena, ring::next(arena, fast));
        }

        ring::unlink(arena, slow);
        arena.remove(slow);
        true
    }

    /// Deletes every value that appears more than once consecutively.
    ///
    /// Requires ascending sorted input (not re-validated); on sorted input
    /// this removes all duplicated values entirely, keeping only the values
    /// that appear exactly once, in order. On unsorted input the result is
    /// simply not the documented one; the walk itself stays well-defined.
    ///
    /// Returns `false` on an empty queue, `true` otherwise.
    pub fn dedup_sorted(&self, arena: &mut S) -> bool {
        if self.is_empty(arena) {
            return false;
        }
        let s = self.sentinel;
        let mut cur = ring::next(arena, s);
        let mut in_run = false;
        while cur != s {
            let nxt = ring::next(arena, cur);
            if nxt != s && payload(arena, cur) == payload(arena, nxt) {
                // More of the run follows; drop the current member.
                ring::unlink(arena, cur);
                arena.remove(cur);
                in_run = true;
            } else if in_run {
                // Last member of a duplicate run.
                ring::unlink(arena, cur);
                arena.remove(cur);
                in_run = false;
            }
            cur = nxt;
        }
        true
    }

    /// Transposes every adjacent pair, advancing two elements per step.
    ///
    /// A trailing unpaired element is left untouched. No allocation.
    pub fn swap_pairs(&self, arena: &mut S) {
        let s = self.sentinel;
        let mut cur = ring::next(arena, s);
        while cur != s && ring::next(arena, cur) != s {
            let nxt = ring::next(arena, cur);
            ring::move_after(arena, cur, nxt);
            cur = ring::next(arena, cur);
        }
    }

    /// Reverses the element order in one pass. O(n) time, O(1) space.
    pub fn reverse(&self, arena: &mut S) {
        reverse_between(arena, self.sentinel, self.sentinel);
    }

    /// Reverses each run of exactly `k` consecutive elements in place.
    ///
    /// Traversal resumes after each reversed block; a trailing run shorter
    /// than `k` is left unreversed. No-op for `k <= 1` or an empty queue.
    /// O(n) total, no allocation.
    pub fn reverse_chunks(&self, arena: &mut S, k: usize) {
        if k <= 1 || self.is_empty(arena) {
            return;
        }
        let s = self.sentinel;
        let mut anchor = s; // node before the block being collected
        let mut cur = ring::next(arena, s);
        let mut count = 0;
        while cur != s {
            let nxt = ring::next(arena, cur);
            count += 1;
            if count == k {
                reverse_between(arena, anchor, nxt);
                // The reversed block now ends at what was its first node.
                anchor = ring::prev(arena, nxt);
                count = 0;
            }
            cur = nxt;
        }
    }

    /// Sorts elements ascending by byte-wise comparison. Stable: equal
    /// values keep their relative order.
    ///
    /// Top-down merge sort on the link structure: the chain is detached
    /// from the sentinel, split recursively at the fast/slow midpoint,
    /// merged with `prev` links rebuilt on the way, and reattached.
    /// O(n log n) time; auxiliary space is the recursion stack only.
    pub fn sort(&self, arena: &mut S) {
        if self.is_empty(arena) || self.is_singular(arena) {
            return;
        }
        let s = self.sentinel;
        let first = ring::next(arena, s);
        let last = ring::prev(arena, s);

        // Detach into a NONE-terminated chain.
        arena.get_mut(last).expect("invalid key").next = K::NONE;

        let head = merge_sort(arena, first);

        // The final merge recorded the chain tail in head.prev.
        let tail = arena.get(head).expect("invalid key").prev;
        arena.get_mut(s).expect("invalid key").next = head;
        arena.get_mut(head).expect("invalid key").prev = s;
        arena.get_mut(tail).expect("invalid key").next = s;
        arena.get_mut(s).expect("invalid key").prev = tail;
    }

    /// Deletes every element with a strictly greater value somewhere to its
    /// right, leaving a non-increasing sequence.
    ///
    /// Right-to-left scan: whenever the left neighbor of the current
    /// baseline compares strictly less, it is deleted and the comparison
    /// retries against the new neighbor; otherwise the neighbor becomes the
    /// baseline. Every kept element is >= every element after it.
    ///
    /// Returns the number of elements remaining.
    pub fn descend(&self, arena: &mut S) -> usize {
        if self.is_empty(arena) {
            return 0;
        }
        let s = self.sentinel;
        let mut cur = ring::prev(arena, s);
        let mut kept = 1;
        loop {
            let left = ring::prev(arena, cur);
            if left == s {
                return kept;
            }
            if payload(arena, left) < payload(arena, cur) {
                ring::unlink(arena, left);
                arena.remove(left);
            } else {
                cur = left;
                kept += 1;
            }
        }
    }
}

/// Reverses the elements strictly between `anchor` and `end` by repeated
/// head reinsertion after `anchor`. One pass, no allocation.
fn reverse_between<S, K>(arena: &mut S, anchor: K, end: K)
where
    K: Key,
    S: Storage<Node<Box<[u8]>, K>, Key = K>,
{
    let mut cur = ring::next(arena, anchor);
    while cur != end {
        let nxt = ring::next(arena, cur);
        ring::move_after(arena, cur, anchor);
        cur = nxt;
    }
}

/// Returns the byte string of an element node.
///
/// # Panics
///
/// Panics if `key` is invalid or refers to a sentinel.
fn payload<'a, S, K>(arena: &'a S, key: K) -> &'a [u8]
where
    K: Key,
    S: Storage<Node<Box<[u8]>, K>, Key = K>,
{
    arena
        .get(key)
        .expect("invalid key")
        .data
        .as_deref()
        .expect("sentinel holds no value")
}

/// Sorts a NONE-terminated chain reachable via `next`, returning its new
/// head. `prev` links are rebuilt during merging; the returned head's
/// `prev` points at the chain tail once at least one merge has run.
fn merge_sort<S, K>(arena: &mut S, head: K) -> K
where
    K: Key,
    S: Storage<Node<Box<[u8]>, K>, Key = K>,
{
    if ring::next(arena, head).is_none() {
        return head;
    }

    // Fast/slow walk; `before` trails one behind `slow` for the cut.
    let mut slow = head;
    let mut before = head;
    let mut fast = head;
    while fast.is_some() {
        let step = ring::next(arena, fast);
        if step.is_none() {
            break;
        }
        before = slow;
        slow = ring::next(arena, slow);
        fast = ring::next(arena, step);
    }

    arena.get_mut(before).expect("invalid key").next = K::NONE;

    let left = merge_sort(arena, head);
    let right = merge_sort(arena, slow);
    merge_chains(arena, left, right)
}

/// Merges two sorted NONE-terminated chains into one ascending chain.
/// Ties keep the left operand first. The merged head's `prev` is set to
/// the merged tail for the caller to reattach.
fn merge_chains<S, K>(arena: &mut S, mut l1: K, mut l2: K) -> K
where
    K: Key,
    S: Storage<Node<Box<[u8]>, K>, Key = K>,
{
    let head;
    if payload(arena, l1) <= payload(arena, l2) {
        head = l1;
        l1 = ring::next(arena, l1);
    } else {
        head = l2;
        l2 = ring::next(arena, l2);
    }

    let mut tail = head;
    while l1.is_some() && l2.is_some() {
        let pick = if payload(arena, l1) <= payload(arena, l2) {
            let p = l1;
            l1 = ring::next(arena, l1);
            p
        } else {
            let p = l2;
            l2 = ring::next(arena, l2);
            p
        };
        arena.get_mut(tail).expect("invalid key").next = pick;
        arena.get_mut(pick).expect("invalid key").prev = tail;
        tail = pick;
    }

    let mut rest = if l1.is_some() { l1 } else { l2 };
    while rest.is_some() {
        arena.get_mut(tail).expect("invalid key").next = rest;
        arena.get_mut(rest).expect("invalid key").prev = tail;
        tail = rest;
        rest = ring::next(arena, rest);
    }

    arena.get_mut(head).expect("invalid key").prev = tail;
    head
}

/// Iterator over element values, head to tail.
pub struct Iter<'a, S, K: Key>
where
    S: Storage<Node<Box<[u8]>, K>, Key = K>,
{
    arena: &'a S,
    sentinel: K,
    cur: K,
}

impl<'a, S, K: Key> Iterator for Iter<'a, S, K>
where
    S: Storage<Node<Box<[u8]>, K>, Key = K>,
{
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur == self.sentinel {
            return None;
        }
        let node = self.arena.get(self.cur).expect("invalid key");
        self.cur = node.next;
        node.data.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_with(arena: &mut QueueArena, values: &[&str]) -> Queue<QueueArena> {
        let q = Queue::try_new(arena).unwrap();
        for v in values {
            q.try_push_back(arena, v.as_bytes()).unwrap();
        }
        q
    }

    fn contents(q: &Queue<QueueArena>, arena: &QueueArena) -> Vec<String> {
        q.iter(arena)
            .map(|v| String::from_utf8(v.to_vec()).unwrap())
            .collect()
    }

    fn assert_ring(arena: &QueueArena, q: &Queue<QueueArena>) {
        let mut cur = q.sentinel();
        loop {
            let nxt = ring::next(arena, cur);
            assert_eq!(ring::prev(arena, nxt), cur, "broken link pair");
            cur = nxt;
            if cur == q.sentinel() {
                break;
            }
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    #[test]
    fn new_queue_is_empty() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = Queue::try_new(&mut arena).unwrap();

        assert!(q.is_empty(&arena));
        assert!(!q.is_singular(&arena));
        assert_eq!(q.len(&arena), 0);
        assert_eq!(q.pop_front(&mut arena, None), None);
        assert_eq!(q.pop_back(&mut arena, None), None);
    }

    #[test]
    fn try_new_fails_on_full_arena() {
        let mut arena: QueueArena = QueueArena::with_capacity(1);
        let _q = Queue::try_new(&mut arena).unwrap();

        assert_eq!(Queue::try_new(&mut arena).unwrap_err(), QueueFull);
    }

    #[test]
    fn push_front_and_back() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = Queue::try_new(&mut arena).unwrap();

        q.try_push_back(&mut arena, b"b").unwrap();
        q.try_push_front(&mut arena, b"a").unwrap();
        q.try_push_back(&mut arena, b"c").unwrap();

        assert_eq!(contents(&q, &arena), ["a", "b", "c"]);
        assert_eq!(q.front(&arena), Some(b"a".as_slice()));
        assert_eq!(q.back(&arena), Some(b"c".as_slice()));
        assert_eq!(q.len(&arena), 3);
        assert_ring(&arena, &q);
    }

    #[test]
    fn push_full_arena_leaves_queue_unmodified() {
        let mut arena: QueueArena = QueueArena::with_capacity(2);
        let q = Queue::try_new(&mut arena).unwrap();
        q.try_push_back(&mut arena, b"a").unwrap();

        assert_eq!(q.try_push_back(&mut arena, b"b"), Err(QueueFull));
        assert_eq!(contents(&q, &arena), ["a"]);
        assert_eq!(arena.len(), 2); // sentinel + one element
        assert_ring(&arena, &q);
    }

    #[test]
    fn pop_front_after_push_front_round_trips() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = Queue::try_new(&mut arena).unwrap();

        q.try_push_front(&mut arena, b"value").unwrap();
        let got = q.pop_front(&mut arena, None).unwrap();

        assert_eq!(&*got, b"value");
        assert!(q.is_empty(&arena));
    }

    #[test]
    fn pop_copies_into_buffer_with_nul() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["hello"]);

        let mut buf = [0xffu8; 16];
        let got = q.pop_front(&mut arena, Some(&mut buf)).unwrap();

        assert_eq!(&*got, b"hello");
        assert_eq!(&buf[..6], b"hello\0");
    }

    #[test]
    fn pop_truncates_into_short_buffer() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["hello"]);

        let mut buf = [0xffu8; 3];
        q.pop_front(&mut arena, Some(&mut buf)).unwrap();

        assert_eq!(&buf, b"he\0");
    }

    #[test]
    fn pop_with_empty_buffer_skips_copy() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["hello"]);

        let mut buf = [0u8; 0];
        let got = q.pop_front(&mut arena, Some(&mut buf)).unwrap();
        assert_eq!(&*got, b"hello");
    }

    #[test]
    fn pop_back_takes_tail() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["a", "b", "c"]);

        assert_eq!(&*q.pop_back(&mut arena, None).unwrap(), b"c");
        assert_eq!(&*q.pop_back(&mut arena, None).unwrap(), b"b");
        assert_eq!(contents(&q, &arena), ["a"]);
        assert_ring(&arena, &q);
    }

    #[test]
    fn len_counts_by_traversal() {
        let mut arena: QueueArena = QueueArena::with_capacity(64);
        let q = Queue::try_new(&mut arena).unwrap();

        for i in 0..20 {
            q.try_push_front(&mut arena, format!("{i}").as_bytes())
                .unwrap();
            assert_eq!(q.len(&arena), i + 1);
        }
    }

    #[test]
    fn destroy_releases_every_slot_once() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["a", "b", "c"]);
        assert_eq!(arena.len(), 4);

        q.destroy(&mut arena);
        assert!(arena.is_empty());
    }

    #[test]
    fn clear_keeps_queue_usable() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["a", "b"]);

        q.clear(&mut arena);
        assert!(q.is_empty(&arena));
        assert_eq!(arena.len(), 1); // sentinel remains

        q.try_push_back(&mut arena, b"again").unwrap();
        assert_eq!(contents(&q, &arena), ["again"]);
    }

    #[test]
    #[should_panic(expected = "invalid key")]
    fn destroy_through_copied_handle_panics() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = Queue::try_new(&mut arena).unwrap();
        let copy = q;

        q.destroy(&mut arena);
        copy.destroy(&mut arena);
    }

    #[test]
    fn u16_keyed_queue_borrows_values() {
        let mut arena: Arena<Node<Box<[u8]>, u16>, u16> = Arena::with_capacity(8);
        let q = Queue::try_new(&mut arena).unwrap();
        q.try_push_back(&mut arena, b"a").unwrap();
        q.try_push_back(&mut arena, b"b").unwrap();

        assert_eq!(q.front(&arena), Some(b"a".as_slice()));
        assert_eq!(q.back(&arena), Some(b"b".as_slice()));

        let all: Vec<&[u8]> = q.iter(&arena).collect();
        assert_eq!(all, [b"a".as_slice(), b"b"]);
    }

    // ========================================================================
    // delete_middle
    // ========================================================================

    #[test]
    fn delete_middle_odd_removes_center() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["a", "b", "c"]);

        assert!(q.delete_middle(&mut arena));
        assert_eq!(contents(&q, &arena), ["a", "c"]);
        assert_ring(&arena, &q);
    }

    #[test]
    fn delete_middle_even_removes_second_central() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["a", "b", "c", "d"]);

        assert!(q.delete_middle(&mut arena));
        assert_eq!(contents(&q, &arena), ["a", "b", "d"]);
    }

    #[test]
    fn delete_middle_singular_empties() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["only"]);

        assert!(q.delete_middle(&mut arena));
        assert!(q.is_empty(&arena));
    }

    #[test]
    fn delete_middle_empty_fails() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = Queue::try_new(&mut arena).unwrap();

        assert!(!q.delete_middle(&mut arena));
    }

    // ========================================================================
    // dedup_sorted
    // ========================================================================

    #[test]
    fn dedup_removes_duplicated_values_entirely() {
        let mut arena: QueueArena = QueueArena::with_capacity(16);
        let q = queue_with(&mut arena, &["a", "a", "b", "c", "c", "c"]);

        assert!(q.dedup_sorted(&mut arena));
        assert_eq!(contents(&q, &arena), ["b"]);
        assert_ring(&arena, &q);
    }

    #[test]
    fn dedup_keeps_unique_values() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["a", "b", "c"]);

        assert!(q.dedup_sorted(&mut arena));
        assert_eq!(contents(&q, &arena), ["a", "b", "c"]);
    }

    #[test]
    fn dedup_all_duplicates_empties() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["x", "x", "x"]);

        assert!(q.dedup_sorted(&mut arena));
        assert!(q.is_empty(&arena));
    }

    #[test]
    fn dedup_empty_fails() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = Queue::try_new(&mut arena).unwrap();

        assert!(!q.dedup_sorted(&mut arena));
    }

    #[test]
    fn dedup_trailing_run() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["a", "b", "b"]);

        assert!(q.dedup_sorted(&mut arena));
        assert_eq!(contents(&q, &arena), ["a"]);
    }

    // ========================================================================
    // swap_pairs
    // ========================================================================

    #[test]
    fn swap_pairs_even() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["1", "2", "3", "4"]);

        q.swap_pairs(&mut arena);
        assert_eq!(contents(&q, &arena), ["2", "1", "4", "3"]);
        assert_ring(&arena, &q);
    }

    #[test]
    fn swap_pairs_trailing_element_untouched() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["1", "2", "3"]);

        q.swap_pairs(&mut arena);
        assert_eq!(contents(&q, &arena), ["2", "1", "3"]);
    }

    #[test]
    fn swap_pairs_degenerate() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = Queue::try_new(&mut arena).unwrap();
        q.swap_pairs(&mut arena); // empty: no-op

        q.try_push_back(&mut arena, b"1").unwrap();
        q.swap_pairs(&mut arena); // singular: no-op
        assert_eq!(contents(&q, &arena), ["1"]);
    }

    // ========================================================================
    // reverse / reverse_chunks
    // ========================================================================

    #[test]
    fn reverse_reverses() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["1", "2", "3", "4"]);

        q.reverse(&mut arena);
        assert_eq!(contents(&q, &arena), ["4", "3", "2", "1"]);
        assert_ring(&arena, &q);
    }

    #[test]
    fn reverse_is_involution() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["1", "2", "3", "4", "5"]);

        q.reverse(&mut arena);
        q.reverse(&mut arena);
        assert_eq!(contents(&q, &arena), ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn reverse_chunks_full_blocks_and_tail() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["1", "2", "3", "4", "5"]);

        q.reverse_chunks(&mut arena, 2);
        assert_eq!(contents(&q, &arena), ["2", "1", "4", "3", "5"]);
        assert_ring(&arena, &q);
    }

    #[test]
    fn reverse_chunks_k_three() {
        let mut arena: QueueArena = QueueArena::with_capacity(16);
        let q = queue_with(&mut arena, &["1", "2", "3", "4", "5", "6", "7"]);

        q.reverse_chunks(&mut arena, 3);
        assert_eq!(contents(&q, &arena), ["3", "2", "1", "6", "5", "4", "7"]);
        assert_ring(&arena, &q);
    }

    #[test]
    fn reverse_chunks_k_one_is_noop() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["1", "2", "3"]);

        q.reverse_chunks(&mut arena, 1);
        assert_eq!(contents(&q, &arena), ["1", "2", "3"]);
    }

    #[test]
    fn reverse_chunks_k_equals_len_is_full_reverse() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["1", "2", "3"]);

        q.reverse_chunks(&mut arena, 3);
        assert_eq!(contents(&q, &arena), ["3", "2", "1"]);
    }

    #[test]
    fn reverse_chunks_k_beyond_len_is_noop() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["1", "2", "3"]);

        q.reverse_chunks(&mut arena, 4);
        assert_eq!(contents(&q, &arena), ["1", "2", "3"]);
    }

    // ========================================================================
    // sort
    // ========================================================================

    #[test]
    fn sort_orders_ascending() {
        let mut arena: QueueArena = QueueArena::with_capacity(16);
        let q = queue_with(&mut arena, &["pear", "apple", "fig", "cherry", "date"]);

        q.sort(&mut arena);
        assert_eq!(contents(&q, &arena), ["apple", "cherry", "date", "fig", "pear"]);
        assert_ring(&arena, &q);
    }

    #[test]
    fn sort_is_idempotent() {
        let mut arena: QueueArena = QueueArena::with_capacity(16);
        let q = queue_with(&mut arena, &["a", "b", "c", "d"]);

        q.sort(&mut arena);
        assert_eq!(contents(&q, &arena), ["a", "b", "c", "d"]);
        q.sort(&mut arena);
        assert_eq!(contents(&q, &arena), ["a", "b", "c", "d"]);
    }

    #[test]
    fn sort_two_elements() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["b", "a"]);

        q.sort(&mut arena);
        assert_eq!(contents(&q, &arena), ["a", "b"]);
        assert_ring(&arena, &q);
    }

    #[test]
    fn sort_with_duplicates_is_non_decreasing() {
        let mut arena: QueueArena = QueueArena::with_capacity(16);
        let q = queue_with(&mut arena, &["b", "a", "b", "a", "a"]);

        q.sort(&mut arena);
        assert_eq!(contents(&q, &arena), ["a", "a", "a", "b", "b"]);
    }

    #[test]
    fn sort_degenerate_inputs() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = Queue::try_new(&mut arena).unwrap();
        q.sort(&mut arena); // empty

        q.try_push_back(&mut arena, b"x").unwrap();
        q.sort(&mut arena); // singular
        assert_eq!(contents(&q, &arena), ["x"]);
        assert_ring(&arena, &q);
    }

    #[test]
    fn sort_reversed_input() {
        let mut arena: QueueArena = QueueArena::with_capacity(64);
        let q = Queue::try_new(&mut arena).unwrap();
        for i in (0..26u8).rev() {
            q.try_push_back(&mut arena, &[b'a' + i]).unwrap();
        }

        q.sort(&mut arena);

        let sorted: Vec<u8> = q.iter(&arena).map(|v| v[0]).collect();
        let expect: Vec<u8> = (0..26u8).map(|i| b'a' + i).collect();
        assert_eq!(sorted, expect);
        assert_ring(&arena, &q);
    }

    // ========================================================================
    // descend
    // ========================================================================

    #[test]
    fn descend_keeps_right_maxima() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["5", "2", "4", "3", "1"]);

        assert_eq!(q.descend(&mut arena), 4);
        assert_eq!(contents(&q, &arena), ["5", "4", "3", "1"]);
        assert_ring(&arena, &q);
    }

    #[test]
    fn descend_keeps_equal_values() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["3", "3", "2"]);

        assert_eq!(q.descend(&mut arena), 3);
        assert_eq!(contents(&q, &arena), ["3", "3", "2"]);
    }

    #[test]
    fn descend_ascending_keeps_only_tail() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["1", "2", "3"]);

        assert_eq!(q.descend(&mut arena), 1);
        assert_eq!(contents(&q, &arena), ["3"]);
    }

    #[test]
    fn descend_empty_returns_zero() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = Queue::try_new(&mut arena).unwrap();

        assert_eq!(q.descend(&mut arena), 0);
    }

    #[test]
    fn descend_singular_returns_one() {
        let mut arena: QueueArena = QueueArena::with_capacity(8);
        let q = queue_with(&mut arena, &["7"]);

        assert_eq!(q.descend(&mut arena), 1);
        assert_eq!(contents(&q, &arena), ["7"]);
    }
}
