//! Circular doubly linked list primitives over keyed storage.
//!
//! A ring is addressed by its sentinel: a payload-free node whose `next`
//! and `prev` close the circle. An empty ring is the sentinel linking to
//! itself, so emptiness is a pure link condition and traversal never meets
//! a `NONE` terminator.
//!
//! These functions are the only code in the crate allowed to touch raw
//! links. Every one of them preserves the ring invariant
//! `next(prev(n)) == n && prev(next(n)) == n` on each ring it touches, and
//! none of them allocates, frees, or inspects payloads. Allocation and
//! release stay in the [`Storage`] layer; payload comparison stays in the
//! queue layer.

use crate::{Key, Storage};

/// A ring node: two links plus an optional payload.
///
/// The payload is `None` exactly for sentinels, which mark ring boundaries
/// and are never handed to comparison or release paths. A node freshly
/// inserted into storage is detached (`NONE` links) until [`init`] or one
/// of the link operations runs on it.
#[derive(Debug)]
pub struct Node<T, K: Key = u32> {
    pub(crate) prev: K,
    pub(crate) next: K,
    pub(crate) data: Option<T>,
}

impl<T, K: Key> Node<T, K> {
    /// Creates a detached sentinel node.
    #[inline]
    pub(crate) fn sentinel() -> Self {
        Self {
            prev: K::NONE,
            next: K::NONE,
            data: None,
        }
    }

    /// Creates a detached payload-bearing node.
    #[inline]
    pub(crate) fn element(data: T) -> Self {
        Self {
            prev: K::NONE,
            next: K::NONE,
            data: Some(data),
        }
    }

    /// Returns the payload, or `None` for a sentinel.
    #[inline]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}

/// Makes `node` its own predecessor and successor: an empty ring anchor.
///
/// # Panics
///
/// Panics if `node` is not valid in storage.
#[inline]
pub fn init<T, K, S>(storage: &mut S, node: K)
where
    K: Key,
    S: Storage<Node<T, K>, Key = K>,
{
    let n = storage.get_mut(node).expect("invalid key");
    n.prev = node;
    n.next = node;
}

/// Returns the successor of `node`.
///
/// # Panics
///
/// Panics if `node` is not valid in storage.
#[inline]
pub fn next<T, K, S>(storage: &S, node: K) -> K
where
    K: Key,
    S: Storage<Node<T, K>, Key = K>,
{
    storage.get(node).expect("invalid key").next
}

/// Returns the predecessor of `node`.
///
/// # Panics
///
/// Panics if `node` is not valid in storage.
#[inline]
pub fn prev<T, K, S>(storage: &S, node: K) -> K
where
    K: Key,
    S: Storage<Node<T, K>, Key = K>,
{
    storage.get(node).expect("invalid key").prev
}

/// Splices `new` between two adjacent nodes, so `left -> new -> right`.
///
/// Head and tail insertion fall out of the choice of neighbors: see
/// [`link_after`] and [`link_before`].
///
/// # Panics
///
/// Panics if any key is not valid in storage.
#[inline]
pub fn link_between<T, K, S>(storage: &mut S, new: K, left: K, right: K)
where
    K: Key,
    S: Storage<Node<T, K>, Key = K>,
{
    {
        let n = storage.get_mut(new).expect("invalid key");
        n.prev = left;
        n.next = right;
    }
    storage.get_mut(left).expect("invalid key").next = new;
    storage.get_mut(right).expect("invalid key").prev = new;
}

/// Splices `new` immediately after `anchor`.
///
/// With the sentinel as anchor this is head insertion.
#[inline]
pub fn link_after<T, K, S>(storage: &mut S, new: K, anchor: K)
where
    K: Key,
    S: Storage<Node<T, K>, Key = K>,
{
    let right = next(storage, anchor);
    link_between(storage, new, anchor, right);
}

/// Splices `new` immediately before `anchor`.
///
/// With the sentinel as anchor this is tail insertion.
#[inline]
pub fn link_before<T, K, S>(storage: &mut S, new: K, anchor: K)
where
    K: Key,
    S: Storage<Node<T, K>, Key = K>,
{
    let left = prev(storage, anchor);
    link_between(storage, new, left, anchor);
}

/// Unlinks `node` from its ring, joining its neighbors directly.
///
/// The node stays in storage with detached (`NONE`) links; the caller
/// still owns its slot and must release or relink it.
///
/// # Panics
///
/// Panics if `node` is not valid in storage.
#[inline]
pub fn unlink<T, K, S>(storage: &mut S, node: K)
where
    K: Key,
    S: Storage<Node<T, K>, Key = K>,
{
    let (left, right) = {
        let n = storage.get(node).expect("invalid key");
        (n.prev, n.next)
    };

    storage.get_mut(left).expect("invalid key").next = right;
    storage.get_mut(right).expect("invalid key").prev = left;

    let n = storage.get_mut(node).expect("invalid key");
    n.prev = K::NONE;
    n.next = K::NONE;
}

/// Returns `true` if the ring holds no element besides its sentinel.
#[inline]
pub fn is_empty<T, K, S>(storage: &S, sentinel: K) -> bool
where
    K: Key,
    S: Storage<Node<T, K>, Key = K>,
{
    next(storage, sentinel) == sentinel
}

/// Returns `true` if the ring holds exactly one element.
#[inline]
pub fn is_singular<T, K, S>(storage: &S, sentinel: K) -> bool
where
    K: Key,
    S: Storage<Node<T, K>, Key = K>,
{
    let first = next(storage, sentinel);
    first != sentinel && first == prev(storage, sentinel)
}

/// Grafts every element of `src` immediately after `anchor`, in order.
///
/// `src` is left empty. O(1): only the four boundary links are rewritten.
/// `anchor` belongs to a different ring in every intended use; splicing a
/// ring into itself is not meaningful.
///
/// # Panics
///
/// Panics if any key is not valid in storage.
pub fn splice_after<T, K, S>(storage: &mut S, src: K, anchor: K)
where
    K: Key,
    S: Storage<Node<T, K>, Key = K>,
{
    if is_empty(storage, src) {
        return;
    }

    let first = next(storage, src);
    let last = prev(storage, src);
    let after = next(storage, anchor);

    storage.get_mut(anchor).expect("invalid key").next = first;
    storage.get_mut(first).expect("invalid key").prev = anchor;
    storage.get_mut(last).expect("invalid key").next = after;
    storage.get_mut(after).expect("invalid key").prev = last;

    init(storage, src);
}

/// Moves the prefix of `src` up to and including `boundary` into `dst`.
///
/// `dst` must be an empty ring and `boundary` an element of `src`. O(1):
/// the cut rewrites boundary links only, regardless of prefix length.
///
/// # Panics
///
/// Panics if any key is not valid in storage. Debug builds additionally
/// assert the `dst` empty / `src` non-empty contract.
pub fn cut_through<T, K, S>(storage: &mut S, dst: K, src: K, boundary: K)
where
    K: Key,
    S: Storage<Node<T, K>, Key = K>,
{
    debug_assert!(is_empty(storage, dst), "cut destination must be empty");
    debug_assert!(!is_empty(storage, src), "cut source must be non-empty");
    debug_assert!(boundary != src, "boundary must be an element, not the sentinel");

    let first = next(storage, src);
    let rest = next(storage, boundary);

    storage.get_mut(dst).expect("invalid key").next = first;
    storage.get_mut(first).expect("invalid key").prev = dst;
    storage.get_mut(boundary).expect("invalid key").next = dst;
    storage.get_mut(dst).expect("invalid key").prev = boundary;

    storage.get_mut(src).expect("invalid key").next = rest;
    storage.get_mut(rest).expect("invalid key").prev = src;
}

/// Unlinks `node` and reinserts it immediately after `anchor`.
///
/// # Panics
///
/// Panics if either key is not valid in storage.
#[inline]
pub fn move_after<T, K, S>(storage: &mut S, node: K, anchor: K)
where
    K: Key,
    S: Storage<Node<T, K>, Key = K>,
{
    unlink(storage, node);
    link_after(storage, node, anchor);
}
