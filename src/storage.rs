//! Storage trait and bounded arena for slot-keyed node allocation.
//!
//! Storage provides insert/remove/get operations where keys remain valid
//! until explicitly removed. The ring layer builds linked structures out of
//! keys instead of pointers, so every node allocation and release funnels
//! through here and nothing else in the crate allocates per element.

use crate::Key;

/// Slot-keyed storage with stable keys.
///
/// # Requirements
///
/// Implementations must provide:
/// - **Stable keys**: a key remains valid until explicitly removed
/// - **O(1)** insert, remove, get operations
/// - **Slot reuse**: removed slots can be reused by future inserts
///
/// Insertion is uniformly fallible: bounded backends report [`Full`] when
/// out of slots, growable backends simply never do.
///
/// # Implementations
///
/// - [`Arena`] - fixed capacity, free-list slab (in this crate)
/// - `slab::Slab` - growable, never reports [`Full`] (feature `slab`)
pub trait Storage<T> {
    /// Key type for this storage.
    type Key: Key;

    /// Inserts a value, returning its stable key.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if no slot is available.
    fn try_insert(&mut self, value: T) -> Result<Self::Key, Full<T>>;

    /// Removes and returns the value at `key`, if present.
    fn remove(&mut self, key: Self::Key) -> Option<T>;

    /// Returns a reference to the value at `key`, if present.
    fn get(&self, key: Self::Key) -> Option<&T>;

    /// Returns a mutable reference to the value at `key`, if present.
    fn get_mut(&mut self, key: Self::Key) -> Option<&mut T>;
}

/// Error returned when fixed-capacity storage is out of slots.
///
/// Carries the value that could not be inserted, so callers can recover it
/// without a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> core::fmt::Display for Full<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "storage is full")
    }
}

impl<T: core::fmt::Debug> std::error::Error for Full<T> {}

// =============================================================================
// Arena - fixed capacity, free-list slot reuse
// =============================================================================

/// Fixed-capacity slot storage with a LIFO free list.
///
/// Slots are allocated lazily up to the capacity fixed at construction;
/// removed slots go on a free list and are reused before fresh ones. Keys
/// are slot indices and stay valid until the slot is removed.
///
/// # Example
///
/// ```
/// use ringq::{Arena, Storage};
///
/// let mut arena: Arena<u64> = Arena::with_capacity(16);
///
/// let key = arena.try_insert(42).unwrap();
/// assert_eq!(arena.get(key), Some(&42));
///
/// assert_eq!(arena.remove(key), Some(42));
/// assert_eq!(arena.get(key), None);
/// ```
#[derive(Debug)]
pub struct Arena<T, K: Key = u32> {
    entries: Vec<Entry<T, K>>,
    /// Head of the free list, `K::NONE` when no removed slot is available.
    next_free: K,
    len: usize,
    capacity: usize,
}

#[derive(Debug)]
enum Entry<T, K> {
    Vacant(K),
    Occupied(T),
}

impl<T, K: Key> Arena<T, K> {
    /// Creates an arena with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or is not representable by the key type
    /// (the key type's `MAX` is reserved as the `NONE` sentinel).
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        assert!(
            capacity <= K::NONE.as_usize(),
            "capacity exceeds key type maximum"
        );

        Self {
            entries: Vec::with_capacity(capacity),
            next_free: K::NONE,
            len: 0,
            capacity,
        }
    }

    /// Returns the capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slots are occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if all slots are occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }
}

impl<T, K: Key> Storage<T> for Arena<T, K> {
    type Key = K;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<Self::Key, Full<T>> {
        if self.next_free.is_some() {
            let idx = self.next_free.as_usize();
            let next = match self.entries[idx] {
                Entry::Vacant(next) => next,
                Entry::Occupied(_) => unreachable!("occupied slot on free list"),
            };
            self.entries[idx] = Entry::Occupied(value);
            self.next_free = next;
            self.len += 1;
            Ok(K::from_usize(idx))
        } else if self.entries.len() < self.capacity {
            let idx = self.entries.len();
            self.entries.push(Entry::Occupied(value));
            self.len += 1;
            Ok(K::from_usize(idx))
        } else {
            Err(Full(value))
        }
    }

    #[inline]
    fn remove(&mut self, key: Self::Key) -> Option<T> {
        let idx = key.as_usize();
        match self.entries.get(idx) {
            Some(Entry::Occupied(_)) => {}
            _ => return None,
        }

        let old = core::mem::replace(&mut self.entries[idx], Entry::Vacant(self.next_free));
        self.next_free = key;
        self.len -= 1;
        match old {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant(_) => unreachable!(),
        }
    }

    #[inline]
    fn get(&self, key: Self::Key) -> Option<&T> {
        match self.entries.get(key.as_usize()) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    #[inline]
    fn get_mut(&mut self, key: Self::Key) -> Option<&mut T> {
        match self.entries.get_mut(key.as_usize()) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }
}

// =============================================================================
// slab::Slab implementation
// =============================================================================

#[cfg(feature = "slab")]
impl<T> Storage<T> for slab::Slab<T> {
    type Key = usize;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<Self::Key, Full<T>> {
        Ok(self.insert(value))
    }

    #[inline]
    fn remove(&mut self, key: Self::Key) -> Option<T> {
        self.try_remove(key)
    }

    #[inline]
    fn get(&self, key: Self::Key) -> Option<&T> {
        self.get(key)
    }

    #[inline]
    fn get_mut(&mut self, key: Self::Key) -> Option<&mut T> {
        self.get_mut(key)
    }
}
