//! Key trait for arena indices.
//!
//! Links in the ring layer are plain integer keys into storage rather than
//! pointers. A reserved sentinel value (`NONE`) stands in for "no key" so a
//! link costs exactly one integer, with no `Option` overhead.

/// Trait for key/index types used by storage and the ring layer.
///
/// Provides a sentinel value (`NONE`) and conversion to/from `usize`.
/// Implemented for the unsigned integer types; the reserved value is `MAX`,
/// which storage never hands out as a live key.
///
/// # Example
///
/// ```
/// use ringq::Key;
///
/// let key: u32 = 42;
/// assert!(key.is_some());
/// assert!(u32::NONE.is_none());
/// ```
pub trait Key: Copy + Eq + 'static {
    /// Sentinel value representing "no key".
    ///
    /// Used for free-list terminators in storage and for detached links in
    /// the ring layer. For integer types this is `MAX`.
    const NONE: Self;

    /// Creates a key from a `usize` slot index.
    fn from_usize(val: usize) -> Self;

    /// Returns the key as a `usize` slot index.
    fn as_usize(&self) -> usize;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Returns `true` if this is NOT the sentinel value.
    #[inline]
    fn is_some(&self) -> bool {
        !self.is_none()
    }
}

macro_rules! impl_key_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Key for $ty {
                const NONE: Self = <$ty>::MAX;

                #[inline]
                fn from_usize(val: usize) -> Self {
                    val as $ty
                }

                #[inline]
                fn as_usize(&self) -> usize {
                    *self as usize
                }
            }
        )*
    };
}

impl_key_for_unsigned!(u8, u16, u32, u64, usize);
