//! Filepath: src/index.rs
//!
//! Integer-like logical index used by [`BucketedSet`] and
//! [`DeletionTranslator`].
//!
//! [`BucketedSet`]: crate::set::BucketedSet
//! [`DeletionTranslator`]: crate::translator::DeletionTranslator

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Add, Sub};

/// An ordered integer index.
///
/// Both containers only need ordering, addition, subtraction and the two
/// constants below. Implemented for every primitive integer type.
///
/// # Example
///
/// ```rust
/// use windex::IndexType;
///
/// let i: u32 = 41;
/// assert_eq!(i.incr(), 42);
/// assert_eq!(u32::ZERO.incr(), u32::ONE);
/// ```
pub trait IndexType:
    Copy + Default + Ord + Eq + Hash + Debug + Add<Output = Self> + Sub<Output = Self>
{
    /// Additive identity.
    const ZERO: Self;

    /// One step in index space.
    const ONE: Self;

    /// `self + 1`.
    #[inline]
    #[must_use]
    fn incr(self) -> Self {
        self + Self::ONE
    }

    /// `self - 1`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds when this underflows an unsigned type.
    #[inline]
    #[must_use]
    fn decr(self) -> Self {
        self - Self::ONE
    }
}

macro_rules! impl_index_type {
    ($($ty:ty)*) => {
        $(
            impl IndexType for $ty {
                const ZERO: Self = 0;
                const ONE: Self = 1;
            }
        )*
    };
}

impl_index_type! { u8 u16 u32 u64 u128 usize i8 i16 i32 i64 i128 isize }
