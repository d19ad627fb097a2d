//! Positions inside a [`BucketedSet`](super::BucketedSet).

/// A slot in sequence order: bucket rank plus offset inside the bucket.
///
/// Positions are plain values, like `Vec` indices. Any insertion or
/// `clear()` invalidates every position taken before it, except the one
/// returned by the insertion itself.
///
/// Positions order the same way the leaves they name do, with the set's
/// `end()` after all of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    bucket: usize,
    offset: usize,
}

impl Position {
    #[inline(always)]
    pub(crate) const fn new(bucket: usize, offset: usize) -> Self {
        Self { bucket, offset }
    }

    /// Rank of the bucket in sequence order.
    #[inline(always)]
    #[must_use]
    pub const fn bucket(&self) -> usize {
        self.bucket
    }

    /// Offset of the leaf inside its bucket.
    #[inline(always)]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}
