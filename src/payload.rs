//! Filepath: src/payload.rs
//!
//! Ready-made [`LeafPayload`] implementations.
//!
//! - [`Absolute`]: the leaf stores its index outright. Inserting never
//!   moves other leaves, which turns [`BucketedSet`] into a plain ordered set.
//! - [`Relative`] over [`RowBase`]: the anchor keeps a base row, the leaf an
//!   offset from it. Inserting a leaf shifts every following leaf up by one,
//!   like inserting a row into a table view.
//!
//! [`BucketedSet`]: crate::set::BucketedSet

use crate::anchor::AnchorState;
use crate::index::IndexType;
use crate::leaf::LeafPayload;

// ============================================================================
//  Absolute
// ============================================================================

/// A value tagged with a fixed logical index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Absolute<I, T> {
    index: I,
    value: T,
}

impl<I: IndexType, T> Absolute<I, T> {
    /// Wrap `value`; the index is assigned on insertion.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            index: I::ZERO,
            value,
        }
    }

    /// The wrapped value.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Mutable access to the wrapped value.
    pub const fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<I: IndexType, T> LeafPayload<I> for Absolute<I, T> {
    type Anchor = ();

    #[inline]
    fn bind(&mut self, index: I, _anchor: &()) {
        self.index = index;
    }

    #[inline]
    fn index(&self, _anchor: &()) -> I {
        self.index
    }

    #[inline]
    fn adjust(&mut self) {}
}

// ============================================================================
//  Relative / RowBase
// ============================================================================

/// Anchor state holding the logical index the bucket is measured from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowBase<I> {
    base: I,
}

impl<I: IndexType> RowBase<I> {
    /// Current base of the bucket.
    #[must_use]
    pub const fn base(&self) -> I {
        self.base
    }
}

impl<I: IndexType> AnchorState for RowBase<I> {
    #[inline]
    fn adjust(&mut self) {
        self.base = self.base.incr();
    }
}

/// A value whose logical index is an offset from its bucket's [`RowBase`].
///
/// Every [`adjust`](LeafPayload::adjust) moves the leaf one row down, as does
/// every adjust of the anchor it is bound to. Binding below the bucket's base
/// needs a signed index type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relative<I, T> {
    offset: I,
    value: T,
}

impl<I: IndexType, T> Relative<I, T> {
    /// Wrap `value`; the offset is assigned on insertion.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            offset: I::ZERO,
            value,
        }
    }

    /// The wrapped value.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Mutable access to the wrapped value.
    pub const fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<I: IndexType, T> LeafPayload<I> for Relative<I, T> {
    type Anchor = RowBase<I>;

    #[inline]
    fn bind(&mut self, index: I, anchor: &RowBase<I>) {
        self.offset = index - anchor.base;
    }

    #[inline]
    fn index(&self, anchor: &RowBase<I>) -> I {
        anchor.base + self.offset
    }

    #[inline]
    fn adjust(&mut self) {
        self.offset = self.offset.incr();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_bind() {
        let mut leaf: Absolute<u32, &str> = Absolute::new("a");
        leaf.bind(9, &());
        leaf.adjust();
        assert_eq!(leaf.index(&()), 9);
        assert_eq!(*leaf.value(), "a");
    }

    #[test]
    fn test_relative_tracks_base() {
        let mut base = RowBase::<i64>::default();
        base.adjust();
        base.adjust();

        let mut leaf = Relative::new('x');
        leaf.bind(5, &base);
        assert_eq!(leaf.index(&base), 5);

        base.adjust();
        assert_eq!(leaf.index(&base), 6);

        leaf.adjust();
        assert_eq!(leaf.index(&base), 7);
    }
}
