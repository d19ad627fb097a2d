//! Filepath: src/boundary.rs
//!
//! Boundary records for [`DeletionTranslator`].
//!
//! [`DeletionTranslator`]: crate::translator::DeletionTranslator

use crate::index::IndexType;

/// One compressed run of deletions.
///
/// From compacted index `index` onward (up to the next boundary), compacted
/// indices map to original indices by adding `diff`, the number of deleted
/// original positions before them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Boundary<I> {
    index: I,
    diff: I,
}

impl<I: IndexType> Boundary<I> {
    #[inline]
    pub(crate) const fn new(index: I, diff: I) -> Self {
        Self { index, diff }
    }

    /// Compacted index at which this boundary starts.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> I {
        self.index
    }

    /// Cumulative deletions absorbed up to and including this boundary.
    #[inline]
    #[must_use]
    pub const fn diff(&self) -> I {
        self.diff
    }

    #[inline]
    pub(crate) fn set_diff(&mut self, diff: I) {
        self.diff = diff;
    }

    #[inline]
    pub(crate) fn incr_diff(&mut self) {
        self.diff = self.diff.incr();
    }

    #[inline]
    pub(crate) fn incr_index(&mut self) {
        self.index = self.index.incr();
    }

    #[inline]
    pub(crate) fn decr_index(&mut self) {
        debug_assert!(self.index > I::ZERO, "boundary index underflow");
        self.index = self.index.decr();
    }

    /// A slot in front of this boundary was deleted: one position lower, one
    /// more deletion absorbed.
    #[inline]
    pub(crate) fn shift_for_deletion(&mut self) {
        self.decr_index();
        self.incr_diff();
    }
}
