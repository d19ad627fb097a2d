//! Filepath: src/translator.rs
//!
//! [`DeletionTranslator`] - compressed map from compacted to original indices.
//!
//! A client deletes positions from some external sequence one at a time,
//! always naming them by their index in the *current* (compacted) numbering.
//! The translator keeps one [`Boundary`] per maximal run of deleted original
//! positions and resolves any compacted index back to its original index.
//!
//! ```text
//!  original:   0 1 2 3 4 5 6 7
//!  deleted:        x     x x
//!  compacted:  0 1   2 3     4
//!
//!  boundaries: (2, diff 1) (4, diff 3)
//!  eval(3) = 3 + 1 = 4      eval(4) = 4 + 3 = 7
//! ```
//!
//! # Triangle case
//!
//! Deleting the position right before an existing run folds the run into
//! the new boundary instead of adding a second one:
//!
//! ```text
//!      *         *
//!      | \   =   | \
//!      1  2      12  x
//! ```

use crate::boundary::Boundary;
use crate::cursor::BoundaryCursor;
use crate::index::IndexType;
use crate::tracing_helpers::{debug_log, trace_log};

/// Tracks deletions (and insertions) in an external index space.
///
/// # Invariants
///
/// - Boundaries are strictly increasing by index.
/// - Diffs are strictly increasing in index order.
/// - There is at most one boundary per maximal run of deleted original
///   positions.
///
/// # Example
///
/// ```rust
/// use windex::DeletionTranslator;
///
/// let mut field: DeletionTranslator<u32> = DeletionTranslator::new();
/// field.mark_deleted(5);
/// field.mark_deleted(4);
///
/// assert_eq!(field.boundary_count(), 1);
/// assert_eq!(field.eval(3), 3);
/// assert_eq!(field.eval(4), 6);
/// assert_eq!(field.all_deleted_indexes(), vec![4, 5]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeletionTranslator<I> {
    boundaries: Vec<Boundary<I>>,
}

impl<I: IndexType> DeletionTranslator<I> {
    /// Create a translator with no deletions.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            boundaries: Vec::new(),
        }
    }

    /// Number of boundary records.
    #[inline]
    #[must_use]
    pub fn boundary_count(&self) -> usize {
        self.boundaries.len()
    }

    /// Check if no deletion has been recorded.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Boundary records in index order.
    #[inline]
    #[must_use]
    pub fn boundaries(&self) -> &[Boundary<I>] {
        &self.boundaries
    }

    /// Drop all boundary records.
    pub fn clear(&mut self) {
        debug_log!(boundaries = self.boundaries.len(), "clear");
        self.boundaries.clear();
    }

    /// A cursor for non-decreasing queries, already started.
    #[must_use]
    pub fn cursor(&self) -> BoundaryCursor<'_, I> {
        BoundaryCursor::new(self)
    }

    /// Number of boundaries with index `<= index`.
    #[inline]
    fn upper(&self, index: I) -> usize {
        self.boundaries.partition_point(|b| b.index() <= index)
    }

    /// Diff of the boundary just before slot `upper`, or zero.
    #[inline]
    pub(crate) fn diff_before(&self, upper: usize) -> I {
        upper
            .checked_sub(1)
            .map_or(I::ZERO, |prev| self.boundaries[prev].diff())
    }

    // ========================================================================
    //  Queries
    // ========================================================================

    /// Original index of compacted index `index`.
    ///
    /// Returns `index` unchanged when nothing was deleted before it.
    #[must_use]
    pub fn eval(&self, index: I) -> I {
        index + self.diff_before(self.upper(index))
    }

    /// Every deleted original index, ascending.
    #[must_use]
    pub fn all_deleted_indexes(&self) -> Vec<I> {
        let mut out: Vec<I> = Vec::new();
        let mut last_diff: I = I::ZERO;

        for boundary in &self.boundaries {
            let run: I = boundary.diff() - last_diff;
            let start: I = boundary.index() + last_diff;

            let mut step: I = I::ZERO;
            while step < run {
                out.push(start + step);
                step = step.incr();
            }

            last_diff = boundary.diff();
        }

        out
    }

    // ========================================================================
    //  Mutation
    // ========================================================================

    /// Record the deletion of compacted index `index`.
    ///
    /// Every boundary after the deleted slot moves one index down and
    /// absorbs one more deletion.
    pub fn mark_deleted(&mut self, index: I) {
        let mut upper: usize = self.upper(index);

        // Triangle case: the run starting right after `index` joins this one.
        let mut merged: Option<I> = None;
        if self
            .boundaries
            .get(upper)
            .is_some_and(|next| next.index() == index.incr())
        {
            let absorbed: Boundary<I> = self.boundaries.remove(upper);
            merged = Some(absorbed.diff().incr());
        }

        let hit: Option<usize> = upper
            .checked_sub(1)
            .filter(|&prev| self.boundaries[prev].index() == index);

        match hit {
            Some(prev) => {
                let boundary: &mut Boundary<I> = &mut self.boundaries[prev];
                match merged {
                    Some(diff) => boundary.set_diff(diff),
                    None => boundary.incr_diff(),
                }
            }

            None => {
                let diff: I = merged.unwrap_or_else(|| self.diff_before(upper).incr());
                self.boundaries.insert(upper, Boundary::new(index, diff));
                upper += 1;
            }
        }

        for boundary in &mut self.boundaries[upper..] {
            boundary.shift_for_deletion();
        }

        trace_log!(
            ?index,
            merged = merged.is_some(),
            boundaries = self.boundaries.len(),
            "mark_deleted"
        );
    }

    /// Insert one position at compacted index `index` and return the
    /// original index it lands on.
    ///
    /// The new position is not deleted; every boundary after it moves one
    /// index up.
    pub fn translate_for_insertion(&mut self, index: I) -> I {
        let upper: usize = self.upper(index);
        let resolved: I = index + self.diff_before(upper);

        for boundary in &mut self.boundaries[upper..] {
            boundary.incr_index();
        }

        trace_log!(?index, ?resolved, "translate_for_insertion");
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(field: &DeletionTranslator<u32>) -> Vec<(u32, u32)> {
        field
            .boundaries()
            .iter()
            .map(|b| (b.index(), b.diff()))
            .collect()
    }

    // ==================== Empty ====================

    #[test]
    fn test_empty_is_identity() {
        let field: DeletionTranslator<u32> = DeletionTranslator::new();
        assert!(field.is_empty());
        for i in 0..32 {
            assert_eq!(field.eval(i), i);
        }
        assert!(field.all_deleted_indexes().is_empty());
    }

    // ==================== mark_deleted ====================

    #[test]
    fn test_single_deletion() {
        let mut field = DeletionTranslator::<u32>::new();
        field.mark_deleted(5);

        assert_eq!(records(&field), vec![(5, 1)]);
        assert_eq!(field.eval(4), 4);
        assert_eq!(field.eval(5), 6);
        assert_eq!(field.all_deleted_indexes(), vec![5]);
    }

    #[test]
    fn test_triangle_merge() {
        let mut field = DeletionTranslator::<u32>::new();
        field.mark_deleted(5);
        field.mark_deleted(4);

        assert_eq!(records(&field), vec![(4, 2)]);
        assert_eq!(field.eval(3), 3);
        assert_eq!(field.eval(4), 6);
        assert_eq!(field.all_deleted_indexes(), vec![4, 5]);
    }

    #[test]
    fn test_repeat_at_same_compacted_index() {
        let mut field = DeletionTranslator::<u32>::new();
        field.mark_deleted(3);
        field.mark_deleted(3);
        field.mark_deleted(3);

        assert_eq!(records(&field), vec![(3, 3)]);
        assert_eq!(field.eval(3), 6);
        assert_eq!(field.all_deleted_indexes(), vec![3, 4, 5]);
    }

    #[test]
    fn test_triangle_merge_with_hit() {
        // Original 3 and 5 deleted, then original 4 bridges the two runs.
        let mut field = DeletionTranslator::<u32>::new();
        field.mark_deleted(3);
        field.mark_deleted(4);
        assert_eq!(records(&field), vec![(3, 1), (4, 2)]);

        field.mark_deleted(3);
        assert_eq!(records(&field), vec![(3, 3)]);
        assert_eq!(field.all_deleted_indexes(), vec![3, 4, 5]);
    }

    #[test]
    fn test_later_boundaries_shift() {
        let mut field = DeletionTranslator::<u32>::new();
        field.mark_deleted(2);
        field.mark_deleted(0);

        assert_eq!(records(&field), vec![(0, 1), (1, 2)]);
        assert_eq!(field.eval(0), 1);
        assert_eq!(field.eval(1), 3);
        assert_eq!(field.all_deleted_indexes(), vec![0, 2]);
    }

    #[test]
    fn test_separate_runs() {
        let mut field = DeletionTranslator::<u32>::new();
        field.mark_deleted(2);
        field.mark_deleted(5);

        assert_eq!(records(&field), vec![(2, 1), (5, 2)]);
        assert_eq!(field.eval(4), 5);
        assert_eq!(field.eval(5), 7);
        assert_eq!(field.all_deleted_indexes(), vec![2, 6]);
    }

    // ==================== translate_for_insertion ====================

    #[test]
    fn test_insertion_before_run() {
        let mut field = DeletionTranslator::<u32>::new();
        field.mark_deleted(2);

        assert_eq!(field.translate_for_insertion(1), 1);
        assert_eq!(records(&field), vec![(3, 1)]);
        assert_eq!(field.eval(2), 2);
        assert_eq!(field.eval(3), 4);
        assert_eq!(field.all_deleted_indexes(), vec![3]);
    }

    #[test]
    fn test_insertion_at_run() {
        let mut field = DeletionTranslator::<u32>::new();
        field.mark_deleted(2);

        assert_eq!(field.translate_for_insertion(2), 3);
        assert_eq!(records(&field), vec![(2, 1)]);
        assert_eq!(field.all_deleted_indexes(), vec![2]);
    }

    #[test]
    fn test_insertion_without_deletions() {
        let mut field = DeletionTranslator::<i32>::new();
        assert_eq!(field.translate_for_insertion(9), 9);
        assert!(field.is_empty());
    }

    // ==================== clear ====================

    #[test]
    fn test_clear() {
        let mut field = DeletionTranslator::<u64>::new();
        for i in [9, 4, 4, 1] {
            field.mark_deleted(i);
        }
        assert!(!field.is_empty());

        field.clear();
        assert_eq!(field.boundary_count(), 0);
        assert_eq!(field.eval(10), 10);
    }
}
