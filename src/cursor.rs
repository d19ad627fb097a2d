//! Filepath: src/cursor.rs
//!
//! [`BoundaryCursor`] - forward-only scanner over a [`DeletionTranslator`].
//!
//! Rebuilding a view row by row queries the translator with `0, 1, 2, ...`.
//! Each [`DeletionTranslator::eval`] is a binary search; the cursor instead
//! keeps its place in the boundary list and only ever walks forward, so a
//! full pass costs `O(rows + boundaries)`.
//!
//! The cursor borrows the translator, so the boundary list cannot change
//! underneath the scan position.

use std::iter::FusedIterator;

use crate::error::CursorError;
use crate::index::IndexType;
use crate::translator::DeletionTranslator;

/// Resumable, forward-only evaluation of a [`DeletionTranslator`].
///
/// # Example
///
/// ```rust
/// use windex::DeletionTranslator;
///
/// let mut field: DeletionTranslator<u32> = DeletionTranslator::new();
/// field.mark_deleted(1);
/// field.mark_deleted(3);
///
/// let rows: Vec<u32> = field.cursor().take(4).collect();
/// assert_eq!(rows, vec![0, 2, 3, 5]);
/// ```
#[derive(Clone, Debug)]
pub struct BoundaryCursor<'a, I> {
    field: &'a DeletionTranslator<I>,

    /// Number of boundaries already passed (index `<=` the last query).
    position: usize,

    /// Next index `eval_and_step` resolves.
    current: I,
}

impl<'a, I: IndexType> BoundaryCursor<'a, I> {
    pub(crate) fn new(field: &'a DeletionTranslator<I>) -> Self {
        Self {
            field,
            position: 0,
            current: I::ZERO,
        }
    }

    /// Rewind the scan to the first boundary and the index counter to zero.
    pub fn start(&mut self) {
        self.position = 0;
        self.current = I::ZERO;
    }

    /// Rewind only the index counter. The scan position stays where it is,
    /// so the next query must be preceded by [`start`](Self::start).
    pub fn reset(&mut self) {
        self.current = I::ZERO;
    }

    /// Index the next [`eval_and_step`](Self::eval_and_step) resolves.
    #[inline]
    #[must_use]
    pub const fn current(&self) -> I {
        self.current
    }

    /// Resolve the current index, then move the counter one forward.
    ///
    /// # Panics
    ///
    /// Panics if the scan position is already past the current index
    /// (`reset()` without `start()`).
    pub fn eval_and_step(&mut self) -> I {
        let resolved: I = self.resolve(self.current);
        self.current = self.current.incr();
        resolved
    }

    /// Jump forward to `index` and resolve it. The counter is left on
    /// `index`, so a following `eval_and_step` resolves `index` again.
    ///
    /// # Panics
    ///
    /// Panics if `index` is below the current index.
    pub fn eval_at(&mut self, index: I) -> I {
        match self.try_eval_at(index) {
            Ok(resolved) => resolved,
            Err(err) => panic!("{err}"),
        }
    }

    /// Checked [`eval_at`](Self::eval_at).
    ///
    /// # Errors
    ///
    /// [`CursorError::Rewind`] if `index` is below the current index; the
    /// cursor is left untouched.
    pub fn try_eval_at(&mut self, index: I) -> Result<I, CursorError<I>> {
        if index < self.current {
            return Err(CursorError::Rewind {
                requested: index,
                current: self.current,
            });
        }

        self.current = index;
        Ok(self.resolve(index))
    }

    fn resolve(&mut self, index: I) -> I {
        let boundaries = self.field.boundaries();

        assert!(
            self.position == 0 || boundaries[self.position - 1].index() <= index,
            "cursor scan is past index {index:?}; call start() first"
        );

        while boundaries
            .get(self.position)
            .is_some_and(|boundary| boundary.index() <= index)
        {
            self.position += 1;
        }

        index + self.field.diff_before(self.position)
    }
}

/// Endless stream of `eval_and_step()` results.
impl<I: IndexType> Iterator for BoundaryCursor<'_, I> {
    type Item = I;

    #[inline]
    fn next(&mut self) -> Option<I> {
        Some(self.eval_and_step())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<I: IndexType> FusedIterator for BoundaryCursor<'_, I> {}
