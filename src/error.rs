//! Filepath: src/error.rs
//!
//! Errors returned by the checked entry points.
//!
//! The unchecked operations panic on caller misuse; the `try_` variants
//! report the same conditions as values instead.

use std::fmt as StdFmt;

use crate::set::Position;

// ============================================================================
//  PositionError
// ============================================================================

/// A [`Position`] that does not name a leaf of the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionError {
    /// The position is the end marker; there is no leaf to operate on.
    End,

    /// The position lies outside the set (stale after `clear`, or from
    /// another set).
    OutOfBounds(Position),
}

impl StdFmt::Display for PositionError {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        match self {
            Self::End => write!(f, "position is the end marker"),

            Self::OutOfBounds(pos) => write!(
                f,
                "position (bucket {}, offset {}) is out of bounds",
                pos.bucket(),
                pos.offset()
            ),
        }
    }
}

impl std::error::Error for PositionError {}

// ============================================================================
//  CursorError
// ============================================================================

/// Errors from [`BoundaryCursor::try_eval_at`].
///
/// [`BoundaryCursor::try_eval_at`]: crate::cursor::BoundaryCursor::try_eval_at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorError<I> {
    /// The requested index is below the cursor's current index. The scan
    /// position only moves forward; call `start()` first.
    Rewind {
        /// Index that was asked for.
        requested: I,

        /// Index the cursor currently stands on.
        current: I,
    },
}

impl<I: StdFmt::Debug> StdFmt::Display for CursorError<I> {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        match self {
            Self::Rewind { requested, current } => write!(
                f,
                "cursor cannot rewind from {current:?} to {requested:?} without start()"
            ),
        }
    }
}

impl<I: StdFmt::Debug> std::error::Error for CursorError<I> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(PositionError::End.to_string(), "position is the end marker");

        let err = CursorError::Rewind {
            requested: 2u32,
            current: 7,
        };
        assert_eq!(
            err.to_string(),
            "cursor cannot rewind from 7 to 2 without start()"
        );
    }
}
