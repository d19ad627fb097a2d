//! # `windex`
//!
//! Index bookkeeping for large, mutable ordered sequences.
//!
//! This crate provides two sibling structures that keep logical indices
//! cheap to maintain while the sequence they describe changes:
//!
//! - [`BucketedSet`]: an ordered sequence of leaves partitioned into buckets
//!   of at most `WIDTH` leaves. Each leaf derives its logical index from its
//!   bucket's [`Anchor`], so inserting in the middle only refreshes the
//!   anchors after the insertion point and the tail of one bucket.
//! - [`DeletionTranslator`]: a run-compressed map from a compacted index
//!   space (after deletions) back to the original one, with a forward-only
//!   [`BoundaryCursor`] for row-by-row rebuilds.
//!
//! The two do not call each other.
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `BucketedSet::insert` | `O(WIDTH + anchors after the insertion point)` |
//! | `BucketedSet::upper_bound` | `O(log n)` |
//! | `DeletionTranslator::eval` | `O(log boundaries)` |
//! | `DeletionTranslator::mark_deleted` | `O(boundaries)` |
//! | `BoundaryCursor::eval_and_step` | amortised `O(1)` |
//!
//! ## Thread Safety
//!
//! Nothing here synchronises. Every structure expects one owner; share it
//! across threads only behind your own lock.
//!
//! ## Misuse
//!
//! Inserting a logical index that breaks the ordering, or querying a cursor
//! with a decreasing index, panics. The `try_` methods report the checkable
//! cases as errors instead.
//!
//! ## Features
//!
//! - `tracing`: emit split, insert and deletion events through `tracing`.

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::inline_always)]

mod tracing_helpers;

pub mod anchor;
pub mod boundary;
pub mod cursor;
pub mod error;
pub mod index;
pub mod leaf;
pub mod payload;
pub mod set;
pub mod translator;

// Re-export main types for convenience
pub use anchor::{Anchor, AnchorId, AnchorState};
pub use boundary::Boundary;
pub use cursor::BoundaryCursor;
pub use error::{CursorError, PositionError};
pub use index::IndexType;
pub use leaf::{LeafElement, LeafPayload};
pub use set::{BucketedSet, DEFAULT_WIDTH, Position};
pub use translator::DeletionTranslator;
