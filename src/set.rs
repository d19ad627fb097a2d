//! Filepath: src/set.rs
//!
//! [`BucketedSet`] - an ordered sequence of leaves partitioned into buckets.
//!
//! Leaves are grouped into contiguous buckets of at most `WIDTH` leaves,
//! each owned by an [`Anchor`]. A leaf's logical index is derived from its
//! payload and its anchor's state, so an insertion only has to refresh the
//! anchors after the insertion point and the leaves after it inside the same
//! bucket, never the whole sequence.
//!
//! # Insertion
//!
//! 1. The target bucket is the one holding the leaf at the insertion
//!    position (the last bucket when inserting at the end).
//! 2. A full target bucket is split first: the old anchor keeps
//!    `WIDTH / 2` leaves, the rest move to a new anchor right after it.
//! 3. Every anchor after the target and every leaf at or after the insertion
//!    slot in the target bucket is adjusted.
//! 4. The new leaf is bound to the target anchor and stored.
//!
//! Cost is `O(WIDTH)` plus one adjust per later anchor.

use std::fmt as StdFmt;
use std::marker::PhantomData;

use crate::anchor::{Anchor, AnchorId};
use crate::error::PositionError;
use crate::index::IndexType;
use crate::leaf::{LeafElement, LeafPayload};
use crate::tracing_helpers::{debug_log, trace_log};

mod iter;
mod position;
mod split;

pub use iter::Iter;
pub use position::Position;

/// Default maximum number of leaves per bucket.
pub const DEFAULT_WIDTH: usize = 64;

// ============================================================================
//  Bucket
// ============================================================================

/// Leaves bound to one anchor, in sequence order.
#[derive(Clone, Debug)]
struct Bucket<E> {
    anchor: AnchorId,
    leaves: Vec<LeafElement<E>>,
}

impl<E> Bucket<E> {
    const fn empty(anchor: AnchorId) -> Self {
        Self {
            anchor,
            leaves: Vec::new(),
        }
    }

    const fn with_leaves(anchor: AnchorId, leaves: Vec<LeafElement<E>>) -> Self {
        Self { anchor, leaves }
    }
}

// ============================================================================
//  BucketedSet
// ============================================================================

/// Ordered set of leaves with cheap positional insertion.
///
/// # Type Parameters
///
/// - `I` - logical index type
/// - `E` - leaf payload; its [`LeafPayload::Anchor`] is the per-bucket state
/// - `WIDTH` - maximum leaves per bucket (at least 2)
///
/// # Invariants
///
/// - Leaves are strictly increasing by logical index in sequence order.
/// - Every anchor's leaf count equals the size of its bucket and is at most
///   `WIDTH`.
/// - Only the first bucket may be empty, and only while the set is empty.
///
/// # Example
///
/// ```rust
/// use windex::BucketedSet;
/// use windex::payload::Absolute;
///
/// let mut set: BucketedSet<u32, Absolute<u32, &str>, 4> = BucketedSet::new();
/// for (i, name) in ["a", "b", "c", "d", "e"].into_iter().enumerate() {
///     let end = set.end();
///     set.insert(end, i as u32 * 10, Absolute::new(name));
/// }
///
/// assert_eq!(set.len(), 5);
/// assert_eq!(set.anchor_count(), 2);
///
/// let pos = set.upper_bound(15);
/// assert_eq!(set.index_at(pos), Some(20));
/// ```
pub struct BucketedSet<I, E, const WIDTH: usize = DEFAULT_WIDTH>
where
    I: IndexType,
    E: LeafPayload<I>,
{
    /// Anchor arena, addressed by [`AnchorId`]. Never shrinks until `clear`.
    anchors: Vec<Anchor<E::Anchor>>,

    /// Buckets in sequence order.
    buckets: Vec<Bucket<E>>,

    /// Total number of leaves.
    len: usize,

    _marker: PhantomData<fn() -> I>,
}

impl<I, E, const WIDTH: usize> BucketedSet<I, E, WIDTH>
where
    I: IndexType,
    E: LeafPayload<I>,
{
    /// Compile-time check that WIDTH is valid.
    const WIDTH_CHECK: () = {
        assert!(WIDTH >= 2, "WIDTH must be at least 2");
    };

    /// Create an empty set holding only the sentinel anchor.
    #[must_use]
    pub fn new() -> Self {
        // Trigger compile-time WIDTH check
        let _: () = Self::WIDTH_CHECK;

        Self {
            anchors: vec![Anchor::sentinel()],
            buckets: vec![Bucket::empty(AnchorId::SENTINEL)],
            len: 0,
            _marker: PhantomData,
        }
    }

    // ========================================================================
    //  Size
    // ========================================================================

    /// Number of leaves.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if the set has no leaves.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of anchors (buckets), including the sentinel.
    #[inline]
    #[must_use]
    pub fn anchor_count(&self) -> usize {
        self.buckets.len()
    }

    /// Drop every leaf and anchor, leaving one empty sentinel anchor.
    pub fn clear(&mut self) {
        debug_log!(len = self.len, anchors = self.anchors.len(), "clear");

        self.anchors.clear();
        self.anchors.push(Anchor::sentinel());
        self.buckets.clear();
        self.buckets.push(Bucket::empty(AnchorId::SENTINEL));
        self.len = 0;
    }

    // ========================================================================
    //  Positions
    // ========================================================================

    /// Position of the first leaf (equal to [`end`](Self::end) when empty).
    #[inline]
    #[must_use]
    pub const fn begin(&self) -> Position {
        Position::new(0, 0)
    }

    /// Position one past the last leaf.
    #[inline]
    #[must_use]
    pub fn end(&self) -> Position {
        let last: usize = self.buckets.len() - 1;
        Position::new(last, self.buckets[last].leaves.len())
    }

    /// Position following `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end marker.
    #[must_use]
    pub fn next(&self, position: Position) -> Position {
        let position: Position = self.normalize(position);
        assert!(position != self.end(), "next() called on the end position");
        self.normalize(Position::new(position.bucket(), position.offset() + 1))
    }

    /// Position preceding `position`, or `None` at the first leaf.
    #[must_use]
    pub fn prev(&self, position: Position) -> Option<Position> {
        let position: Position = self.normalize(position);

        if position.offset() > 0 {
            return Some(Position::new(position.bucket(), position.offset() - 1));
        }

        let bucket: usize = position.bucket().checked_sub(1)?;
        let len: usize = self.buckets[bucket].leaves.len();
        Some(Position::new(bucket, len.checked_sub(1)?))
    }

    /// Map the one-past-the-bucket slot onto the first slot of the next bucket.
    fn normalize(&self, position: Position) -> Position {
        let (bucket, offset) = (position.bucket(), position.offset());

        if bucket + 1 < self.buckets.len() && offset == self.buckets[bucket].leaves.len() {
            Position::new(bucket + 1, 0)
        } else {
            position
        }
    }

    fn check_position(&self, position: Position) -> Result<Position, PositionError> {
        let in_bounds: bool = self
            .buckets
            .get(position.bucket())
            .is_some_and(|bucket| position.offset() <= bucket.leaves.len());

        if in_bounds {
            Ok(self.normalize(position))
        } else {
            Err(PositionError::OutOfBounds(position))
        }
    }

    // ========================================================================
    //  Element Access
    // ========================================================================

    /// The leaf at `position`, or `None` for the end marker.
    #[inline]
    #[must_use]
    pub fn leaf(&self, position: Position) -> Option<&LeafElement<E>> {
        self.buckets
            .get(position.bucket())?
            .leaves
            .get(position.offset())
    }

    /// Payload at `position`.
    #[inline]
    #[must_use]
    pub fn get(&self, position: Position) -> Option<&E> {
        self.leaf(position).map(LeafElement::payload)
    }

    /// Mutable payload at `position`.
    ///
    /// If the change affects derived state downstream, follow it with
    /// [`adjust`](Self::adjust) at the same position.
    #[inline]
    pub fn get_mut(&mut self, position: Position) -> Option<&mut E> {
        self.buckets
            .get_mut(position.bucket())?
            .leaves
            .get_mut(position.offset())
            .map(LeafElement::payload_mut)
    }

    /// Logical index of the leaf at `position`.
    #[inline]
    #[must_use]
    pub fn index_at(&self, position: Position) -> Option<I> {
        self.leaf(position).map(|leaf| self.leaf_index(leaf))
    }

    /// Anchor behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out by this set since the last `clear`.
    #[inline]
    #[must_use]
    pub fn anchor(&self, id: AnchorId) -> &Anchor<E::Anchor> {
        &self.anchors[id.slot()]
    }

    /// Anchors in sequence order.
    pub fn anchors(&self) -> impl Iterator<Item = (AnchorId, &Anchor<E::Anchor>)> + '_ {
        self.buckets
            .iter()
            .map(|bucket| (bucket.anchor, &self.anchors[bucket.anchor.slot()]))
    }

    /// Leaves in sequence order, as `(logical index, &payload)`.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, I, E> {
        Iter::new(self)
    }

    #[inline]
    fn leaf_index(&self, leaf: &LeafElement<E>) -> I {
        leaf.payload().index(self.anchors[leaf.anchor().slot()].state())
    }

    // ========================================================================
    //  Ordered Lookup
    // ========================================================================

    /// First position whose leaf does not satisfy `pred`.
    ///
    /// `pred` must hold for a prefix of the sequence and fail for the rest.
    fn partition_point<P>(&self, pred: P) -> Position
    where
        P: Fn(I) -> bool,
    {
        let bucket: usize = self.buckets.partition_point(|bucket| {
            bucket
                .leaves
                .last()
                .is_some_and(|leaf| pred(self.leaf_index(leaf)))
        });

        if bucket == self.buckets.len() {
            return self.end();
        }

        let offset: usize = self.buckets[bucket]
            .leaves
            .partition_point(|leaf| pred(self.leaf_index(leaf)));

        Position::new(bucket, offset)
    }

    /// First position whose index is not less than `index`.
    #[must_use]
    pub fn lower_bound(&self, index: I) -> Position {
        self.partition_point(|i| i < index)
    }

    /// First position whose index is greater than `index`.
    #[must_use]
    pub fn upper_bound(&self, index: I) -> Position {
        self.partition_point(|i| i <= index)
    }

    /// `(lower_bound, upper_bound)` of `index`.
    #[must_use]
    pub fn equal_range(&self, index: I) -> (Position, Position) {
        (self.lower_bound(index), self.upper_bound(index))
    }

    /// Position just past an exact match of `index` (the upper end of
    /// [`equal_range`](Self::equal_range)).
    #[must_use]
    pub fn equal_range_end(&self, index: I) -> Position {
        self.upper_bound(index)
    }

    /// Position of the leaf with logical index `index`.
    #[must_use]
    pub fn find(&self, index: I) -> Option<Position> {
        let position: Position = self.lower_bound(index);
        (self.index_at(position) == Some(index)).then_some(position)
    }

    // ========================================================================
    //  Mutation
    // ========================================================================

    /// Insert `payload` with logical index `index` immediately before
    /// `position`, returning the new leaf's position.
    ///
    /// # Panics
    ///
    /// Panics if, after the adjust pass, `index` is not strictly between the
    /// indices of its neighbours (an index already present, or a position
    /// inconsistent with `index`), or if `position` is out of bounds.
    pub fn insert(&mut self, position: Position, index: I, mut payload: E) -> Position {
        let position: Position = match self.check_position(position) {
            Ok(position) => position,
            Err(err) => panic!("insert: {err}"),
        };
        let (mut bucket, mut offset) = (position.bucket(), position.offset());

        if self.len > 0 {
            let anchor: AnchorId = self.buckets[bucket].anchor;
            if self.anchors[anchor.slot()].leaf_count() >= WIDTH {
                (bucket, offset) = self.split_bucket(bucket, offset);
            }
        }

        self.propagate_adjust(bucket, offset);

        let anchor_id: AnchorId = self.buckets[bucket].anchor;
        payload.bind(index, self.anchors[anchor_id.slot()].state());
        self.assert_fits(bucket, offset, index);

        self.buckets[bucket]
            .leaves
            .insert(offset, LeafElement::new(payload, anchor_id));
        self.anchors[anchor_id.slot()].incr_leaf_count();
        self.len += 1;

        trace_log!(?index, anchor = %anchor_id, bucket, offset, len = self.len, "insert");

        Position::new(bucket, offset)
    }

    /// Re-run the adjust pass from the leaf at `position` without inserting.
    ///
    /// Adjusts every anchor after the leaf's bucket and every leaf from
    /// `position` to the end of that bucket, the leaf itself included.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end marker or out of bounds.
    pub fn adjust(&mut self, position: Position) {
        if let Err(err) = self.try_adjust(position) {
            panic!("adjust: {err}");
        }
    }

    /// Checked [`adjust`](Self::adjust).
    ///
    /// # Errors
    ///
    /// [`PositionError::End`] for the end marker, [`PositionError::OutOfBounds`]
    /// for a position that does not belong to this set.
    pub fn try_adjust(&mut self, position: Position) -> Result<(), PositionError> {
        let position: Position = self.check_position(position)?;
        if self.leaf(position).is_none() {
            return Err(PositionError::End);
        }

        self.propagate_adjust(position.bucket(), position.offset());
        Ok(())
    }

    fn propagate_adjust(&mut self, bucket: usize, offset: usize) {
        for later in &self.buckets[bucket + 1..] {
            self.anchors[later.anchor.slot()].adjust();
        }

        for leaf in &mut self.buckets[bucket].leaves[offset..] {
            leaf.payload_mut().adjust();
        }
    }

    /// A leaf bound to `index` must land strictly between its neighbours.
    fn assert_fits(&self, bucket: usize, offset: usize, index: I) {
        let slot: Position = Position::new(bucket, offset);

        if let Some(prev) = self.prev(slot).and_then(|p| self.index_at(p)) {
            assert!(
                prev < index,
                "insert: index {index:?} not after predecessor {prev:?}"
            );
        }

        if let Some(next) = self.index_at(self.normalize(slot)) {
            assert!(
                index < next,
                "insert: index {index:?} not before successor {next:?}"
            );
        }
    }

    // ========================================================================
    //  Validation
    // ========================================================================

    /// Verify the structural invariants.
    ///
    /// # Panics
    ///
    /// Panics with a description of the first violated invariant.
    pub fn check_invariants(&self) {
        assert_eq!(self.buckets.len(), self.anchors.len(), "bucket/anchor mismatch");

        let mut total: usize = 0;
        let mut last: Option<I> = None;

        for (rank, bucket) in self.buckets.iter().enumerate() {
            let anchor: &Anchor<E::Anchor> = &self.anchors[bucket.anchor.slot()];

            assert_eq!(
                anchor.leaf_count(),
                bucket.leaves.len(),
                "leaf count of {} out of sync",
                bucket.anchor
            );
            assert!(
                anchor.leaf_count() <= WIDTH,
                "{} holds {} leaves (WIDTH {WIDTH})",
                bucket.anchor,
                anchor.leaf_count()
            );
            assert!(
                !bucket.leaves.is_empty() || self.len == 0,
                "empty bucket at rank {rank}"
            );

            for leaf in &bucket.leaves {
                assert_eq!(leaf.anchor(), bucket.anchor, "leaf bound to foreign anchor");

                let index: I = self.leaf_index(leaf);
                if let Some(prev) = last {
                    assert!(prev < index, "order broken: {prev:?} then {index:?}");
                }
                last = Some(index);
            }

            total += bucket.leaves.len();
        }

        assert_eq!(total, self.len, "len out of sync");
    }
}

impl<I, E, const WIDTH: usize> Default for BucketedSet<I, E, WIDTH>
where
    I: IndexType,
    E: LeafPayload<I>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<I, E, const WIDTH: usize> Clone for BucketedSet<I, E, WIDTH>
where
    I: IndexType,
    E: LeafPayload<I> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            anchors: self.anchors.clone(),
            buckets: self.buckets.clone(),
            len: self.len,
            _marker: PhantomData,
        }
    }
}

impl<I, E, const WIDTH: usize> StdFmt::Debug for BucketedSet<I, E, WIDTH>
where
    I: IndexType,
    E: LeafPayload<I>,
{
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.debug_struct("BucketedSet")
            .field("len", &self.len)
            .field("anchors", &self.buckets.len())
            .field("width", &WIDTH)
            .finish_non_exhaustive()
    }
}
