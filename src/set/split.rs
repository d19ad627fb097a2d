//! Bucket splitting.
//!
//! A full bucket hands its upper half to a freshly created sibling anchor
//! placed right after it. Only the moved leaves are touched; every other
//! bucket keeps its anchor and leaves.

use super::{Bucket, BucketedSet};
use crate::anchor::{Anchor, AnchorId};
use crate::index::IndexType;
use crate::leaf::LeafPayload;
use crate::tracing_helpers::debug_log;

impl<I, E, const WIDTH: usize> BucketedSet<I, E, WIDTH>
where
    I: IndexType,
    E: LeafPayload<I>,
{
    /// Number of leaves the old anchor keeps when its bucket splits.
    pub const SPLIT_POINT: usize = WIDTH / 2;

    /// Split bucket `bucket` at [`SPLIT_POINT`](Self::SPLIT_POINT).
    ///
    /// `offset` is the pending insertion slot inside that bucket. Returns
    /// the `(bucket, offset)` the insertion must use afterwards: slots at or
    /// past the split point move to the new sibling.
    pub(super) fn split_bucket(&mut self, bucket: usize, offset: usize) -> (usize, usize) {
        let half: usize = Self::SPLIT_POINT;
        let old_id: AnchorId = self.buckets[bucket].anchor;
        let new_id: AnchorId = AnchorId::from_slot(self.anchors.len());

        let old: &mut Anchor<E::Anchor> = &mut self.anchors[old_id.slot()];
        let remainder: usize = old.leaf_count() - half;
        let sibling: Anchor<E::Anchor> = Anchor::split_from(old, remainder);
        old.set_leaf_count(half);
        self.anchors.push(sibling);

        let mut tail = self.buckets[bucket].leaves.split_off(half);
        for leaf in &mut tail {
            leaf.set_anchor(new_id);
        }
        debug_assert_eq!(tail.len(), remainder);
        self.buckets.insert(bucket + 1, Bucket::with_leaves(new_id, tail));

        debug_log!(
            old = %old_id,
            new = %new_id,
            bucket,
            kept = half,
            moved = remainder,
            "bucket split"
        );

        if offset >= half {
            (bucket + 1, offset - half)
        } else {
            (bucket, offset)
        }
    }
}
