//! Filepath: src/anchor.rs
//!
//! Bucket headers for [`BucketedSet`].
//!
//! Every leaf of the set belongs to exactly one anchor. Anchors live in an
//! arena owned by the set and are addressed by [`AnchorId`]; leaves keep
//! the id, never a reference, so a split can repoint them freely.
//!
//! [`BucketedSet`]: crate::set::BucketedSet

use std::fmt as StdFmt;

/// Per-bucket derived state supplied by the client.
///
/// The set calls [`adjust`](AnchorState::adjust) on every anchor that sits
/// after an insertion point, so state that depends on the number of leaves
/// before the bucket (a base row index, say) can be kept current without a
/// full pass.
pub trait AnchorState: Default + Clone {
    /// Refresh the derived state after a leaf was inserted before this bucket.
    fn adjust(&mut self);
}

/// Anchors without derived state.
impl AnchorState for () {
    #[inline(always)]
    fn adjust(&mut self) {}
}

/// Stable handle of an anchor inside the set's anchor arena.
///
/// Ids are never reused while the set lives; [`BucketedSet::clear`] resets
/// the arena and with it every id handed out before.
///
/// [`BucketedSet::clear`]: crate::set::BucketedSet::clear
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnchorId(u32);

impl AnchorId {
    /// The sentinel anchor every set starts with.
    pub const SENTINEL: Self = Self(0);

    #[inline(always)]
    pub(crate) fn from_slot(slot: usize) -> Self {
        debug_assert!(u32::try_from(slot).is_ok(), "anchor arena overflow");
        #[allow(
            clippy::cast_possible_truncation,
            reason = "checked above; one anchor per WIDTH/2 leaves"
        )]
        let raw = slot as u32;
        Self(raw)
    }

    /// Arena slot of this anchor.
    #[inline(always)]
    #[must_use]
    pub const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl StdFmt::Display for AnchorId {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        write!(f, "anchor#{}", self.0)
    }
}

/// One bucket header: the client state plus the number of leaves bound to it.
#[derive(Clone, Debug, Default)]
pub struct Anchor<B> {
    state: B,
    leaf_count: usize,
}

impl<B: AnchorState> Anchor<B> {
    /// The empty sentinel anchor.
    #[must_use]
    pub fn sentinel() -> Self {
        Self {
            state: B::default(),
            leaf_count: 0,
        }
    }

    /// A sibling created by a split: same derived state, given leaf count.
    #[must_use]
    pub(crate) fn split_from(other: &Self, leaf_count: usize) -> Self {
        Self {
            state: other.state.clone(),
            leaf_count,
        }
    }

    /// Client state of this bucket.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> &B {
        &self.state
    }

    /// Number of leaves bound to this anchor.
    #[inline]
    #[must_use]
    pub const fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    #[inline]
    pub(crate) fn set_leaf_count(&mut self, leaf_count: usize) {
        self.leaf_count = leaf_count;
    }

    #[inline]
    pub(crate) fn incr_leaf_count(&mut self) {
        self.leaf_count += 1;
    }

    #[inline]
    pub(crate) fn adjust(&mut self) {
        self.state.adjust();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    struct Counter(u32);

    impl AnchorState for Counter {
        fn adjust(&mut self) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_sentinel_is_empty() {
        let anchor: Anchor<Counter> = Anchor::sentinel();
        assert_eq!(anchor.leaf_count(), 0);
        assert_eq!(anchor.state(), &Counter(0));
    }

    #[test]
    fn test_split_from_copies_state() {
        let mut anchor: Anchor<Counter> = Anchor::sentinel();
        anchor.adjust();
        anchor.adjust();
        anchor.set_leaf_count(5);

        let sibling = Anchor::split_from(&anchor, 3);
        assert_eq!(sibling.state(), &Counter(2));
        assert_eq!(sibling.leaf_count(), 3);
        assert_eq!(anchor.leaf_count(), 5);
    }

    #[test]
    fn test_anchor_id_slot() {
        assert_eq!(AnchorId::SENTINEL.slot(), 0);
        assert_eq!(AnchorId::from_slot(17).slot(), 17);
        assert_eq!(AnchorId::from_slot(3).to_string(), "anchor#3");
    }
}
