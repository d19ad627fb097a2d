//! Filepath: src/leaf.rs
//!
//! Leaf elements for [`BucketedSet`].
//!
//! A leaf owns the client payload and the [`AnchorId`] of its bucket. Its
//! logical index is never stored by the set; it is derived on demand from
//! the payload and the anchor's state through [`LeafPayload::index`].
//!
//! [`BucketedSet`]: crate::set::BucketedSet

use crate::anchor::{AnchorId, AnchorState};
use crate::index::IndexType;

/// Client payload stored in a leaf.
///
/// # Contract
///
/// - After [`bind`](LeafPayload::bind)`(i, anchor)`, `index(anchor)` returns `i`.
/// - [`adjust`](LeafPayload::adjust) is called on every leaf that sits at or
///   after an insertion point inside the same bucket, before the new leaf is
///   bound. It refreshes whatever the payload caches; it may or may not move
///   the derived index, but leaves must stay ordered by derived index.
pub trait LeafPayload<I: IndexType> {
    /// Derived state of the anchor this payload is evaluated against.
    type Anchor: AnchorState;

    /// Attach the payload to `anchor` so that it reports logical index `index`.
    fn bind(&mut self, index: I, anchor: &Self::Anchor);

    /// Logical index of this payload, evaluated against its anchor.
    fn index(&self, anchor: &Self::Anchor) -> I;

    /// Refresh cached state after an insertion in front of this leaf.
    fn adjust(&mut self);
}

/// One stored item: payload plus a back-reference to its bucket header.
#[derive(Clone, Debug)]
pub struct LeafElement<E> {
    payload: E,
    anchor: AnchorId,
}

impl<E> LeafElement<E> {
    #[inline]
    pub(crate) const fn new(payload: E, anchor: AnchorId) -> Self {
        Self { payload, anchor }
    }

    /// The client payload.
    #[inline]
    #[must_use]
    pub const fn payload(&self) -> &E {
        &self.payload
    }

    #[inline]
    pub(crate) const fn payload_mut(&mut self) -> &mut E {
        &mut self.payload
    }

    /// Handle of the anchor this leaf is bound to.
    #[inline]
    #[must_use]
    pub const fn anchor(&self) -> AnchorId {
        self.anchor
    }

    #[inline]
    pub(crate) const fn set_anchor(&mut self, anchor: AnchorId) {
        self.anchor = anchor;
    }

    /// Consume the leaf, returning the payload.
    #[inline]
    #[must_use]
    pub fn into_payload(self) -> E {
        self.payload
    }
}
