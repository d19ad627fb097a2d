//! In-order iteration over a [`BucketedSet`].

use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::slice;

use super::{Bucket, BucketedSet};
use crate::anchor::Anchor;
use crate::index::IndexType;
use crate::leaf::{LeafElement, LeafPayload};

/// Iterator over `(logical index, &payload)` in sequence order.
///
/// Created by [`BucketedSet::iter`].
pub struct Iter<'a, I, E>
where
    I: IndexType,
    E: LeafPayload<I>,
{
    anchors: &'a [Anchor<E::Anchor>],
    buckets: slice::Iter<'a, Bucket<E>>,
    leaves: slice::Iter<'a, LeafElement<E>>,
    remaining: usize,
    _marker: PhantomData<fn() -> I>,
}

impl<'a, I, E> Iter<'a, I, E>
where
    I: IndexType,
    E: LeafPayload<I>,
{
    pub(super) fn new<const WIDTH: usize>(set: &'a BucketedSet<I, E, WIDTH>) -> Self {
        Self {
            anchors: &set.anchors,
            buckets: set.buckets.iter(),
            leaves: slice::Iter::default(),
            remaining: set.len,
            _marker: PhantomData,
        }
    }
}

impl<'a, I, E> Iterator for Iter<'a, I, E>
where
    I: IndexType,
    E: LeafPayload<I>,
{
    type Item = (I, &'a E);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(leaf) = self.leaves.next() {
                self.remaining -= 1;
                let anchor: &Anchor<E::Anchor> = &self.anchors[leaf.anchor().slot()];
                return Some((leaf.payload().index(anchor.state()), leaf.payload()));
            }

            self.leaves = self.buckets.next()?.leaves.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<I, E> ExactSizeIterator for Iter<'_, I, E>
where
    I: IndexType,
    E: LeafPayload<I>,
{
}

impl<I, E> FusedIterator for Iter<'_, I, E>
where
    I: IndexType,
    E: LeafPayload<I>,
{
}

impl<'a, I, E, const WIDTH: usize> IntoIterator for &'a BucketedSet<I, E, WIDTH>
where
    I: IndexType,
    E: LeafPayload<I>,
{
    type Item = (I, &'a E);
    type IntoIter = Iter<'a, I, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
