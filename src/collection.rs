//! The lazily materialized frame collection handed to consumers.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::access::FrameAccessor;
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::types::Descriptor;

/// An ordered, indexable collection of frames, materialized one at a time.
///
/// The collection owns only the descriptor list; each frame is loaded from
/// disk when requested and handed to the caller, never cached. Iteration is
/// restartable: [`iter`](Self::iter) can be called any number of times.
pub struct FrameCollection {
    accessor: FrameAccessor,
    descriptors: Vec<Descriptor>,
}

impl FrameCollection {
    pub(crate) fn new(accessor: FrameAccessor, descriptors: Vec<Descriptor>) -> Self {
        FrameCollection {
            accessor,
            descriptors,
        }
    }

    /// Number of selected frames. Does not touch disk.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// The underlying descriptor order, for custom replay or filtering.
    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// Materialize the frame at `index` in the current order.
    pub fn get(&self, index: usize) -> Result<Frame> {
        let descriptor = self
            .descriptors
            .get(index)
            .copied()
            .ok_or(Error::OutOfRange {
                index,
                len: self.descriptors.len(),
            })?;
        self.accessor.frame(descriptor)
    }

    /// Materialize an arbitrary descriptor through this collection's
    /// accessor, validated or not.
    pub fn frame(&self, descriptor: Descriptor) -> Result<Frame> {
        self.accessor.frame(descriptor)
    }

    /// Permute the descriptor order uniformly at random. A seed makes the
    /// permutation reproducible across runs; without one the order is
    /// unspecified. Applied to the final combined order, never per selector.
    pub fn shuffle(&mut self, seed: Option<u64>) {
        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        self.descriptors.shuffle(&mut rng);
    }

    /// Lazy iteration over all frames in the current order. Materialization
    /// errors surface at the element where they occur.
    pub fn iter(&self) -> Frames<'_> {
        Frames {
            collection: self,
            position: 0,
        }
    }
}

/// Restartable lazy frame iterator borrowed from a [`FrameCollection`].
pub struct Frames<'a> {
    collection: &'a FrameCollection,
    position: usize,
}

impl Iterator for Frames<'_> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        let descriptor = *self.collection.descriptors.get(self.position)?;
        self.position += 1;
        Some(self.collection.accessor.frame(descriptor))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.collection.descriptors.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}

impl<'a> IntoIterator for &'a FrameCollection {
    type Item = Result<Frame>;
    type IntoIter = Frames<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
