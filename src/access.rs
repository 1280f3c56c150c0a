//! Unchecked frame materialization.
//!
//! The accessor turns any descriptor into a [`Frame`] by reading the files
//! it names, without consulting an inventory first. This is the low-level
//! escape hatch for callers that build their own descriptor streams; a
//! missing or corrupt file simply surfaces as an [`AccessError`] at the
//! point of access.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::decode;
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::types::{Descriptor, FileKind, FrameId, SequenceId, SequenceKind};

pub(crate) fn validate_directory(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(Error::MissingPath(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(Error::NotADirectory(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}

/// Stateless, uncached descriptor-to-frame materializer. Every call touches
/// disk independently, so independent descriptors may safely be materialized
/// from multiple threads by the caller.
#[derive(Debug, Clone)]
pub struct FrameAccessor {
    root: PathBuf,
}

impl FrameAccessor {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        Ok(FrameAccessor {
            root: validate_directory(root.as_ref())?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the given sequence.
    pub fn sequence_dir(&self, sequence: SequenceId) -> PathBuf {
        match sequence {
            SequenceId::Regular(_) => self.root.join("data").join(sequence.dir_name()),
            SequenceId::Synthetic => self.root.join("data_syn"),
        }
    }

    /// Materialize the frame addressed by `descriptor`.
    ///
    /// Performs no availability or completeness validation; the first file
    /// that cannot be read or decoded aborts the call.
    pub fn frame(&self, descriptor: Descriptor) -> Result<Frame> {
        debug!(%descriptor, "materializing frame");

        let dir = self.sequence_dir(descriptor.sequence);
        let file = |kind: FileKind| dir.join(kind.file_name(descriptor.frame));

        let boxes = match descriptor.sequence.kind() {
            SequenceKind::Regular => Some(decode::read_boxes(&file(FileKind::Box))?),
            SequenceKind::Synthetic => None,
        };

        Ok(Frame {
            color: decode::read_raster(&file(FileKind::Color))?,
            depth: decode::read_raster(&file(FileKind::Depth))?,
            label: decode::read_raster(&file(FileKind::Label))?,
            boxes,
            meta: decode::read_meta(&file(FileKind::Meta))?,
            descriptor,
        })
    }
}

/// Free-standing escape hatch: materialize one frame from bare identifiers,
/// bypassing the selection grammar and all validation.
///
/// `sequence` accepts a plain integer for a regular sequence or
/// [`SequenceId::Synthetic`] for `data_syn`.
pub fn load_frame<P, S>(root: P, sequence: S, frame: FrameId) -> Result<Frame>
where
    P: AsRef<Path>,
    S: Into<SequenceId>,
{
    FrameAccessor::new(root)?.frame(Descriptor::new(sequence, frame))
}
