//! Top-level entry point tying parsing, inventory, combination and access
//! together.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::access::{validate_directory, FrameAccessor};
use crate::collection::FrameCollection;
use crate::combine;
use crate::error::{Error, Result};
use crate::inventory::DiskInventory;
use crate::parse;
use crate::selector::CombinedSelector;

/// Read-only view of one dataset root.
///
/// Frames are selected with expressions of the form
/// `<sequence selection>/<frame selection>`, where each side is a single
/// identifier (`7`), a list (`[1,2,3]`), a slice-style range (`42:56:2`,
/// any field omissible, negative step reverses), or `*` for everything
/// available. On the sequence side, `data` selects every regular sequence
/// and `data_syn` the synthetic one.
///
/// Every selected frame is checked against the on-disk inventory up front:
/// named identifiers must exist and be complete before the first frame is
/// materialized, so missing files surface immediately instead of hours into
/// a training run.
pub struct Loader {
    root: PathBuf,
}

impl Loader {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        Ok(Loader {
            root: validate_directory(root.as_ref())?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Select frames with a list of expressions, in the given order.
    ///
    /// The returned collection is lazy: descriptors are fully resolved and
    /// validated here, but each frame is only read from disk when accessed.
    pub fn frames<S: AsRef<str>>(&self, expressions: &[S]) -> Result<FrameCollection> {
        let selectors = parse::parse_all(expressions)?;
        self.collect(&selectors)
    }

    /// Select frames with expressions read from a text file, one per line
    /// (blank and `#` comment lines ignored). A relative path is resolved
    /// against the dataset root.
    pub fn frames_from_file<P: AsRef<Path>>(&self, file: P) -> Result<FrameCollection> {
        let path = file.as_ref();
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        if !path.exists() {
            return Err(Error::MissingPath(path));
        }
        if !path.is_file() {
            return Err(Error::NotAFile(path));
        }

        let selectors = parse::parse_expression_file(&path)?;
        self.collect(&selectors)
    }

    fn collect(&self, selectors: &[CombinedSelector]) -> Result<FrameCollection> {
        debug!(root = %self.root.display(), selectors = selectors.len(), "scanning dataset");
        let inventory = DiskInventory::scan(&self.root)?;

        let descriptors = combine::descriptors(&inventory, selectors)?;
        info!(frames = descriptors.len(), "selection resolved");

        Ok(FrameCollection::new(
            FrameAccessor::new(&self.root)?,
            descriptors,
        ))
    }
}
