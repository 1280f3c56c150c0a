//! Read-only, memory-bounded access to the YCB-Video dataset.
//!
//! The dataset is a directory tree of numbered frame sequences, each holding
//! numbered frames; a frame is the fixed set of co-located files sharing one
//! index (`000042-color.png`, `000042-depth.png`, ...). This crate lets a
//! consumer pick an arbitrary subset of frames with a small expression
//! language and iterate over it one frame at a time, never holding the
//! whole dataset in memory:
//!
//! ```no_run
//! use ycbvideo::Loader;
//!
//! let loader = Loader::new("/path/to/dataset")?;
//! let frames = loader.frames(&["data_syn/*", "7/[42,43]", "1:10/::2"])?;
//! for frame in &frames {
//!     let frame = frame?;
//!     // work with frame.color, frame.depth, frame.boxes, ...
//! }
//! # Ok::<(), ycbvideo::Error>(())
//! ```
//!
//! Selection is validated against the on-disk inventory before the first
//! frame is read: every identifier named in an expression must exist and
//! have all files its sequence kind requires. [`load_frame`] is the
//! unchecked escape hatch that skips all of that.

mod access;
mod collection;
mod combine;
mod decode;
mod error;
mod frame;
mod inventory;
mod loader;
mod parse;
mod report;
mod selector;
mod types;

pub use access::{load_frame, FrameAccessor};
pub use collection::{FrameCollection, Frames};
pub use combine::descriptors;
pub use error::{AccessError, Axis, Error, ParseError, ResolveError, Result, SelectError};
pub use frame::{BoundingBox, Frame, Raster};
pub use inventory::{DiskInventory, FrameEntry, Inventory, MemoryInventory};
pub use loader::Loader;
pub use parse::{parse, parse_all, parse_expression_file};
pub use report::{read_expected_counts, DatasetReport, IncompleteFrame, SequenceReport};
pub use selector::{CombinedSelector, Element, Selector};
pub use types::{Descriptor, FileKind, FrameId, SequenceId, SequenceKind};
