use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::{FileKind, FrameId, SequenceId};

pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type of the crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Select(#[from] SelectError),
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("path does not exist: {0}")]
    MissingPath(PathBuf),
    #[error("path is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("path is not a file: {0}")]
    NotAFile(PathBuf),
    #[error("index {index} out of range for collection of {len} frames")]
    OutOfRange { index: usize, len: usize },
    #[error("malformed frame count entry at line {line} of {path}")]
    FrameCountFormat { path: PathBuf, line: usize },
}

/// Malformed selection expression text. Parsing is pure; these errors never
/// depend on the dataset contents.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("expression contains no '/': {0}")]
    NoDelimiter(String),
    #[error("expression must contain only one '/': {0}")]
    ExtraDelimiter(String),
    #[error("no {axis} selection given: {expression}")]
    EmptyPart { axis: Axis, expression: String },
    #[error("invalid {axis} selection '{part}'")]
    InvalidPart { axis: Axis, part: String },
    #[error("range step must not be 0: {0}")]
    ZeroStep(String),
    #[error("range bounds contradict step direction: {0}")]
    InvertedRange(String),
    #[error("invalid sequence identifier: {0}")]
    InvalidSequenceId(String),
    #[error("no selection expressions given")]
    EmptyExpressionList,
    #[error("invalid selection expression at index {index}: {source}")]
    AtIndex {
        index: usize,
        #[source]
        source: Box<ParseError>,
    },
    #[error("invalid selection expression at line {line} of {path}: {source}")]
    InFile {
        path: PathBuf,
        line: usize,
        #[source]
        source: Box<ParseError>,
    },
}

/// Selection text is well-formed but cannot be satisfied by the inventory.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("expression '{expression}' (index {index}): sequence {sequence} is not available")]
    SequenceUnavailable {
        index: usize,
        expression: String,
        sequence: String,
    },
    #[error("expression '{expression}' (index {index}): frame {sequence}/{frame:06} is not available")]
    FrameUnavailable {
        index: usize,
        expression: String,
        sequence: SequenceId,
        frame: FrameId,
    },
    #[error(
        "expression '{expression}' (index {index}): frame {sequence}/{frame:06} is missing files: {missing:?}"
    )]
    IncompleteFrame {
        index: usize,
        expression: String,
        sequence: SequenceId,
        frame: FrameId,
        missing: Vec<FileKind>,
    },
    #[error("expression '{expression}' (index {index}) selects no elements")]
    EmptySelection { index: usize, expression: String },
}

/// Axis-local resolution failure, before batch context (selector index,
/// surrounding sequence) is attached.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("{axis} {id} is not available")]
    Unavailable { axis: Axis, id: u32 },
    #[error("the data_syn sequence is not available")]
    SyntheticUnavailable,
    #[error("{axis} {id} is incomplete")]
    Incomplete { axis: Axis, id: u32 },
    #[error("selection matches no elements")]
    Empty,
}

/// I/O or decode failure while materializing a frame. Raised only by the
/// unchecked accessor path; the validated path never reaches a missing file
/// unless the dataset changed after the inventory snapshot.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode PNG {path}: {source}")]
    Png {
        path: PathBuf,
        #[source]
        source: png::DecodingError,
    },
    #[error("failed to parse MAT-file {path}: {source:?}")]
    Mat { path: PathBuf, source: matfile::Error },
    #[error("invalid bounding-box line {line} in {path}")]
    BoxFormat { path: PathBuf, line: usize },
}

/// Which side of a `<sequence>/<frame>` expression an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Sequence,
    Frame,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Axis::Sequence => "sequence",
            Axis::Frame => "frame",
        })
    }
}
