use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ParseError;

/// Frame index within a sequence. Zero-padded to six digits on disk.
pub type FrameId = u32;

/// Identifier of a frame sequence: either a numbered directory below
/// `data/`, or the single synthetic `data_syn` directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SequenceId {
    Regular(u32),
    Synthetic,
}

impl SequenceId {
    pub fn kind(&self) -> SequenceKind {
        match self {
            SequenceId::Regular(_) => SequenceKind::Regular,
            SequenceId::Synthetic => SequenceKind::Synthetic,
        }
    }

    /// On-disk directory name (`0007` or `data_syn`).
    pub fn dir_name(&self) -> String {
        match self {
            SequenceId::Regular(n) => format!("{:04}", n),
            SequenceId::Synthetic => "data_syn".to_string(),
        }
    }
}

impl From<u32> for SequenceId {
    fn from(n: u32) -> Self {
        SequenceId::Regular(n)
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dir_name())
    }
}

impl FromStr for SequenceId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "data_syn" {
            return Ok(SequenceId::Synthetic);
        }
        if !s.is_empty() && s.len() <= 4 && s.bytes().all(|b| b.is_ascii_digit()) {
            // length-limited digit string, cannot overflow u32
            return Ok(SequenceId::Regular(s.parse().unwrap()));
        }
        Err(ParseError::InvalidSequenceId(s.to_string()))
    }
}

/// Kind of a sequence. Synthetic frames carry no bounding-box file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SequenceKind {
    Regular,
    Synthetic,
}

impl SequenceKind {
    /// File kinds a frame of this sequence kind must have to be complete.
    pub fn required_files(&self) -> &'static [FileKind] {
        match self {
            SequenceKind::Regular => &[
                FileKind::Color,
                FileKind::Depth,
                FileKind::Label,
                FileKind::Meta,
                FileKind::Box,
            ],
            SequenceKind::Synthetic => &[
                FileKind::Color,
                FileKind::Depth,
                FileKind::Label,
                FileKind::Meta,
            ],
        }
    }
}

/// One of the co-located files making up a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileKind {
    Color,
    Depth,
    Label,
    Meta,
    Box,
}

impl FileKind {
    /// Kind tag as it appears in the file name (`000042-color.png`).
    pub fn tag(&self) -> &'static str {
        match self {
            FileKind::Color => "color",
            FileKind::Depth => "depth",
            FileKind::Label => "label",
            FileKind::Meta => "meta",
            FileKind::Box => "box",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Color | FileKind::Depth | FileKind::Label => "png",
            FileKind::Meta => "mat",
            FileKind::Box => "txt",
        }
    }

    /// File name for `frame` and this kind, e.g. `000042-color.png`.
    pub fn file_name(&self, frame: FrameId) -> String {
        format!("{:06}-{}.{}", frame, self.tag(), self.extension())
    }

    pub fn from_tag(tag: &str) -> Option<FileKind> {
        match tag {
            "color" => Some(FileKind::Color),
            "depth" => Some(FileKind::Depth),
            "label" => Some(FileKind::Label),
            "meta" => Some(FileKind::Meta),
            "box" => Some(FileKind::Box),
            _ => None,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Stable key addressing one frame: sequence plus frame index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Descriptor {
    pub sequence: SequenceId,
    pub frame: FrameId,
}

impl Descriptor {
    pub fn new(sequence: impl Into<SequenceId>, frame: FrameId) -> Self {
        Descriptor {
            sequence: sequence.into(),
            frame,
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:06}", self.sequence, self.frame)
    }
}
