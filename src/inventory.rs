//! Dataset inventory: which sequences and frames exist on disk, and which
//! files each frame has.
//!
//! An inventory is built once per resolution call and treated as an
//! immutable snapshot; resolution never re-scans mid-call. The trait keeps
//! resolution testable against purely in-memory inventories.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::types::{FileKind, FrameId, SequenceId, SequenceKind};

/// Availability record for one frame: which required files are missing.
/// An empty list means the frame is complete for its sequence's kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameEntry {
    pub missing: Vec<FileKind>,
}

impl FrameEntry {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Read-only snapshot of the dataset contents.
pub trait Inventory {
    /// All sequence identifiers, regular ones ascending, synthetic last.
    fn sequences(&self) -> Vec<SequenceId>;

    /// Frames of one sequence, keyed ascending. `None` if the sequence
    /// itself does not exist.
    fn frames(&self, sequence: SequenceId) -> Option<&BTreeMap<FrameId, FrameEntry>>;
}

type SequenceMap = BTreeMap<SequenceId, BTreeMap<FrameId, FrameEntry>>;

/// Inventory built by scanning a dataset root on disk.
///
/// Layout: `<root>/data/<NNNN>/` holds the regular sequences,
/// `<root>/data_syn/` the synthetic one. Frame files are named
/// `<NNNNNN>-<kind>.<ext>`; anything else in a sequence directory is
/// ignored.
pub struct DiskInventory {
    root: PathBuf,
    sequences: SequenceMap,
}

impl DiskInventory {
    /// Scan `root` once and capture the result.
    pub fn scan<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::scan_inner(root.as_ref(), false)
    }

    /// Like [`scan`](Self::scan), with a progress bar over sequence
    /// directories for interactive use.
    pub fn scan_with_progress<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::scan_inner(root.as_ref(), true)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn scan_inner(root: &Path, progress: bool) -> Result<Self> {
        let mut directories: Vec<(SequenceId, PathBuf)> = Vec::new();

        let data_dir = root.join("data");
        if data_dir.is_dir() {
            for entry in fs::read_dir(&data_dir)? {
                let path = entry?.path();
                let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                if !path.is_dir() {
                    continue;
                }
                if name.len() == 4 && name.bytes().all(|b| b.is_ascii_digit()) {
                    directories.push((SequenceId::Regular(name.parse().unwrap()), path));
                } else {
                    debug!(directory = name, "skipping non-sequence directory");
                }
            }
        } else {
            debug!(path = %data_dir.display(), "no data directory");
        }

        let synthetic_dir = root.join("data_syn");
        if synthetic_dir.is_dir() {
            directories.push((SequenceId::Synthetic, synthetic_dir));
        }

        let bar = if progress {
            let bar = ProgressBar::new(directories.len() as u64);
            let style = ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )
            .expect("valid progress template")
            .progress_chars("#>-");
            bar.set_style(style);
            bar.set_message("scanning sequences");
            Some(bar)
        } else {
            None
        };

        let file_pattern =
            Regex::new(r"^([0-9]{6})-([a-z]+)\.(png|txt|mat)$").expect("valid file pattern");

        let mut sequences = SequenceMap::new();
        for (id, path) in directories {
            if let Some(bar) = &bar {
                bar.set_message(id.dir_name());
            }
            let frames = scan_sequence(&path, id.kind(), &file_pattern)?;
            debug!(sequence = %id, frames = frames.len(), "scanned sequence");
            sequences.insert(id, frames);
            if let Some(bar) = &bar {
                bar.inc(1);
            }
        }
        if let Some(bar) = &bar {
            bar.finish_and_clear();
        }

        Ok(DiskInventory {
            root: root.to_path_buf(),
            sequences,
        })
    }
}

fn scan_sequence(
    path: &Path,
    kind: SequenceKind,
    file_pattern: &Regex,
) -> Result<BTreeMap<FrameId, FrameEntry>> {
    let mut present: BTreeMap<FrameId, Vec<FileKind>> = BTreeMap::new();

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        let Some(captures) = file_pattern.captures(name) else {
            continue;
        };
        // six digits, cannot overflow
        let frame: FrameId = captures[1].parse().unwrap();
        if let Some(file_kind) = FileKind::from_tag(&captures[2]) {
            present.entry(frame).or_default().push(file_kind);
        }
    }

    let frames = present
        .into_iter()
        .map(|(frame, kinds)| {
            let missing: Vec<FileKind> = kind
                .required_files()
                .iter()
                .copied()
                .filter(|required| !kinds.contains(required))
                .collect();
            (frame, FrameEntry { missing })
        })
        .collect();

    Ok(frames)
}

impl Inventory for DiskInventory {
    fn sequences(&self) -> Vec<SequenceId> {
        self.sequences.keys().copied().collect()
    }

    fn frames(&self, sequence: SequenceId) -> Option<&BTreeMap<FrameId, FrameEntry>> {
        self.sequences.get(&sequence)
    }
}

/// In-memory inventory for tests and synthetic datasets.
#[derive(Debug, Default)]
pub struct MemoryInventory {
    sequences: SequenceMap,
}

impl MemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sequence without any frames.
    pub fn insert_sequence(&mut self, sequence: impl Into<SequenceId>) -> &mut Self {
        self.sequences.entry(sequence.into()).or_default();
        self
    }

    /// Register a complete frame.
    pub fn insert_complete(&mut self, sequence: impl Into<SequenceId>, frame: FrameId) -> &mut Self {
        self.insert_frame(sequence, frame, Vec::new())
    }

    /// Register a frame with the given missing files (incomplete unless the
    /// list is empty).
    pub fn insert_frame(
        &mut self,
        sequence: impl Into<SequenceId>,
        frame: FrameId,
        missing: Vec<FileKind>,
    ) -> &mut Self {
        self.sequences
            .entry(sequence.into())
            .or_default()
            .insert(frame, FrameEntry { missing });
        self
    }
}

impl Inventory for MemoryInventory {
    fn sequences(&self) -> Vec<SequenceId> {
        self.sequences.keys().copied().collect()
    }

    fn frames(&self, sequence: SequenceId) -> Option<&BTreeMap<FrameId, FrameEntry>> {
        self.sequences.get(&sequence)
    }
}
