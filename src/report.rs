//! Dataset availability report for the CLI.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::inventory::Inventory;
use crate::types::{FileKind, SequenceKind};

/// Per-sequence availability summary built from an inventory snapshot.
#[derive(Debug, Serialize)]
pub struct DatasetReport {
    pub sequences: Vec<SequenceReport>,
    /// Sequences an expected-counts file names that are absent on disk.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SequenceReport {
    pub sequence: String,
    pub kind: SequenceKind,
    pub complete: usize,
    pub incomplete: Vec<IncompleteFrame>,
    /// Frame count the full dataset ships for this sequence, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct IncompleteFrame {
    pub frame: String,
    pub missing: Vec<FileKind>,
}

impl DatasetReport {
    pub fn from_inventory<I: Inventory + ?Sized>(inventory: &I) -> Self {
        let mut sequences = Vec::new();
        for id in inventory.sequences() {
            let frames = match inventory.frames(id) {
                Some(frames) => frames,
                None => continue,
            };

            let mut complete = 0;
            let mut incomplete = Vec::new();
            for (&frame, entry) in frames {
                if entry.is_complete() {
                    complete += 1;
                } else {
                    incomplete.push(IncompleteFrame {
                        frame: format!("{:06}", frame),
                        missing: entry.missing.clone(),
                    });
                }
            }

            sequences.push(SequenceReport {
                sequence: id.dir_name(),
                kind: id.kind(),
                complete,
                incomplete,
                expected: None,
            });
        }
        DatasetReport {
            sequences,
            missing: Vec::new(),
        }
    }

    /// Attach expected totals from [`read_expected_counts`]. Sequences the
    /// counts file names that are not in the inventory are recorded as
    /// missing.
    pub fn apply_expected_counts(&mut self, counts: &BTreeMap<String, u32>) {
        for sequence in &mut self.sequences {
            sequence.expected = counts.get(&sequence.sequence).copied();
        }
        self.missing = counts
            .keys()
            .filter(|name| self.sequences.iter().all(|s| &s.sequence != *name))
            .cloned()
            .collect();
    }

    /// Names of the available sequences, consecutive runs collapsed to
    /// `first - last`.
    pub fn sequence_ranges(&self) -> Vec<String> {
        let names: Vec<&str> = self.sequences.iter().map(|s| s.sequence.as_str()).collect();
        collapse_ranges(&names)
    }

    /// Like [`sequence_ranges`](Self::sequence_ranges), for the missing
    /// sequences.
    pub fn missing_ranges(&self) -> Vec<String> {
        let names: Vec<&str> = self.missing.iter().map(String::as_str).collect();
        collapse_ranges(&names)
    }
}

/// Read expected frame counts per sequence from a text file with lines of
/// the form `0003: 2953` (the `frame_info.txt` distributed alongside the
/// dataset). Blank lines are ignored.
pub fn read_expected_counts<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, u32>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let mut counts = BTreeMap::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let entry = line.trim();
        if entry.is_empty() {
            continue;
        }
        let parsed = entry
            .split_once(": ")
            .and_then(|(name, count)| Some((name, count.parse::<u32>().ok()?)));
        match parsed {
            Some((name, count)) => {
                counts.insert(name.to_string(), count);
            }
            None => {
                return Err(Error::FrameCountFormat {
                    path: path.to_path_buf(),
                    line: number + 1,
                })
            }
        }
    }
    Ok(counts)
}

/// Collapse consecutive numeric names into `first - last` spans. Names that
/// are not numeric (the synthetic sequence) always stand alone.
fn collapse_ranges(names: &[&str]) -> Vec<String> {
    let consecutive = |a: &str, b: &str| match (a.parse::<u32>(), b.parse::<u32>()) {
        (Ok(a), Ok(b)) => b == a + 1,
        _ => false,
    };

    let mut spans = Vec::new();
    let mut start = match names.first() {
        Some(_) => 0,
        None => return spans,
    };
    for index in 1..=names.len() {
        let run_ends = index == names.len() || !consecutive(names[index - 1], names[index]);
        if run_ends {
            if index - start == 1 {
                spans.push(names[start].to_string());
            } else {
                spans.push(format!("{} - {}", names[start], names[index - 1]));
            }
            if index < names.len() {
                start = index;
            }
        }
    }
    spans
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let with_totals = self.sequences.iter().any(|s| s.expected.is_some());

        writeln!(f, "Frame sequences available: {}", self.sequences.len())?;
        writeln!(f, "Available: {}", self.sequence_ranges().join(", "))?;
        if !self.missing.is_empty() {
            writeln!(f, "Missing: {}", self.missing_ranges().join(", "))?;
        }
        writeln!(f)?;
        if with_totals {
            writeln!(f, "sequence: complete/incomplete/dataset total")?;
        } else {
            writeln!(f, "sequence: complete/incomplete")?;
        }
        for sequence in &self.sequences {
            write!(
                f,
                "{:>8}: {}/{}",
                sequence.sequence,
                sequence.complete,
                sequence.incomplete.len()
            )?;
            match sequence.expected {
                Some(expected) => writeln!(f, "/{}", expected)?,
                None => writeln!(f)?,
            }
            for frame in &sequence.incomplete {
                writeln!(f, "          {} missing {:?}", frame.frame, frame.missing)?;
            }
        }
        Ok(())
    }
}
