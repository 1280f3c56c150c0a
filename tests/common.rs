#![allow(dead_code)]

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use ycbvideo::{FileKind, SequenceId};

/// A dataset root in a temporary directory, populated with real artifact
/// files so that materialization exercises the actual decoders.
pub struct DatasetFixture {
    dir: TempDir,
}

impl DatasetFixture {
    pub fn new() -> Self {
        DatasetFixture {
            dir: tempfile::tempdir().expect("create tempdir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    fn sequence_dir(&self, sequence: SequenceId) -> PathBuf {
        let dir = match sequence {
            SequenceId::Regular(_) => self.root().join("data").join(sequence.dir_name()),
            SequenceId::Synthetic => self.root().join("data_syn"),
        };
        fs::create_dir_all(&dir).expect("create sequence dir");
        dir
    }

    /// Create an empty sequence directory.
    pub fn add_sequence(&self, sequence: impl Into<SequenceId>) {
        self.sequence_dir(sequence.into());
    }

    /// Write a complete frame (all files its sequence kind requires).
    pub fn add_frame(&self, sequence: impl Into<SequenceId>, frame: u32) {
        let sequence = sequence.into();
        let kinds = sequence.kind().required_files().to_vec();
        self.add_frame_files(sequence, frame, &kinds);
    }

    /// Write only the given files of a frame.
    pub fn add_frame_files(&self, sequence: impl Into<SequenceId>, frame: u32, kinds: &[FileKind]) {
        let dir = self.sequence_dir(sequence.into());
        for kind in kinds {
            let path = dir.join(kind.file_name(frame));
            match kind {
                FileKind::Color => write_png(&path, png::ColorType::Rgb, png::BitDepth::Eight),
                FileKind::Depth => write_png(&path, png::ColorType::Grayscale, png::BitDepth::Sixteen),
                FileKind::Label => write_png(&path, png::ColorType::Grayscale, png::BitDepth::Eight),
                FileKind::Box => write_boxes(&path),
                FileKind::Meta => write_meta(&path),
            }
        }
    }

    /// Drop a file into a sequence directory verbatim.
    pub fn add_raw_file(&self, sequence: impl Into<SequenceId>, name: &str, contents: &[u8]) {
        let dir = self.sequence_dir(sequence.into());
        fs::write(dir.join(name), contents).expect("write raw file");
    }
}

pub const RASTER_WIDTH: u32 = 2;
pub const RASTER_HEIGHT: u32 = 2;

/// Pixel bytes written for every test raster of the given layout.
pub fn raster_data(color_type: png::ColorType, bit_depth: png::BitDepth) -> Vec<u8> {
    let samples = match color_type {
        png::ColorType::Rgb => 3,
        png::ColorType::Grayscale => 1,
        other => panic!("unsupported test color type: {:?}", other),
    };
    let bytes_per_sample = match bit_depth {
        png::BitDepth::Eight => 1,
        png::BitDepth::Sixteen => 2,
        other => panic!("unsupported test bit depth: {:?}", other),
    };
    let len = (RASTER_WIDTH * RASTER_HEIGHT) as usize * samples * bytes_per_sample;
    (0..len).map(|i| (i * 7 % 251) as u8).collect()
}

fn write_png(path: &Path, color_type: png::ColorType, bit_depth: png::BitDepth) {
    let file = fs::File::create(path).expect("create png");
    let mut encoder = png::Encoder::new(BufWriter::new(file), RASTER_WIDTH, RASTER_HEIGHT);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);
    let mut writer = encoder.write_header().expect("write png header");
    writer
        .write_image_data(&raster_data(color_type, bit_depth))
        .expect("write png data");
}

pub const BOX_LINES: &str = "003_cracker_box 126.8 103.9 317.0 283.5\n007_tuna_fish_can 230.0 334.2 282.7 372.9\n";

fn write_boxes(path: &Path) {
    fs::write(path, BOX_LINES).expect("write box file");
}

/// Minimal MAT-file v5: a single 1x1 double array named `factor`.
fn write_meta(path: &Path) {
    let mut bytes = Vec::with_capacity(128 + 8 + 64);

    let mut header = [b' '; 128];
    let text = b"MATLAB 5.0 MAT-file, test fixture";
    header[..text.len()].copy_from_slice(text);
    header[116..124].copy_from_slice(&[0; 8]);
    header[124..126].copy_from_slice(&0x0100u16.to_le_bytes());
    header[126..128].copy_from_slice(b"IM");
    bytes.extend_from_slice(&header);

    // miMATRIX element
    bytes.extend_from_slice(&14u32.to_le_bytes());
    bytes.extend_from_slice(&64u32.to_le_bytes());
    // array flags: class mxDOUBLE
    bytes.extend_from_slice(&6u32.to_le_bytes());
    bytes.extend_from_slice(&8u32.to_le_bytes());
    bytes.extend_from_slice(&6u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    // dimensions: 1 x 1
    bytes.extend_from_slice(&5u32.to_le_bytes());
    bytes.extend_from_slice(&8u32.to_le_bytes());
    bytes.extend_from_slice(&1i32.to_le_bytes());
    bytes.extend_from_slice(&1i32.to_le_bytes());
    // name: "factor", padded to eight bytes
    bytes.extend_from_slice(&1u32.to_le_bytes());
    bytes.extend_from_slice(&6u32.to_le_bytes());
    bytes.extend_from_slice(b"factor\0\0");
    // real part: one f64
    bytes.extend_from_slice(&9u32.to_le_bytes());
    bytes.extend_from_slice(&8u32.to_le_bytes());
    bytes.extend_from_slice(&1.5f64.to_le_bytes());

    fs::write(path, bytes).expect("write meta file");
}
