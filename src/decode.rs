//! Per-format artifact decoders used during frame materialization.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use regex::Regex;

use crate::error::AccessError;
use crate::frame::{BoundingBox, Raster};

fn io_error(path: &Path, source: std::io::Error) -> AccessError {
    AccessError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Decode a PNG file into a [`Raster`].
pub fn read_raster(path: &Path) -> Result<Raster, AccessError> {
    let file = File::open(path).map_err(|source| io_error(path, source))?;
    let decoder = png::Decoder::new(BufReader::new(file));

    let png_error = |source| AccessError::Png {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = decoder.read_info().map_err(png_error)?;
    let mut data = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut data).map_err(png_error)?;
    data.truncate(info.buffer_size());

    Ok(Raster {
        width: info.width,
        height: info.height,
        color_type: info.color_type,
        bit_depth: info.bit_depth,
        data,
    })
}

/// Parse a `-box.txt` file: one `label x1 y1 x2 y2` line per box.
pub fn read_boxes(path: &Path) -> Result<Vec<BoundingBox>, AccessError> {
    let contents = std::fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    let pattern =
        Regex::new(r"^([^ ]+) ([0-9.]+) ([0-9.]+) ([0-9.]+) ([0-9.]+)$").expect("valid box pattern");

    let mut boxes = Vec::new();
    for (number, line) in contents.lines().enumerate() {
        let format_error = || AccessError::BoxFormat {
            path: path.to_path_buf(),
            line: number + 1,
        };

        let captures = pattern.captures(line.trim_end()).ok_or_else(format_error)?;
        let coordinate = |index: usize| -> Result<f32, AccessError> {
            captures[index].parse().map_err(|_| format_error())
        };
        boxes.push(BoundingBox {
            label: captures[1].to_string(),
            coordinates: (coordinate(2)?, coordinate(3)?, coordinate(4)?, coordinate(5)?),
        });
    }

    Ok(boxes)
}

/// Parse a `-meta.mat` file (MAT-file v5).
pub fn read_meta(path: &Path) -> Result<matfile::MatFile, AccessError> {
    let file = File::open(path).map_err(|source| io_error(path, source))?;
    matfile::MatFile::parse(BufReader::new(file)).map_err(|source| AccessError::Mat {
        path: path.to_path_buf(),
        source,
    })
}
