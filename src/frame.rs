use std::fmt;

use crate::types::Descriptor;

/// A decoded PNG raster, kept in its native color type and bit depth.
/// Color images are 8-bit RGB, depth images 16-bit grayscale, label images
/// 8-bit grayscale in this dataset; the fields carry whatever the file says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub color_type: png::ColorType,
    pub bit_depth: png::BitDepth,
    /// Raw pixel data, rows top to bottom, no padding.
    pub data: Vec<u8>,
}

/// One labeled bounding box from a `-box.txt` file.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub label: String,
    /// `(x1, y1, x2, y2)` corner coordinates.
    pub coordinates: (f32, f32, f32, f32),
}

/// A fully materialized frame: every co-located file of one descriptor,
/// decoded. Owned by the caller; the library never caches frames.
pub struct Frame {
    pub color: Raster,
    pub depth: Raster,
    pub label: Raster,
    /// `Some` for regular sequences; synthetic frames carry no box file.
    pub boxes: Option<Vec<BoundingBox>>,
    /// Contents of the `-meta.mat` file.
    pub meta: matfile::MatFile,
    pub descriptor: Descriptor,
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("descriptor", &self.descriptor)
            .field("color", &(self.color.width, self.color.height))
            .field("depth", &(self.depth.width, self.depth.height))
            .field("label", &(self.label.width, self.label.height))
            .field("boxes", &self.boxes.as_ref().map(Vec::len))
            .finish_non_exhaustive()
    }
}
