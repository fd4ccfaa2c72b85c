//! Derive a [`SquareGrid`] from a picture.
//!
//! _Depends on the `image-grid` feature._
//!
//! The picture is divided into square blocks of `cell_size` pixels; each block
//! becomes one grid cell. A block whose mean brightness is below the
//! threshold becomes a wall, so dark strokes on a light background read as
//! obstacles.

use crate::geometry::{Point, SquareGrid};
use image::{DynamicImage, GrayImage};
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a picture is cut into grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segmentation {
    /// Edge length of one grid cell, in pixels.
    #[serde(default = "Segmentation::default_cell_size")]
    pub cell_size: u32,
    /// Blocks with a mean luma below this become walls.
    #[serde(default = "Segmentation::default_threshold")]
    pub threshold: u8,
}

impl Segmentation {
    fn default_cell_size() -> u32 {
        8
    }

    fn default_threshold() -> u8 {
        128
    }
}

impl Default for Segmentation {
    fn default() -> Self {
        Segmentation {
            cell_size: Self::default_cell_size(),
            threshold: Self::default_threshold(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SegmentError {
    #[error("reading image")]
    Image(#[from] image::ImageError),
    #[error("cell size must be at least one pixel")]
    ZeroCellSize,
    #[error("a {width}x{height} image holds no {cell_size}px cells")]
    TooSmall {
        width: u32,
        height: u32,
        cell_size: u32,
    },
}

/// The pixel rectangle `(left, top, width, height)` covered by a grid cell.
///
/// Trailing pixels which do not fill a whole cell are not part of any cell.
pub fn cell_bounds(point: Point, cell_size: u32) -> (u32, u32, u32, u32) {
    (
        point.x as u32 * cell_size,
        point.y as u32 * cell_size,
        cell_size,
        cell_size,
    )
}

/// Load the image at `path` and segment it.
pub fn from_path(path: &Path, segmentation: Segmentation) -> Result<SquareGrid, SegmentError> {
    let image = image::open(path)?;
    from_image(&image, segmentation)
}

/// Segment an in-memory image.
pub fn from_image(
    image: &DynamicImage,
    segmentation: Segmentation,
) -> Result<SquareGrid, SegmentError> {
    from_luma(&image.to_luma8(), segmentation)
}

/// Segment a greyscale image.
pub fn from_luma(image: &GrayImage, segmentation: Segmentation) -> Result<SquareGrid, SegmentError> {
    let Segmentation {
        cell_size,
        threshold,
    } = segmentation;
    if cell_size == 0 {
        return Err(SegmentError::ZeroCellSize);
    }

    let width = image.width() / cell_size;
    let height = image.height() / cell_size;
    if width == 0 || height == 0 {
        return Err(SegmentError::TooSmall {
            width: image.width(),
            height: image.height(),
            cell_size,
        });
    }

    let mut grid = SquareGrid::new(width as usize, height as usize);
    let area = u64::from(cell_size) * u64::from(cell_size);
    for (y, x) in iproduct!(0..height, 0..width) {
        let point = Point::new(x as i32, y as i32);
        let (left, top, w, h) = cell_bounds(point, cell_size);
        let total: u64 = iproduct!(top..top + h, left..left + w)
            .map(|(py, px)| u64::from(image.get_pixel(px, py).0[0]))
            .sum();
        if total / area < u64::from(threshold) {
            grid.add_wall(point);
        }
    }

    tracing::debug!(
        width,
        height,
        walls = grid.walls().count(),
        "segmented image into grid"
    );
    Ok(grid)
}
