//! Paint a search result onto the picture its grid was segmented from.
//!
//! _Depends on the `image-grid` feature._

use super::Scene;
use crate::geometry::{map::RenderError, segment::cell_bounds, Point};
use image::{DynamicImage, Rgb, RgbImage};
use std::path::Path;

const PATH: Rgb<u8> = Rgb([255, 220, 0]);
const START: Rgb<u8> = Rgb([46, 204, 64]);
const GOAL: Rgb<u8> = Rgb([255, 65, 54]);

fn fill_cell(image: &mut RgbImage, point: Point, cell_size: u32, color: Rgb<u8>) {
    if point.x < 0 || point.y < 0 {
        return;
    }
    let (left, top, width, height) = cell_bounds(point, cell_size);
    let right = (left + width).min(image.width());
    let bottom = (top + height).min(image.height());
    for y in top..bottom {
        for x in left..right {
            image.put_pixel(x, y, color);
        }
    }
}

/// Highlight a cell together with its orthogonal neighbors.
fn fill_marker(image: &mut RgbImage, point: Point, cell_size: u32, color: Rgb<u8>) {
    fill_cell(image, point, cell_size, color);
    for neighbor in point.orthogonal() {
        fill_cell(image, neighbor, cell_size, color);
    }
}

/// Copy `source` and recolor the cells of the scene's path and endpoints.
///
/// `cell_size` must be the one the grid was segmented with.
pub fn overlay(source: &DynamicImage, scene: &Scene, cell_size: u32) -> RgbImage {
    let mut image = source.to_rgb8();
    for &point in scene.path.unwrap_or_default() {
        fill_cell(&mut image, point, cell_size, PATH);
    }
    if let Some(start) = scene.start {
        fill_marker(&mut image, start, cell_size, START);
    }
    if let Some(goal) = scene.goal {
        fill_marker(&mut image, goal, cell_size, GOAL);
    }
    image
}

/// [`overlay`] and save the result as a png.
pub fn save_overlay(
    source: &DynamicImage,
    scene: &Scene,
    cell_size: u32,
    output: &Path,
) -> Result<(), RenderError> {
    overlay(source, scene, cell_size).save_with_format(output, image::ImageFormat::Png)?;
    tracing::debug!(output = %output.display(), "saved overlay");
    Ok(())
}
