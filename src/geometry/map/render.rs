use crate::geometry::{tile::ToRgb, Point};

/// Edge length in pixels of one cell, including its 1px gutter on the right and bottom.
pub const CELL_PIXELS: usize = 8;

/// Blank border around the whole image.
const MARGIN: usize = CELL_PIXELS / 2;

/// How each cell gets painted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Style {
    /// Fill the entire cell, gutter included.
    Fill,
    /// Fill the cell, leaving a 1px black grid between cells.
    #[default]
    Grid,
    /// Paint a 3px wide plus sign in the middle of the cell.
    Cross,
}

impl Style {
    /// `true` when the pixel at `(dx, dy)` within a cell gets the cell's color.
    fn covers(self, dx: usize, dy: usize) -> bool {
        let inner = CELL_PIXELS - 1;
        let center = inner / 2;
        match self {
            Style::Fill => true,
            Style::Grid => dx < inner && dy < inner,
            Style::Cross => {
                dx < inner && dy < inner && (dx.abs_diff(center) <= 1 || dy.abs_diff(center) <= 1)
            }
        }
    }
}

/// An rgb pixel buffer sized for a grid.
pub(crate) struct Canvas {
    width: u16,
    height: u16,
    subpixels: Vec<u8>,
}

impl Canvas {
    /// `None` when the image would not fit the 16-bit dimensions of a gif.
    pub(crate) fn for_grid(width: usize, height: usize) -> Option<Canvas> {
        let pixels = |cells: usize| {
            cells
                .checked_mul(CELL_PIXELS)?
                .checked_add(2 * MARGIN)
                .and_then(|pixels| u16::try_from(pixels).ok())
        };
        let width = pixels(width)?;
        let height = pixels(height)?;
        Some(Canvas {
            width,
            height,
            subpixels: vec![0; width as usize * height as usize * 3],
        })
    }

    /// Paint the cell at `point` in the color of `tile`.
    pub(crate) fn paint<Tile: ToRgb>(&mut self, point: Point, tile: &Tile, style: Style) {
        let rgb = tile.to_rgb();
        let left = MARGIN + point.x as usize * CELL_PIXELS;
        let top = MARGIN + point.y as usize * CELL_PIXELS;
        let row_pixels = self.width as usize;

        for dy in 0..CELL_PIXELS {
            for dx in (0..CELL_PIXELS).filter(|&dx| style.covers(dx, dy)) {
                let idx = ((top + dy) * row_pixels + left + dx) * 3;
                self.subpixels[idx..idx + 3].copy_from_slice(&rgb);
            }
        }
    }

    pub(crate) fn into_frame(self) -> gif::Frame<'static> {
        gif::Frame::from_rgb(self.width, self.height, &self.subpixels)
    }
}

pub type Encoder = gif::Encoder<std::io::BufWriter<std::fs::File>>;

#[cfg(test)]
mod tests {
    use super::*;

    struct White;

    impl ToRgb for White {
        fn to_rgb(&self) -> [u8; 3] {
            [255, 255, 255]
        }
    }

    fn lit(canvas: &Canvas) -> usize {
        canvas
            .subpixels
            .chunks(3)
            .filter(|pixel| pixel[0] == 255)
            .count()
    }

    #[test]
    fn test_dimensions_include_margin() {
        let canvas = Canvas::for_grid(3, 2).unwrap();
        assert_eq!(canvas.width as usize, 3 * CELL_PIXELS + 2 * MARGIN);
        assert_eq!(canvas.height as usize, 2 * CELL_PIXELS + 2 * MARGIN);
    }

    #[test]
    fn test_oversized_grids_do_not_fit() {
        let widest = (u16::MAX as usize - 2 * MARGIN) / CELL_PIXELS;
        let canvas = Canvas::for_grid(widest, 1).unwrap();
        assert_eq!(canvas.width as usize, widest * CELL_PIXELS + 2 * MARGIN);
        assert!(Canvas::for_grid(widest + 1, 1).is_none());
        assert!(Canvas::for_grid(1, 8200).is_none());
        assert!(Canvas::for_grid(usize::MAX, 1).is_none());
    }

    #[test]
    fn test_fill_covers_whole_cell() {
        let mut canvas = Canvas::for_grid(1, 1).unwrap();
        canvas.paint(Point::new(0, 0), &White, Style::Fill);
        assert_eq!(lit(&canvas), CELL_PIXELS * CELL_PIXELS);
    }

    #[test]
    fn test_grid_leaves_gutters() {
        let mut canvas = Canvas::for_grid(2, 2).unwrap();
        for y in 0..2 {
            for x in 0..2 {
                canvas.paint(Point::new(x, y), &White, Style::Grid);
            }
        }
        assert_eq!(lit(&canvas), 4 * (CELL_PIXELS - 1) * (CELL_PIXELS - 1));
    }

    #[test]
    fn test_cross_is_a_plus() {
        let mut canvas = Canvas::for_grid(1, 1).unwrap();
        canvas.paint(Point::new(0, 0), &White, Style::Cross);
        // two 3px bands across a 7px square, overlapping in a 3x3 center
        assert_eq!(lit(&canvas), 2 * 3 * 7 - 9);
    }
}
