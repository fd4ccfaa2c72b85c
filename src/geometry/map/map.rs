use super::tile::DisplayWidth;
use crate::geometry::Point;
use std::{
    convert::TryFrom,
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

#[cfg(feature = "map-render")]
use {
    super::{
        render::{Canvas, Encoder},
        tile::ToRgb,
        Style,
    },
    std::path::Path,
};

/// A Map keeps track of a rectangular tile grid.
///
/// Its coordinate system puts the origin in the upper left: row `0` is the
/// first line of its text form, and `y` grows downward.
///
/// ## Entry Points
///
/// - [`Map::new`] or [`Map::procedural`] build a map from dimensions.
/// - When a map is described as text, use [`Map::try_from`].
///
/// ## Panics
///
/// Several internal methods assume that the width and height of the map can be
/// represented in an `i32`. Very large maps may panic if that assumption is violated.
#[derive(Clone, Default)]
pub struct Map<Tile> {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
}

impl<Tile> Map<Tile> {
    /// Procedurally create a new `Map` from a function.
    pub fn procedural(width: usize, height: usize, procedure: impl Fn(Point) -> Tile) -> Map<Tile> {
        let area = width * height;
        let mut map = Map {
            tiles: Vec::with_capacity(area),
            width,
            height,
        };
        for idx in 0..area {
            let point = map.index2point(idx);
            map.tiles.push(procedure(point));
        }
        map
    }

    /// Width of this map.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of this map.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Iterate over the points and tiles of this map, row by row from the top.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Tile)> {
        let index2point = self.make_index2point();
        self.tiles
            .iter()
            .enumerate()
            .map(move |(idx, tile)| (index2point(idx), tile))
    }

    /// Iterate over the points of this map without depending on the lifetime of `self`.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let index2point = self.make_index2point();
        (0..self.tiles.len()).map(index2point)
    }

    /// `true` when a point is legal within the bounds of this map.
    #[inline]
    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }

    /// The tile at `point`, or `None` when it is out of bounds.
    pub fn get(&self, point: Point) -> Option<&Tile> {
        self.in_bounds(point)
            .then(|| &self.tiles[self.point2index(point.x as usize, point.y as usize)])
    }

    /// convert a 2d point into a 1d index into the tiles
    fn point2index(&self, x: usize, y: usize) -> usize {
        x + (y * self.width)
    }

    /// convert a 1d index in the tiles into a 2d point
    fn index2point(&self, idx: usize) -> Point {
        (idx % self.width, idx / self.width).into()
    }

    /// make a function which converts a 1d index in the tiles into a 2d point without borrowing self
    fn make_index2point(&self) -> impl Fn(usize) -> Point {
        let width = self.width;
        move |idx| (idx % width, idx / width).into()
    }
}

impl<Tile: Clone + Default> Map<Tile> {
    /// Create a new map of the specified dimensions, filled with default tiles.
    #[inline]
    pub fn new(width: usize, height: usize) -> Map<Tile> {
        Map {
            tiles: vec![Tile::default(); width * height],
            width,
            height,
        }
    }
}

impl<Tile> fmt::Debug for Map<Tile> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(&format!("Map<{}>", std::any::type_name::<Tile>()))
            .field("width", &self.width)
            .field("height", &self.height)
            .field("tiles", &format_args!("[...; {}]", self.tiles.len()))
            .finish()
    }
}

impl<Tile: PartialEq> PartialEq for Map<Tile> {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.tiles == other.tiles
    }
}

impl<Tile: Eq> Eq for Map<Tile> {}

impl<Tile, Row> From<&[Row]> for Map<Tile>
where
    Tile: Clone,
    Row: AsRef<[Tile]>,
{
    /// Convert an input 2d array into a map.
    ///
    /// The input array must be arranged with the y axis as the outer array,
    /// so `source[0][0]` is the upper left corner of the map.
    ///
    /// Panics if the input array is not rectangular.
    fn from(source: &[Row]) -> Map<Tile> {
        let height = source.len();
        if height == 0 {
            return Map {
                tiles: Vec::new(),
                width: 0,
                height: 0,
            };
        }

        let width = source[0].as_ref().len();
        assert!(
            source.iter().all(|row| row.as_ref().len() == width),
            "input must be rectangular"
        );

        let mut tiles = Vec::with_capacity(width * height);
        for row in source.iter() {
            tiles.extend(row.as_ref().iter().cloned());
        }

        Map {
            tiles,
            width,
            height,
        }
    }
}

impl<Tile> Map<Tile>
where
    Tile: Clone + DisplayWidth + FromStr,
    <Tile as FromStr>::Err: 'static + std::error::Error + Send + Sync,
{
    /// Try to convert the contents of a reader into a map.
    ///
    /// We don't actually `impl<T, R> TryFrom<R> for Map<T>` because there's a
    /// coherence conflict with the stdlib blanket impl
    ///
    /// ```rust,ignore
    /// impl<T, U> std::convert::TryFrom<U> for T where U: std::convert::Into<T>;
    /// ```
    ///
    /// Blank lines are skipped. The first line read is the top row.
    pub fn try_from<R>(input: R) -> Result<Self, MapConversionErr>
    where
        R: std::io::BufRead,
    {
        let mut arr = Vec::new();

        for line in input.lines() {
            let line = line?;
            let line = line.trim_end();

            let mut row = Vec::with_capacity(line.len() / Tile::DISPLAY_WIDTH);
            for chunk in Tile::chunks(line) {
                row.push(Tile::from_str(&chunk).map_err(|err| {
                    MapConversionErr::TileConversion(Box::new(err), chunk.to_string())
                })?);
            }
            if !row.is_empty() {
                arr.push(row);
            }
        }

        if !arr.is_empty() {
            let width = arr[0].len();
            if !arr.iter().all(|row| row.len() == width) {
                return Err(MapConversionErr::NotRectangular);
            }
        }

        Ok(Map::from(arr.as_slice()))
    }
}

impl<Tile> TryFrom<&str> for Map<Tile>
where
    Tile: Clone + DisplayWidth + FromStr,
    <Tile as FromStr>::Err: 'static + std::error::Error + Send + Sync,
{
    type Error = MapConversionErr;

    /// the input should be in natural graphical order:
    /// its first characters are the top left.
    fn try_from(input: &str) -> Result<Self, Self::Error> {
        <Self>::try_from(input.as_bytes())
    }
}

impl<Tile> Index<Point> for Map<Tile> {
    type Output = Tile;

    /// Panics if `point` is out of bounds.
    fn index(&self, point: Point) -> &Tile {
        assert!(self.in_bounds(point), "point {point} is out of bounds");
        &self.tiles[self.point2index(point.x as usize, point.y as usize)]
    }
}

impl<Tile> IndexMut<Point> for Map<Tile> {
    /// Panics if `point` is out of bounds.
    fn index_mut(&mut self, point: Point) -> &mut Tile {
        assert!(self.in_bounds(point), "point {point} is out of bounds");
        let idx = self.point2index(point.x as usize, point.y as usize);
        &mut self.tiles[idx]
    }
}

impl<Tile> fmt::Display for Map<Tile>
where
    Tile: fmt::Display + DisplayWidth,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.width.max(1)) {
            for tile in row {
                write!(f, "{:width$}", tile, width = Tile::DISPLAY_WIDTH)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(feature = "map-render")]
impl<Tile> Map<Tile>
where
    Tile: ToRgb,
{
    /// Paint every tile of this map onto a [`gif::Frame`].
    pub(crate) fn render_frame(&self, style: Style) -> Result<gif::Frame<'static>, RenderError> {
        let mut canvas =
            Canvas::for_grid(self.width, self.height).ok_or(RenderError::TooLarge {
                width: self.width,
                height: self.height,
            })?;
        for (point, tile) in self.iter() {
            canvas.paint(point, tile, style);
        }
        Ok(canvas.into_frame())
    }

    /// Render this map as a still image into an output file.
    ///
    /// _Depends on the `map-render` feature._
    ///
    /// The output image is a gif under all circumstances. It is useful, though
    /// unenforced, that the output file name matches `*.gif`.
    pub fn render(&self, output: &Path, style: Style) -> Result<(), RenderError> {
        let frame = self.render_frame(style)?;
        let file = std::io::BufWriter::new(std::fs::File::create(output)?);
        let mut encoder: Encoder = gif::Encoder::new(file, frame.width, frame.height, &[])?;
        encoder.write_frame(&frame)?;
        tracing::debug!(
            output = %output.display(),
            width = frame.width,
            height = frame.height,
            "rendered gif"
        );
        Ok(())
    }
}

/// An error which can arise during rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("a {width}x{height} map is too large to render")]
    TooLarge { width: usize, height: usize },
    #[cfg(feature = "map-render")]
    #[error("encoding gif")]
    Gif(#[from] gif::EncodingError),
    #[cfg(feature = "image-grid")]
    #[error("encoding image")]
    Image(#[from] image::ImageError),
}

#[derive(Debug, thiserror::Error)]
pub enum MapConversionErr {
    #[error("converting tile from {1:?}")]
    TileConversion(
        #[source] Box<dyn 'static + std::error::Error + Send + Sync>,
        String,
    ),
    #[error("map must be rectangular")]
    NotRectangular,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tile::Terrain;
    use std::collections::HashSet;

    #[test]
    fn test_procedural() {
        let map = Map::procedural(2, 2, |point| point.x + point.y);
        assert_eq!(map.width, 2);
        assert_eq!(map.height, 2);
        assert_eq!(map.tiles, vec![0, 1, 1, 2]);
        assert!(map.iter().all(|(point, &tile)| point.x + point.y == tile));
    }

    #[test]
    fn test_point_index_conversion() {
        const EDGE: usize = 64;
        const AREA: usize = EDGE * EDGE;

        let map = Map::<()>::new(EDGE, EDGE);
        let mut emitted_points = HashSet::new();
        for idx in 0..AREA {
            let point = map.index2point(idx);
            assert!(
                emitted_points.insert(point),
                "no duplicate point should ever be emitted"
            );
            assert_eq!(idx, map.point2index(point.x as usize, point.y as usize));
        }
    }

    #[test]
    fn test_in_bounds() {
        let map = Map::<()>::new(3, 2);
        assert!(map.in_bounds(Point::new(0, 0)));
        assert!(map.in_bounds(Point::new(2, 1)));
        assert!(!map.in_bounds(Point::new(3, 1)));
        assert!(!map.in_bounds(Point::new(2, 2)));
        assert!(!map.in_bounds(Point::new(-1, 0)));
        assert!(map.get(Point::new(0, -1)).is_none());
    }

    #[test]
    fn test_text_round_trip_keeps_top_row_first() {
        const TEXT: &str = "#..\n.5#\n";
        let map = <Map<Terrain> as TryFrom<&str>>::try_from(TEXT).unwrap();
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 2);
        assert_eq!(map[Point::new(0, 0)], Terrain::Wall);
        assert_eq!(map[Point::new(2, 1)], Terrain::Wall);
        assert_eq!(map[Point::new(1, 1)].weight(), Some(5.0));
        assert_eq!(map.to_string(), TEXT);
    }

    #[cfg(feature = "map-render")]
    #[test]
    fn test_render_writes_gif() {
        use crate::geometry::map::render::CELL_PIXELS;

        let dir = std::env::temp_dir().join(format!("gridpath-render-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let output = dir.join("terrain.gif");

        let map = <Map<Terrain> as TryFrom<&str>>::try_from("#..\n.5#\n").unwrap();
        map.render(&output, Style::Grid).unwrap();

        let file = std::fs::File::open(&output).unwrap();
        let mut decoder = gif::DecodeOptions::new().read_info(file).unwrap();
        let (width, height) = (decoder.width(), decoder.height());
        assert!(decoder.read_next_frame().unwrap().is_some());
        std::fs::remove_dir_all(&dir).unwrap();

        // one cell's worth of margin around the map
        assert_eq!(width as usize, (3 + 1) * CELL_PIXELS);
        assert_eq!(height as usize, (2 + 1) * CELL_PIXELS);
    }

    #[cfg(feature = "map-render")]
    #[test]
    fn test_render_refuses_oversized_map() {
        let output = std::env::temp_dir().join(format!("gridpath-huge-{}.gif", std::process::id()));
        let map = Map::<Terrain>::new(8200, 1);
        assert!(matches!(
            map.render(&output, Style::Fill),
            Err(RenderError::TooLarge {
                width: 8200,
                height: 1
            })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_ragged_text_is_rejected() {
        let result = <Map<Terrain> as TryFrom<&str>>::try_from("#..\n.#\n");
        assert!(matches!(result, Err(MapConversionErr::NotRectangular)));
    }
}
