use smallstr::SmallString;
use std::{convert::TryFrom, fmt, marker::PhantomData, str::FromStr};

/// Number of characters below which the [`Chunks`] iterator does not allocate.
pub const CHUNK_WIDTH: usize = 4;

/// A type implementing `DisplayWidth` has a constant width for display and parsing.
///
/// This makes it suitable for 2d cartesian maps.
pub trait DisplayWidth {
    const DISPLAY_WIDTH: usize;

    /// Split a string into an iterator of chunks of characters of length `DISPLAY_WIDTH`
    fn chunks(s: &str) -> Chunks<Self> {
        Chunks(s.chars(), PhantomData)
    }
}

/// Iterator of chunks of equal width from a string.
///
/// Created with [`DisplayWidth::chunks`]. Never heap-allocates if `T::DISPLAY_WIDTH <= CHUNK_WIDTH`.
pub struct Chunks<'a, T: ?Sized>(std::str::Chars<'a>, PhantomData<T>);

impl<T: DisplayWidth> Iterator for Chunks<'_, T> {
    // 4 bytes in a max-width char
    type Item = SmallString<[u8; 4 * CHUNK_WIDTH]>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut s = SmallString::new();
        for _ in 0..T::DISPLAY_WIDTH {
            s.push(self.0.next()?);
        }
        Some(s)
    }
}

/// A type implementing `ToRgb` can be converted to a single color.
///
/// This is useful for rendering map tiles.
pub trait ToRgb {
    fn to_rgb(&self) -> [u8; 3];
}

/// A Tile which contains a single digit.
///
/// Its range is `0..=9`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    parse_display::Display,
    parse_display::FromStr,
)]
#[from_str(regex = r"(?P<0>\d)")]
pub struct Digit(u8);

impl DisplayWidth for Digit {
    const DISPLAY_WIDTH: usize = 1;
}

impl From<Digit> for u8 {
    fn from(Digit(value): Digit) -> Self {
        value
    }
}

impl TryFrom<u8> for Digit {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        (value < 10).then_some(Digit(value)).ok_or(())
    }
}

impl ToRgb for Digit {
    fn to_rgb(&self) -> [u8; 3] {
        const STEP: u8 = u8::MAX / 9;
        let value = self.0 * STEP;
        [value, value, value]
    }
}

/// One cell of a text-described grid.
///
/// - `#` is a wall
/// - `.` is open ground with the default movement cost
/// - `1` through `9` is open ground which costs that much to enter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Terrain {
    #[default]
    Open,
    Wall,
    Weighted(Digit),
}

impl Terrain {
    /// The cost of entering this cell, or `None` for walls.
    pub fn weight(self) -> Option<f64> {
        match self {
            Terrain::Open => Some(1.0),
            Terrain::Wall => None,
            Terrain::Weighted(digit) => Some(f64::from(u8::from(digit))),
        }
    }
}

impl DisplayWidth for Terrain {
    const DISPLAY_WIDTH: usize = 1;
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terrain::Open => f.write_str("."),
            Terrain::Wall => f.write_str("#"),
            Terrain::Weighted(digit) => write!(f, "{digit}"),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("expected '#', '.' or a digit from 1 to 9; found {0:?}")]
pub struct ParseTerrainError(String);

impl FromStr for Terrain {
    type Err = ParseTerrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "#" => Ok(Terrain::Wall),
            "." => Ok(Terrain::Open),
            _ => match s.parse::<Digit>() {
                Ok(digit) if u8::from(digit) > 0 => Ok(Terrain::Weighted(digit)),
                _ => Err(ParseTerrainError(s.to_string())),
            },
        }
    }
}

impl ToRgb for Terrain {
    fn to_rgb(&self) -> [u8; 3] {
        match self {
            Terrain::Open => [253, 244, 220],
            Terrain::Wall => [0, 0, 0],
            Terrain::Weighted(digit) => {
                // heavier ground is darker
                let shade = u8::MAX - digit.to_rgb()[0] / 2;
                [shade, shade, shade]
            }
        }
    }
}
