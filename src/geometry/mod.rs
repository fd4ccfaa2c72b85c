pub mod direction;
pub mod grid;
pub mod map;
pub mod point;
#[cfg(feature = "image-grid")]
pub mod segment;

pub use direction::Direction;
pub use grid::{Heuristic, SquareGrid};
pub use map::{tile, Map, MapConversionErr};
pub use point::Point;
