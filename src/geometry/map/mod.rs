// This interior module is private; we reexport its contents.
#[allow(clippy::module_inception)]
mod map;
#[cfg(feature = "map-render")]
mod render;

pub mod tile;

pub use map::{Map, MapConversionErr, RenderError};
#[cfg(feature = "map-render")]
pub use render::Style;
