//! Scenario files: a grid, its endpoints, and the search to run on it.
//!
//! ```toml
//! width = 10
//! height = 5
//! start = [0, 0]
//! goal = [9, 4]
//! algorithm = "dijkstra"
//! heuristic = "chebyshev"
//! walls = [[3, 0], [3, 1]]
//! wall_rects = [[[6, 2], [7, 4]]]
//! wall_file = "walls.txt"
//!
//! [[weights]]
//! at = [1, 1]
//! cost = 5.0
//! ```
//!
//! Relative paths are resolved against the directory of the scenario file.

#[cfg(feature = "image-grid")]
use crate::geometry::segment::{self, SegmentError, Segmentation};
use crate::{
    draw::Scene,
    geometry::{Heuristic, Point, SquareGrid},
    input,
    search::{Algorithm, Exploration, SearchOptions},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// `<config dir>/gridpath/scenario.toml`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("gridpath").join("scenario.toml"))
}

/// Cost of entering one cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub at: Point,
    pub cost: f64,
}

/// A picture to segment into the grid.
///
/// _Depends on the `image-grid` feature._
#[cfg(feature = "image-grid")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    pub path: PathBuf,
    #[serde(flatten)]
    pub segmentation: Segmentation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Ignored when the grid comes from an image.
    #[serde(default)]
    pub width: usize,
    /// Ignored when the grid comes from an image.
    #[serde(default)]
    pub height: usize,
    pub start: Point,
    pub goal: Point,
    #[serde(default)]
    pub algorithm: Algorithm,
    #[serde(default)]
    pub heuristic: Heuristic,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub walls: Vec<Point>,
    /// Inclusive rectangles given by two opposite corners.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wall_rects: Vec<[Point; 2]>,
    /// A file of `x,y` lines, one wall each. Any malformed line fails the build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<Weight>,
    #[cfg(feature = "image-grid")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSource>,

    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base: Option<PathBuf>,
}

/// A finished search together with everything needed to present it.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub grid: SquareGrid,
    pub start: Point,
    pub goal: Point,
    pub algorithm: Algorithm,
    pub exploration: Exploration<Point>,
    /// `None` when the goal is unreachable.
    pub path: Option<Vec<Point>>,
}

impl Outcome {
    /// The grid, endpoints, and path, ready to draw.
    pub fn scene(&self) -> Scene<'_> {
        let mut scene =
            Scene::new(&self.grid, &self.exploration.came_from).endpoints(self.start, self.goal);
        if let Some(path) = &self.path {
            scene = scene.path(path);
        }
        scene
    }
}

/// Wall ids of the demo diagram, numbered row by row across 30 columns.
const DIAGRAM1_WALLS: [i32; 60] = [
    21, 22, 51, 52, 81, 82, 93, 94, 111, 112, 123, 124, 133, 134, 141, 142, 153, 154, 163, 164,
    171, 172, 173, 174, 175, 183, 184, 193, 194, 201, 202, 203, 204, 205, 213, 214, 223, 224, 243,
    244, 253, 254, 273, 274, 283, 284, 303, 304, 313, 314, 333, 334, 343, 344, 373, 374, 403, 404,
    433, 434,
];

impl Scenario {
    /// An open grid with no walls or weights.
    pub fn new(width: usize, height: usize, start: Point, goal: Point) -> Scenario {
        Scenario {
            width,
            height,
            start,
            goal,
            algorithm: Algorithm::default(),
            heuristic: Heuristic::default(),
            walls: Vec::new(),
            wall_rects: Vec::new(),
            wall_file: None,
            weights: Vec::new(),
            #[cfg(feature = "image-grid")]
            image: None,
            base: None,
        }
    }

    /// The built-in 30x15 demonstration diagram.
    pub fn diagram1() -> Scenario {
        let mut scenario = Scenario::new(30, 15, Point::new(24, 0), Point::new(0, 0));
        scenario.walls = DIAGRAM1_WALLS
            .iter()
            .map(|id| Point::new(id % 30, id / 30))
            .collect();
        scenario
    }

    pub fn load(path: &Path) -> Result<Scenario, Error> {
        let data = std::fs::read_to_string(path)?;
        let mut scenario: Scenario = toml::from_str(&data)?;
        scenario.base = path.parent().map(Path::to_owned);
        tracing::debug!(path = %path.display(), "loaded scenario");
        Ok(scenario)
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let serialized = toml::to_string_pretty(self)?;
        std::fs::write(path, serialized.as_bytes()).map_err(Into::into)
    }

    /// Resolve `path` against the directory of the scenario file.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_owned(),
        }
    }

    #[cfg(feature = "image-grid")]
    fn base_grid(&self) -> Result<SquareGrid, Error> {
        match &self.image {
            Some(image) => {
                segment::from_path(&self.resolve(&image.path), image.segmentation)
                    .map_err(Into::into)
            }
            None => self.blank_grid(),
        }
    }

    #[cfg(not(feature = "image-grid"))]
    fn base_grid(&self) -> Result<SquareGrid, Error> {
        self.blank_grid()
    }

    fn blank_grid(&self) -> Result<SquareGrid, Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::EmptyGrid);
        }
        Ok(SquareGrid::new(self.width, self.height))
    }

    /// Assemble the grid this scenario describes.
    ///
    /// Walls outside the grid are ignored; weights outside it are an error.
    pub fn build_grid(&self) -> Result<SquareGrid, Error> {
        let mut grid = self.base_grid()?.with_heuristic(self.heuristic);

        for &wall in &self.walls {
            grid.add_wall(wall);
        }
        for [corner, opposite] in &self.wall_rects {
            grid.add_rect_walls(*corner, *opposite);
        }
        if let Some(wall_file) = &self.wall_file {
            let path = self.resolve(wall_file);
            let walls = input::parse::<Point>(&path)
                .map_err(input::ParseError::from)
                .and_then(|records| records.collect::<Result<Vec<_>, _>>())
                .map_err(|source| Error::WallFile {
                    path: path.clone(),
                    source,
                })?;
            for wall in walls {
                grid.add_wall(wall);
            }
        }
        for weight in &self.weights {
            grid.set_weight(weight.at, weight.cost)?;
        }

        tracing::debug!(
            width = grid.width(),
            height = grid.height(),
            walls = grid.walls().count(),
            weights = self.weights.len(),
            "built grid"
        );
        Ok(grid)
    }

    /// Build the grid, search it, and reconstruct the path.
    pub fn run(&self, options: &SearchOptions) -> Result<Outcome, Error> {
        let grid = self.build_grid()?;
        let exploration = self.algorithm.search(&grid, self.start, self.goal, options)?;
        let path = match exploration.path(self.start, self.goal) {
            Ok(path) => Some(path),
            Err(crate::Error::NoPathFound) => None,
            Err(err) => return Err(err.into()),
        };
        Ok(Outcome {
            grid,
            start: self.start,
            goal: self.goal,
            algorithm: self.algorithm,
            exploration,
            path,
        })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("scenario could not be loaded")]
    CouldNotLoad(#[from] std::io::Error),
    #[error("malformed scenario")]
    Malformed(#[from] toml::de::Error),
    #[error("failed to serialize")]
    CouldNotSerialize(#[from] toml::ser::Error),
    #[error("could not read wall file {path:?}")]
    WallFile {
        path: PathBuf,
        #[source]
        source: input::ParseError,
    },
    #[error("grid has no cells")]
    EmptyGrid,
    #[error(transparent)]
    Search(#[from] crate::Error),
    #[cfg(feature = "image-grid")]
    #[error("could not segment image")]
    Segment(#[from] SegmentError),
}
