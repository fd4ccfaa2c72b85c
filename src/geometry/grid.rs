use crate::{
    geometry::{tile::Terrain, Direction, Map, MapConversionErr, Point},
    graph::{AStarGraph, Graph, WeightedGraph},
    Error,
};
use bitvec::{bitvec, vec::BitVec};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, convert::TryFrom, fmt, str::FromStr};

/// Distance estimate a [`SquareGrid`] hands to A*.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Number of 8-connected steps. Admissible whenever every weight is at least 1.
    Chebyshev,
    /// No estimate at all; A* degrades to Dijkstra.
    Zero,
}

impl Heuristic {
    pub fn estimate(self, from: Point, to: Point) -> f64 {
        match self {
            Heuristic::Euclidean => from.euclidean(to),
            Heuristic::Chebyshev => f64::from((to - from).chebyshev()),
            Heuristic::Zero => 0.0,
        }
    }
}

/// An 8-connected rectangular grid with walls and per-cell movement costs.
///
/// Moving into a cell costs that cell's weight, which defaults to `1`. Walls
/// can never be entered.
///
/// ## Neighbor order
///
/// Neighbors are produced in [`Direction::iter`] order, except that the order
/// is reversed for cells where `x + y` is even. Searches which break ties by
/// discovery order therefore alternate their preferred direction from cell to
/// cell.
#[derive(Clone)]
pub struct SquareGrid {
    width: usize,
    height: usize,
    walls: BitVec,
    weights: HashMap<Point, f64>,
    heuristic: Heuristic,
}

impl SquareGrid {
    /// Create an open grid: no walls, every weight `1`.
    pub fn new(width: usize, height: usize) -> SquareGrid {
        SquareGrid {
            width,
            height,
            walls: bitvec![0; width * height],
            weights: HashMap::new(),
            heuristic: Heuristic::default(),
        }
    }

    /// Create a grid with the given walls.
    ///
    /// Walls outside the grid are ignored.
    pub fn with_walls(
        width: usize,
        height: usize,
        walls: impl IntoIterator<Item = Point>,
    ) -> SquareGrid {
        let mut grid = SquareGrid::new(width, height);
        for wall in walls {
            grid.add_wall(wall);
        }
        grid
    }

    /// Use a different estimate for A*.
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> SquareGrid {
        self.heuristic = heuristic;
        self
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn set_heuristic(&mut self, heuristic: Heuristic) {
        self.heuristic = heuristic;
    }

    /// `true` when a point is legal within the bounds of this grid.
    #[inline]
    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }

    fn index(&self, point: Point) -> usize {
        point.x as usize + point.y as usize * self.width
    }

    /// `true` when `point` is a wall. Points outside the grid are not walls.
    pub fn is_wall(&self, point: Point) -> bool {
        self.in_bounds(point) && self.walls[self.index(point)]
    }

    /// `true` when `point` is not a wall.
    pub fn passable(&self, point: Point) -> bool {
        !self.is_wall(point)
    }

    /// Block a cell.
    ///
    /// Returns `false` and leaves the grid unchanged if `point` is out of bounds.
    pub fn add_wall(&mut self, point: Point) -> bool {
        if !self.in_bounds(point) {
            tracing::debug!(%point, "ignoring wall outside the grid");
            return false;
        }
        let idx = self.index(point);
        self.walls.set(idx, true);
        true
    }

    /// Block every in-bounds cell of the rectangle spanned by two corners, inclusive.
    pub fn add_rect_walls(&mut self, corner: Point, opposite: Point) {
        for y in corner.y.min(opposite.y)..=corner.y.max(opposite.y) {
            for x in corner.x.min(opposite.x)..=corner.x.max(opposite.x) {
                self.add_wall(Point::new(x, y));
            }
        }
    }

    /// Iterate over every wall, row by row from the top.
    pub fn walls(&self) -> impl Iterator<Item = Point> + '_ {
        self.walls
            .iter_ones()
            .map(move |idx| Point::from((idx % self.width, idx / self.width)))
    }

    /// Set the cost of entering `point`.
    pub fn set_weight(&mut self, point: Point, weight: f64) -> Result<(), Error> {
        if !self.in_bounds(point) {
            return Err(Error::out_of_bounds(point));
        }
        if !(weight.is_finite() && weight > 0.0) {
            return Err(Error::InvalidWeight {
                location: point.to_string(),
                weight,
            });
        }
        self.weights.insert(point, weight);
        Ok(())
    }

    /// The cost of entering `point`.
    pub fn weight(&self, point: Point) -> f64 {
        self.weights.get(&point).copied().unwrap_or(1.0)
    }

    /// `true` when any cell has a weight other than the default.
    pub fn is_weighted(&self) -> bool {
        !self.weights.is_empty()
    }

    /// Describe this grid as a map of [`Terrain`].
    ///
    /// Weights are rounded into `1..=9`; the description is exact for grids
    /// parsed from text.
    pub fn terrain(&self) -> Map<Terrain> {
        Map::procedural(self.width, self.height, |point| {
            if self.is_wall(point) {
                return Terrain::Wall;
            }
            match self.weights.get(&point) {
                None => Terrain::Open,
                Some(weight) => {
                    let digit = weight.round().clamp(1.0, 9.0) as u8;
                    match digit.try_into() {
                        Ok(digit) => Terrain::Weighted(digit),
                        Err(()) => Terrain::Open,
                    }
                }
            }
        })
    }
}

impl Graph for SquareGrid {
    type Location = Point;

    fn neighbors(&self, location: Point, buf: &mut Vec<Point>) {
        let first = buf.len();
        buf.extend(
            Direction::iter()
                .map(|direction| location + direction)
                .filter(|&point| self.in_bounds(point) && self.passable(point)),
        );
        // filtering preserves relative order, so reversing the survivors is
        // the same as reversing the candidates before filtering
        if (location.x + location.y).rem_euclid(2) == 0 {
            buf[first..].reverse();
        }
    }

    fn contains(&self, location: Point) -> bool {
        self.in_bounds(location) && self.passable(location)
    }
}

impl WeightedGraph for SquareGrid {
    fn cost(&self, _from: Point, to: Point) -> Option<f64> {
        Some(self.weight(to))
    }
}

impl AStarGraph for SquareGrid {
    fn estimate(&self, from: Point, to: Point) -> f64 {
        self.heuristic.estimate(from, to)
    }
}

impl From<&Map<Terrain>> for SquareGrid {
    fn from(map: &Map<Terrain>) -> SquareGrid {
        let mut grid = SquareGrid::new(map.width(), map.height());
        for (point, terrain) in map.iter() {
            match terrain {
                Terrain::Wall => {
                    grid.add_wall(point);
                }
                Terrain::Weighted(_) => {
                    if let Some(weight) = terrain.weight() {
                        grid.weights.insert(point, weight);
                    }
                }
                Terrain::Open => {}
            }
        }
        grid
    }
}

impl FromStr for SquareGrid {
    type Err = MapConversionErr;

    /// Parse a grid from lines of [`Terrain`]; the first line is row `0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let map = <Map<Terrain> as TryFrom<&str>>::try_from(s)?;
        Ok(SquareGrid::from(&map))
    }
}

impl fmt::Debug for SquareGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SquareGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("walls", &self.walls.count_ones())
            .field("weights", &self.weights.len())
            .field("heuristic", &self.heuristic)
            .finish()
    }
}

impl fmt::Display for SquareGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.terrain())
    }
}
