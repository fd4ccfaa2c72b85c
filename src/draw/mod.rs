//! Presentation of search results.
//!
//! A [`Scene`] borrows the plain data a search produced and classifies every
//! grid cell as a [`Marker`]. The marker map prints as text and, with the
//! `map-render` feature, renders as a gif. With the `image-grid` feature,
//! [`overlay`] paints the result over the picture a grid was segmented from.

#[cfg(feature = "image-grid")]
pub mod overlay;

use crate::{
    geometry::{
        tile::{DisplayWidth, ToRgb},
        Direction, Map, Point, SquareGrid,
    },
    search::{CameFrom, CostSoFar},
};
use std::{collections::HashSet, fmt};

#[cfg(feature = "map-render")]
use crate::geometry::{map::RenderError, map::Style};

/// What a cell shows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Marker {
    Start,
    Goal,
    Wall,
    Path,
    /// Cost so far of a discovered cell.
    Cost(f64),
    /// Direction from a discovered cell to its predecessor.
    Arrow(Direction),
    /// Discovered, with nothing more to show.
    Visited,
    #[default]
    Empty,
}

impl DisplayWidth for Marker {
    const DISPLAY_WIDTH: usize = 3;
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Start => f.write_str("🚢 "),
            Marker::Goal => f.write_str("🏡 "),
            Marker::Wall => f.write_str(" ■ "),
            Marker::Path => f.write_str(" ● "),
            Marker::Cost(cost) => write!(f, "{cost:3.0}"),
            Marker::Arrow(direction) => write!(f, " {} ", direction.arrow()),
            Marker::Visited | Marker::Empty => f.write_str(" . "),
        }
    }
}

impl ToRgb for Marker {
    fn to_rgb(&self) -> [u8; 3] {
        match self {
            Marker::Start => [46, 204, 64],
            Marker::Goal => [255, 65, 54],
            Marker::Wall => [40, 40, 40],
            Marker::Path => [255, 220, 0],
            Marker::Cost(_) | Marker::Arrow(_) | Marker::Visited => [127, 219, 255],
            Marker::Empty => [253, 244, 220],
        }
    }
}

/// Everything a renderer needs to draw the outcome of a search.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub grid: &'a SquareGrid,
    pub came_from: &'a CameFrom<Point>,
    pub start: Option<Point>,
    pub goal: Option<Point>,
    pub path: Option<&'a [Point]>,
    pub cost_so_far: Option<&'a CostSoFar<Point>>,
    /// Show the direction to each discovered cell's predecessor.
    pub arrows: bool,
}

impl<'a> Scene<'a> {
    pub fn new(grid: &'a SquareGrid, came_from: &'a CameFrom<Point>) -> Scene<'a> {
        Scene {
            grid,
            came_from,
            start: None,
            goal: None,
            path: None,
            cost_so_far: None,
            arrows: false,
        }
    }

    pub fn endpoints(mut self, start: Point, goal: Point) -> Self {
        self.start = Some(start);
        self.goal = Some(goal);
        self
    }

    pub fn path(mut self, path: &'a [Point]) -> Self {
        self.path = Some(path);
        self
    }

    pub fn costs(mut self, cost_so_far: &'a CostSoFar<Point>) -> Self {
        self.cost_so_far = Some(cost_so_far);
        self
    }

    pub fn arrows(mut self, arrows: bool) -> Self {
        self.arrows = arrows;
        self
    }

    fn marker(&self, point: Point, on_path: &HashSet<Point>) -> Marker {
        if Some(point) == self.start {
            return Marker::Start;
        }
        if Some(point) == self.goal {
            return Marker::Goal;
        }
        if self.grid.is_wall(point) {
            return Marker::Wall;
        }
        if on_path.contains(&point) {
            return Marker::Path;
        }
        if let Some(&cost) = self.cost_so_far.and_then(|costs| costs.get(&point)) {
            return Marker::Cost(cost);
        }
        match self.came_from.get(&point) {
            Some(Some(predecessor)) if self.arrows => Direction::between(point, *predecessor)
                .map(Marker::Arrow)
                .unwrap_or(Marker::Visited),
            Some(_) => Marker::Visited,
            None => Marker::Empty,
        }
    }

    /// Classify every cell of the grid.
    ///
    /// Start and goal take precedence over walls, walls over the path, the
    /// path over costs, and costs over arrows.
    pub fn markers(&self) -> Map<Marker> {
        let on_path: HashSet<Point> = self.path.unwrap_or_default().iter().copied().collect();
        Map::procedural(self.grid.width(), self.grid.height(), |point| {
            self.marker(point, &on_path)
        })
    }

    /// Render the marker map as a gif.
    ///
    /// _Depends on the `map-render` feature._
    #[cfg(feature = "map-render")]
    pub fn render_gif(&self, output: &std::path::Path, style: Style) -> Result<(), RenderError> {
        self.markers().render(output, style)
    }
}

impl fmt::Display for Scene<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "drawing {} x {} grid",
            self.grid.width(),
            self.grid.height()
        )?;
        write!(f, "{}", self.markers())?;
        writeln!(f, "==================")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{a_star_search, best_first_search};

    #[test]
    fn test_text_dump() {
        let grid = SquareGrid::with_walls(4, 3, [Point::new(1, 1), Point::new(2, 1)]);
        let start = Point::new(0, 0);
        let goal = Point::new(3, 2);
        let exploration = a_star_search(&grid, start, goal).unwrap();
        let path = exploration.path(start, goal).unwrap();
        let scene = Scene::new(&grid, &exploration.came_from)
            .endpoints(start, goal)
            .path(&path);

        let text = scene.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "drawing 4 x 3 grid");
        assert!(lines[1].starts_with("🚢 "));
        assert!(lines[2].contains(" ■  ■ "));
        assert!(lines[3].ends_with("🏡 "));
        assert_eq!(lines[4], "==================");
        assert_eq!(
            text.matches('●').count(),
            path.len() - 2,
            "every interior path cell is marked"
        );
    }

    #[test]
    fn test_costs_and_arrows() {
        let grid = SquareGrid::new(3, 1);
        let start = Point::new(0, 0);
        let goal = Point::new(2, 0);

        let exploration = a_star_search(&grid, start, goal).unwrap();
        let costs = exploration.cost_so_far.as_ref().unwrap();
        let scene = Scene::new(&grid, &exploration.came_from)
            .endpoints(start, Point::new(9, 9))
            .costs(costs);
        assert_eq!(
            scene.markers().iter().map(|(_, m)| *m).collect::<Vec<_>>(),
            vec![Marker::Start, Marker::Cost(1.0), Marker::Cost(2.0)]
        );
        assert!(scene.to_string().contains("🚢   1  2\n"));

        let exploration = best_first_search(&grid, start, goal).unwrap();
        let scene = Scene::new(&grid, &exploration.came_from).arrows(true);
        assert_eq!(
            scene.markers().iter().map(|(_, m)| *m).collect::<Vec<_>>(),
            vec![
                Marker::Visited,
                Marker::Arrow(Direction::Left),
                Marker::Arrow(Direction::Left)
            ]
        );
        assert!(scene.to_string().contains(" .  ←  ← \n"));
    }

    #[test]
    fn test_undiscovered_cells_are_empty() {
        let grid = SquareGrid::with_walls(3, 1, [Point::new(1, 0)]);
        let exploration = best_first_search(&grid, Point::new(0, 0), Point::new(2, 0)).unwrap();
        let markers = scene_markers(&grid, &exploration.came_from);
        assert_eq!(markers, vec![Marker::Visited, Marker::Wall, Marker::Empty]);
    }

    #[cfg(feature = "map-render")]
    #[test]
    fn test_render_gif_to_file() {
        let dir = std::env::temp_dir().join(format!("gridpath-scene-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let output = dir.join("scene.gif");

        let grid = SquareGrid::with_walls(6, 4, (0..3).map(|y| Point::new(3, y)));
        let start = Point::new(0, 0);
        let goal = Point::new(5, 0);
        let exploration = a_star_search(&grid, start, goal).unwrap();
        let path = exploration.path(start, goal).unwrap();
        Scene::new(&grid, &exploration.came_from)
            .endpoints(start, goal)
            .path(&path)
            .render_gif(&output, Style::Cross)
            .unwrap();

        let file = std::fs::File::open(&output).unwrap();
        let mut decoder = gif::DecodeOptions::new().read_info(file).unwrap();
        let (width, height) = (decoder.width(), decoder.height());
        assert!(decoder.read_next_frame().unwrap().is_some());
        std::fs::remove_dir_all(&dir).unwrap();

        // 8px cells plus a 4px border on each side
        assert_eq!((width, height), (6 * 8 + 8, 4 * 8 + 8));
    }

    fn scene_markers(grid: &SquareGrid, came_from: &CameFrom<Point>) -> Vec<Marker> {
        Scene::new(grid, came_from)
            .markers()
            .iter()
            .map(|(_, marker)| *marker)
            .collect()
    }
}
