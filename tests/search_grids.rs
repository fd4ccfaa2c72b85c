//! Run with: `cargo test --test search_grids`

use gridpath::{
    search::path_cost, Algorithm, Error, Graph, Point, SearchOptions, SquareGrid,
};

fn block() -> impl Iterator<Item = Point> {
    (0..=3).flat_map(|y| (2..=4).map(move |x| Point::new(x, y)))
}

/// 7x6 grid whose direct route from (0,0) to (6,0) crosses a block of weight-5 cells.
fn weighted_detour() -> SquareGrid {
    let mut grid = SquareGrid::new(7, 6);
    for point in block() {
        grid.set_weight(point, 5.0).unwrap();
    }
    grid
}

#[test]
fn diagonal_across_open_grid() {
    let grid = SquareGrid::new(5, 5);
    let start = Point::new(0, 0);
    let goal = Point::new(4, 4);
    for algorithm in Algorithm::all() {
        let exploration = algorithm
            .search(&grid, start, goal, &SearchOptions::default())
            .unwrap();
        let path = exploration.path(start, goal).unwrap();
        assert_eq!(path.len(), 5, "{algorithm}");
        assert_eq!(path_cost(&grid, &path).unwrap(), 4.0, "{algorithm}");
    }
}

#[test]
fn wall_column_makes_goal_unreachable() {
    let grid = SquareGrid::with_walls(5, 5, (0..5).map(|y| Point::new(2, y)));
    let start = Point::new(0, 2);
    let goal = Point::new(4, 2);
    for algorithm in Algorithm::all() {
        let exploration = algorithm
            .search(&grid, start, goal, &SearchOptions::default())
            .unwrap();
        assert!(!exploration.reached(goal), "{algorithm}");
        // everything left of the wall and nothing else
        assert_eq!(exploration.came_from.len(), 10, "{algorithm}");
        assert_eq!(exploration.path(start, goal), Err(Error::NoPathFound));
    }
}

#[test]
fn dijkstra_walks_around_expensive_cells() {
    let grid = weighted_detour();
    let start = Point::new(0, 0);
    let goal = Point::new(6, 0);
    let exploration = gridpath::dijkstra_search(&grid, start, goal).unwrap();
    assert_eq!(exploration.cost(goal), Some(10.0));

    let path = exploration.path(start, goal).unwrap();
    assert!(path.len() > 7);
    assert!(path.iter().all(|point| !block().any(|b| b == *point)));
    assert_eq!(path_cost(&grid, &path).unwrap(), 10.0);
}

#[test]
fn a_star_avoids_the_straight_route() {
    let grid = weighted_detour();
    let start = Point::new(0, 0);
    let goal = Point::new(6, 0);
    let exploration = gridpath::a_star_search(&grid, start, goal).unwrap();
    let path = exploration.path(start, goal).unwrap();
    let cost = path_cost(&grid, &path).unwrap();
    // the straight route costs 18; straight-line estimates are at most sqrt(2)
    // times too high here, which bounds the result
    assert!(cost < 18.0);
    assert!(cost <= 10.0 * std::f64::consts::SQRT_2);
    assert!(path.len() > 7);
}

#[test]
fn searches_are_deterministic() {
    let grid = SquareGrid::with_walls(20, 12, (2..10).map(|y| Point::new(9, y)));
    let start = Point::new(1, 6);
    let goal = Point::new(18, 6);
    for algorithm in Algorithm::all() {
        let first = algorithm
            .search(&grid, start, goal, &SearchOptions::default())
            .unwrap();
        for _ in 0..5 {
            let again = algorithm
                .search(&grid, start, goal, &SearchOptions::default())
                .unwrap();
            assert_eq!(again.came_from, first.came_from, "{algorithm}");
            assert_eq!(again.expanded, first.expanded, "{algorithm}");
            assert_eq!(
                again.path(start, goal).unwrap(),
                first.path(start, goal).unwrap()
            );
        }
    }
}

#[test]
fn paths_only_step_between_neighbors() {
    let grid: SquareGrid = "
..........
.####.....
....#..#..
.##.#..#..
....#..#..
..2.#..#..
....1..#..
"
    .parse()
    .unwrap();
    let start = Point::new(0, 6);
    let goal = Point::new(9, 0);
    let mut neighbors = Vec::new();
    for algorithm in Algorithm::all() {
        let exploration = algorithm
            .search(&grid, start, goal, &SearchOptions::default())
            .unwrap();
        let path = exploration.path(start, goal).unwrap();
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        for step in path.windows(2) {
            neighbors.clear();
            grid.neighbors(step[0], &mut neighbors);
            assert!(neighbors.contains(&step[1]), "{algorithm}: {} -> {}", step[0], step[1]);
        }
    }
}
