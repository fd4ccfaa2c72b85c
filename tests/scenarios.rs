//! Run with: `cargo test --test scenarios`

use gridpath::{
    config::Scenario,
    draw::{Marker, Scene},
    Algorithm, Point, SearchOptions,
};
use std::path::Path;

fn scenario(name: &str) -> Scenario {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name);
    Scenario::load(&path).unwrap()
}

#[test]
fn diagram1_file_matches_builtin() {
    let mut from_file = scenario("diagram1.toml");
    from_file.base = None;
    assert_eq!(from_file, Scenario::diagram1());
}

#[test]
fn diagram1_text_dump() {
    let outcome = Scenario::diagram1()
        .run(&SearchOptions::default())
        .unwrap();
    let text = outcome.scene().to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.first(), Some(&"drawing 30 x 15 grid"));
    assert_eq!(lines.last(), Some(&"=================="));
    assert_eq!(lines.len(), 15 + 2);
    assert_eq!(text.matches('■').count(), 60);
    assert_eq!(text.matches("🚢").count(), 1);
    assert_eq!(text.matches("🏡").count(), 1);
    assert!(lines[1].starts_with("🏡 "));
}

#[test]
fn weighted_scenario_walks_around() {
    let outcome = scenario("weighted.toml")
        .run(&SearchOptions::default())
        .unwrap();
    assert_eq!(outcome.algorithm, Algorithm::Dijkstra);
    assert_eq!(outcome.exploration.cost(Point::new(6, 0)), Some(10.0));

    let markers = outcome.scene().markers();
    // none of the expensive cells is on the path
    for y in 0..=3 {
        for x in 2..=4 {
            assert_ne!(markers[Point::new(x, y)], Marker::Path, "{x},{y}");
        }
    }
    assert!(markers.iter().any(|(point, marker)| point.y == 4 && *marker == Marker::Path));
}

#[test]
fn every_algorithm_solves_diagram1() {
    let mut scenario = Scenario::diagram1();
    let mut lengths = Vec::new();
    for algorithm in Algorithm::all() {
        scenario.algorithm = algorithm;
        let outcome = scenario.run(&SearchOptions::default()).unwrap();
        let path = outcome.path.expect("diagram1 is solvable");
        lengths.push(path.len());

        let scene = Scene::new(&outcome.grid, &outcome.exploration.came_from)
            .endpoints(outcome.start, outcome.goal)
            .path(&path)
            .arrows(true);
        let markers = scene.markers();
        assert_eq!(markers[outcome.start], Marker::Start);
        assert_eq!(markers[outcome.goal], Marker::Goal);
    }
    // breadth-first and Dijkstra both find a fewest-steps path on unit weights
    assert_eq!(lengths[0], lengths[1]);
}
