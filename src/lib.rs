pub mod config;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod input;
pub mod search;

pub use error::Error;
pub use geometry::{Heuristic, Point, SquareGrid};
pub use graph::{AStarGraph, Graph, WeightedGraph};
pub use search::{
    a_star_search, best_first_search, dijkstra_search, reconstruct_path, Algorithm, Exploration,
    SearchOptions,
};
