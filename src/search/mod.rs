//! Graph search from a start location to a goal location.
//!
//! - **Best-first** search ([`best_first_search`]) expands in discovery order and ignores costs.
//! - **Dijkstra** ([`dijkstra_search`]) expands by cost so far.
//! - **A\*** ([`a_star_search`]) expands by cost so far plus [`AStarGraph::estimate`].
//!
//! All three run on a single expansion loop and differ only in their frontier
//! and in how they decide whether, and with which priority, a neighbor is
//! scheduled. Each returns an [`Exploration`]: the predecessor map from which
//! a path is reconstructed, plus the cost map for the weighted searches.
//!
//! An unreachable goal is not an error at search time; it is simply absent
//! from the predecessor map, and [`Exploration::path`] reports
//! [`Error::NoPathFound`].

mod a_star;
mod best_first;
mod dijkstra;
pub mod frontier;
mod path;

pub use a_star::{a_star_search, a_star_search_with};
pub use best_first::{best_first_search, best_first_search_with};
pub use dijkstra::{dijkstra_search, dijkstra_search_with};
pub use frontier::{Frontier, PriorityQueue, Queue};
pub use path::{path_cost, reconstruct_path};

use crate::{
    graph::{AStarGraph, Graph},
    Error,
};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    hash::Hash,
    time::{Duration, Instant},
};

/// For each discovered location, the location which discovered it.
///
/// The start location maps to `None`.
pub type CameFrom<L> = HashMap<L, Option<L>>;

/// For each discovered location, the cheapest known cost of reaching it from the start.
pub type CostSoFar<L> = HashMap<L, f64>;

/// The outcome of a single search.
#[derive(Debug, Clone)]
pub struct Exploration<L> {
    pub came_from: CameFrom<L>,
    /// Only the weighted searches track costs.
    pub cost_so_far: Option<CostSoFar<L>>,
    /// Number of locations taken from the frontier, including stale entries and the goal.
    pub expanded: usize,
}

impl<L: Copy + Eq + Hash> Exploration<L> {
    /// `true` when the search discovered `location`.
    pub fn reached(&self, location: L) -> bool {
        self.came_from.contains_key(&location)
    }

    /// The cheapest known cost of reaching `location`.
    pub fn cost(&self, location: L) -> Option<f64> {
        self.cost_so_far.as_ref()?.get(&location).copied()
    }

    /// The path from `start` to `goal` which this search found.
    pub fn path(&self, start: L, goal: L) -> Result<Vec<L>, Error> {
        reconstruct_path(&self.came_from, start, goal)
    }
}

/// Limits applied to a search.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    /// Give up with [`Error::DeadlineExceeded`] once this instant has passed.
    ///
    /// Checked once per expanded location.
    pub deadline: Option<Instant>,
}

impl SearchOptions {
    pub fn with_deadline(deadline: Instant) -> SearchOptions {
        SearchOptions {
            deadline: Some(deadline),
        }
    }

    pub fn with_timeout(timeout: Duration) -> SearchOptions {
        Self::with_deadline(Instant::now() + timeout)
    }

    fn expired(&self) -> bool {
        self.deadline
            .map_or(false, |deadline| Instant::now() >= deadline)
    }
}

/// Which search to run.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    parse_display::Display,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[display(style = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Breadth-first expansion; ignores costs.
    BestFirst,
    /// Cheapest-first expansion.
    Dijkstra,
    /// Cheapest estimated total first.
    #[default]
    #[display("a-star")]
    AStar,
}

impl Algorithm {
    pub fn all() -> [Algorithm; 3] {
        [Algorithm::BestFirst, Algorithm::Dijkstra, Algorithm::AStar]
    }

    /// `true` when this search produces a cost map.
    pub fn is_weighted(self) -> bool {
        self != Algorithm::BestFirst
    }

    /// Run this search.
    pub fn search<G>(
        self,
        graph: &G,
        start: G::Location,
        goal: G::Location,
        options: &SearchOptions,
    ) -> Result<Exploration<G::Location>, Error>
    where
        G: AStarGraph + ?Sized,
    {
        match self {
            Algorithm::BestFirst => best_first_search_with(graph, start, goal, options),
            Algorithm::Dijkstra => dijkstra_search_with(graph, start, goal, options),
            Algorithm::AStar => a_star_search_with(graph, start, goal, options),
        }
    }
}

/// The expansion loop shared by every search.
///
/// `discover(came_from, current, next)` decides whether `next`, a neighbor of
/// the location being expanded, should be scheduled; if so it returns the
/// frontier priority, and `next` is recorded as discovered by `current`.
/// Neighbors are offered in the order the graph yields them.
///
/// The search stops as soon as the goal is taken from the frontier, or when the
/// frontier is exhausted.
fn explore<G, F, D>(
    algorithm: Algorithm,
    graph: &G,
    start: G::Location,
    goal: G::Location,
    mut frontier: F,
    options: &SearchOptions,
    mut discover: D,
) -> Result<Exploration<G::Location>, Error>
where
    G: Graph + ?Sized,
    F: Frontier<G::Location>,
    D: FnMut(&CameFrom<G::Location>, G::Location, G::Location) -> Result<Option<f64>, Error>,
{
    for location in [start, goal] {
        if !graph.contains(location) {
            return Err(Error::out_of_bounds(location));
        }
    }

    let mut came_from = CameFrom::new();
    came_from.insert(start, None);
    frontier.put(start, 0.0);

    let mut expanded = 0;
    let mut neighbors = Vec::with_capacity(8);

    while let Some(current) = frontier.get() {
        if options.expired() {
            tracing::debug!(%algorithm, expanded, "search deadline exceeded");
            return Err(Error::DeadlineExceeded { expanded });
        }
        expanded += 1;

        if current == goal {
            break;
        }

        tracing::trace!(%algorithm, ?current, "expanding");
        neighbors.clear();
        graph.neighbors(current, &mut neighbors);
        for &next in &neighbors {
            if let Some(priority) = discover(&came_from, current, next)? {
                frontier.put(next, priority);
                came_from.insert(next, Some(current));
            }
        }
    }

    tracing::debug!(
        %algorithm,
        ?start,
        ?goal,
        expanded,
        discovered = came_from.len(),
        reached = came_from.contains_key(&goal),
        "search finished"
    );

    Ok(Exploration {
        came_from,
        cost_so_far: None,
        expanded,
    })
}
