use super::{dijkstra::weighted_search, Algorithm, Exploration, SearchOptions};
use crate::{graph::AStarGraph, Error};

/// A* search: like [`dijkstra_search`][super::dijkstra_search], but expands by
/// cost so far plus the graph's estimate of the remaining cost to `goal`.
///
/// The goal's recorded cost is optimal when the estimate never overestimates.
pub fn a_star_search<G>(
    graph: &G,
    start: G::Location,
    goal: G::Location,
) -> Result<Exploration<G::Location>, Error>
where
    G: AStarGraph + ?Sized,
{
    a_star_search_with(graph, start, goal, &SearchOptions::default())
}

/// [`a_star_search`] with explicit [`SearchOptions`].
pub fn a_star_search_with<G>(
    graph: &G,
    start: G::Location,
    goal: G::Location,
    options: &SearchOptions,
) -> Result<Exploration<G::Location>, Error>
where
    G: AStarGraph + ?Sized,
{
    weighted_search(
        Algorithm::AStar,
        graph,
        start,
        goal,
        options,
        |next, cost| cost + graph.estimate(next, goal),
    )
}
