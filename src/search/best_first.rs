use super::{explore, Algorithm, Exploration, Queue, SearchOptions};
use crate::{graph::Graph, Error};

/// Unweighted search: expand locations in the order they were discovered.
///
/// Each location is recorded as discovered by the first location to reach it
/// and is never reconsidered. The resulting [`Exploration`] has no cost map.
pub fn best_first_search<G>(
    graph: &G,
    start: G::Location,
    goal: G::Location,
) -> Result<Exploration<G::Location>, Error>
where
    G: Graph + ?Sized,
{
    best_first_search_with(graph, start, goal, &SearchOptions::default())
}

/// [`best_first_search`] with explicit [`SearchOptions`].
pub fn best_first_search_with<G>(
    graph: &G,
    start: G::Location,
    goal: G::Location,
    options: &SearchOptions,
) -> Result<Exploration<G::Location>, Error>
where
    G: Graph + ?Sized,
{
    explore(
        Algorithm::BestFirst,
        graph,
        start,
        goal,
        Queue::new(),
        options,
        |came_from, _current, next| Ok((!came_from.contains_key(&next)).then_some(0.0)),
    )
}
