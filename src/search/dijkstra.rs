use super::{explore, Algorithm, CostSoFar, Exploration, PriorityQueue, SearchOptions};
use crate::{graph::WeightedGraph, Error};

/// Shortest-path search: expand the cheapest known location first.
///
/// Once the search finishes, the cost recorded for every expanded location is
/// the cost of the cheapest path to it.
pub fn dijkstra_search<G>(
    graph: &G,
    start: G::Location,
    goal: G::Location,
) -> Result<Exploration<G::Location>, Error>
where
    G: WeightedGraph + ?Sized,
{
    dijkstra_search_with(graph, start, goal, &SearchOptions::default())
}

/// [`dijkstra_search`] with explicit [`SearchOptions`].
pub fn dijkstra_search_with<G>(
    graph: &G,
    start: G::Location,
    goal: G::Location,
    options: &SearchOptions,
) -> Result<Exploration<G::Location>, Error>
where
    G: WeightedGraph + ?Sized,
{
    weighted_search(
        Algorithm::Dijkstra,
        graph,
        start,
        goal,
        options,
        |_next, cost| cost,
    )
}

/// Cost-tracking search on a priority frontier.
///
/// A neighbor is scheduled when it has no recorded cost or the new route to it
/// is strictly cheaper; `priority(neighbor, cost)` sets its frontier priority.
/// Superseded frontier entries are not removed. Expanding one again finds no
/// improvements, because the cheaper costs are already recorded.
pub(super) fn weighted_search<G, P>(
    algorithm: Algorithm,
    graph: &G,
    start: G::Location,
    goal: G::Location,
    options: &SearchOptions,
    priority: P,
) -> Result<Exploration<G::Location>, Error>
where
    G: WeightedGraph + ?Sized,
    P: Fn(G::Location, f64) -> f64,
{
    let mut cost_so_far = CostSoFar::new();
    cost_so_far.insert(start, 0.0);

    let exploration = explore(
        algorithm,
        graph,
        start,
        goal,
        PriorityQueue::new(),
        options,
        |_came_from, current, next| {
            let step = graph
                .cost(current, next)
                .filter(|cost| *cost >= 0.0)
                .ok_or_else(|| Error::invalid_contract(current, next))?;
            // every scheduled location has a recorded cost
            let new_cost = cost_so_far[&current] + step;
            match cost_so_far.get(&next) {
                Some(&known) if known <= new_cost => Ok(None),
                _ => {
                    cost_so_far.insert(next, new_cost);
                    Ok(Some(priority(next, new_cost)))
                }
            }
        },
    )?;

    Ok(Exploration {
        cost_so_far: Some(cost_so_far),
        ..exploration
    })
}
