use super::CameFrom;
use crate::{graph::WeightedGraph, Error};
use std::hash::Hash;

/// Walk a predecessor map back from `goal` to `start`.
///
/// Returns the locations from `start` to `goal`, both included. Fails with
/// [`Error::NoPathFound`] when `goal` was never discovered or its chain of
/// predecessors does not lead back to `start`.
pub fn reconstruct_path<L>(came_from: &CameFrom<L>, start: L, goal: L) -> Result<Vec<L>, Error>
where
    L: Copy + Eq + Hash,
{
    let mut current = goal;
    let mut path = Vec::new();
    while current != start {
        // a chain longer than the map has a cycle in it
        if path.len() > came_from.len() {
            return Err(Error::NoPathFound);
        }
        path.push(current);
        current = match came_from.get(&current) {
            Some(Some(predecessor)) => *predecessor,
            _ => return Err(Error::NoPathFound),
        };
    }
    path.push(start);
    path.reverse();
    Ok(path)
}

/// Total cost of walking `path` through `graph`.
pub fn path_cost<G>(graph: &G, path: &[G::Location]) -> Result<f64, Error>
where
    G: WeightedGraph + ?Sized,
{
    path.windows(2).try_fold(0.0, |total, step| {
        graph
            .cost(step[0], step[1])
            .map(|cost| total + cost)
            .ok_or_else(|| Error::invalid_contract(step[0], step[1]))
    })
}
