//! The capabilities a searchable space must expose.
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Graph`] | best-first search |
//! | [`WeightedGraph`] : [`Graph`] | Dijkstra |
//! | [`AStarGraph`] : [`WeightedGraph`] | A* |

use std::{collections::HashMap, fmt::Debug, hash::Hash};

/// Minimal search interface: neighbor enumeration.
pub trait Graph {
    /// Identifies a node of the graph.
    type Location: Copy + Eq + Hash + Debug;

    /// Append the neighbors of `location` into `buf`, in traversal order.
    ///
    /// The caller clears `buf` before calling. Neighbors should not include
    /// `location` itself.
    fn neighbors(&self, location: Self::Location, buf: &mut Vec<Self::Location>);

    /// `true` when `location` is a node a search may start or end at.
    fn contains(&self, location: Self::Location) -> bool;
}

/// Graph with non-negative edge costs.
pub trait WeightedGraph: Graph {
    /// Cost of moving from `from` to its neighbor `to`.
    ///
    /// Must be defined, finite and non-negative for every `to` which
    /// [`Graph::neighbors`] yields for `from`. Returning `None` is a contract
    /// violation which aborts the search.
    fn cost(&self, from: Self::Location, to: Self::Location) -> Option<f64>;
}

/// Weighted graph with a distance estimate for A*.
pub trait AStarGraph: WeightedGraph {
    /// Estimated cost from `from` to `to`.
    ///
    /// A* returns optimal paths only if this never overestimates the true cost.
    fn estimate(&self, from: Self::Location, to: Self::Location) -> f64;
}

/// An explicit adjacency-list graph.
///
/// Edges are directed. A node exists once it has been added or named in any edge.
/// Its estimate is always zero, which makes A* over it behave like Dijkstra.
#[derive(Debug, Clone)]
pub struct SimpleGraph<L> {
    edges: HashMap<L, Vec<L>>,
    costs: HashMap<(L, L), f64>,
}

impl<L> Default for SimpleGraph<L> {
    fn default() -> Self {
        SimpleGraph {
            edges: HashMap::new(),
            costs: HashMap::new(),
        }
    }
}

impl<L: Copy + Eq + Hash> SimpleGraph<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, with no edges of its own yet.
    pub fn add_node(&mut self, node: L) {
        self.edges.entry(node).or_default();
    }

    /// Add an unweighted directed edge.
    ///
    /// Unweighted edges have no cost: weighted searches over them fail with
    /// [`Error::InvalidGraphContract`][crate::Error::InvalidGraphContract].
    pub fn add_edge(&mut self, from: L, to: L) {
        self.edges.entry(from).or_default().push(to);
        self.add_node(to);
    }

    /// Add a weighted directed edge.
    pub fn add_weighted_edge(&mut self, from: L, to: L, cost: f64) {
        self.add_edge(from, to);
        self.costs.insert((from, to), cost);
    }

    /// Add weighted edges in both directions.
    pub fn add_undirected_edge(&mut self, a: L, b: L, cost: f64) {
        self.add_weighted_edge(a, b, cost);
        self.add_weighted_edge(b, a, cost);
    }

    /// Iterate over every node of the graph.
    pub fn nodes(&self) -> impl Iterator<Item = L> + '_ {
        self.edges.keys().copied()
    }
}

impl<L: Copy + Eq + Hash + Debug> Graph for SimpleGraph<L> {
    type Location = L;

    fn neighbors(&self, location: L, buf: &mut Vec<L>) {
        if let Some(edges) = self.edges.get(&location) {
            buf.extend_from_slice(edges);
        }
    }

    fn contains(&self, location: L) -> bool {
        self.edges.contains_key(&location)
    }
}

impl<L: Copy + Eq + Hash + Debug> WeightedGraph for SimpleGraph<L> {
    fn cost(&self, from: L, to: L) -> Option<f64> {
        self.costs.get(&(from, to)).copied()
    }
}

impl<L: Copy + Eq + Hash + Debug> AStarGraph for SimpleGraph<L> {
    fn estimate(&self, _from: L, _to: L) -> f64 {
        0.0
    }
}
