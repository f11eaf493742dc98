//! In-memory neighbor graph for the trust search.
//!
//! Collapses the multigraph of payments into a simple undirected graph: every
//! node maps to the set of nodes it has ever transacted with. The graph only
//! grows; edges are never removed.

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Undirected, unweighted adjacency sets keyed by node.
#[derive(Debug, Clone)]
pub struct NeighborGraph<N> {
    /// `adjacency[a]` holds every node sharing an edge with `a`.
    adjacency: HashMap<N, HashSet<N>>,
    /// Distinct undirected edges, self-loops counted once.
    edge_count: usize,
}

impl<N> Default for NeighborGraph<N> {
    fn default() -> Self {
        Self {
            adjacency: HashMap::new(),
            edge_count: 0,
        }
    }
}

impl<N: Eq + Hash + Clone> NeighborGraph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the node map for roughly `nodes` distinct endpoints.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(nodes),
            edge_count: 0,
        }
    }

    /// Connect `a` and `b`, creating either node on first reference.
    ///
    /// Idempotent. Returns `true` if the edge did not exist before.
    /// `add_edge(a, a)` records a self-loop.
    pub fn add_edge(&mut self, a: N, b: N) -> bool {
        let inserted = self
            .adjacency
            .entry(a.clone())
            .or_default()
            .insert(b.clone());
        self.adjacency.entry(b).or_default().insert(a);

        if inserted {
            self.edge_count += 1;
        }
        inserted
    }

    /// The neighbor set of `node`, or `None` if it was never an endpoint.
    pub fn neighbors<Q>(&self, node: &Q) -> Option<&HashSet<N>>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.adjacency.get(node)
    }

    /// Whether `node` has ever appeared as an endpoint.
    pub fn contains<Q>(&self, node: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.adjacency.contains_key(node)
    }

    /// Number of neighbors of `node` (0 when unknown).
    pub fn degree<Q>(&self, node: &Q) -> usize
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.neighbors(node).map_or(0, HashSet::len)
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of distinct undirected edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

impl<N: Eq + Hash + Clone> Extend<(N, N)> for NeighborGraph<N> {
    fn extend<I: IntoIterator<Item = (N, N)>>(&mut self, pairs: I) {
        for (a, b) in pairs {
            self.add_edge(a, b);
        }
    }
}

impl<N: Eq + Hash + Clone> FromIterator<(N, N)> for NeighborGraph<N> {
    fn from_iter<I: IntoIterator<Item = (N, N)>>(pairs: I) -> Self {
        let mut graph = Self::new();
        graph.extend(pairs);
        graph
    }
}
