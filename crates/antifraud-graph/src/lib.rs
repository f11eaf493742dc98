//! antifraud-graph: Social-distance engine for the payment trust graph.
//!
//! Keeps an undirected neighbor graph of every pair of users that ever
//! transacted, and answers "how many hops apart are these two users" with a
//! bidirectional breadth-first search bounded by a small cutoff. Distances
//! past the cutoff and disconnected pairs both report the sentinel
//! `max_depth + 1`.

pub mod classify;
pub mod graph;
pub mod search;

pub use classify::{build_graph, classify, labels_for};
pub use graph::NeighborGraph;
pub use search::{bidirectional_search, distance, sentinel, Miss, SearchOutcome};
