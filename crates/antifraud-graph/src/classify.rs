//! Graph construction and threshold classification.

use std::hash::Hash;

use antifraud_core::TrustLabel;

use crate::graph::NeighborGraph;
use crate::search::distance;

/// Build a graph from already validated identifier pairs.
pub fn build_graph<N, I>(pairs: I) -> NeighborGraph<N>
where
    N: Eq + Hash + Clone,
    I: IntoIterator<Item = (N, N)>,
{
    let graph: NeighborGraph<N> = pairs.into_iter().collect();
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Built neighbor graph"
    );
    graph
}

/// One label per cutoff: trusted iff `distance < cutoff`.
pub fn labels_for(distance: u32, thresholds: &[u32]) -> Vec<TrustLabel> {
    thresholds
        .iter()
        .map(|&cutoff| {
            if distance < cutoff {
                TrustLabel::Trusted
            } else {
                TrustLabel::Unverified
            }
        })
        .collect()
}

/// Search the pair and label it against every cutoff.
pub fn classify<N>(
    graph: &NeighborGraph<N>,
    (a, b): (&N, &N),
    thresholds: &[u32],
    max_depth: u32,
) -> Vec<TrustLabel>
where
    N: Eq + Hash + Clone,
{
    labels_for(distance(graph, a, b, max_depth), thresholds)
}
