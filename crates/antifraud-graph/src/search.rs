//! Bounded bidirectional breadth-first search.
//!
//! Grows one frontier from the source and one from the target, always
//! advancing the smaller of the two by one hop. The round in which a newly
//! reached node is found on the other side's visited set is reported as the
//! hop count. The search gives up once the round counter passes `max_depth`,
//! which caps the work on graphs with millions of nodes and high-degree hubs.

use std::collections::HashSet;
use std::hash::Hash;

use crate::graph::NeighborGraph;

/// Why a search ended without connecting the two endpoints.
///
/// Every variant collapses to the same sentinel distance; the distinction is
/// only kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Miss {
    /// Source or target never appeared in the graph.
    UnknownNode,
    /// The round counter passed `max_depth`.
    DepthExceeded,
    /// A frontier emptied: the component was fully explored.
    Exhausted,
}

/// Terminal state of a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found { hops: u32 },
    NotFound(Miss),
}

impl SearchOutcome {
    pub fn hops(&self) -> Option<u32> {
        match self {
            Self::Found { hops } => Some(*hops),
            Self::NotFound(_) => None,
        }
    }

    /// Hop count, or the sentinel for `max_depth` when nothing was found.
    pub fn distance(&self, max_depth: u32) -> u32 {
        self.hops().unwrap_or_else(|| sentinel(max_depth))
    }
}

/// The "not found within bound" distance: one past the deepest round.
pub fn sentinel(max_depth: u32) -> u32 {
    max_depth.saturating_add(1)
}

/// Number of hops separating `source` and `target`, or `sentinel(max_depth)`.
///
/// Identical endpoints are searched like any other pair.
pub fn distance<N>(graph: &NeighborGraph<N>, source: &N, target: &N, max_depth: u32) -> u32
where
    N: Eq + Hash + Clone,
{
    bidirectional_search(graph, source, target, max_depth).distance(max_depth)
}

/// Run the bounded bidirectional search against the live graph.
///
/// `pred` holds every node ever placed in the forward frontier and `succ`
/// every node ever placed in the backward one. The result depends only on set
/// membership, so it is independent of neighbor iteration order.
pub fn bidirectional_search<'a, N>(
    graph: &'a NeighborGraph<N>,
    source: &'a N,
    target: &'a N,
    max_depth: u32,
) -> SearchOutcome
where
    N: Eq + Hash + Clone,
{
    if !graph.contains(source) || !graph.contains(target) {
        return SearchOutcome::NotFound(Miss::UnknownNode);
    }

    let mut pred: HashSet<&N> = HashSet::from([source]);
    let mut succ: HashSet<&N> = HashSet::from([target]);
    let mut forward: Vec<&N> = vec![source];
    let mut backward: Vec<&N> = vec![target];

    let mut round = 0;
    while !forward.is_empty() && !backward.is_empty() {
        round += 1;
        if round > max_depth {
            return SearchOutcome::NotFound(Miss::DepthExceeded);
        }

        let met = if forward.len() <= backward.len() {
            advance(graph, &mut forward, &mut pred, &succ)
        } else {
            advance(graph, &mut backward, &mut succ, &pred)
        };
        if met {
            return SearchOutcome::Found { hops: round };
        }
    }

    SearchOutcome::NotFound(Miss::Exhausted)
}

/// Replace `frontier` with the unvisited neighbors of its nodes.
///
/// Returns `true` as soon as one of them is already visited from the other
/// side.
fn advance<'a, N>(
    graph: &'a NeighborGraph<N>,
    frontier: &mut Vec<&'a N>,
    visited: &mut HashSet<&'a N>,
    other: &HashSet<&'a N>,
) -> bool
where
    N: Eq + Hash + Clone,
{
    let level = std::mem::take(frontier);
    for node in level {
        let Some(neighbors) = graph.neighbors(node) else {
            continue;
        };
        for next in neighbors {
            if visited.contains(next) {
                continue;
            }
            if other.contains(next) {
                return true;
            }
            visited.insert(next);
            frontier.push(next);
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ```text
    /// A - B - C - D
    /// ```
    fn build_chain() -> NeighborGraph<&'static str> {
        [("A", "B"), ("B", "C"), ("C", "D")].into_iter().collect()
    }

    /// Six nodes in a ring: 0 - 1 - 2 - 3 - 4 - 5 - 0.
    fn build_ring() -> NeighborGraph<u32> {
        (0..6).map(|i| (i, (i + 1) % 6)).collect()
    }

    #[test]
    fn test_chain_scenario() {
        let graph = build_chain();

        assert_eq!(distance(&graph, &"A", &"D", 4), 3);
        // The sentinel follows max_depth: a path longer than depth 2 reports 3,
        // not the 5 a fixed depth of 4 would give.
        assert_eq!(distance(&graph, &"A", &"D", 2), sentinel(2));
        assert_eq!(distance(&graph, &"A", &"D", 2), 3);
        assert_eq!(distance(&graph, &"A", &"E", 4), 5);
    }

    #[test]
    fn test_direct_edge_is_one_hop() {
        let graph = build_chain();
        for max_depth in 1..6 {
            assert_eq!(distance(&graph, &"B", &"C", max_depth), 1);
        }
    }

    #[test]
    fn test_unknown_nodes() {
        let graph = build_chain();
        assert_eq!(
            bidirectional_search(&graph, &"never-seen", &"also-never-seen", 4),
            SearchOutcome::NotFound(Miss::UnknownNode)
        );
        assert_eq!(
            bidirectional_search(&graph, &"A", &"never-seen", 4),
            SearchOutcome::NotFound(Miss::UnknownNode)
        );
        assert_eq!(distance(&graph, &"never-seen", &"also-never-seen", 4), 5);
    }

    #[test]
    fn test_depth_exceeded_versus_exhausted() {
        let graph: NeighborGraph<&str> = [("A", "B"), ("C", "D")].into_iter().collect();

        assert_eq!(
            bidirectional_search(&graph, &"A", &"C", 4),
            SearchOutcome::NotFound(Miss::Exhausted)
        );
        assert_eq!(
            bidirectional_search(&graph, &"A", &"C", 1),
            SearchOutcome::NotFound(Miss::DepthExceeded)
        );
        // Both collapse to the same sentinel.
        assert_eq!(distance(&graph, &"A", &"C", 4), 5);
    }

    #[test]
    fn test_zero_depth_never_finds() {
        let graph = build_chain();
        assert_eq!(
            bidirectional_search(&graph, &"A", &"B", 0),
            SearchOutcome::NotFound(Miss::DepthExceeded)
        );
        assert_eq!(distance(&graph, &"A", &"B", 0), 1);
    }

    #[test]
    fn test_bound_is_monotonic() {
        let graph = build_chain();
        for max_depth in 0..3 {
            assert_eq!(distance(&graph, &"A", &"D", max_depth), sentinel(max_depth));
        }
        for max_depth in 3..8 {
            assert_eq!(distance(&graph, &"A", &"D", max_depth), 3);
        }
    }

    #[test]
    fn test_ring_distances() {
        let graph = build_ring();
        assert_eq!(distance(&graph, &0, &1, 4), 1);
        assert_eq!(distance(&graph, &0, &2, 4), 2);
        assert_eq!(distance(&graph, &0, &3, 4), 3);
        assert_eq!(distance(&graph, &0, &4, 4), 2);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let chain = build_chain();
        let nodes = ["A", "B", "C", "D", "E"];
        for a in &nodes {
            for b in &nodes {
                for k in 0..5 {
                    assert_eq!(distance(&chain, a, b, k), distance(&chain, b, a, k));
                }
            }
        }

        let ring = build_ring();
        for a in 0..6 {
            for b in 0..6 {
                assert_eq!(distance(&ring, &a, &b, 4), distance(&ring, &b, &a, 4));
            }
        }
    }

    #[test]
    fn test_hub_expands_smaller_side() {
        let mut graph: NeighborGraph<String> = NeighborGraph::new();
        graph.add_edge("A".to_string(), "hub".to_string());
        for i in 0..50 {
            graph.add_edge("hub".to_string(), format!("leaf{i}"));
        }
        graph.add_edge("leaf7".to_string(), "Z".to_string());

        let a = "A".to_string();
        let z = "Z".to_string();
        assert_eq!(distance(&graph, &a, &z, 4), 3);
        assert_eq!(distance(&graph, &z, &a, 4), 3);
        assert_eq!(distance(&graph, &a, &"leaf30".to_string(), 4), 2);
    }

    #[test]
    fn test_same_endpoint_is_searched_normally() {
        // A lone neighbor cannot close a loop back to the node itself.
        let single: NeighborGraph<&str> = [("A", "B")].into_iter().collect();
        assert_eq!(
            bidirectional_search(&single, &"A", &"A", 4),
            SearchOutcome::NotFound(Miss::Exhausted)
        );

        // With two neighbors the backward side meets the forward one in round 2.
        let pair: NeighborGraph<&str> = [("A", "B"), ("A", "C")].into_iter().collect();
        assert_eq!(distance(&pair, &"A", &"A", 4), 2);

        // A self-loop never short-circuits to zero.
        let looped: NeighborGraph<&str> = [("A", "A")].into_iter().collect();
        assert_eq!(distance(&looped, &"A", &"A", 4), 5);
    }

    #[test]
    fn test_outcome_helpers() {
        assert_eq!(SearchOutcome::Found { hops: 2 }.hops(), Some(2));
        assert_eq!(SearchOutcome::Found { hops: 2 }.distance(4), 2);
        assert_eq!(SearchOutcome::NotFound(Miss::Exhausted).hops(), None);
        assert_eq!(SearchOutcome::NotFound(Miss::Exhausted).distance(4), 5);
        assert_eq!(sentinel(u32::MAX), u32::MAX);
    }
}
