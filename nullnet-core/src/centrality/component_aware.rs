//! Centrality definitions that stay meaningful on disconnected graphs.
//!
//! Each function returns raw per-node values indexed like the graph; callers
//! apply any normalisation.

use crate::graph::{
    Network,
    traversal::{ShortestPathDag, distances_from},
};

/// Closeness scaled by the fraction of the graph each node reaches.
pub(super) fn closeness<G: Network + ?Sized>(graph: &G) -> Vec<f64> {
    let count = graph.node_count();
    let others = count.saturating_sub(1) as f64;
    (0..count)
        .map(|node| {
            let (reached, total) = reach_and_distance_sum(graph, node);
            if total == 0 || others == 0.0 {
                return 0.0;
            }
            let reached = reached as f64;
            (reached / total as f64) * (reached / others)
        })
        .collect()
}

/// Sum of inverse distances to every reachable node.
pub(super) fn harmonic<G: Network + ?Sized>(graph: &G) -> Vec<f64> {
    (0..graph.node_count())
        .map(|node| {
            distances_from(graph, node)
                .into_iter()
                .flatten()
                .filter(|&hops| hops > 0)
                .map(|hops| (hops as f64).recip())
                .sum()
        })
        .collect()
}

/// Brandes' dependency accumulation over ordered source-target pairs.
pub(super) fn betweenness<G: Network + ?Sized>(graph: &G) -> Vec<f64> {
    let count = graph.node_count();
    let mut totals = vec![0.0_f64; count];
    let mut dependency = vec![0.0_f64; count];
    for source in 0..count {
        let dag = ShortestPathDag::from_source(graph, source);
        dependency.fill(0.0);
        for &node in dag.order.iter().rev() {
            let coefficient = (1.0 + dependency[node]) / dag.sigma[node];
            for &predecessor in &dag.predecessors[node] {
                dependency[predecessor] += dag.sigma[predecessor] * coefficient;
            }
            if node != source {
                totals[node] += dependency[node];
            }
        }
    }
    totals
}

/// Counts the other nodes `node` reaches and sums their distances.
pub(super) fn reach_and_distance_sum<G: Network + ?Sized>(graph: &G, node: usize) -> (usize, usize) {
    distances_from(graph, node)
        .into_iter()
        .flatten()
        .filter(|&hops| hops > 0)
        .fold((0, 0), |(reached, total), hops| (reached + 1, total + hops))
}
