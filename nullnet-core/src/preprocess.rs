//! Preparation of empirical networks before they are compared with null
//! models.

use std::{fmt, hash::Hash};

use tracing::{debug, info, instrument};

use crate::{
    error::{NetworkError, Result},
    graph::{Graph, Network},
};

/// Builds a simple graph from raw labelled nodes and edges.
///
/// Self-loops and repeated edges are dropped and each drop is logged at
/// `debug`. Nodes left without any edge are then removed. Node order follows
/// first appearance, listed nodes before edge endpoints.
///
/// # Errors
/// Returns [`NetworkError::InvalidInput`] when the raw input has no nodes or
/// no edges, and [`NetworkError::InsufficientNodes`] when at most one node
/// survives the cleanup.
///
/// # Examples
/// ```
/// use nullnet_core::{Network, clean_edges};
///
/// let edges = [("a", "b"), ("b", "a"), ("c", "c"), ("b", "d")];
/// let graph = clean_edges(["lonely"], edges)?;
/// assert_eq!(graph.labels(), &["a", "b", "d"]);
/// assert_eq!(graph.edge_count(), 2);
/// # Ok::<(), nullnet_core::NetworkError>(())
/// ```
#[instrument(name = "preprocess.clean_edges", err, skip_all)]
pub fn clean_edges<N, I, E>(nodes: I, edges: E) -> Result<Graph<N>>
where
    N: Clone + Eq + Hash + Ord + fmt::Debug,
    I: IntoIterator<Item = N>,
    E: IntoIterator<Item = (N, N)>,
{
    let mut raw = Graph::new();
    for node in nodes {
        raw.add_node(node);
    }
    let mut raw_edges = 0_usize;
    for (left, right) in edges {
        raw_edges += 1;
        if left == right {
            debug!(node = ?left, "dropping self-loop");
            raw.add_node(left);
            continue;
        }
        let (left_label, right_label) = (left.clone(), right.clone());
        if !raw.add_edge(left, right) {
            debug!(left = ?left_label, right = ?right_label, "dropping repeated edge");
        }
    }
    if raw.node_count() == 0 {
        return Err(NetworkError::invalid_input("network has no nodes"));
    }
    if raw_edges == 0 {
        return Err(NetworkError::invalid_input("network has no edges"));
    }

    let connected: Vec<usize> = (0..raw.node_count())
        .filter(|&node| raw.degree(node) > 0)
        .collect();
    let isolated = raw.node_count() - connected.len();
    let graph = if isolated == 0 {
        raw
    } else {
        info!(isolated, "removing isolated nodes");
        Graph::induced(&raw, &connected)
    };
    NetworkError::require_nodes("preprocessed network", 2, graph.node_count())?;
    Ok(graph)
}

/// Returns the degree of every node in index order.
#[must_use]
pub fn degree_sequence<G>(graph: &G) -> Vec<usize>
where
    G: Network + ?Sized,
{
    (0..graph.node_count()).map(|node| graph.degree(node)).collect()
}

/// Makes the stub count even so the sequence can feed stub matching.
///
/// When the sum is odd, the first node with the largest degree gains one
/// stub. Even sequences are returned unchanged.
///
/// # Examples
/// ```
/// use nullnet_core::correct_stub_parity;
///
/// assert_eq!(correct_stub_parity(vec![1, 3, 3]), vec![1, 4, 3]);
/// assert_eq!(correct_stub_parity(vec![1, 3]), vec![1, 3]);
/// ```
#[must_use]
pub fn correct_stub_parity(mut degrees: Vec<usize>) -> Vec<usize> {
    let total: usize = degrees.iter().sum();
    if total % 2 == 0 {
        return degrees;
    }
    let largest = degrees.iter().copied().max().unwrap_or_default();
    if let Some(slot) = degrees.iter_mut().find(|degree| **degree == largest) {
        *slot += 1;
        debug!(degree = *slot, "added a stub to balance the degree sequence");
    }
    degrees
}
