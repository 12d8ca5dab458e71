//! Network-level statistics: clustering, average path length and diameter.
//!
//! Path statistics on a disconnected graph are evaluated on its largest
//! connected component. When that component cannot carry a path (fewer than
//! two nodes or no edges) the path statistics are NaN.

use tracing::{debug, instrument};

use crate::{
    error::{NetworkError, Result},
    graph::{Graph, Network, traversal::distances_from},
};

/// Global statistics of one graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobalMetrics {
    /// Mean local clustering coefficient over every node of the graph.
    pub clustering: f64,
    /// Mean shortest-path length over ordered node pairs.
    pub average_path_length: f64,
    /// Largest eccentricity.
    pub diameter: f64,
}

impl GlobalMetrics {
    /// Record keys, in sorted order.
    pub const KEYS: [&'static str; 3] = ["APL", "CC", "DIAM"];

    /// Looks a statistic up by its record key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        match key {
            "APL" => Some(self.average_path_length),
            "CC" => Some(self.clustering),
            "DIAM" => Some(self.diameter),
            _ => None,
        }
    }
}

/// Computes clustering, average path length and diameter.
///
/// Clustering always covers the whole graph. Path statistics cover the whole
/// graph when it is connected and its largest connected component otherwise.
///
/// # Errors
/// Returns [`NetworkError::InsufficientNodes`] for a graph without nodes and
/// [`NetworkError::InvalidInput`] when the graph is not simple and undirected.
///
/// # Examples
/// ```
/// use nullnet_core::{Graph, global_metrics};
///
/// let metrics = global_metrics(&Graph::complete(4))?;
/// assert_eq!(metrics.clustering, 1.0);
/// assert_eq!(metrics.average_path_length, 1.0);
/// assert_eq!(metrics.diameter, 1.0);
/// # Ok::<(), nullnet_core::NetworkError>(())
/// ```
#[instrument(
    name = "global.metrics",
    err,
    skip(graph),
    fields(nodes = graph.node_count(), edges = graph.edge_count()),
)]
pub fn global_metrics<G>(graph: &G) -> Result<GlobalMetrics>
where
    G: Network + ?Sized,
{
    NetworkError::require_nodes("global metrics", 1, graph.node_count())?;
    require_simple(graph)?;
    let clustering = average_clustering(graph);
    let (average_path_length, diameter) = if graph.is_connected() {
        path_statistics(graph)
    } else {
        let component = induce_largest_component(graph);
        debug!(
            component_nodes = component.node_count(),
            "graph is disconnected, measuring paths on the largest component"
        );
        path_statistics(&component)
    };
    Ok(GlobalMetrics {
        clustering,
        average_path_length,
        diameter,
    })
}

/// Mean local clustering coefficient. Nodes of degree below two contribute
/// zero; an empty graph yields zero. Neighbour indices outside the graph are
/// ignored.
#[must_use]
pub fn average_clustering<G>(graph: &G) -> f64
where
    G: Network + ?Sized,
{
    let count = graph.node_count();
    if count == 0 {
        return 0.0;
    }
    let mut marked = vec![false; count];
    let mut total = 0.0;
    for node in 0..count {
        let neighbours = graph.neighbors(node);
        let degree = neighbours.len();
        if degree < 2 {
            continue;
        }
        for &neighbour in neighbours {
            if let Some(mark) = marked.get_mut(neighbour) {
                *mark = true;
            }
        }
        // Each link among the neighbours is seen from both of its ends.
        let closed: usize = neighbours
            .iter()
            .map(|&neighbour| {
                graph
                    .neighbors(neighbour)
                    .iter()
                    .filter(|&&other| marked.get(other).copied().unwrap_or(false))
                    .count()
            })
            .sum();
        for &neighbour in neighbours {
            if let Some(mark) = marked.get_mut(neighbour) {
                *mark = false;
            }
        }
        total += closed as f64 / (degree * (degree - 1)) as f64;
    }
    total / count as f64
}

/// Extracts the largest connected component as a new graph.
///
/// Ties go to the component containing the smallest node index. Node order
/// is preserved, so a connected graph maps to an equal copy of itself.
///
/// # Errors
/// Returns [`NetworkError::InvalidInput`] when the graph is not simple and
/// undirected.
///
/// # Examples
/// ```
/// use nullnet_core::{Graph, Network, largest_connected_component};
///
/// let mut graph = Graph::new();
/// graph.add_edge("a", "b");
/// graph.add_edge("c", "d");
/// graph.add_edge("d", "e");
/// let component = largest_connected_component(&graph)?;
/// assert_eq!(component.labels(), &["c", "d", "e"]);
/// assert_eq!(graph.node_count(), 5);
/// # Ok::<(), nullnet_core::NetworkError>(())
/// ```
pub fn largest_connected_component<G>(graph: &G) -> Result<Graph<G::Node>>
where
    G: Network + ?Sized,
{
    require_simple(graph)?;
    Ok(induce_largest_component(graph))
}

fn require_simple<G>(graph: &G) -> Result<()>
where
    G: Network + ?Sized,
{
    if graph.is_simple() {
        Ok(())
    } else {
        Err(NetworkError::invalid_input(
            "graph must be simple and undirected",
        ))
    }
}

fn induce_largest_component<G>(graph: &G) -> Graph<G::Node>
where
    G: Network + ?Sized,
{
    let mut largest: &[usize] = &[];
    let components = graph.connected_components();
    for component in &components {
        if component.len() > largest.len() {
            largest = component.as_slice();
        }
    }
    Graph::induced(graph, largest)
}

/// Average path length and diameter, or NaN for both when no path exists.
fn path_statistics<G>(graph: &G) -> (f64, f64)
where
    G: Network + ?Sized,
{
    let count = graph.node_count();
    if count < 2 || graph.edge_count() == 0 {
        return (f64::NAN, f64::NAN);
    }
    let mut total = 0_usize;
    let mut diameter = 0_usize;
    for source in 0..count {
        for hops in distances_from(graph, source).into_iter().flatten() {
            total += hops;
            diameter = diameter.max(hops);
        }
    }
    let pairs = (count * (count - 1)) as f64;
    (total as f64 / pairs, diameter as f64)
}
