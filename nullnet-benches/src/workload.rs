//! Seeded workload graphs for benchmarks.

use nullnet_core::{Graph, Network, RandomGraphGenerator, largest_connected_component};
use rand::{SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Shape of a synthetic workload graph.
#[derive(Clone, Copy, Debug)]
pub struct WorkloadConfig {
    /// Nodes before the largest component is extracted.
    pub node_count: usize,
    /// Target mean degree.
    pub mean_degree: usize,
    /// RNG seed.
    pub seed: u64,
}

/// Draws an Erdős–Rényi graph with the requested mean degree and returns its
/// largest connected component.
///
/// # Errors
/// Returns [`BenchSetupError::TooSmall`] for fewer than two nodes and
/// propagates generator failures.
pub fn workload_graph(config: &WorkloadConfig) -> Result<Graph, BenchSetupError> {
    if config.node_count < 2 {
        return Err(BenchSetupError::TooSmall {
            node_count: config.node_count,
        });
    }
    let p = (config.mean_degree as f64 / (config.node_count - 1) as f64).min(1.0);
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let graph = RandomGraphGenerator::new(config.node_count).erdos_renyi(p, &mut rng)?;
    Ok(largest_connected_component(&graph)?)
}

/// Joins two independent workload graphs, seeded `seed` and `seed + 1`, side
/// by side without any edge between them.
///
/// The result is disconnected, so centralities run their component-aware
/// path on it.
///
/// # Errors
/// Propagates the failures of [`workload_graph`].
pub fn disconnected_workload_graph(config: &WorkloadConfig) -> Result<Graph, BenchSetupError> {
    let first = workload_graph(config)?;
    let second = workload_graph(&WorkloadConfig {
        seed: config.seed.wrapping_add(1),
        ..*config
    })?;
    let offset = first.node_count();
    let mut graph = Graph::with_nodes(offset + second.node_count());
    for (left, right) in first.edges() {
        graph.add_edge(left, right);
    }
    for (left, right) in second.edges() {
        graph.add_edge(offset + left, offset + right);
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn rejects_graphs_without_room_for_an_edge(#[case] node_count: usize) {
        let config = WorkloadConfig {
            node_count,
            mean_degree: 4,
            seed: 1,
        };
        let Err(err) = workload_graph(&config) else {
            panic!("tiny workloads must fail");
        };
        assert!(matches!(err, BenchSetupError::TooSmall { node_count: n } if n == node_count));
    }

    #[rstest]
    fn workload_is_connected_and_reproducible() -> Result<(), BenchSetupError> {
        let config = WorkloadConfig {
            node_count: 200,
            mean_degree: 6,
            seed: 42,
        };
        let first = workload_graph(&config)?;
        let second = workload_graph(&config)?;
        assert!(first.is_connected());
        assert!(first.node_count() > 150);
        assert_eq!(first, second);
        Ok(())
    }

    #[rstest]
    fn disconnected_workload_keeps_both_halves() -> Result<(), BenchSetupError> {
        let config = WorkloadConfig {
            node_count: 100,
            mean_degree: 6,
            seed: 7,
        };
        let graph = disconnected_workload_graph(&config)?;
        let first = workload_graph(&config)?;
        let second = workload_graph(&WorkloadConfig { seed: 8, ..config })?;

        assert!(!graph.is_connected());
        assert_eq!(graph.connected_components().len(), 2);
        assert_eq!(graph.node_count(), first.node_count() + second.node_count());
        assert_eq!(graph.edge_count(), first.edge_count() + second.edge_count());
        Ok(())
    }

    #[rstest]
    fn dense_request_saturates_to_complete_graph() -> Result<(), BenchSetupError> {
        let config = WorkloadConfig {
            node_count: 6,
            mean_degree: 50,
            seed: 3,
        };
        let graph = workload_graph(&config)?;
        assert_eq!(graph.edge_count(), 15);
        Ok(())
    }
}
