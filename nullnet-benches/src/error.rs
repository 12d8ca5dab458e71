//! Benchmark setup error type.

use nullnet_core::NetworkError;

/// Errors that may occur while preparing benchmark inputs.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Graph generation or analysis failed.
    #[error("network operation failed: {0}")]
    Network(#[from] NetworkError),
    /// A workload was requested with too few nodes to hold an edge.
    #[error("workload needs at least two nodes, got {node_count}")]
    TooSmall {
        /// Requested node count.
        node_count: usize,
    },
}
