//! Benchmark parameter types, rendered as Criterion benchmark ids.

use std::fmt;

/// Parameters for a centrality benchmark run.
#[derive(Clone, Debug)]
pub struct CentralityBenchParams {
    /// Nodes in the workload graph.
    pub node_count: usize,
    /// Target mean degree of the workload graph.
    pub mean_degree: usize,
}

impl fmt::Display for CentralityBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.node_count, self.mean_degree)
    }
}

/// Parameters for a null-model generation benchmark run.
#[derive(Clone, Debug)]
pub struct GeneratorBenchParams {
    /// Stable model name.
    pub model: &'static str,
    /// Nodes per generated graph.
    pub node_count: usize,
}

impl fmt::Display for GeneratorBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/n={}", self.model, self.node_count)
    }
}
