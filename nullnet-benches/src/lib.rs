//! Benchmark support crate for nullnet.
//!
//! Provides seeded workload graphs and parameter types used by the Criterion
//! benchmarks for centrality computation and null-model generation.

pub mod error;
pub mod params;
pub mod workload;
