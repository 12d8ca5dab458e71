//! Command-line interface for comparing an observed network with null-model
//! ensembles.
//!
//! The single `compare` command loads an edge list, analyses it, generates
//! random graphs from the requested models, and reports observed statistics
//! next to the ensemble means.

mod commands;
mod edgelist;
mod report;

pub use commands::{Cli, CliError, Command, CompareCommand, ModelArg, run_cli};
pub use edgelist::{EdgeList, EdgeListError, EdgeListOptions, parse_edge_list};
pub use report::{ComparisonReport, ModelSummary, ObservedSummary, render_report};
