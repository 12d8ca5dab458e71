//! Command implementations and argument parsing for the nullnet CLI.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use nullnet_core::{
    CentralityEngine, CentralityScores, Graph, GlobalMetrics, Network, NetworkError, NullModel,
    RandomGraphGenerator, average_centrality, average_degree_histogram, clean_edges,
    correct_stub_parity, degree_sequence, ensemble_average, global_metrics,
};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument, warn};

use super::edgelist::{EdgeListError, EdgeListOptions, parse_edge_list};
use super::report::{ComparisonReport, ModelSummary, ObservedSummary};

const DEFAULT_TRIALS: u32 = 100;
const DEFAULT_BA_M: usize = 2;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "nullnet",
    about = "Compare an observed network with random-graph null models."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Compare centralities and global metrics against null-model ensembles.
    Compare(CompareCommand),
}

/// Options accepted by the `compare` command.
#[derive(Debug, Args, Clone)]
pub struct CompareCommand {
    /// Path to the edge list, one `a,b` pair per line.
    pub path: PathBuf,

    /// Number of random graphs generated per model.
    #[arg(
        long,
        default_value_t = DEFAULT_TRIALS,
        value_parser = clap::value_parser!(u32).range(1..),
    )]
    pub trials: u32,

    /// Erdős–Rényi edge probability; defaults to the observed density.
    #[arg(long = "er-p")]
    pub er_p: Option<f64>,

    /// Edges attached per new node in the Barabási–Albert model.
    #[arg(long = "ba-m", default_value_t = DEFAULT_BA_M)]
    pub ba_m: usize,

    /// Seed for reproducible ensembles; drawn from the OS when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Null models to compare against.
    #[arg(
        long = "model",
        value_enum,
        num_args = 1..,
        default_values_t = [ModelArg::Er, ModelArg::Configuration, ModelArg::ChungLu],
    )]
    pub models: Vec<ModelArg>,

    /// Field delimiter of the edge list.
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Relabel nodes as `<prefix>0001`, `<prefix>0002`, ... in order of
    /// first appearance.
    #[arg(long = "relabel-prefix")]
    pub relabel_prefix: Option<String>,
}

/// Null models selectable on the command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum ModelArg {
    /// Erdős–Rényi G(N, p).
    Er,
    /// Configuration model on the observed degree sequence.
    Configuration,
    /// Chung–Lu model on the observed degree sequence.
    ChungLu,
    /// Barabási–Albert preferential attachment.
    BarabasiAlbert,
}

impl ModelArg {
    fn to_model(self, er_p: f64, ba_m: usize) -> NullModel {
        match self {
            Self::Er => NullModel::ErdosRenyi { p: er_p },
            Self::Configuration => NullModel::Configuration,
            Self::ChungLu => NullModel::ChungLu,
            Self::BarabasiAlbert => NullModel::BarabasiAlbert { m: ba_m },
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The edge list file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: std::io::Error,
    },
    /// The edge list could not be parsed.
    #[error("failed to load `{path}`: {source}")]
    EdgeList {
        /// Path of the edge list.
        path: PathBuf,
        /// Parse failure.
        #[source]
        source: EdgeListError,
    },
    /// Graph computations failed.
    #[error(transparent)]
    Core(#[from] NetworkError),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the edge list, analysing the observed
/// network, or generating a null model fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use nullnet_cli::cli::{Cli, Command, CompareCommand, ModelArg, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "a,b\nb,c\nc,d\nd,a\na,c\n")?;
/// let cli = Cli {
///     command: Command::Compare(CompareCommand {
///         path: file.path().to_path_buf(),
///         trials: 5,
///         er_p: None,
///         ba_m: 2,
///         seed: Some(1),
///         models: vec![ModelArg::Configuration],
///         delimiter: ',',
///         relabel_prefix: None,
///     }),
/// };
/// let report = run_cli(cli)?;
/// assert_eq!(report.observed.nodes, 4);
/// assert_eq!(report.models.len(), 1);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ComparisonReport, CliError> {
    match cli.command {
        Command::Compare(compare) => {
            Span::current().record("command", field::display("compare"));
            run_compare(compare)
        }
    }
}

#[instrument(
    name = "cli.compare",
    err,
    skip(command),
    fields(path = %command.path.display(), trials = command.trials, seed = field::Empty),
)]
pub(super) fn run_compare(command: CompareCommand) -> Result<ComparisonReport, CliError> {
    let options = EdgeListOptions {
        delimiter: command.delimiter,
        relabel_prefix: command.relabel_prefix.clone(),
    };
    let edges = load_edge_list(&command.path, &options)?;
    let observed_graph = clean_edges(Vec::<String>::new(), edges)?;
    let observed = observe(&command.path, &observed_graph)?;
    info!(
        nodes = observed.nodes,
        edges = observed.edges,
        "observed network analysed"
    );

    let degrees = correct_stub_parity(degrees_by_label(&observed_graph));
    let generator = RandomGraphGenerator::new(observed.nodes).with_degree_sequence(degrees)?;
    let er_p = command.er_p.unwrap_or(observed.density);
    let mut rng = match command.seed {
        Some(seed) => {
            Span::current().record("seed", seed);
            SmallRng::seed_from_u64(seed)
        }
        None => SmallRng::from_entropy(),
    };

    let mut selected: Vec<ModelArg> = Vec::with_capacity(command.models.len());
    for &arg in &command.models {
        if !selected.contains(&arg) {
            selected.push(arg);
        }
    }
    let mut models = Vec::with_capacity(selected.len());
    for arg in selected {
        let model = arg.to_model(er_p, command.ba_m);
        models.push(run_ensemble(&generator, model, command.trials, &mut rng)?);
    }
    Ok(ComparisonReport {
        trials: command.trials,
        seed: command.seed,
        observed,
        models,
    })
}

fn load_edge_list(
    path: &Path,
    options: &EdgeListOptions,
) -> Result<Vec<(String, String)>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let list = parse_edge_list(BufReader::new(file), options).map_err(|source| {
        CliError::EdgeList {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(list.edges)
}

fn observe(path: &Path, graph: &Graph<String>) -> Result<ObservedSummary, CliError> {
    let engine = CentralityEngine::new(graph)?;
    let nodes = graph.node_count();
    let edges = graph.edge_count();
    Ok(ObservedSummary {
        name: derive_network_name(path),
        nodes,
        edges,
        density: density(nodes, edges),
        betweenness: engine.betweenness()?,
        closeness: engine.closeness()?,
        global: global_metrics(graph)?,
        degree_histogram: degree_histogram(graph)?,
    })
}

fn degree_histogram(graph: &Graph<String>) -> Result<Vec<f64>, NetworkError> {
    let degrees = degree_sequence(graph);
    let max_degree = degrees.iter().copied().max().unwrap_or_default();
    average_degree_histogram(&[degrees], max_degree)
}

/// Degrees in ascending label order, so generated node `i` targets the
/// degree of the observed node it is reported against.
pub(super) fn degrees_by_label(graph: &Graph<String>) -> Vec<usize> {
    let labels = graph.labels();
    let mut order: Vec<usize> = (0..graph.node_count()).collect();
    order.sort_by(|&left, &right| labels[left].cmp(&labels[right]));
    order.into_iter().map(|node| graph.degree(node)).collect()
}

pub(super) fn density(nodes: usize, edges: usize) -> f64 {
    if nodes < 2 {
        return 0.0;
    }
    (2 * edges) as f64 / (nodes * (nodes - 1)) as f64
}

pub(super) fn derive_network_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "network".to_owned(), ToOwned::to_owned)
}

struct TrialStatistics {
    betweenness: CentralityScores<usize>,
    closeness: CentralityScores<usize>,
    global: GlobalMetrics,
}

fn trial_statistics(graph: &Graph) -> Result<TrialStatistics, NetworkError> {
    let engine = CentralityEngine::new(graph)?;
    Ok(TrialStatistics {
        betweenness: engine.betweenness()?,
        closeness: engine.closeness()?,
        global: global_metrics(graph)?,
    })
}

/// Runs `trials` generations of `model`.
///
/// Generation errors abort the command. A generated graph whose statistics
/// are undefined (for example an edgeless Erdős–Rényi draw) is skipped with a
/// warning and excluded from the averages.
#[instrument(
    name = "cli.ensemble",
    err,
    skip(generator, model, rng),
    fields(model = model.name()),
)]
pub(super) fn run_ensemble<R>(
    generator: &RandomGraphGenerator,
    model: NullModel,
    trials: u32,
    rng: &mut R,
) -> Result<ModelSummary, CliError>
where
    R: Rng + ?Sized,
{
    let mut betweenness = Vec::new();
    let mut closeness = Vec::new();
    let mut global = Vec::new();
    let mut degree_lists = Vec::new();
    let mut skipped = 0_u32;
    for trial in 0..trials {
        let graph = generator.generate(model, rng)?;
        degree_lists.push(degree_sequence(&graph));
        match trial_statistics(&graph) {
            Ok(stats) => {
                betweenness.push(stats.betweenness);
                closeness.push(stats.closeness);
                global.push(stats.global);
            }
            Err(err) => {
                skipped += 1;
                warn!(trial, error = %err, code = %err.code(), "skipping degenerate trial");
            }
        }
    }
    let max_degree = degree_lists
        .iter()
        .flatten()
        .copied()
        .max()
        .unwrap_or_default();
    let summary = ModelSummary {
        model,
        completed: trials - skipped,
        skipped,
        betweenness: average_or_none(&betweenness, average_centrality)?,
        closeness: average_or_none(&closeness, average_centrality)?,
        global: average_or_none(&global, ensemble_average)?,
        degree_histogram: average_degree_histogram(&degree_lists, max_degree)?,
    };
    info!(
        completed = summary.completed,
        skipped = summary.skipped,
        "ensemble completed"
    );
    Ok(summary)
}

fn average_or_none<T, A>(
    trials: &[T],
    average: impl FnOnce(&[T]) -> Result<A, NetworkError>,
) -> Result<Option<A>, NetworkError> {
    if trials.is_empty() {
        return Ok(None);
    }
    average(trials).map(Some)
}
