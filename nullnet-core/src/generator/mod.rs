//! Random graph null models.
//!
//! Every model yields a fresh [`Graph`] with `usize` labels `0..N` per call.
//! The generator itself is stateless apart from its configuration; all
//! randomness comes from the caller's RNG, so seeding that RNG makes a run
//! reproducible.

use std::{collections::BTreeSet, fmt, iter};

use rand::{Rng, seq::SliceRandom};
use tracing::{debug, instrument};

use crate::{
    error::{NetworkError, Result},
    graph::{Graph, Network},
};

/// Size of the complete seed graph grown by the Barabási–Albert model. It is
/// also the upper bound for the number of edges each new node brings.
pub const BARABASI_ALBERT_SEED_SIZE: usize = 5;

/// Null model selector used by [`RandomGraphGenerator::generate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NullModel {
    /// G(N, p): each node pair is joined independently with probability `p`.
    ErdosRenyi {
        /// Edge probability in `[0, 1]`.
        p: f64,
    },
    /// Stub matching on the configured degree sequence.
    Configuration,
    /// Independent edges with probability proportional to `d_i * d_j`.
    ChungLu,
    /// Preferential attachment grown from a complete seed graph.
    BarabasiAlbert {
        /// Edges added with each new node, in `1..=5`.
        m: usize,
    },
}

impl NullModel {
    /// Returns a stable name for logs, metrics and reports.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ErdosRenyi { .. } => "erdos_renyi",
            Self::Configuration => "configuration",
            Self::ChungLu => "chung_lu",
            Self::BarabasiAlbert { .. } => "barabasi_albert",
        }
    }
}

impl fmt::Display for NullModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ErdosRenyi { p } => write!(f, "Erdős–Rényi (p = {p})"),
            Self::Configuration => f.write_str("Configuration"),
            Self::ChungLu => f.write_str("Chung–Lu"),
            Self::BarabasiAlbert { m } => write!(f, "Barabási–Albert (m = {m})"),
        }
    }
}

/// Generates random graphs of a fixed size.
///
/// # Examples
/// ```
/// use nullnet_core::{Network, NullModel, RandomGraphGenerator};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let generator = RandomGraphGenerator::from_degree_sequence(vec![2, 2, 2, 2]);
/// let mut rng = SmallRng::seed_from_u64(7);
/// let graph = generator.generate(NullModel::Configuration, &mut rng)?;
/// assert_eq!(graph.node_count(), 4);
/// assert!(graph.edge_count() <= 4);
/// # Ok::<(), nullnet_core::NetworkError>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RandomGraphGenerator {
    node_count: usize,
    degrees: Vec<usize>,
}

impl RandomGraphGenerator {
    /// Creates a generator for `node_count` nodes without a degree sequence.
    /// Only the Erdős–Rényi and Barabási–Albert models can run without one.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            degrees: Vec::new(),
        }
    }

    /// Creates a generator whose node count equals the sequence length.
    #[must_use]
    pub fn from_degree_sequence(degrees: impl Into<Vec<usize>>) -> Self {
        let degrees = degrees.into();
        Self {
            node_count: degrees.len(),
            degrees,
        }
    }

    /// Attaches a degree sequence aligned to node indices.
    ///
    /// # Errors
    /// Returns [`NetworkError::InvalidInput`] when a non-empty sequence does
    /// not have one entry per node.
    pub fn with_degree_sequence(mut self, degrees: impl Into<Vec<usize>>) -> Result<Self> {
        let degrees = degrees.into();
        if !degrees.is_empty() && degrees.len() != self.node_count {
            return Err(NetworkError::invalid_input(format!(
                "degree sequence has {} entries for {} nodes",
                degrees.len(),
                self.node_count
            )));
        }
        self.degrees = degrees;
        Ok(self)
    }

    /// Returns the number of nodes in each generated graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns the target degree sequence; empty until one is supplied.
    #[must_use]
    #[rustfmt::skip]
    pub fn degrees(&self) -> &[usize] { &self.degrees }

    /// Generates one graph from `model`.
    ///
    /// # Errors
    /// Propagates the validation error of the selected model.
    pub fn generate<R>(&self, model: NullModel, rng: &mut R) -> Result<Graph>
    where
        R: Rng + ?Sized,
    {
        match model {
            NullModel::ErdosRenyi { p } => self.erdos_renyi(p, rng),
            NullModel::Configuration => self.configuration(rng),
            NullModel::ChungLu => self.chung_lu(rng),
            NullModel::BarabasiAlbert { m } => self.barabasi_albert(m, rng),
        }
    }

    /// Erdős–Rényi G(N, p). All N nodes are present even when isolated.
    ///
    /// # Errors
    /// Returns [`NetworkError::InvalidParameter`] unless `0 <= p <= 1`.
    #[instrument(name = "generator.erdos_renyi", err, skip(self, rng), fields(nodes = self.node_count))]
    pub fn erdos_renyi<R>(&self, p: f64, rng: &mut R) -> Result<Graph>
    where
        R: Rng + ?Sized,
    {
        if !(0.0..=1.0).contains(&p) {
            return Err(NetworkError::invalid_parameter(
                "p",
                format!("edge probability must lie in [0, 1], got {p}"),
            ));
        }
        let mut graph = Graph::with_nodes(self.node_count);
        for left in 0..self.node_count {
            for right in (left + 1)..self.node_count {
                if rng.gen_bool(p) {
                    graph.connect(left, right);
                }
            }
        }
        Ok(finish("erdos_renyi", graph))
    }

    /// Configuration model by stub matching.
    ///
    /// Stubs are shuffled and consumed in pairs. A pair joining a node to
    /// itself is dropped rather than redrawn and repeated pairs collapse to a
    /// single edge, so realised degrees can fall slightly below the targets.
    ///
    /// # Errors
    /// Returns [`NetworkError::InvalidInput`] when no degree sequence is
    /// configured and [`NetworkError::InvalidParameter`] when the stub count
    /// is odd.
    #[instrument(name = "generator.configuration", err, skip(self, rng), fields(nodes = self.degrees.len()))]
    pub fn configuration<R>(&self, rng: &mut R) -> Result<Graph>
    where
        R: Rng + ?Sized,
    {
        let degrees = self.require_degrees("configuration model")?;
        let stub_total: usize = degrees.iter().sum();
        if stub_total % 2 != 0 {
            return Err(NetworkError::invalid_parameter(
                "degrees",
                format!("stub count {stub_total} is odd"),
            ));
        }
        let mut stubs: Vec<usize> = degrees
            .iter()
            .enumerate()
            .flat_map(|(node, &degree)| iter::repeat_n(node, degree))
            .collect();
        stubs.shuffle(rng);

        let mut graph = Graph::with_nodes(degrees.len());
        let mut self_pairs = 0_usize;
        let mut repeated_pairs = 0_usize;
        while let (Some(left), Some(right)) = (stubs.pop(), stubs.pop()) {
            if left == right {
                self_pairs += 1;
            } else if !graph.connect(left, right) {
                repeated_pairs += 1;
            }
        }
        if self_pairs + repeated_pairs > 0 {
            debug!(self_pairs, repeated_pairs, "dropped stub pairs");
        }
        Ok(finish("configuration", graph))
    }

    /// Chung–Lu expected-degree model; see [`chung_lu_probability`].
    ///
    /// # Errors
    /// Returns [`NetworkError::InvalidInput`] when no degree sequence is
    /// configured or every degree is zero.
    #[instrument(name = "generator.chung_lu", err, skip(self, rng), fields(nodes = self.degrees.len()))]
    pub fn chung_lu<R>(&self, rng: &mut R) -> Result<Graph>
    where
        R: Rng + ?Sized,
    {
        let degrees = self.require_degrees("Chung–Lu model")?;
        let total: usize = degrees.iter().sum();
        if total == 0 {
            return Err(NetworkError::invalid_input(
                "Chung–Lu model needs a positive total degree",
            ));
        }
        let max_degree = degrees.iter().copied().max().unwrap_or_default();
        let mut graph = Graph::with_nodes(degrees.len());
        for (left, &left_degree) in degrees.iter().enumerate() {
            for (right, &right_degree) in degrees.iter().enumerate().skip(left + 1) {
                let p = chung_lu_probability(left_degree, right_degree, total, max_degree);
                if rng.gen_bool(p) {
                    graph.connect(left, right);
                }
            }
        }
        Ok(finish("chung_lu", graph))
    }

    /// Barabási–Albert preferential attachment.
    ///
    /// Growth starts from the complete graph on the first
    /// [`BARABASI_ALBERT_SEED_SIZE`] nodes. Each later node draws `m` distinct
    /// targets among the existing nodes with probability proportional to
    /// their current degree, so the result has `10 + m * (N - 5)` edges.
    ///
    /// # Errors
    /// Returns [`NetworkError::InvalidParameter`] unless `1 <= m <= 5` and
    /// [`NetworkError::InsufficientNodes`] when `N < 5`.
    #[instrument(name = "generator.barabasi_albert", err, skip(self, rng), fields(nodes = self.node_count))]
    pub fn barabasi_albert<R>(&self, m: usize, rng: &mut R) -> Result<Graph>
    where
        R: Rng + ?Sized,
    {
        if !(1..=BARABASI_ALBERT_SEED_SIZE).contains(&m) {
            return Err(NetworkError::invalid_parameter(
                "m",
                format!("edges per new node must lie in 1..={BARABASI_ALBERT_SEED_SIZE}, got {m}"),
            ));
        }
        NetworkError::require_nodes(
            "Barabási–Albert model",
            BARABASI_ALBERT_SEED_SIZE,
            self.node_count,
        )?;

        let mut graph = Graph::with_nodes(self.node_count);
        for left in 0..BARABASI_ALBERT_SEED_SIZE {
            for right in (left + 1)..BARABASI_ALBERT_SEED_SIZE {
                graph.connect(left, right);
            }
        }
        for newcomer in BARABASI_ALBERT_SEED_SIZE..self.node_count {
            let mut targets = BTreeSet::new();
            while targets.len() < m {
                targets.insert(preferential_target(&graph, newcomer, rng));
            }
            for target in targets {
                graph.connect(newcomer, target);
            }
        }
        Ok(finish("barabasi_albert", graph))
    }

    fn require_degrees(&self, model: &str) -> Result<&[usize]> {
        if self.degrees.is_empty() {
            return Err(NetworkError::invalid_input(format!(
                "{model} needs a non-empty degree sequence"
            )));
        }
        Ok(&self.degrees)
    }
}

/// Chung–Lu edge probability for nodes with degrees `left` and `right`.
///
/// The base value is `left * right / total`. When that exceeds one it is
/// rescaled by the squared maximum degree instead, and the result is clamped
/// to `[0, 1]`. A zero `total` yields zero.
///
/// # Examples
/// ```
/// use nullnet_core::chung_lu_probability;
///
/// assert_eq!(chung_lu_probability(2, 3, 12, 3), 0.5);
/// // 4 * 4 / 10 > 1, so the squared maximum degree is used.
/// assert_eq!(chung_lu_probability(4, 4, 10, 8), 0.25);
/// ```
#[must_use]
pub fn chung_lu_probability(left: usize, right: usize, total: usize, max_degree: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let product = (left * right) as f64;
    let mut probability = product / total as f64;
    if probability > 1.0 && max_degree > 0 {
        probability = product / (max_degree * max_degree) as f64;
    }
    probability.clamp(0.0, 1.0)
}

/// Picks an existing node (index below `newcomer`) by cumulative degree.
/// Falls back to a uniform draw when every existing node is isolated.
fn preferential_target<R>(graph: &Graph, newcomer: usize, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    let total: usize = (0..newcomer).map(|node| graph.degree(node)).sum();
    if total == 0 {
        return rng.gen_range(0..newcomer);
    }
    let threshold = rng.gen_range(0.0..=total as f64);
    let mut cumulative = 0_usize;
    for node in 0..newcomer {
        cumulative += graph.degree(node);
        if threshold <= cumulative as f64 {
            return node;
        }
    }
    newcomer - 1
}

/// Logs and counts a freshly generated graph under `model`, which must match
/// [`NullModel::name`].
fn finish(model: &'static str, graph: Graph) -> Graph {
    debug!(
        model,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "generated graph"
    );
    record_generated(model);
    graph
}

#[cfg(feature = "metrics")]
fn record_generated(model: &'static str) {
    metrics::counter!("generated_graphs_total", "model" => model).increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_generated(_model: &'static str) {}

#[cfg(test)]
mod tests;
