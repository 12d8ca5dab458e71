//! Node centralities computed directly on a [`Network`].
//!
//! Closeness, harmonic and betweenness centrality run the exact definitions
//! when the graph is connected. A single connectivity check at the start of
//! each call selects the component-aware definitions for disconnected graphs
//! instead; the chosen branch is reported through [`ComputationPath`].
//!
//! Exact betweenness enumerates every shortest path of every ordered node
//! pair. Its cost grows with the number of geodesics, so it is meant for
//! graphs of at most a few hundred nodes.

mod component_aware;
mod eigenvector;

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::{
    error::{NetworkError, Result},
    graph::{
        Network,
        traversal::ShortestPathDag,
    },
};

pub use self::eigenvector::{AdjacencyMatrix, PowerIteration};

/// Identifies which definition produced a set of centrality scores.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ComputationPath {
    /// The graph was connected and the exact definition was used.
    Exact,
    /// The graph was disconnected; scores follow the component-aware
    /// definition evaluated over the whole graph in one pass.
    ComponentAware,
}

impl ComputationPath {
    /// Returns a stable name for logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::ComponentAware => "component_aware",
        }
    }
}

/// Centrality score per node label.
///
/// Scores iterate in label order. The key set always equals the node set of
/// the graph the scores were computed for.
///
/// # Examples
/// ```
/// use nullnet_core::{CentralityEngine, ComputationPath, Graph};
///
/// let mut graph = Graph::new();
/// graph.add_edge("hub", "a");
/// graph.add_edge("hub", "b");
/// let engine = CentralityEngine::new(&graph)?;
/// let degree = engine.degree()?;
/// assert_eq!(degree.get(&"hub"), Some(1.0));
/// assert_eq!(degree.path(), ComputationPath::Exact);
/// # Ok::<(), nullnet_core::NetworkError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CentralityScores<N> {
    scores: BTreeMap<N, f64>,
    path: ComputationPath,
}

impl<N: Ord + Clone> CentralityScores<N> {
    fn from_indexed<G>(graph: &G, values: Vec<f64>, path: ComputationPath) -> Self
    where
        G: Network<Node = N> + ?Sized,
    {
        let scores = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, score)| graph.node(index).map(|label| (label.clone(), score)))
            .collect();
        Self { scores, path }
    }

    /// Returns the definition that produced these scores.
    #[must_use]
    #[rustfmt::skip]
    pub fn path(&self) -> ComputationPath { self.path }

    /// Returns the score of `node`.
    #[must_use]
    pub fn get(&self, node: &N) -> Option<f64> {
        self.scores.get(node).copied()
    }

    /// Returns the number of scored nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.scores.len() }

    /// Returns whether no node was scored.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.scores.is_empty() }

    /// Iterates over `(label, score)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, f64)> + '_ {
        self.scores.iter().map(|(label, &score)| (label, score))
    }

    /// Returns the scores in label order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.scores.values().copied().collect()
    }

    /// Returns the sum of all scores.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    /// Borrows the underlying label-to-score map.
    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<N, f64> {
        &self.scores
    }

    /// Consumes the scores, returning the label-to-score map.
    #[must_use]
    pub fn into_map(self) -> BTreeMap<N, f64> {
        self.scores
    }
}

/// Computes centralities for one immutable graph snapshot.
///
/// The engine never mutates the graph or keeps state between calls, so
/// repeated calls yield bit-identical results.
///
/// # Examples
/// ```
/// use nullnet_core::{CentralityEngine, Graph};
///
/// // Path 0-1-2-3-4: the centre lies on the most geodesics.
/// let mut graph = Graph::with_nodes(5);
/// for node in 1..5 {
///     graph.add_edge(node - 1, node);
/// }
/// let engine = CentralityEngine::new(&graph)?;
/// let betweenness = engine.betweenness()?;
/// assert!((betweenness.get(&2).unwrap_or_default() - 0.5).abs() < 1e-12);
/// assert_eq!(betweenness.get(&0), Some(0.0));
/// # Ok::<(), nullnet_core::NetworkError>(())
/// ```
#[derive(Debug)]
pub struct CentralityEngine<'g, G: ?Sized> {
    graph: &'g G,
}

impl<'g, G> CentralityEngine<'g, G>
where
    G: Network + ?Sized,
{
    /// Wraps `graph` after validating it.
    ///
    /// # Errors
    /// Returns [`NetworkError::InvalidInput`] when the graph has no nodes, no
    /// edges, or is not a simple undirected graph.
    #[instrument(
        name = "centrality.new",
        err,
        skip(graph),
        fields(nodes = graph.node_count(), edges = graph.edge_count()),
    )]
    pub fn new(graph: &'g G) -> Result<Self> {
        if graph.node_count() == 0 {
            return Err(NetworkError::invalid_input("graph has no nodes"));
        }
        if graph.edge_count() == 0 {
            return Err(NetworkError::invalid_input(
                "graph has no edges; centralities are undefined",
            ));
        }
        if !graph.is_simple() {
            return Err(NetworkError::invalid_input(
                "graph must be simple and undirected",
            ));
        }
        Ok(Self { graph })
    }

    /// Returns the wrapped graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn graph(&self) -> &'g G { self.graph }

    /// Degree centrality: `degree(n) / (N - 1)`.
    ///
    /// # Errors
    /// Returns [`NetworkError::InsufficientNodes`] when `N <= 1`.
    pub fn degree(&self) -> Result<CentralityScores<G::Node>> {
        let count = self.graph.node_count();
        NetworkError::require_nodes("degree centrality", 2, count)?;
        let scale = (count - 1) as f64;
        let values = (0..count)
            .map(|node| self.graph.degree(node) as f64 / scale)
            .collect();
        Ok(self.scores(values, ComputationPath::Exact))
    }

    /// Closeness centrality: reachable count divided by the distance sum.
    ///
    /// Disconnected graphs use the component-aware definition
    /// `((r - 1) / s) * ((r - 1) / (N - 1))`, where `r` counts the nodes a
    /// node reaches (itself included) and `s` is its distance sum.
    ///
    /// # Errors
    /// Returns [`NetworkError::InsufficientNodes`] when `N <= 1`.
    #[instrument(name = "centrality.closeness", err, skip(self))]
    pub fn closeness(&self) -> Result<CentralityScores<G::Node>> {
        NetworkError::require_nodes("closeness centrality", 2, self.graph.node_count())?;
        let path = self.select_path("closeness");
        let values = match path {
            ComputationPath::Exact => self.exact_closeness(),
            ComputationPath::ComponentAware => component_aware::closeness(self.graph),
        };
        Ok(self.scores(values, path))
    }

    /// Harmonic centrality: the sum of inverse distances divided by `N - 1`.
    ///
    /// Disconnected graphs report the unnormalised sum over reachable nodes.
    ///
    /// # Errors
    /// Returns [`NetworkError::InsufficientNodes`] when `N <= 1`.
    #[instrument(name = "centrality.harmonic", err, skip(self))]
    pub fn harmonic(&self) -> Result<CentralityScores<G::Node>> {
        let count = self.graph.node_count();
        NetworkError::require_nodes("harmonic centrality", 2, count)?;
        let path = self.select_path("harmonic");
        let values = match path {
            ComputationPath::Exact => {
                let scale = (count - 1) as f64;
                component_aware::harmonic(self.graph)
                    .into_iter()
                    .map(|sum| sum / scale)
                    .collect()
            }
            ComputationPath::ComponentAware => component_aware::harmonic(self.graph),
        };
        Ok(self.scores(values, path))
    }

    /// Exact betweenness centrality normalised by `1 / ((N - 1)(N - 2))`.
    ///
    /// Every shortest path of every ordered pair is enumerated and each
    /// interior node receives `1 / (number of shortest paths)` per path.
    /// Disconnected graphs use Brandes' accumulation with the same normaliser.
    ///
    /// # Errors
    /// Returns [`NetworkError::InsufficientNodes`] when `N <= 2`.
    #[instrument(name = "centrality.betweenness", err, skip(self))]
    pub fn betweenness(&self) -> Result<CentralityScores<G::Node>> {
        let count = self.graph.node_count();
        NetworkError::require_nodes("betweenness centrality", 3, count)?;
        let path = self.select_path("betweenness");
        let mut values = match path {
            ComputationPath::Exact => self.path_enumeration_betweenness(),
            ComputationPath::ComponentAware => component_aware::betweenness(self.graph),
        };
        let normaliser = 1.0 / ((count - 1) * (count - 2)) as f64;
        for value in &mut values {
            *value *= normaliser;
        }
        Ok(self.scores(values, path))
    }

    /// Eigenvector centrality by power iteration over neighbour sums.
    ///
    /// This is a best-effort fixed-point iteration: it stops at the first
    /// round whose largest per-node change is below the tolerance, or after
    /// the iteration cap, whichever comes first. A vanishing norm yields
    /// all-zero scores.
    #[must_use]
    pub fn eigenvector(&self, options: PowerIteration) -> CentralityScores<G::Node> {
        let values = eigenvector::neighbor_sum(self.graph, options);
        self.scores(values, ComputationPath::Exact)
    }

    /// Eigenvector centrality by power iteration with the dense adjacency
    /// matrix. Produces the same scores as [`Self::eigenvector`].
    #[must_use]
    pub fn eigenvector_matrix(&self, options: PowerIteration) -> CentralityScores<G::Node> {
        let matrix = self.adjacency_matrix();
        let values = eigenvector::matrix_product(&matrix, options);
        self.scores(values, ComputationPath::Exact)
    }

    /// Builds the dense adjacency matrix in node-index order.
    #[must_use]
    pub fn adjacency_matrix(&self) -> AdjacencyMatrix {
        AdjacencyMatrix::from_network(self.graph)
    }

    fn select_path(&self, statistic: &'static str) -> ComputationPath {
        if self.graph.is_connected() {
            return ComputationPath::Exact;
        }
        debug!(
            statistic,
            nodes = self.graph.node_count(),
            "graph is disconnected, using component-aware centrality"
        );
        record_fallback(statistic);
        ComputationPath::ComponentAware
    }

    fn exact_closeness(&self) -> Vec<f64> {
        let count = self.graph.node_count();
        (0..count)
            .map(|node| {
                let (reached, total) = component_aware::reach_and_distance_sum(self.graph, node);
                reached as f64 / total as f64
            })
            .collect()
    }

    fn path_enumeration_betweenness(&self) -> Vec<f64> {
        let count = self.graph.node_count();
        let mut totals = vec![0.0_f64; count];
        for source in 0..count {
            let dag = ShortestPathDag::from_source(self.graph, source);
            for target in (0..count).filter(|&target| target != source) {
                let path_count = dag.sigma[target];
                if path_count <= 0.0 {
                    continue;
                }
                let share = path_count.recip();
                dag.for_each_path(target, |path| {
                    let interior = path.get(1..path.len().saturating_sub(1)).unwrap_or_default();
                    for &node in interior {
                        totals[node] += share;
                    }
                });
            }
        }
        totals
    }

    fn scores(&self, values: Vec<f64>, path: ComputationPath) -> CentralityScores<G::Node> {
        CentralityScores::from_indexed(self.graph, values, path)
    }
}

#[cfg(feature = "metrics")]
fn record_fallback(statistic: &'static str) {
    metrics::counter!("centrality_fallbacks_total", "statistic" => statistic).increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_fallback(_statistic: &'static str) {}
