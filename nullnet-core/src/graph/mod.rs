//! Undirected simple graphs and the capability trait consumed by the
//! statistics and generators.
//!
//! Nodes are addressed by dense indices `0..node_count()`. Each index maps to
//! a label: generated graphs use `usize` labels equal to their indices, while
//! empirical graphs typically carry `String` labels.

pub(crate) mod traversal;

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Read-only view of an undirected graph.
///
/// The centrality engine, global metrics and LCC extraction only rely on this
/// capability set, never on a concrete representation.
///
/// # Examples
/// ```
/// use nullnet_core::{Graph, Network};
///
/// let mut graph = Graph::new();
/// graph.add_edge("a", "b");
/// graph.add_edge("b", "c");
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// assert!(graph.is_connected());
/// assert_eq!(graph.connected_components(), vec![vec![0, 1, 2]]);
/// ```
pub trait Network {
    /// Label type attached to each node.
    type Node: Clone + Eq + Hash + Ord + fmt::Debug;

    /// Returns the number of nodes.
    fn node_count(&self) -> usize;

    /// Returns the number of undirected edges.
    fn edge_count(&self) -> usize;

    /// Returns the label of the node at `index`, if it exists.
    fn node(&self, index: usize) -> Option<&Self::Node>;

    /// Returns the neighbour indices of `index`; empty for unknown indices.
    fn neighbors(&self, index: usize) -> &[usize];

    /// Returns the degree of the node at `index`.
    fn degree(&self, index: usize) -> usize {
        self.neighbors(index).len()
    }

    /// Returns whether the graph is simple and undirected: no self-loops, no
    /// parallel edges, symmetric adjacency, and an edge count consistent with
    /// the adjacency lists.
    fn is_simple(&self) -> bool {
        let count = self.node_count();
        let mut seen = vec![usize::MAX; count];
        let mut endpoint_total = 0_usize;
        for node in 0..count {
            for &neighbor in self.neighbors(node) {
                if neighbor == node || neighbor >= count || seen[neighbor] == node {
                    return false;
                }
                seen[neighbor] = node;
                if !self.neighbors(neighbor).contains(&node) {
                    return false;
                }
            }
            endpoint_total += self.degree(node);
        }
        endpoint_total == 2 * self.edge_count()
    }

    /// Partitions the nodes into connected components.
    ///
    /// Components are listed in order of their smallest node index and each
    /// component lists its indices in ascending order.
    fn connected_components(&self) -> Vec<Vec<usize>> {
        traversal::components(self)
    }

    /// Returns whether every node can reach every other node. The empty graph
    /// is not connected.
    fn is_connected(&self) -> bool {
        let count = self.node_count();
        count > 0 && traversal::reachable_from(self, 0) == count
    }
}

/// In-memory undirected simple graph with labelled nodes.
///
/// Self-loops are refused and repeated edges collapse to one, so every
/// instance satisfies [`Network::is_simple`]. Adjacency lists are kept sorted.
///
/// # Examples
/// ```
/// use nullnet_core::{Graph, Network};
///
/// let mut graph = Graph::with_nodes(4);
/// assert!(graph.add_edge(0, 1));
/// assert!(!graph.add_edge(1, 0));
/// assert!(!graph.add_edge(2, 2));
/// assert_eq!(graph.edge_count(), 1);
/// assert_eq!(graph.node_count(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct Graph<N = usize> {
    labels: Vec<N>,
    index: HashMap<N, usize>,
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl<N> Graph<N>
where
    N: Clone + Eq + Hash + Ord + fmt::Debug,
{
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
            edge_count: 0,
        }
    }

    /// Adds a node, returning its index. Existing labels keep their index.
    pub fn add_node(&mut self, label: N) -> usize {
        if let Some(&existing) = self.index.get(&label) {
            return existing;
        }
        let position = self.labels.len();
        self.index.insert(label.clone(), position);
        self.labels.push(label);
        self.adjacency.push(Vec::new());
        position
    }

    /// Adds an undirected edge between two labels, creating missing nodes.
    ///
    /// Returns `true` when a new edge was inserted. Self-loops are refused
    /// (the node is still added) and repeated edges are ignored.
    pub fn add_edge(&mut self, left: N, right: N) -> bool {
        let left = self.add_node(left);
        let right = self.add_node(right);
        self.connect(left, right)
    }

    /// Returns the index assigned to `label`.
    #[must_use]
    pub fn index_of(&self, label: &N) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Returns whether an edge joins the two labels.
    #[must_use]
    pub fn contains_edge(&self, left: &N, right: &N) -> bool {
        match (self.index_of(left), self.index_of(right)) {
            (Some(left), Some(right)) => self.has_edge_between(left, right),
            _ => false,
        }
    }

    /// Returns the node labels in index order.
    #[must_use]
    pub fn labels(&self) -> &[N] {
        &self.labels
    }

    /// Iterates over edges as index pairs `(i, j)` with `i < j`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(node, row)| {
            row.iter()
                .copied()
                .filter(move |&neighbor| node < neighbor)
                .map(move |neighbor| (node, neighbor))
        })
    }

    /// Builds the subgraph of `network` induced by `members`.
    ///
    /// Members are visited in the given order, so passing ascending indices
    /// preserves the original node order. Unknown indices are skipped.
    #[must_use]
    pub fn induced<G>(network: &G, members: &[usize]) -> Self
    where
        G: Network<Node = N> + ?Sized,
    {
        let mut graph = Self::new();
        let mut remap = HashMap::with_capacity(members.len());
        for &member in members {
            if let Some(label) = network.node(member) {
                remap.insert(member, graph.add_node(label.clone()));
            }
        }
        for &member in members {
            let Some(&source) = remap.get(&member) else {
                continue;
            };
            for neighbor in network.neighbors(member) {
                if let Some(&target) = remap.get(neighbor) {
                    graph.connect(source, target);
                }
            }
        }
        graph
    }

    pub(crate) fn connect(&mut self, left: usize, right: usize) -> bool {
        if left == right || left >= self.adjacency.len() || right >= self.adjacency.len() {
            return false;
        }
        let Err(slot) = self.adjacency[left].binary_search(&right) else {
            return false;
        };
        self.adjacency[left].insert(slot, right);
        if let Err(slot) = self.adjacency[right].binary_search(&left) {
            self.adjacency[right].insert(slot, left);
        }
        self.edge_count += 1;
        true
    }

    pub(crate) fn has_edge_between(&self, left: usize, right: usize) -> bool {
        self.adjacency
            .get(left)
            .is_some_and(|row| row.binary_search(&right).is_ok())
    }
}

impl Graph<usize> {
    /// Creates a graph with nodes `0..count` and no edges.
    ///
    /// # Examples
    /// ```
    /// use nullnet_core::{Graph, Network};
    ///
    /// let graph = Graph::with_nodes(3);
    /// assert_eq!(graph.node_count(), 3);
    /// assert_eq!(graph.node(2), Some(&2));
    /// ```
    #[must_use]
    pub fn with_nodes(count: usize) -> Self {
        Self {
            labels: (0..count).collect(),
            index: (0..count).map(|node| (node, node)).collect(),
            adjacency: vec![Vec::new(); count],
            edge_count: 0,
        }
    }

    /// Creates the complete graph on nodes `0..count`.
    #[must_use]
    pub fn complete(count: usize) -> Self {
        let mut graph = Self::with_nodes(count);
        for left in 0..count {
            for right in (left + 1)..count {
                graph.connect(left, right);
            }
        }
        graph
    }

    pub(crate) fn push_node(&mut self) -> usize {
        let next = self.labels.len();
        self.add_node(next)
    }
}

impl<N> Default for Graph<N>
where
    N: Clone + Eq + Hash + Ord + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N: PartialEq> PartialEq for Graph<N> {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels && self.adjacency == other.adjacency
    }
}

impl<N: Eq> Eq for Graph<N> {}

impl<N> Network for Graph<N>
where
    N: Clone + Eq + Hash + Ord + fmt::Debug,
{
    type Node = N;

    fn node_count(&self) -> usize {
        self.labels.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn node(&self, index: usize) -> Option<&N> {
        self.labels.get(index)
    }

    fn neighbors(&self, index: usize) -> &[usize] {
        self.adjacency
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn is_simple(&self) -> bool {
        true
    }
}
