//! Power iteration for eigenvector centrality.

use crate::{
    error::{NetworkError, Result},
    graph::Network,
};

/// Convergence settings for eigenvector power iteration.
///
/// # Examples
/// ```
/// use nullnet_core::PowerIteration;
///
/// let defaults = PowerIteration::default();
/// assert_eq!(defaults.max_iter(), 100);
/// assert!(PowerIteration::new(0, 1e-6).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerIteration {
    max_iter: usize,
    tolerance: f64,
}

impl PowerIteration {
    /// Default iteration cap.
    pub const DEFAULT_MAX_ITER: usize = 100;
    /// Default convergence tolerance on the largest per-node change.
    pub const DEFAULT_TOLERANCE: f64 = 1e-6;

    /// Creates validated settings.
    ///
    /// # Errors
    /// Returns [`NetworkError::InvalidParameter`] when `max_iter` is zero or
    /// `tolerance` is negative or not finite.
    pub fn new(max_iter: usize, tolerance: f64) -> Result<Self> {
        if max_iter == 0 {
            return Err(NetworkError::invalid_parameter(
                "max_iter",
                "must be at least 1",
            ));
        }
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(NetworkError::invalid_parameter(
                "tolerance",
                format!("must be finite and non-negative, got {tolerance}"),
            ));
        }
        Ok(Self {
            max_iter,
            tolerance,
        })
    }

    /// Returns the iteration cap of the power method.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_iter(&self) -> usize { self.max_iter }

    /// Returns the convergence tolerance on the largest per-node change.
    #[must_use]
    #[rustfmt::skip]
    pub fn tolerance(&self) -> f64 { self.tolerance }
}

impl Default for PowerIteration {
    fn default() -> Self {
        Self {
            max_iter: Self::DEFAULT_MAX_ITER,
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }
}

/// Dense symmetric adjacency matrix stored row-major.
///
/// Entry `(i, j)` is `1.0` when an edge joins nodes `i` and `j`.
#[derive(Clone, Debug, PartialEq)]
pub struct AdjacencyMatrix {
    order: usize,
    entries: Vec<f64>,
}

impl AdjacencyMatrix {
    /// Builds the matrix of `graph` in node-index order.
    #[must_use]
    pub fn from_network<G: Network + ?Sized>(graph: &G) -> Self {
        let order = graph.node_count();
        let mut entries = vec![0.0; order * order];
        for row in 0..order {
            for &column in graph.neighbors(row) {
                if let Some(entry) = entries.get_mut(row * order + column) {
                    *entry = 1.0;
                }
            }
        }
        Self { order, entries }
    }

    /// Returns the number of rows (and columns).
    #[must_use]
    #[rustfmt::skip]
    pub fn order(&self) -> usize { self.order }

    /// Returns entry `(row, column)`, or `None` outside the matrix.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.order || column >= self.order {
            return None;
        }
        self.entries.get(row * self.order + column).copied()
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.entries.chunks(self.order.max(1))
    }

    /// Computes `A * vector`. Missing trailing vector entries count as zero.
    #[must_use]
    pub fn multiply(&self, vector: &[f64]) -> Vec<f64> {
        self.rows()
            .map(|row| row.iter().zip(vector).map(|(a, x)| a * x).sum())
            .collect()
    }
}

/// Power iteration where each round sums the neighbours' previous scores.
pub(super) fn neighbor_sum<G: Network + ?Sized>(graph: &G, options: PowerIteration) -> Vec<f64> {
    let count = graph.node_count();
    iterate(count, options, |current| {
        (0..count)
            .map(|node| {
                graph
                    .neighbors(node)
                    .iter()
                    .filter_map(|&neighbor| current.get(neighbor))
                    .sum()
            })
            .collect()
    })
}

/// Power iteration through repeated matrix-vector products.
pub(super) fn matrix_product(matrix: &AdjacencyMatrix, options: PowerIteration) -> Vec<f64> {
    iterate(matrix.order(), options, |current| matrix.multiply(current))
}

pub(super) fn iterate(
    count: usize,
    options: PowerIteration,
    mut step: impl FnMut(&[f64]) -> Vec<f64>,
) -> Vec<f64> {
    let mut current = vec![1.0; count];
    for _ in 0..options.max_iter {
        let mut next = step(&current);
        let norm = next.iter().map(|value| value * value).sum::<f64>().sqrt();
        if norm <= 0.0 {
            return vec![0.0; count];
        }
        for value in &mut next {
            *value /= norm;
        }
        let change = current
            .iter()
            .zip(&next)
            .map(|(old, new)| (old - new).abs())
            .fold(0.0, f64::max);
        current = next;
        if change < options.tolerance {
            break;
        }
    }
    current
}
