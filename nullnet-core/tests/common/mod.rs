//! Graph builders shared by the integration tests.

use nullnet_core::Graph;

/// Path `0 - 1 - ... - (count - 1)`.
#[must_use]
pub fn path_graph(count: usize) -> Graph {
    let mut graph = Graph::with_nodes(count);
    for node in 1..count {
        graph.add_edge(node - 1, node);
    }
    graph
}

/// Star with centre `0` and leaves `1..=leaves`.
#[must_use]
pub fn star_graph(leaves: usize) -> Graph {
    let mut graph = Graph::with_nodes(leaves + 1);
    for leaf in 1..=leaves {
        graph.add_edge(0, leaf);
    }
    graph
}

/// Two triangles `{0, 1, 2}` and `{3, 4, 5}` with no edge between them.
#[must_use]
pub fn two_triangles() -> Graph {
    let mut graph = Graph::with_nodes(6);
    for (left, right) in [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)] {
        graph.add_edge(left, right);
    }
    graph
}

/// Asserts two floats agree to within `1e-9`.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
