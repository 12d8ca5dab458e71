//! Breadth-first traversals shared by the centrality engine and global
//! metrics. All graphs are unweighted, so BFS yields shortest paths.

use std::collections::VecDeque;

use super::Network;

/// Counts the nodes reachable from `source`, including `source` itself.
pub(crate) fn reachable_from<G: Network + ?Sized>(graph: &G, source: usize) -> usize {
    distances_from(graph, source).iter().flatten().count()
}

/// Hop distances from `source`; `None` marks unreachable nodes.
pub(crate) fn distances_from<G: Network + ?Sized>(graph: &G, source: usize) -> Vec<Option<usize>> {
    let count = graph.node_count();
    let mut distance = vec![None; count];
    if source >= count {
        return distance;
    }
    distance[source] = Some(0);
    let mut queue = VecDeque::from([source]);
    while let Some(node) = queue.pop_front() {
        let next = distance[node].map_or(0, |hops| hops + 1);
        for &neighbor in graph.neighbors(node) {
            if distance[neighbor].is_none() {
                distance[neighbor] = Some(next);
                queue.push_back(neighbor);
            }
        }
    }
    distance
}

pub(crate) fn components<G: Network + ?Sized>(graph: &G) -> Vec<Vec<usize>> {
    let count = graph.node_count();
    let mut visited = vec![false; count];
    let mut components = Vec::new();
    for start in 0..count {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut members = vec![start];
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for &neighbor in graph.neighbors(node) {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    members.push(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }
        members.sort_unstable();
        components.push(members);
    }
    components
}

/// Shortest-path DAG rooted at one source.
pub(crate) struct ShortestPathDag {
    /// Nodes in non-decreasing distance order.
    pub(crate) order: Vec<usize>,
    /// Predecessors of each node on shortest paths from the source.
    pub(crate) predecessors: Vec<Vec<usize>>,
    /// Number of shortest paths from the source to each node.
    pub(crate) sigma: Vec<f64>,
}

impl ShortestPathDag {
    pub(crate) fn from_source<G: Network + ?Sized>(graph: &G, source: usize) -> Self {
        let count = graph.node_count();
        let mut order = Vec::with_capacity(count);
        let mut predecessors = vec![Vec::new(); count];
        let mut sigma = vec![0.0_f64; count];
        let mut distance: Vec<Option<usize>> = vec![None; count];
        if source < count {
            sigma[source] = 1.0;
            distance[source] = Some(0);
            let mut queue = VecDeque::from([source]);
            while let Some(node) = queue.pop_front() {
                order.push(node);
                let next = distance[node].map_or(0, |hops| hops + 1);
                for &neighbor in graph.neighbors(node) {
                    if distance[neighbor].is_none() {
                        distance[neighbor] = Some(next);
                        queue.push_back(neighbor);
                    }
                    if distance[neighbor] == Some(next) {
                        sigma[neighbor] += sigma[node];
                        predecessors[neighbor].push(node);
                    }
                }
            }
        }
        Self {
            order,
            predecessors,
            sigma,
        }
    }

    /// Enumerates every shortest path from the root to `target`.
    ///
    /// Each path is passed to `visit` ordered from the root to `target`.
    /// Nothing is visited when `target` is unreachable or equals the root.
    pub(crate) fn for_each_path(&self, target: usize, mut visit: impl FnMut(&[usize])) {
        let Some(first) = self.predecessors.get(target) else {
            return;
        };
        if first.is_empty() {
            return;
        }
        // Each frame holds a node on the partial path (walked backwards from
        // the target) and the position of the next predecessor to try.
        let mut stack: Vec<(usize, usize)> = vec![(target, 0)];
        let mut path = Vec::new();
        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            let predecessors = &self.predecessors[node];
            if predecessors.is_empty() {
                path.clear();
                path.extend(stack.iter().rev().map(|&(step, _)| step));
                visit(&path);
                stack.pop();
                continue;
            }
            if cursor == predecessors.len() {
                stack.pop();
                continue;
            }
            frame.1 += 1;
            stack.push((predecessors[cursor], 0));
        }
    }
}
