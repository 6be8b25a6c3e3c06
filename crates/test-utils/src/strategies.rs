//! `proptest` strategies for random DAGs.

use proptest::prelude::*;

use dagreduce::io::EdgeList;

/// Random DAG with up to `max_vertices` vertices.
///
/// Edges are drawn along a hidden topological order, then every vertex is
/// renamed through a random permutation, so vertex ids are usually *not*
/// topologically sorted. Parallel edges may occur.
pub fn dag_strategy(max_vertices: usize) -> impl Strategy<Value = EdgeList> {
    (1..=max_vertices).prop_flat_map(|n| {
        let raw_edges = proptest::collection::vec((0..n, 0..n), 0..=n * 3);
        let permutation = Just((0..n).collect::<Vec<usize>>()).prop_shuffle();

        (raw_edges, permutation).prop_map(move |(raw, perm)| {
            let edges = raw
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (perm[a.min(b)], perm[a.max(b)]))
                .collect();
            EdgeList {
                vertex_count: n,
                edges,
            }
        })
    })
}

/// Random DAG whose ids already follow a topological order (`src < dst`).
pub fn sorted_dag_strategy(max_vertices: usize) -> impl Strategy<Value = EdgeList> {
    (1..=max_vertices).prop_flat_map(|n| {
        proptest::collection::vec((0..n, 0..n), 0..=n * 3).prop_map(move |raw| EdgeList {
            vertex_count: n,
            edges: raw
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (a.min(b), a.max(b)))
                .collect(),
        })
    })
}
