// tests/property/reduction.rs

use std::collections::BTreeSet;

use proptest::prelude::*;

use dagreduce::coordinator::{Coordinator, surviving_edges};
use dagreduce::graph::{GraphStore, Vertex};
use dagreduce::io::{EdgeList, parse_dot_edges, render_artifact};
use dagreduce::reduce::Reducer;
use dagreduce::verify::{compare, reference_reduction};
use dagreduce_test_utils::strategies::{dag_strategy, sorted_dag_strategy};

fn reduce_with(list: &EdgeList, workers: usize) -> Vec<(Vertex, Vertex)> {
    let graph = list.to_graph().unwrap();
    let outputs = Coordinator::new(workers).unwrap().run_blocking(&graph).unwrap();
    surviving_edges(&outputs)
}

/// Descendants of `start` (excluding `start` itself unless on a cycle).
fn reachable(vertex_count: usize, edges: &[(Vertex, Vertex)], start: Vertex) -> BTreeSet<Vertex> {
    let mut adj = vec![Vec::new(); vertex_count];
    for &(s, d) in edges {
        adj[s].push(d);
    }
    let mut seen = BTreeSet::new();
    let mut stack = adj[start].clone();
    while let Some(v) = stack.pop() {
        if seen.insert(v) {
            stack.extend(adj[v].iter().copied());
        }
    }
    seen
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn agrees_with_reference_on_unsorted_ids(list in dag_strategy(14)) {
        let reduced: BTreeSet<_> = reduce_with(&list, 1).into_iter().collect();
        let expected = reference_reduction(list.vertex_count, &list.edges).unwrap();
        prop_assert_eq!(reduced, expected);
    }

    #[test]
    fn agrees_with_reference_on_sorted_ids(list in sorted_dag_strategy(14)) {
        let reduced: BTreeSet<_> = reduce_with(&list, 1).into_iter().collect();
        let expected = reference_reduction(list.vertex_count, &list.edges).unwrap();
        prop_assert_eq!(reduced, expected);
    }

    #[test]
    fn preserves_reachability_and_never_adds_edges(list in dag_strategy(14)) {
        let reduced = reduce_with(&list, 1);
        let input: BTreeSet<_> = list.edges.iter().copied().collect();
        for e in &reduced {
            prop_assert!(input.contains(e), "edge {:?} not in input", e);
        }
        for v in 0..list.vertex_count {
            prop_assert_eq!(
                reachable(list.vertex_count, &list.edges, v),
                reachable(list.vertex_count, &reduced, v)
            );
        }
        prop_assert!(compare(list.vertex_count, &list.edges, &reduced).unwrap().is_clean());
    }

    #[test]
    fn surviving_edges_are_locally_non_redundant(list in dag_strategy(14)) {
        let reduced = reduce_with(&list, 1);
        for &(x, u) in &reduced {
            let others: Vec<Vertex> = reduced
                .iter()
                .filter(|&&(s, d)| s == x && d != u)
                .map(|&(_, d)| d)
                .collect();
            for w in others {
                prop_assert!(
                    !reachable(list.vertex_count, &reduced, w).contains(&u),
                    "edge {}->{} still implied via {}", x, u, w
                );
            }
        }
    }

    #[test]
    fn reduction_is_idempotent(list in dag_strategy(14)) {
        let once = reduce_with(&list, 1);
        let again = reduce_with(
            &EdgeList { vertex_count: list.vertex_count, edges: once.clone() },
            1,
        );
        prop_assert_eq!(once, again);
    }

    #[test]
    fn output_is_independent_of_worker_count(
        list in dag_strategy(14),
        w1 in 1usize..6,
        w2 in 1usize..6,
    ) {
        prop_assert_eq!(reduce_with(&list, w1), reduce_with(&list, w2));
        prop_assert_eq!(reduce_with(&list, w1), reduce_with(&list, w1));
    }

    #[test]
    fn artifacts_conserve_vertices_and_edges(list in dag_strategy(14), workers in 1usize..6) {
        let graph = list.to_graph().unwrap();
        let outputs = Coordinator::new(workers).unwrap().run_blocking(&graph).unwrap();

        let mut vertex_lines = 0;
        let mut edges = Vec::new();
        for out in &outputs {
            let text = render_artifact(out.range.clone(), &out.edges);
            vertex_lines += text
                .lines()
                .filter(|l| l.ends_with(';') && !l.contains("->"))
                .count();
            edges.extend(parse_dot_edges(&text).unwrap());
        }

        prop_assert_eq!(vertex_lines, list.vertex_count);
        prop_assert_eq!(edges, surviving_edges(&outputs));
    }

    #[test]
    fn reducer_matches_coordinator(list in dag_strategy(14)) {
        let mut graph: GraphStore = list.to_graph().unwrap();
        Reducer::for_graph(&graph).reduce_all(&mut graph).unwrap();
        let mut direct: Vec<_> = graph.edges().collect();
        direct.sort();

        let mut coordinated = reduce_with(&list, 3);
        coordinated.sort();
        prop_assert_eq!(direct, coordinated);
    }
}
