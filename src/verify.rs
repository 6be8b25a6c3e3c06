// src/verify.rs

//! Independent checks of a reduced graph.
//!
//! [`reference_reduction`] is a brute-force transitive reduction built on
//! `petgraph`, sharing no code with the marker-based reducer: an edge
//! `x -> u` is redundant iff `u` is reachable from some other successor of
//! `x`. [`compare`] checks a reduced edge list against it and against the
//! reachability relation of the input.

use std::collections::{BTreeSet, HashSet};

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;

use crate::errors::{ReduceError, Result};
use crate::graph::Vertex;

/// Differences between a reduced edge list and the expected result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Edges of the reference reduction missing from the result.
    pub missing: Vec<(Vertex, Vertex)>,
    /// Edges of the result that the reference reduction drops.
    pub redundant: Vec<(Vertex, Vertex)>,
    /// Edges of the result not present in the input at all.
    pub foreign: Vec<(Vertex, Vertex)>,
    /// Vertices whose descendant set differs between input and result.
    pub reachability_mismatches: Vec<Vertex>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
            && self.redundant.is_empty()
            && self.foreign.is_empty()
            && self.reachability_mismatches.is_empty()
    }
}

fn build_graph(vertex_count: usize, edges: &[(Vertex, Vertex)]) -> Result<DiGraph<(), ()>> {
    let mut graph = DiGraph::with_capacity(vertex_count, edges.len());
    for _ in 0..vertex_count {
        graph.add_node(());
    }
    for &(src, dst) in edges {
        for v in [src, dst] {
            if v >= vertex_count {
                return Err(ReduceError::out_of_range(v, vertex_count));
            }
        }
        graph.add_edge(NodeIndex::new(src), NodeIndex::new(dst), ());
    }
    Ok(graph)
}

fn descendants(graph: &DiGraph<(), ()>, start: Vertex) -> HashSet<Vertex> {
    let mut dfs = Dfs::new(graph, NodeIndex::new(start));
    let mut seen = HashSet::new();
    while let Some(nx) = dfs.next(graph) {
        seen.insert(nx.index());
    }
    seen
}

/// Brute-force transitive reduction of a DAG, as a set of distinct edges.
///
/// Fails with `InvalidArgument` if the input contains a cycle, since the
/// reduction is only defined for DAGs.
pub fn reference_reduction(
    vertex_count: usize,
    edges: &[(Vertex, Vertex)],
) -> Result<BTreeSet<(Vertex, Vertex)>> {
    let graph = build_graph(vertex_count, edges)?;
    if is_cyclic_directed(&graph) {
        return Err(ReduceError::InvalidArgument(
            "input graph contains a cycle; transitive reduction is only defined for DAGs"
                .to_string(),
        ));
    }

    let mut kept = BTreeSet::new();
    for x in 0..vertex_count {
        let succ: BTreeSet<Vertex> = graph
            .neighbors(NodeIndex::new(x))
            .map(|n| n.index())
            .collect();
        let reach: Vec<(Vertex, HashSet<Vertex>)> =
            succ.iter().map(|&w| (w, descendants(&graph, w))).collect();

        for &u in &succ {
            let redundant = reach.iter().any(|(w, r)| *w != u && r.contains(&u));
            if !redundant {
                kept.insert((x, u));
            }
        }
    }
    Ok(kept)
}

/// Compare `reduced` against the reference reduction of `input` and check
/// that both have the same reachability relation.
pub fn compare(
    vertex_count: usize,
    input: &[(Vertex, Vertex)],
    reduced: &[(Vertex, Vertex)],
) -> Result<CheckReport> {
    let expected = reference_reduction(vertex_count, input)?;
    let input_set: BTreeSet<(Vertex, Vertex)> = input.iter().copied().collect();
    let actual: BTreeSet<(Vertex, Vertex)> = reduced.iter().copied().collect();

    let missing = expected.difference(&actual).copied().collect();
    let redundant = actual
        .difference(&expected)
        .filter(|e| input_set.contains(e))
        .copied()
        .collect();
    let foreign = actual.difference(&input_set).copied().collect();

    let before = build_graph(vertex_count, input)?;
    let after = build_graph(vertex_count, reduced)?;
    let reachability_mismatches = (0..vertex_count)
        .filter(|&v| descendants(&before, v) != descendants(&after, v))
        .collect();

    Ok(CheckReport {
        missing,
        redundant,
        foreign,
        reachability_mismatches,
    })
}
