#![allow(dead_code)]

use dagreduce::graph::{GraphStore, Vertex};

/// Builder for small graphs used across tests.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    vertex_count: usize,
    edges: Vec<(Vertex, Vertex)>,
}

impl GraphBuilder {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: Vec::new(),
        }
    }

    pub fn edge(mut self, src: Vertex, dst: Vertex) -> Self {
        self.edges.push((src, dst));
        self
    }

    pub fn edges(mut self, edges: &[(Vertex, Vertex)]) -> Self {
        self.edges.extend_from_slice(edges);
        self
    }

    /// Add `path[0] -> path[1] -> ... -> path[n-1]`.
    pub fn path(mut self, path: &[Vertex]) -> Self {
        for pair in path.windows(2) {
            self.edges.push((pair[0], pair[1]));
        }
        self
    }

    /// Render in the edge-list input format.
    pub fn to_input_text(&self) -> String {
        let mut out = format!("{}\n", self.vertex_count);
        for (src, dst) in &self.edges {
            out.push_str(&format!("{src} {dst}\n"));
        }
        out
    }

    pub fn build(self) -> GraphStore {
        GraphStore::from_edges(self.vertex_count, self.edges)
            .expect("Failed to build graph from builder")
    }
}

/// Edges of `graph`, sorted.
pub fn sorted_edges(graph: &GraphStore) -> Vec<(Vertex, Vertex)> {
    let mut edges: Vec<_> = graph.edges().collect();
    edges.sort();
    edges
}
