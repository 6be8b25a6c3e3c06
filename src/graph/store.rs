// src/graph/store.rs

use std::ops::Range;

use crate::errors::{ReduceError, Result};

/// Vertex identifier in `[0, vertex_count)`.
pub type Vertex = usize;

/// Stable handle to an edge inside a [`GraphStore`].
///
/// Handles are never reused, so removing one edge does not invalidate the
/// handles of any other edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeHandle(usize);

#[derive(Debug, Clone)]
struct EdgeSlot {
    src: Vertex,
    dst: Vertex,
    live: bool,
}

/// Mutable directed graph with a fixed vertex set.
///
/// Edges can only be added during construction and removed afterwards; the
/// reducer never adds edges. Parallel edges are kept as given.
///
/// Removal is O(1) amortized: a removed edge is only flagged dead, and a
/// vertex's out-list is compacted once more than half of it is dead.
#[derive(Debug, Clone)]
pub struct GraphStore {
    vertex_count: usize,
    edges: Vec<EdgeSlot>,
    /// Out-edge handles per vertex, in insertion order. May contain dead handles.
    out: Vec<Vec<EdgeHandle>>,
    /// Number of dead handles still listed in `out[v]`.
    dead_in_out: Vec<usize>,
    live_edges: usize,
}

impl GraphStore {
    /// Create a graph with `vertex_count` isolated vertices.
    pub fn new(vertex_count: usize) -> Result<Self> {
        if vertex_count == 0 {
            return Err(ReduceError::InvalidSize(0));
        }

        Ok(Self {
            vertex_count,
            edges: Vec::new(),
            out: vec![Vec::new(); vertex_count],
            dead_in_out: vec![0; vertex_count],
            live_edges: 0,
        })
    }

    /// Build a graph from a vertex count and an edge list.
    pub fn from_edges<I>(vertex_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Vertex, Vertex)>,
    {
        let mut graph = Self::new(vertex_count)?;
        for (src, dst) in edges {
            graph.add_edge(src, dst)?;
        }
        Ok(graph)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of edges that have not been removed.
    pub fn edge_count(&self) -> usize {
        self.live_edges
    }

    /// Insert a directed edge `src -> dst`.
    ///
    /// No acyclicity check is performed; callers are expected to supply a DAG.
    pub fn add_edge(&mut self, src: Vertex, dst: Vertex) -> Result<EdgeHandle> {
        self.check_vertex(src)?;
        self.check_vertex(dst)?;

        let handle = EdgeHandle(self.edges.len());
        self.edges.push(EdgeSlot {
            src,
            dst,
            live: true,
        });
        self.out[src].push(handle);
        self.live_edges += 1;
        Ok(handle)
    }

    /// Snapshot of the current out-edges of `v` as `(neighbor, handle)` pairs.
    ///
    /// The returned vector is detached from the graph, so removing edges while
    /// walking it is safe.
    pub fn out_neighbors(&self, v: Vertex) -> Result<Vec<(Vertex, EdgeHandle)>> {
        self.check_vertex(v)?;
        Ok(self.out[v]
            .iter()
            .filter_map(|&h| {
                let slot = &self.edges[h.0];
                slot.live.then_some((slot.dst, h))
            })
            .collect())
    }

    /// Borrowing iterator over the current successors of `v`.
    ///
    /// Unlike [`out_neighbors`](Self::out_neighbors) this does not allocate,
    /// and the borrow rules out removals while it is alive.
    pub fn successors(&self, v: Vertex) -> Result<impl Iterator<Item = Vertex> + '_> {
        self.check_vertex(v)?;
        Ok(self.out[v].iter().filter_map(|&h| {
            let slot = &self.edges[h.0];
            slot.live.then_some(slot.dst)
        }))
    }

    /// Remove an edge by handle.
    ///
    /// Returns `true` if the edge was live; removing an already removed (or
    /// unknown) handle is a no-op returning `false`.
    pub fn remove_edge(&mut self, handle: EdgeHandle) -> bool {
        let Some(slot) = self.edges.get_mut(handle.0) else {
            return false;
        };
        if !slot.live {
            return false;
        }

        slot.live = false;
        let src = slot.src;
        self.live_edges -= 1;

        self.dead_in_out[src] += 1;
        if self.dead_in_out[src] * 2 > self.out[src].len() {
            let edges = &self.edges;
            self.out[src].retain(|h| edges[h.0].live);
            self.dead_in_out[src] = 0;
        }
        true
    }

    /// Endpoints of a live edge, or `None` if it was removed.
    pub fn endpoints(&self, handle: EdgeHandle) -> Option<(Vertex, Vertex)> {
        self.edges
            .get(handle.0)
            .filter(|slot| slot.live)
            .map(|slot| (slot.src, slot.dst))
    }

    /// Whether at least one live edge `src -> dst` exists.
    pub fn contains_edge(&self, src: Vertex, dst: Vertex) -> bool {
        match self.successors(src) {
            Ok(mut succ) => succ.any(|v| v == dst),
            Err(_) => false,
        }
    }

    /// All live edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.edges
            .iter()
            .filter(|slot| slot.live)
            .map(|slot| (slot.src, slot.dst))
    }

    /// Live edges whose source lies in `range`, by ascending source and then
    /// insertion order.
    pub fn edges_from(&self, range: Range<Vertex>) -> Result<Vec<(Vertex, Vertex)>> {
        if range.end > self.vertex_count {
            return Err(ReduceError::out_of_range(range.end - 1, self.vertex_count));
        }

        let mut out = Vec::new();
        for src in range {
            out.extend(self.successors(src)?.map(|dst| (src, dst)));
        }
        Ok(out)
    }

    fn check_vertex(&self, v: Vertex) -> Result<()> {
        if v >= self.vertex_count {
            return Err(ReduceError::out_of_range(v, self.vertex_count));
        }
        Ok(())
    }
}
