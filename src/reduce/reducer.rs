// src/reduce/reducer.rs

use std::ops::Range;

use tracing::{debug, trace};

use crate::errors::{ReduceError, Result};
use crate::graph::{EdgeHandle, GraphStore, Vertex};

/// Default interval (in roots) between progress log lines.
pub const DEFAULT_PROGRESS_EVERY: usize = 100;

/// Marks a vertex as a direct child of the current root.
///
/// Only meaningful while `round` equals the reducer's current round; older
/// tags are stale and never need clearing.
#[derive(Debug, Clone, Copy, Default)]
struct ChildTag {
    round: u64,
    edge: Option<EdgeHandle>,
}

/// Counters collected while reducing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReduceStats {
    /// Roots processed.
    pub roots: usize,
    /// DFS probes started (one per grandchild of every root).
    pub dfs_calls: u64,
    /// Vertices visited across all probes.
    pub visits: u64,
    /// Edges removed as redundant.
    pub edges_removed: usize,
}

/// Marker-based transitive reduction.
///
/// For every root `x` the reducer tags the direct children of `x`, then runs
/// one DFS from every grandchild `z` (via every child `y`). Any tagged vertex
/// reached by such a DFS is reachable from `x` over a path of length >= 2, so
/// its edge from `x` is removed.
///
/// The input must be acyclic. On a cyclic graph every probe still terminates
/// (each vertex is visited at most once per probe), but the result is not
/// guaranteed to be a transitive reduction.
///
/// Marker arrays are sized to one graph; a reducer is not shared between
/// graphs or threads.
#[derive(Debug)]
pub struct Reducer {
    direct_child: Vec<ChildTag>,
    /// Extra handles for parallel edges `x -> c` tagged in the current round.
    parallel: Vec<(Vertex, EdgeHandle)>,
    visited: Vec<u64>,
    round: u64,
    epoch: u64,
    stack: Vec<Vertex>,
    stats: ReduceStats,
    progress_every: usize,
    worker: usize,
}

impl Reducer {
    /// Create a reducer with marker arrays for `vertex_count` vertices.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            direct_child: vec![ChildTag::default(); vertex_count],
            parallel: Vec::new(),
            visited: vec![0; vertex_count],
            round: 0,
            epoch: 0,
            stack: Vec::new(),
            stats: ReduceStats::default(),
            progress_every: DEFAULT_PROGRESS_EVERY,
            worker: 0,
        }
    }

    /// Create a reducer sized for `graph`.
    pub fn for_graph(graph: &GraphStore) -> Self {
        Self::new(graph.vertex_count())
    }

    /// Log progress every `every` roots (0 disables progress lines).
    pub fn with_progress_every(mut self, every: usize) -> Self {
        self.progress_every = every;
        self
    }

    /// Worker index used to tag log lines.
    pub fn with_worker(mut self, worker: usize) -> Self {
        self.worker = worker;
        self
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> ReduceStats {
        self.stats
    }

    /// Reduce every vertex of `graph` as a root.
    pub fn reduce_all(&mut self, graph: &mut GraphStore) -> Result<ReduceStats> {
        let n = graph.vertex_count();
        self.reduce_range(graph, 0..n)
    }

    /// Reduce the out-edges of every root in `roots`, in ascending order.
    pub fn reduce_range(
        &mut self,
        graph: &mut GraphStore,
        roots: Range<Vertex>,
    ) -> Result<ReduceStats> {
        if roots.end > graph.vertex_count() {
            return Err(ReduceError::out_of_range(roots.end - 1, graph.vertex_count()));
        }
        self.reduce_roots(graph, roots)
    }

    /// Reduce the out-edges of each root, in the order given.
    pub fn reduce_roots<I>(&mut self, graph: &mut GraphStore, roots: I) -> Result<ReduceStats>
    where
        I: IntoIterator<Item = Vertex>,
    {
        if graph.vertex_count() != self.visited.len() {
            return Err(ReduceError::InvalidArgument(format!(
                "reducer sized for {} vertices used on a graph with {}",
                self.visited.len(),
                graph.vertex_count()
            )));
        }

        for root in roots {
            if self.progress_every > 0 && root % self.progress_every == 0 {
                debug!(worker = self.worker, root, "reducing");
            }
            self.reduce_root(graph, root)?;
        }

        Ok(self.stats)
    }

    fn reduce_root(&mut self, graph: &mut GraphStore, root: Vertex) -> Result<()> {
        // Captured before any removal in this round.
        let children = self.tag_children(graph, root)?;

        for &(child, _) in &children {
            let grandchildren = graph.out_neighbors(child)?;
            for (grandchild, _) in grandchildren {
                self.probe(graph, grandchild)?;
            }
        }

        self.stats.roots += 1;
        Ok(())
    }

    fn tag_children(
        &mut self,
        graph: &GraphStore,
        root: Vertex,
    ) -> Result<Vec<(Vertex, EdgeHandle)>> {
        self.round += 1;
        self.parallel.clear();

        let children = graph.out_neighbors(root)?;
        for &(child, edge) in &children {
            let tag = &mut self.direct_child[child];
            if tag.round == self.round {
                if let Some(previous) = tag.edge {
                    self.parallel.push((child, previous));
                }
            }
            tag.round = self.round;
            tag.edge = Some(edge);
        }

        Ok(children)
    }

    /// One DFS from `start` with a fresh epoch, removing root edges to every
    /// tagged vertex it reaches.
    fn probe(&mut self, graph: &mut GraphStore, start: Vertex) -> Result<()> {
        self.epoch += 1;
        self.stats.dfs_calls += 1;

        let epoch = self.epoch;
        self.stack.clear();
        self.stack.push(start);

        while let Some(v) = self.stack.pop() {
            if self.visited[v] == epoch {
                continue;
            }
            self.visited[v] = epoch;
            self.stats.visits += 1;

            let tag = self.direct_child[v];
            if tag.round == self.round {
                self.remove_root_edges(graph, v, tag.edge);
            }

            let visited = &self.visited;
            self.stack
                .extend(graph.successors(v)?.filter(|&w| visited[w] != epoch));
        }

        Ok(())
    }

    fn remove_root_edges(
        &mut self,
        graph: &mut GraphStore,
        child: Vertex,
        edge: Option<EdgeHandle>,
    ) {
        let mut removed = 0;
        if let Some(edge) = edge {
            if graph.remove_edge(edge) {
                removed += 1;
            }
        }
        for &(c, h) in &self.parallel {
            if c == child && graph.remove_edge(h) {
                removed += 1;
            }
        }

        if removed > 0 {
            trace!(worker = self.worker, child, removed, "removed redundant edge");
            self.stats.edges_removed += removed;
        }
    }
}
