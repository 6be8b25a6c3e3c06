// src/coordinator.rs

//! Runs the reducer across workers.
//!
//! Every worker gets its own full copy of the graph and reduces only the
//! roots in its partition range. Because the decision for an edge `x -> u`
//! depends only on what `x` can reach, and every copy keeps the full
//! reachability relation, workers never need to see each other's removals.
//! Each worker reports only the edges whose source lies in its range, so the
//! concatenation of all outputs is the reduced graph.

use std::ops::Range;
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::errors::{ReduceError, Result};
use crate::graph::{GraphStore, Vertex};
use crate::reduce::reducer::DEFAULT_PROGRESS_EVERY;
use crate::reduce::{ReduceStats, Reducer, partition};

/// Result of one worker: the surviving edges sourced in its range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerOutput {
    pub worker: usize,
    pub range: Range<Vertex>,
    pub edges: Vec<(Vertex, Vertex)>,
    pub stats: ReduceStats,
}

/// Reduce a private copy of `graph` over `range` and project the result onto
/// edges whose source lies in `range`.
pub fn reduce_partition(
    graph: &GraphStore,
    worker: usize,
    range: Range<Vertex>,
    progress_every: usize,
) -> Result<WorkerOutput> {
    let started = Instant::now();
    let mut local = graph.clone();

    let stats = Reducer::for_graph(&local)
        .with_worker(worker)
        .with_progress_every(progress_every)
        .reduce_range(&mut local, range.clone())?;
    let edges = local.edges_from(range.clone())?;

    debug!(
        worker,
        ?range,
        edges_removed = stats.edges_removed,
        dfs_calls = stats.dfs_calls,
        visits = stats.visits,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "worker finished"
    );

    Ok(WorkerOutput {
        worker,
        range,
        edges,
        stats,
    })
}

/// Fans the reduction out over a fixed number of workers.
#[derive(Debug, Clone, Copy)]
pub struct Coordinator {
    workers: usize,
    progress_every: usize,
}

impl Coordinator {
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(ReduceError::InvalidArgument(
                "worker count must be >= 1 (got 0)".to_string(),
            ));
        }
        Ok(Self {
            workers,
            progress_every: DEFAULT_PROGRESS_EVERY,
        })
    }

    pub fn with_progress_every(mut self, every: usize) -> Self {
        self.progress_every = every;
        self
    }

    /// Run all workers on the blocking pool and wait for every one of them.
    ///
    /// Outputs are ordered by worker index.
    pub async fn run(&self, graph: Arc<GraphStore>) -> Result<Vec<WorkerOutput>> {
        let ranges = partition(graph.vertex_count(), self.workers)?;
        let started = Instant::now();

        let mut set = JoinSet::new();
        for (worker, range) in ranges.into_iter().enumerate() {
            let graph = Arc::clone(&graph);
            let every = self.progress_every;
            set.spawn_blocking(move || reduce_partition(&graph, worker, range, every));
        }

        // Barrier: nothing is returned until every worker has finished.
        let mut outputs = Vec::with_capacity(self.workers);
        while let Some(joined) = set.join_next().await {
            let output = joined.map_err(|e| ReduceError::Other(e.into()))??;
            outputs.push(output);
        }
        outputs.sort_by_key(|o| o.worker);

        self.log_finished(&outputs, started);
        Ok(outputs)
    }

    /// Same as [`run`](Self::run) but runs the workers one after another on
    /// the calling thread.
    pub fn run_blocking(&self, graph: &GraphStore) -> Result<Vec<WorkerOutput>> {
        let ranges = partition(graph.vertex_count(), self.workers)?;
        let started = Instant::now();

        let outputs = ranges
            .into_iter()
            .enumerate()
            .map(|(worker, range)| reduce_partition(graph, worker, range, self.progress_every))
            .collect::<Result<Vec<_>>>()?;

        self.log_finished(&outputs, started);
        Ok(outputs)
    }

    fn log_finished(&self, outputs: &[WorkerOutput], started: Instant) {
        let removed: usize = outputs.iter().map(|o| o.stats.edges_removed).sum();
        let kept: usize = outputs.iter().map(|o| o.edges.len()).sum();
        info!(
            workers = self.workers,
            edges_kept = kept,
            edges_removed = removed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "reduction finished"
        );
    }
}

/// Concatenate worker outputs into the full reduced edge list.
pub fn surviving_edges(outputs: &[WorkerOutput]) -> Vec<(Vertex, Vertex)> {
    outputs
        .iter()
        .flat_map(|o| o.edges.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_one() -> GraphStore {
        GraphStore::from_edges(4, [(0, 1), (1, 2), (2, 3), (0, 2), (0, 3), (1, 3)]).unwrap()
    }

    #[test]
    fn zero_workers_is_invalid() {
        assert!(matches!(
            Coordinator::new(0),
            Err(ReduceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn two_workers_split_output_by_source() {
        let outputs = Coordinator::new(2).unwrap().run_blocking(&scenario_one()).unwrap();

        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].range, 0..2);
        assert_eq!(outputs[0].edges, vec![(0, 1), (1, 2)]);
        assert_eq!(outputs[1].range, 2..4);
        assert_eq!(outputs[1].edges, vec![(2, 3)]);
        assert_eq!(
            surviving_edges(&outputs),
            vec![(0, 1), (1, 2), (2, 3)]
        );
    }

    #[test]
    fn input_graph_is_not_mutated() {
        let g = scenario_one();
        Coordinator::new(3).unwrap().run_blocking(&g).unwrap();
        assert_eq!(g.edge_count(), 6);
    }

    #[tokio::test]
    async fn async_run_matches_blocking_run() {
        let g = scenario_one();
        let blocking = Coordinator::new(3).unwrap().run_blocking(&g).unwrap();
        let parallel = Coordinator::new(3).unwrap().run(Arc::new(g)).await.unwrap();
        assert_eq!(blocking, parallel);
    }
}
