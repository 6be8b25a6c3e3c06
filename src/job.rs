// src/job.rs

//! End-to-end operations behind the CLI subcommands.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::config::ConfigFile;
use crate::coordinator::{Coordinator, surviving_edges};
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::io::{load_edge_list, write_artifacts};
use crate::verify::{CheckReport, compare};

/// What a reduce run read and wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReduceSummary {
    pub vertices: usize,
    pub input_edges: usize,
    pub kept_edges: usize,
    pub artifacts: Vec<PathBuf>,
}

/// Load `input`, reduce it with `workers` workers and write the artifacts.
pub async fn reduce_file(
    fs: &dyn FileSystem,
    input: &Path,
    output: &Path,
    workers: usize,
    cfg: &ConfigFile,
) -> Result<ReduceSummary> {
    let coordinator = Coordinator::new(workers)?.with_progress_every(cfg.progress_every());

    let started = Instant::now();
    let list = load_edge_list(fs, input)?;
    let graph = list.to_graph()?;
    info!(
        vertices = list.vertex_count,
        edges = list.edges.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "reading and creating the graph"
    );

    let outputs = coordinator.run(Arc::new(graph)).await?;

    let started = Instant::now();
    let artifacts = write_artifacts(fs, output, &outputs, cfg.separator())?;
    info!(
        artifacts = artifacts.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "writing the files"
    );

    Ok(ReduceSummary {
        vertices: list.vertex_count,
        input_edges: list.edges.len(),
        kept_edges: outputs.iter().map(|o| o.edges.len()).sum(),
        artifacts,
    })
}

/// Reduce `input` and compare the result with the brute-force reference.
pub async fn check_file(
    fs: &dyn FileSystem,
    input: &Path,
    workers: usize,
    cfg: &ConfigFile,
) -> Result<CheckReport> {
    let coordinator = Coordinator::new(workers)?.with_progress_every(cfg.progress_every());

    let list = load_edge_list(fs, input)?;
    let outputs = coordinator.run(Arc::new(list.to_graph()?)).await?;
    let reduced = surviving_edges(&outputs);

    let report = compare(list.vertex_count, &list.edges, &reduced)?;
    if report.is_clean() {
        info!(kept = reduced.len(), "reduction matches the reference");
    } else {
        warn!(
            missing = ?report.missing,
            redundant = ?report.redundant,
            foreign = ?report.foreign,
            reachability_mismatches = ?report.reachability_mismatches,
            "reduction differs from the reference"
        );
    }
    Ok(report)
}
