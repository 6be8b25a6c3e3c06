// src/lib.rs

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod errors;
pub mod fs;
pub mod graph;
pub mod io;
pub mod job;
pub mod logging;
pub mod reduce;
pub mod verify;

use anyhow::{Result, bail};
use tracing::info;

use crate::cli::{CliArgs, Command};
use crate::config::load_or_default;
use crate::fs::{FileSystem, RealFileSystem};

/// High-level entry point used by `main.rs`.
pub async fn run(args: CliArgs) -> Result<()> {
    run_with_fs(args, &RealFileSystem).await
}

/// Same as [`run`], reading and writing through `fs`.
pub async fn run_with_fs(args: CliArgs, fs: &dyn FileSystem) -> Result<()> {
    let cfg = load_or_default(fs, args.config.as_deref())?;

    match args.resolve_command()? {
        Command::Reduce {
            input,
            output,
            workers,
        } => {
            let workers = workers.unwrap_or(cfg.workers());
            let summary = job::reduce_file(fs, &input, &output, workers, &cfg).await?;
            info!(
                vertices = summary.vertices,
                input_edges = summary.input_edges,
                kept_edges = summary.kept_edges,
                "done"
            );
        }
        Command::Merge { dir, out, prefix } => {
            let prefix = prefix.as_deref().unwrap_or(cfg.merge_prefix());
            let summary = io::merge_artifacts(fs, &dir, prefix, &out)?;
            info!(
                files = summary.files.len(),
                vertices = summary.vertices,
                edges = summary.edges,
                "done"
            );
        }
        Command::Relabel { dot, labels, out } => {
            let edges = io::relabel_file(fs, &dot, &labels, &out)?;
            info!(edges, "done");
        }
        Command::Check { input, workers } => {
            let workers = workers.unwrap_or(cfg.workers());
            let report = job::check_file(fs, &input, workers, &cfg).await?;
            if !report.is_clean() {
                bail!(
                    "reduction of {:?} differs from the reference: {} missing, {} redundant, {} foreign edges, {} vertices with changed reachability",
                    input,
                    report.missing.len(),
                    report.redundant.len(),
                    report.foreign.len(),
                    report.reachability_mismatches.len()
                );
            }
        }
    }

    Ok(())
}
