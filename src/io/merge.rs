// src/io/merge.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::{ReduceError, Result};
use crate::fs::FileSystem;
use crate::graph::Vertex;
use crate::io::dot::parse_dot_edges;

/// Default file-name prefix of the artifacts picked up by [`merge_artifacts`].
pub const DEFAULT_MERGE_PREFIX: &str = "output_";

/// What a merge read and wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub files: Vec<PathBuf>,
    pub vertices: usize,
    pub edges: usize,
}

/// Merge every artifact under `dir` (searched recursively) whose file name
/// starts with `prefix` into a single DOT file at `out`.
///
/// Vertices `0..=max_id` are listed, then the edges grouped by ascending
/// source. Within one source the order of the artifact is kept.
pub fn merge_artifacts(
    fs: &dyn FileSystem,
    dir: &Path,
    prefix: &str,
    out: &Path,
) -> Result<MergeSummary> {
    let mut files = Vec::new();
    collect_artifacts(fs, dir, prefix, &mut files)?;
    files.sort();

    let mut by_source: BTreeMap<Vertex, Vec<Vertex>> = BTreeMap::new();
    for file in &files {
        let edges = parse_dot_edges(&fs.read_to_string(file)?)?;
        debug!(file = ?file, edges = edges.len(), "read artifact");
        for (src, dst) in edges {
            by_source.entry(src).or_default().push(dst);
        }
    }

    let edge_count: usize = by_source.values().map(Vec::len).sum();
    if edge_count == 0 {
        return Err(ReduceError::InvalidArgument(format!(
            "no edges found in files starting with {:?} under {:?}",
            prefix, dir
        )));
    }

    let max_id = by_source
        .iter()
        .flat_map(|(src, dsts)| std::iter::once(src).chain(dsts))
        .copied()
        .max()
        .unwrap_or(0);

    let body = render_merged(max_id + 1, &by_source);
    fs.write(out, body.as_bytes())?;

    info!(
        files = files.len(),
        vertices = max_id + 1,
        edges = edge_count,
        out = ?out,
        "merged artifacts"
    );

    Ok(MergeSummary {
        files,
        vertices: max_id + 1,
        edges: edge_count,
    })
}

fn collect_artifacts(
    fs: &dyn FileSystem,
    dir: &Path,
    prefix: &str,
    found: &mut Vec<PathBuf>,
) -> Result<()> {
    for path in fs.read_dir(dir)? {
        if fs.is_file(&path) {
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(prefix));
            if matches {
                found.push(path);
            }
        } else if fs.exists(&path) {
            collect_artifacts(fs, &path, prefix, found)?;
        }
    }
    Ok(())
}

fn render_merged(vertex_count: usize, by_source: &BTreeMap<Vertex, Vec<Vertex>>) -> String {
    let mut out = String::from("digraph G {\n");
    for v in 0..vertex_count {
        out.push_str(&format!("{v};\n"));
    }
    for (src, dsts) in by_source {
        for dst in dsts {
            out.push_str(&format!("{src} -> {dst};\n"));
        }
    }
    out.push_str("}\n");
    out
}
