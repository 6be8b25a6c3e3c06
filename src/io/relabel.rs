// src/io/relabel.rs

use std::path::Path;

use tracing::info;

use crate::errors::{ReduceError, Result};
use crate::fs::FileSystem;
use crate::graph::Vertex;
use crate::io::dot::parse_dot_edges;

/// One label per line; line `i` names vertex `i`.
pub fn parse_labels(text: &str) -> Vec<String> {
    text.lines().map(|l| l.trim_end().to_string()).collect()
}

/// Replace vertex ids by their labels.
pub fn relabel_edges<'a>(
    edges: &[(Vertex, Vertex)],
    labels: &'a [String],
) -> Result<Vec<(&'a str, &'a str)>> {
    let label = move |v: Vertex| {
        labels
            .get(v)
            .map(String::as_str)
            .ok_or_else(|| ReduceError::out_of_range(v, labels.len()))
    };
    edges
        .iter()
        .map(|&(src, dst)| Ok((label(src)?, label(dst)?)))
        .collect()
}

/// Read a reduced DOT file and a label list, and write `label-->label` lines.
///
/// Returns the number of edges written.
pub fn relabel_file(fs: &dyn FileSystem, dot: &Path, labels: &Path, out: &Path) -> Result<usize> {
    let edges = parse_dot_edges(&fs.read_to_string(dot)?)?;
    let labels = parse_labels(&fs.read_to_string(labels)?);
    let pairs = relabel_edges(&edges, &labels)?;

    let mut body = String::new();
    for (src, dst) in &pairs {
        body.push_str(&format!("{src}-->{dst}\n"));
    }
    fs.write(out, body.as_bytes())?;

    info!(edges = pairs.len(), out = ?out, "wrote relabelled edges");
    Ok(pairs.len())
}
