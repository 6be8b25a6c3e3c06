// src/io/dot.rs

use std::ffi::OsString;
use std::ops::Range;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::coordinator::WorkerOutput;
use crate::errors::{ReduceError, Result};
use crate::fs::FileSystem;
use crate::graph::Vertex;

/// Render one worker's artifact: its vertices, then its surviving edges.
///
/// ```text
/// digraph G {
/// 0;
/// 1;
/// 0 -> 1;
/// }
/// ```
pub fn render_artifact(range: Range<Vertex>, edges: &[(Vertex, Vertex)]) -> String {
    let mut out = String::from("digraph G {\n");
    for v in range {
        out.push_str(&format!("{v};\n"));
    }
    for (src, dst) in edges {
        out.push_str(&format!("{src} -> {dst};\n"));
    }
    out.push_str("}\n");
    out
}

/// Path of worker `worker`'s artifact.
///
/// A single worker writes to `output` itself; otherwise the worker index is
/// appended to the file name, e.g. `reduced.dot_2` with separator `_`.
pub fn artifact_path(output: &Path, worker: usize, workers: usize, separator: &str) -> PathBuf {
    if workers <= 1 {
        return output.to_path_buf();
    }
    let mut name = OsString::from(output.as_os_str());
    name.push(format!("{separator}{worker}"));
    PathBuf::from(name)
}

/// Write one artifact per worker and return the paths written.
pub fn write_artifacts(
    fs: &dyn FileSystem,
    output: &Path,
    outputs: &[WorkerOutput],
    separator: &str,
) -> Result<Vec<PathBuf>> {
    let workers = outputs.len();
    let mut written = Vec::with_capacity(workers);

    for out in outputs {
        let path = artifact_path(output, out.worker, workers, separator);
        let body = render_artifact(out.range.clone(), &out.edges);
        fs.write(&path, body.as_bytes())?;
        info!(
            worker = out.worker,
            path = ?path,
            edges = out.edges.len(),
            "wrote artifact"
        );
        written.push(path);
    }

    Ok(written)
}

/// Collect every `a -> b` edge line of a DOT file, in file order.
///
/// Trailing `;` and surrounding whitespace are ignored, so both `0 -> 1;`
/// and `0->1 ;` are accepted. Lines without `->` are skipped.
pub fn parse_dot_edges(text: &str) -> Result<Vec<(Vertex, Vertex)>> {
    let mut edges = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim().trim_end_matches(';').trim();
        let Some((src, dst)) = line.split_once("->") else {
            continue;
        };
        let parse = |token: &str| {
            token.trim().parse::<Vertex>().map_err(|e| ReduceError::Parse {
                line: i + 1,
                message: format!("invalid vertex id {:?}: {}", token.trim(), e),
            })
        };
        edges.push((parse(src)?, parse(dst)?));
    }
    Ok(edges)
}
