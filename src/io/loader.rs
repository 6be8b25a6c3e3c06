// src/io/loader.rs

use std::path::Path;

use tracing::debug;

use crate::errors::{ReduceError, Result};
use crate::fs::FileSystem;
use crate::graph::{GraphStore, Vertex};

/// Vertex count plus edges, as read from an edge-list file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeList {
    pub vertex_count: usize,
    pub edges: Vec<(Vertex, Vertex)>,
}

impl EdgeList {
    /// Build a fresh [`GraphStore`] holding these edges.
    pub fn to_graph(&self) -> Result<GraphStore> {
        GraphStore::from_edges(self.vertex_count, self.edges.iter().copied())
    }
}

/// Parse the edge-list format:
///
/// ```text
/// NUM_VERTICES
/// SRC_1 DST_1
/// SRC_2 DST_2
/// ...
/// ```
///
/// Blank lines and lines starting with `#` are ignored. Ids must lie in
/// `[0, NUM_VERTICES)`. Acyclicity is *not* checked.
pub fn parse_edge_list(text: &str) -> Result<EdgeList> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let Some((header_line, header)) = lines.next() else {
        return Err(ReduceError::Parse {
            line: 1,
            message: "missing vertex count".to_string(),
        });
    };

    let count = parse_int(header, header_line)?;
    if count <= 0 {
        return Err(ReduceError::InvalidSize(count));
    }
    let vertex_count = usize::try_from(count).map_err(|_| ReduceError::InvalidSize(count))?;

    let mut edges = Vec::new();
    for (line_no, line) in lines {
        let mut fields = line.split_whitespace();
        let (Some(src), Some(dst), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(ReduceError::Parse {
                line: line_no,
                message: format!("expected `src dst`, got {:?}", line),
            });
        };
        let src = vertex_id(parse_int(src, line_no)?, vertex_count)?;
        let dst = vertex_id(parse_int(dst, line_no)?, vertex_count)?;
        edges.push((src, dst));
    }

    Ok(EdgeList {
        vertex_count,
        edges,
    })
}

/// Read and parse an edge-list file.
pub fn load_edge_list(fs: &dyn FileSystem, path: &Path) -> Result<EdgeList> {
    let text = fs.read_to_string(path)?;
    let list = parse_edge_list(&text)?;
    debug!(
        path = ?path,
        vertices = list.vertex_count,
        edges = list.edges.len(),
        "loaded edge list"
    );
    Ok(list)
}

/// Read an edge-list file straight into a [`GraphStore`].
pub fn load_graph(fs: &dyn FileSystem, path: &Path) -> Result<GraphStore> {
    load_edge_list(fs, path)?.to_graph()
}

fn parse_int(token: &str, line: usize) -> Result<i64> {
    token.parse::<i64>().map_err(|e| ReduceError::Parse {
        line,
        message: format!("invalid integer {:?}: {}", token, e),
    })
}

fn vertex_id(value: i64, vertex_count: usize) -> Result<Vertex> {
    match usize::try_from(value) {
        Ok(v) if v < vertex_count => Ok(v),
        _ => Err(ReduceError::OutOfRange {
            vertex: value,
            vertex_count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn parses_header_and_edges() {
        let list = parse_edge_list("4\n0 1\n1 2\n\n2 3\n").unwrap();
        assert_eq!(list.vertex_count, 4);
        assert_eq!(list.edges, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn tolerates_comments_and_extra_whitespace() {
        let list = parse_edge_list("# generated\n  3 \n0\t1\n   1    2  \n").unwrap();
        assert_eq!(list.vertex_count, 3);
        assert_eq!(list.edges, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn header_only_gives_isolated_vertices() {
        let list = parse_edge_list("1\n").unwrap();
        assert_eq!(list.vertex_count, 1);
        assert!(list.edges.is_empty());
    }

    #[test]
    fn non_positive_vertex_count_is_invalid_size() {
        assert!(matches!(parse_edge_list("0\n"), Err(ReduceError::InvalidSize(0))));
        assert!(matches!(parse_edge_list("-3\n"), Err(ReduceError::InvalidSize(-3))));
    }

    #[test]
    fn out_of_range_ids_are_rejected() {
        match parse_edge_list("3\n0 1\n1 3\n") {
            Err(ReduceError::OutOfRange {
                vertex,
                vertex_count,
            }) => {
                assert_eq!(vertex, 3);
                assert_eq!(vertex_count, 3);
            }
            other => panic!("expected OutOfRange, got {:?}", other),
        }
        assert!(matches!(
            parse_edge_list("3\n-1 1\n"),
            Err(ReduceError::OutOfRange { vertex: -1, .. })
        ));
    }

    #[test]
    fn malformed_lines_report_line_number() {
        match parse_edge_list("3\n0 1\n1\n") {
            Err(ReduceError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected Parse error, got {:?}", other),
        }
        assert!(matches!(
            parse_edge_list("3\n0 x\n"),
            Err(ReduceError::Parse { line: 2, .. })
        ));
        assert!(matches!(parse_edge_list(""), Err(ReduceError::Parse { .. })));
    }

    #[test]
    fn load_graph_reads_through_filesystem() {
        let fs = MockFileSystem::new();
        fs.add_file("in.graph", "3\n0 1\n1 2\n0 2\n");

        let g = load_graph(&fs, Path::new("in.graph")).unwrap();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 3);

        assert!(load_graph(&fs, Path::new("missing.graph")).is_err());
    }
}
