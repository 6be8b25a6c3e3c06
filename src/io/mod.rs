// src/io/mod.rs

//! Reading and writing graph files.
//!
//! - [`loader`] parses the edge-list input (`N` on the first line, then one
//!   `src dst` pair per line) into a [`GraphStore`](crate::graph::GraphStore).
//! - [`dot`] renders per-worker DOT artifacts and parses `a -> b` edge lines.
//! - [`merge`] combines per-worker artifacts into one DOT file.
//! - [`relabel`] maps vertex ids of a DOT file back to labels.

pub mod dot;
pub mod loader;
pub mod merge;
pub mod relabel;

pub use dot::{artifact_path, parse_dot_edges, render_artifact, write_artifacts};
pub use loader::{EdgeList, load_edge_list, load_graph, parse_edge_list};
pub use merge::{MergeSummary, merge_artifacts};
pub use relabel::relabel_file;
