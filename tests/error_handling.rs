// tests/error_handling.rs

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use dagreduce::config::load_and_validate;
use dagreduce::coordinator::Coordinator;
use dagreduce::errors::ReduceError;
use dagreduce::fs::RealFileSystem;
use dagreduce::graph::GraphStore;
use dagreduce::io::load_graph;
use dagreduce::reduce::partition;

#[test]
fn test_zero_workers_in_config_returns_invalid_argument() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[reduce]
workers = 0
"#
    )
    .unwrap();

    match load_and_validate(&RealFileSystem, file.path()) {
        Err(ReduceError::InvalidArgument(msg)) => assert!(msg.contains("workers")),
        Err(e) => panic!("Expected InvalidArgument, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_malformed_toml_returns_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[reduce\nworkers = 2\n").unwrap();

    assert!(matches!(
        load_and_validate(&RealFileSystem, file.path()),
        Err(ReduceError::TomlError(_))
    ));
}

#[test]
fn test_out_of_range_edge_in_input_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "3\n0 1\n1 5\n").unwrap();

    match load_graph(&RealFileSystem, file.path()) {
        Err(ReduceError::OutOfRange {
            vertex,
            vertex_count,
        }) => {
            assert_eq!(vertex, 5);
            assert_eq!(vertex_count, 3);
        }
        other => panic!("Expected OutOfRange, got: {:?}", other),
    }
}

#[test]
fn test_missing_input_file_is_reported() {
    let err = load_graph(&RealFileSystem, Path::new("/definitely/not/here.graph")).unwrap_err();
    assert!(matches!(err, ReduceError::Other(_)));
    assert!(format!("{err}").contains("here.graph"));
}

#[test]
fn test_invalid_sizes_and_worker_counts() {
    assert!(matches!(GraphStore::new(0), Err(ReduceError::InvalidSize(0))));
    assert!(matches!(partition(5, 0), Err(ReduceError::InvalidArgument(_))));
    assert!(matches!(Coordinator::new(0), Err(ReduceError::InvalidArgument(_))));
}
