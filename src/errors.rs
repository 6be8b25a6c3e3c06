// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReduceError {
    #[error("Invalid vertex count: {0} (must be >= 1)")]
    InvalidSize(i64),

    #[error("Vertex {vertex} out of range for graph with {vertex_count} vertices")]
    OutOfRange { vertex: i64, vertex_count: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReduceError {
    pub(crate) fn out_of_range(vertex: impl TryInto<i64>, vertex_count: usize) -> Self {
        ReduceError::OutOfRange {
            vertex: vertex.try_into().unwrap_or(i64::MAX),
            vertex_count,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReduceError>;
