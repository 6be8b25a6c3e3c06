// src/graph/mod.rs

//! Graph storage used by the reducer.
//!
//! - [`store`] holds a fixed vertex set with a removable edge set, addressed
//!   by stable [`EdgeHandle`]s.

pub mod store;

pub use store::{EdgeHandle, GraphStore, Vertex};
