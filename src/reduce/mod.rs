// src/reduce/mod.rs

//! Transitive reduction.
//!
//! - [`reducer`] runs the marker-based DFS reduction over a range of roots,
//!   mutating a [`GraphStore`](crate::graph::GraphStore) in place.
//! - [`partition`] splits the vertex range into contiguous per-worker blocks.

pub mod partition;
pub mod reducer;

pub use partition::partition;
pub use reducer::{ReduceStats, Reducer};
