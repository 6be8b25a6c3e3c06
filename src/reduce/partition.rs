// src/reduce/partition.rs

use std::ops::Range;

use crate::errors::{ReduceError, Result};
use crate::graph::Vertex;

/// Split `[0, vertex_count)` into `workers` contiguous, disjoint ranges.
///
/// Every range holds `vertex_count / workers` or one more vertex; the larger
/// ranges go to the lowest worker indices. With more workers than vertices
/// the trailing ranges are empty.
pub fn partition(vertex_count: usize, workers: usize) -> Result<Vec<Range<Vertex>>> {
    if workers == 0 {
        return Err(ReduceError::InvalidArgument(
            "worker count must be >= 1 (got 0)".to_string(),
        ));
    }

    let base = vertex_count / workers;
    let mut remainder = vertex_count % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for _ in 0..workers {
        let mut len = base;
        if remainder > 0 {
            len += 1;
            remainder -= 1;
        }
        ranges.push(start..start + len);
        start += len;
    }

    debug_assert_eq!(start, vertex_count);
    Ok(ranges)
}
