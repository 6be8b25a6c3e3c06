#![allow(unused_imports)]

pub use dagreduce_test_utils::builders;
pub use dagreduce_test_utils::init_tracing;
