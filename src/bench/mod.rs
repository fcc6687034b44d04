//! Benchmarking the index against a linear scan.
//!
//! - [`baseline`] - Scan-based substring counting
//! - [`harness`] - Multi-track driver and result summaries

pub mod baseline;
pub mod harness;

pub use baseline::linear_count;
pub use harness::{BenchConfig, BenchSummary, Benchmark, FileResult};
