//! Utility functions shared by the CLI and the benchmark harness.
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration file location and loading
//! - [`progress`] - Progress bars (no-ops without the `progress` feature)

pub mod app_data;
pub mod progress;

pub use app_data::*;
