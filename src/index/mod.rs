//! FM-index construction, querying and persistence
//!
//! ## Architecture
//!
//! - `text`: Sentinel-terminated symbol sequence
//! - `suffix_array`: Suffix sorting (naive and prefix doubling)
//! - `bwt`: Burrows-Wheeler transform
//! - `rank`: Occurrence table and count array
//! - `fm`: The index and its backward-search `count`
//! - `build`: Construction pipeline with cancellation and reporting
//! - `writer` / `reader`: Single-file persistence
//! - `stats`: Size and alphabet summaries

pub mod build;
pub mod bwt;
pub mod cancel;
pub mod error;
pub mod fm;
pub mod rank;
pub mod reader;
pub mod stats;
pub mod suffix_array;
pub mod text;
pub mod types;
pub mod writer;

pub use build::{BuildReport, BuildWarning, BuiltIndex, IndexBuilder};
pub use cancel::CancelToken;
pub use error::{IndexError, Result};
pub use fm::FmIndex;
pub use reader::IndexReader;
pub use text::Text;
pub use types::*;
pub use writer::IndexWriter;
