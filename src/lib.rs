//! # FMX - FM-index counting for signal tracks
//!
//! FMX quantizes numeric signal tracks into byte texts and builds an
//! FM-index over each one, answering "how many times does this run of
//! values occur?" in time proportional to the query length instead of the
//! track length.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Suffix array, BWT, rank tables, the FM-index and its file format
//! - [`signal`] - Track parsing, discovery and quantization
//! - [`bench`] - Linear-scan baseline and the multi-track benchmark driver
//! - [`output`] - Benchmark report formatting
//! - [`utils`] - Configuration and progress bars
//!
//! ## Quick Start
//!
//! ```
//! use fmx::index::{IndexBuilder, Text};
//!
//! let text = Text::new(b"banana".to_vec()).unwrap();
//! let built = IndexBuilder::with_defaults().build(&text).unwrap();
//!
//! assert_eq!(built.index.count(b"ana").unwrap(), 2);
//! assert_eq!(built.index.count(b"xyz").unwrap(), 0);
//! ```

pub mod bench;
pub mod index;
pub mod output;
pub mod signal;
pub mod utils;
