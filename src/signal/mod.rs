//! Signal input: reading tracks and quantizing them into index text.
//!
//! - [`quantize`] - Fixed-step mapping from samples to byte symbols
//! - [`track`] - Track file parsing
//! - [`walk`] - Track discovery in directory trees

pub mod quantize;
pub mod track;
pub mod walk;

pub use quantize::{EncodeReport, Encoded, Quantizer};
pub use track::{parse_samples, read_track};
pub use walk::{DEFAULT_TRACK_GLOBS, build_globset, discover_tracks};

use crate::index::Text;
use anyhow::{Context, Result};
use std::path::Path;

/// Read a track file and quantize it into an index text
pub fn load_text(path: &Path, quantizer: &Quantizer) -> Result<(Text, EncodeReport)> {
    let samples = read_track(path)?;
    let encoded = quantizer.encode(&samples);
    let text = Text::new(encoded.symbols)
        .with_context(|| format!("No usable samples in {}", path.display()))?;
    Ok((text, encoded.report))
}
