//! Signal track files
//!
//! A track is UTF-8 text of numbers separated by whitespace, commas or
//! newlines. `#` starts a comment line. `nan`, `NA` and `.` mark missing
//! samples, which parse as `NaN` and are dropped later by the quantizer.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// Read all samples of a track file
pub fn read_track(path: &Path) -> Result<Vec<f64>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_samples(&content).with_context(|| format!("Invalid track {}", path.display()))
}

/// Parse samples from track text
pub fn parse_samples(content: &str) -> Result<Vec<f64>> {
    let mut samples = Vec::new();

    for (line_idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        for token in line.split(|c: char| c == ',' || c.is_whitespace()) {
            if token.is_empty() {
                continue;
            }
            match parse_sample(token) {
                Some(value) => samples.push(value),
                None => bail!("line {}: not a number: {:?}", line_idx + 1, token),
            }
        }
    }

    Ok(samples)
}

/// Parse one token; missing markers become `NaN`
fn parse_sample(token: &str) -> Option<f64> {
    if is_missing_marker(token) {
        return Some(f64::NAN);
    }
    token.parse::<f64>().ok()
}

fn is_missing_marker(token: &str) -> bool {
    token == "." || token.eq_ignore_ascii_case("nan") || token.eq_ignore_ascii_case("na")
}
