//! Benchmark driver: index counts versus linear scans over many tracks
//!
//! Each track is read, quantized and indexed independently, so tracks are
//! processed in parallel. Within a track every target pattern is counted
//! `repeats` times through the index and through the scan baseline; both
//! must agree.

use super::baseline::linear_count;
use crate::index::{BuildWarning, IndexBuilder, IndexConfig, Symbol};
use crate::signal::{DEFAULT_TRACK_GLOBS, EncodeReport, Quantizer, load_text};
use crate::utils::progress::file_bar;
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Benchmark parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Query patterns, each a sequence of signal values
    #[serde(default = "default_targets")]
    pub targets: Vec<Vec<f64>>,

    /// Repetitions of every query
    #[serde(default = "default_repeats")]
    pub repeats: usize,

    /// File name patterns of track files
    #[serde(default = "default_globs")]
    pub globs: Vec<String>,
}

fn default_targets() -> Vec<Vec<f64>> {
    [0.5, 1.0, 1.5, 2.0, 2.5].iter().map(|&v| vec![v]).collect()
}

fn default_repeats() -> usize {
    10
}

fn default_globs() -> Vec<String> {
    DEFAULT_TRACK_GLOBS.iter().map(|g| g.to_string()).collect()
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            targets: default_targets(),
            repeats: default_repeats(),
            globs: default_globs(),
        }
    }
}

/// Measurements for one track
#[derive(Debug, Clone)]
pub struct FileResult {
    pub path: PathBuf,
    pub encode: EncodeReport,
    /// Indexed symbols (sentinel excluded)
    pub text_len: usize,
    pub build_time: Duration,
    pub index_time: Duration,
    pub scan_time: Duration,
    /// Occurrences per target, in target order
    pub counts: Vec<u64>,
    pub warnings: Vec<BuildWarning>,
}

impl FileResult {
    /// Scan time over index time; `None` when the index time is zero
    pub fn speedup(&self) -> Option<f64> {
        speedup(self.scan_time, self.index_time)
    }
}

/// Results over all tracks
#[derive(Debug, Clone, Default)]
pub struct BenchSummary {
    pub files: Vec<FileResult>,
    /// Tracks that could not be processed, with the reason
    pub failures: Vec<(PathBuf, String)>,
}

impl BenchSummary {
    pub fn total_build_time(&self) -> Duration {
        self.files.iter().map(|f| f.build_time).sum()
    }

    pub fn total_index_time(&self) -> Duration {
        self.files.iter().map(|f| f.index_time).sum()
    }

    pub fn total_scan_time(&self) -> Duration {
        self.files.iter().map(|f| f.scan_time).sum()
    }

    pub fn total_symbols(&self) -> usize {
        self.files.iter().map(|f| f.text_len).sum()
    }

    pub fn speedup(&self) -> Option<f64> {
        speedup(self.total_scan_time(), self.total_index_time())
    }
}

fn speedup(scan: Duration, index: Duration) -> Option<f64> {
    if index.is_zero() {
        None
    } else {
        Some(scan.as_secs_f64() / index.as_secs_f64())
    }
}

/// Benchmarks one set of tracks with shared settings
pub struct Benchmark<'a> {
    pub bench: &'a BenchConfig,
    pub index: &'a IndexConfig,
    pub quantizer: &'a Quantizer,
}

impl Benchmark<'_> {
    /// Run over all `paths` in parallel. Failing tracks are recorded, not fatal.
    pub fn run(&self, paths: &[PathBuf], silent: bool) -> BenchSummary {
        let progress = file_bar(paths.len() as u64, "Benchmarking tracks...", silent);

        let outcomes: Vec<(PathBuf, Result<FileResult>)> = paths
            .par_iter()
            .map(|path| {
                let outcome = self.run_file(path);
                if let Some(ref pb) = progress {
                    pb.inc(1);
                }
                (path.clone(), outcome)
            })
            .collect();

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        let mut summary = BenchSummary::default();
        for (path, outcome) in outcomes {
            match outcome {
                Ok(result) => summary.files.push(result),
                Err(e) => summary.failures.push((path, format!("{:#}", e))),
            }
        }
        summary
    }

    /// Benchmark a single track
    pub fn run_file(&self, path: &Path) -> Result<FileResult> {
        let patterns: Vec<Vec<Symbol>> = self
            .bench
            .targets
            .iter()
            .map(|values| self.quantizer.encode_pattern(values))
            .collect::<Result<_, _>>()
            .context("Invalid benchmark target")?;

        let (text, encode) = load_text(path, self.quantizer)?;
        let built = IndexBuilder::new(self.index.clone())
            .build(&text)
            .with_context(|| format!("Failed to index {}", path.display()))?;
        let index = built.index;
        let data = text.data();

        let mut index_time = Duration::ZERO;
        let mut scan_time = Duration::ZERO;
        let mut counts = Vec::with_capacity(patterns.len());

        for pattern in &patterns {
            let indexed = index.count(pattern)?;
            let scanned = linear_count(data, pattern);
            if indexed != scanned {
                bail!(
                    "index counted {} and scan counted {} for pattern {:?}",
                    indexed,
                    scanned,
                    pattern
                );
            }
            counts.push(indexed);

            let start = Instant::now();
            for _ in 0..self.bench.repeats {
                black_box(index.count(black_box(pattern))?);
            }
            index_time += start.elapsed();

            let start = Instant::now();
            for _ in 0..self.bench.repeats {
                black_box(linear_count(black_box(data), black_box(pattern)));
            }
            scan_time += start.elapsed();
        }

        Ok(FileResult {
            path: path.to_path_buf(),
            encode,
            text_len: text.data_len(),
            build_time: built.report.elapsed,
            index_time,
            scan_time,
            counts,
            warnings: built.report.warnings,
        })
    }
}
