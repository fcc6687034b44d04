use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fmx::bench::Benchmark;
use fmx::index::{ConstructionStrategy, IndexBuilder, IndexReader, IndexWriter};
use fmx::signal::{self, Quantizer};
use fmx::utils::progress::spinner;
use fmx::utils::{AppConfig, get_config_path};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fmx")]
#[command(about = "FM-index substring counting over quantized signal tracks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an index from a track file
    Build {
        /// Track file of numeric samples
        track: PathBuf,

        /// Output index file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        construction: ConstructionArgs,

        #[command(flatten)]
        quantizer: QuantizerArgs,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },
    /// Count occurrences of a run of values
    Count {
        /// Index file
        index: PathBuf,

        /// Pattern values, quantized like the indexed track
        #[arg(allow_negative_numbers = true)]
        values: Vec<f64>,

        #[command(flatten)]
        quantizer: QuantizerArgs,
    },
    /// Show index statistics
    Stats {
        /// Index file
        index: PathBuf,

        #[command(flatten)]
        quantizer: QuantizerArgs,
    },
    /// Compare index counts against a linear scan over many tracks
    Bench {
        /// Track file or directory of track files
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Repetitions of every query
        #[arg(short, long)]
        repeats: Option<usize>,

        /// Target pattern as comma-separated values (repeatable)
        #[arg(short, long, allow_negative_numbers = true)]
        target: Vec<String>,

        #[command(flatten)]
        construction: ConstructionArgs,

        #[command(flatten)]
        quantizer: QuantizerArgs,

        /// Colorize the report
        #[arg(long)]
        color: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },
    /// Print the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args)]
struct ConstructionArgs {
    /// Suffix array construction algorithm
    #[arg(long, value_enum)]
    strategy: Option<ConstructionStrategy>,

    /// Abort construction after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[derive(Args)]
struct QuantizerArgs {
    /// Codes per unit of signal
    #[arg(long)]
    scale: Option<f64>,

    /// Symbol assigned to the value zero
    #[arg(long)]
    base_offset: Option<u8>,
}

impl ConstructionArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(strategy) = self.strategy {
            config.index.strategy = strategy;
        }
        if self.timeout_secs.is_some() {
            config.index.timeout_secs = self.timeout_secs;
        }
    }
}

impl QuantizerArgs {
    fn apply(&self, config: &mut AppConfig) -> Result<()> {
        let scale = self.scale.unwrap_or(config.quantizer.scale);
        let base_offset = self.base_offset.unwrap_or(config.quantizer.base_offset);
        config.quantizer = Quantizer::new(base_offset, scale).context("Invalid quantizer settings")?;
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    match cli.command {
        Commands::Build {
            track,
            output,
            construction,
            quantizer,
            quiet,
        } => {
            construction.apply(&mut config);
            quantizer.apply(&mut config)?;
            build_index(&track, &output, &config, quiet)?;
        }
        Commands::Count {
            index,
            values,
            quantizer,
        } => {
            quantizer.apply(&mut config)?;
            let pattern = config.quantizer.encode_pattern(&values)?;
            let clamped = config.quantizer.encode(&values).report.clamped;
            if clamped > 0 {
                eprintln!(
                    "fmx: warning: {} pattern values fell outside the symbol range and were clamped",
                    clamped
                );
            }
            let index = IndexReader::open(&index)?;
            println!("{}", index.count(&pattern)?);
        }
        Commands::Stats { index, quantizer } => {
            quantizer.apply(&mut config)?;
            fmx::index::stats::show_stats(&index, &config.quantizer)?;
        }
        Commands::Bench {
            path,
            repeats,
            target,
            construction,
            quantizer,
            color,
            quiet,
        } => {
            construction.apply(&mut config);
            quantizer.apply(&mut config)?;
            if let Some(repeats) = repeats {
                config.bench.repeats = repeats;
            }
            if !target.is_empty() {
                config.bench.targets = target
                    .iter()
                    .map(|t| parse_target(t))
                    .collect::<Result<_>>()?;
            }
            run_bench(&path, &config, color, quiet)?;
        }
        Commands::Config { init } => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            if init {
                let path = match cli.config.or_else(get_config_path) {
                    Some(path) => path,
                    None => anyhow::bail!("Could not determine config directory"),
                };
                config.save_to(&path)?;
                eprintln!("fmx: wrote {}", path.display());
            }
        }
    }

    Ok(())
}

fn build_index(track: &Path, output: &Path, config: &AppConfig, quiet: bool) -> Result<()> {
    let (text, encode) = signal::load_text(track, &config.quantizer)?;
    if encode.dropped > 0 {
        eprintln!("fmx: dropped {} missing samples", encode.dropped);
    }
    if encode.clamped > 0 {
        eprintln!(
            "fmx: warning: {} samples fell outside the symbol range and were clamped",
            encode.clamped
        );
    }

    let progress = spinner("Building index...", quiet);
    let built = IndexBuilder::new(config.index.clone())
        .build(&text)
        .with_context(|| format!("Failed to index {}", track.display()));
    if let Some(spinner) = progress {
        spinner.finish_and_clear();
    }
    let built = built?;

    for warning in &built.report.warnings {
        eprintln!("fmx: warning: {}", warning);
    }

    IndexWriter::write(output, &built.index)?;

    if !quiet {
        eprintln!(
            "fmx: indexed {} ({} symbols, {} distinct, step {}) in {} ms",
            track.display(),
            text.data_len(),
            built.report.alphabet_len - 1,
            config.quantizer.step(),
            built.report.elapsed.as_millis()
        );
    }
    Ok(())
}

fn run_bench(path: &Path, config: &AppConfig, color: bool, quiet: bool) -> Result<()> {
    let tracks = signal::discover_tracks(path, &config.bench.globs)?;
    if tracks.is_empty() {
        println!("No track files found in {}", path.display());
        return Ok(());
    }
    if !quiet {
        println!("Found {} track files to process", tracks.len());
    }

    let runner = Benchmark {
        bench: &config.bench,
        index: &config.index,
        quantizer: &config.quantizer,
    };
    let summary = runner.run(&tracks, quiet);

    fmx::output::print_bench_summary(&summary, color)?;
    Ok(())
}

/// Parse a comma-separated list of values
fn parse_target(target: &str) -> Result<Vec<f64>> {
    target
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid target value: {:?}", v))
        })
        .collect()
}
