//! Output formatting for benchmark results

use crate::bench::{BenchSummary, FileResult};
use std::io::{self, Write};
use std::time::Duration;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print per-track results followed by totals
pub fn print_bench_summary(summary: &BenchSummary, color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    write_bench_summary(&mut stdout, summary)
}

/// Write results to any color-capable writer
pub fn write_bench_summary<W: WriteColor>(out: &mut W, summary: &BenchSummary) -> io::Result<()> {
    writeln!(out, "Benchmark Results:")?;

    for file in &summary.files {
        writeln!(out)?;
        write_file_result(out, file)?;
    }

    for (path, reason) in &summary.failures {
        writeln!(out)?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        writeln!(out, "File: {}", path.display())?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        writeln!(out, "Failed: {}", reason)?;
        out.reset()?;
    }

    writeln!(out)?;
    out.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(out, "Total ({} files, {} failed)", summary.files.len(), summary.failures.len())?;
    out.reset()?;
    writeln!(out, "Total Symbols: {}", summary.total_symbols())?;
    writeln!(out, "Construction Time: {}", format_secs(summary.total_build_time()))?;
    writeln!(out, "Index Search Time: {}", format_secs(summary.total_index_time()))?;
    writeln!(out, "Linear Scan Time: {}", format_secs(summary.total_scan_time()))?;
    write_speedup(out, summary.speedup())?;

    Ok(())
}

fn write_file_result<W: WriteColor>(out: &mut W, file: &FileResult) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
    writeln!(out, "File: {}", file.path.display())?;
    out.reset()?;

    writeln!(
        out,
        "Symbols: {} ({} samples, {} missing dropped, {} clamped)",
        file.text_len, file.encode.samples, file.encode.dropped, file.encode.clamped
    )?;
    writeln!(out, "Construction Time: {}", format_secs(file.build_time))?;
    writeln!(out, "Index Search Time: {}", format_secs(file.index_time))?;
    writeln!(out, "Linear Scan Time: {}", format_secs(file.scan_time))?;
    write_speedup(out, file.speedup())?;

    let counts: Vec<String> = file.counts.iter().map(|c| c.to_string()).collect();
    writeln!(out, "Counts: [{}]", counts.join(", "))?;

    for warning in &file.warnings {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        writeln!(out, "Warning: {}", warning)?;
        out.reset()?;
    }

    Ok(())
}

fn write_speedup<W: WriteColor>(out: &mut W, speedup: Option<f64>) -> io::Result<()> {
    write!(out, "Speedup: ")?;
    match speedup {
        Some(x) => {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            writeln!(out, "{:.2}x", x)?;
            out.reset()
        }
        None => writeln!(out, "N/A (Index Search Time is 0)"),
    }
}

fn format_secs(duration: Duration) -> String {
    format!("{:.4} seconds", duration.as_secs_f64())
}
