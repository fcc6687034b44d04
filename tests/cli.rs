//! End-to-end tests of the `fmx` binary.
//!
//! Every invocation passes `--config` pointing into a temp directory so the
//! user's own configuration is never read or written.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const TRACK: &str = "# two alternating levels\n1.0 1.5 1.0\n1.5,1.0\nnan 2.0\n";

fn setup() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("config.json"), "{}").unwrap();
    fs::write(dir.path().join("chr1.txt"), TRACK).unwrap();
    dir
}

fn run_fmx(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let config = dir.join("config.json");
    let output = Command::new(env!("CARGO_BIN_EXE_fmx"))
        .args(args)
        .arg("--config")
        .arg(&config)
        .current_dir(dir)
        .output()
        .expect("Failed to run fmx");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

fn build(dir: &Path) {
    let (_, stderr, ok) = run_fmx(dir, &["build", "chr1.txt", "-o", "chr1.fmx", "--quiet"]);
    assert!(ok, "build failed: {}", stderr);
    assert!(dir.join("chr1.fmx").exists());
}

#[test]
fn test_build_and_count() {
    let dir = setup();
    build(dir.path());

    let (stdout, _, ok) = run_fmx(dir.path(), &["count", "chr1.fmx", "1.0", "1.5"]);
    assert!(ok);
    assert_eq!(stdout.trim(), "2");

    let (stdout, _, ok) = run_fmx(dir.path(), &["count", "chr1.fmx", "1.0"]);
    assert!(ok);
    assert_eq!(stdout.trim(), "3");

    let (stdout, _, ok) = run_fmx(dir.path(), &["count", "chr1.fmx", "-3.0"]);
    assert!(ok);
    assert_eq!(stdout.trim(), "0");
}

#[test]
fn test_count_empty_pattern() {
    let dir = setup();
    build(dir.path());

    // Six data symbols once the missing sample is dropped, plus the sentinel
    let (stdout, _, ok) = run_fmx(dir.path(), &["count", "chr1.fmx"]);
    assert!(ok);
    assert_eq!(stdout.trim(), "7");
}

#[test]
fn test_build_reports_dropped_samples() {
    let dir = setup();
    let (_, stderr, ok) = run_fmx(dir.path(), &["build", "chr1.txt", "-o", "chr1.fmx"]);
    assert!(ok);
    assert!(stderr.contains("dropped 1 missing samples"), "stderr: {}", stderr);
    assert!(stderr.contains("step 0.1"), "stderr: {}", stderr);
}

#[test]
fn test_count_warns_on_clamped_pattern() {
    let dir = setup();
    build(dir.path());

    let (stdout, stderr, ok) = run_fmx(dir.path(), &["count", "chr1.fmx", "1.0", "100"]);
    assert!(ok);
    assert_eq!(stdout.trim(), "0");
    assert!(stderr.contains("1 pattern values fell outside the symbol range"), "stderr: {}", stderr);

    let (_, stderr, ok) = run_fmx(dir.path(), &["count", "chr1.fmx", "1.0", "1.5"]);
    assert!(ok);
    assert!(!stderr.contains("clamped"), "stderr: {}", stderr);
}

#[test]
fn test_stats() {
    let dir = setup();
    build(dir.path());

    let (stdout, _, ok) = run_fmx(dir.path(), &["stats", "chr1.fmx"]);
    assert!(ok);
    assert!(stdout.contains("Index Statistics"));
    assert!(stdout.contains("Format version:   1"));
    assert!(stdout.contains("Text length:      6 symbols"));
    assert!(stdout.contains("Alphabet size:    4"));
}

#[test]
fn test_count_rejects_corrupt_index() {
    let dir = setup();
    fs::write(dir.path().join("junk.fmx"), b"not an index").unwrap();

    let (_, stderr, ok) = run_fmx(dir.path(), &["count", "junk.fmx", "1.0"]);
    assert!(!ok);
    assert!(!stderr.is_empty());
}

#[test]
fn test_build_rejects_bad_track() {
    let dir = setup();
    fs::write(dir.path().join("bad.txt"), "1.0 abc\n").unwrap();

    let (_, stderr, ok) = run_fmx(dir.path(), &["build", "bad.txt", "-o", "bad.fmx"]);
    assert!(!ok);
    assert!(stderr.contains("not a number"), "stderr: {}", stderr);
    assert!(!dir.path().join("bad.fmx").exists());
}

#[test]
fn test_bench_directory() {
    let dir = setup();
    fs::write(dir.path().join("chr2.tsv"), "0.5\t1.0\t0.5\t1.0\n").unwrap();
    fs::write(dir.path().join("notes.md"), "1.0 1.5").unwrap();

    let (stdout, stderr, ok) = run_fmx(
        dir.path(),
        &["bench", ".", "--repeats", "2", "--target", "1.0,1.5", "--target", "0.5", "--quiet"],
    );
    assert!(ok, "bench failed: {}", stderr);
    assert!(stdout.contains("Benchmark Results:"));
    assert!(stdout.contains("chr1.txt"));
    assert!(stdout.contains("chr2.tsv"));
    assert!(!stdout.contains("notes.md"));
    assert!(stdout.contains("Counts: [2, 0]"));
    assert!(stdout.contains("Counts: [0, 2]"));
    assert!(stdout.contains("Total (2 files, 0 failed)"));
}

#[test]
fn test_bench_rejects_bad_target() {
    let dir = setup();
    let (_, stderr, ok) = run_fmx(dir.path(), &["bench", ".", "--target", "1.0,x"]);
    assert!(!ok);
    assert!(stderr.contains("Invalid target value"));
}

#[test]
fn test_config_prints_defaults() {
    let dir = setup();
    let (stdout, _, ok) = run_fmx(dir.path(), &["config"]);
    assert!(ok);

    let printed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(printed["quantizer"]["base_offset"], 128);
    assert_eq!(printed["index"]["strategy"], "prefix-doubling");
}
