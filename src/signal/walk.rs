//! Track discovery
//!
//! Walks a directory tree (honouring `.gitignore` and `.ignore` files) and
//! returns the files whose name matches one of the configured globs.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Default file name patterns for signal tracks
pub const DEFAULT_TRACK_GLOBS: &[&str] = &["*.txt", "*.tsv", "*.csv", "*.signal"];

/// Compile file name globs into one matcher
pub fn build_globset<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        builder.add(Glob::new(pattern).with_context(|| format!("Invalid glob: {}", pattern))?);
    }
    Ok(builder.build()?)
}

/// Find track files under `root`, sorted by path.
///
/// A `root` that is itself a file is returned as-is when it matches.
pub fn discover_tracks<S: AsRef<str>>(root: &Path, patterns: &[S]) -> Result<Vec<PathBuf>> {
    let globs = build_globset(patterns)?;
    let matches = |path: &Path| path.file_name().is_some_and(|name| globs.is_match(name));

    if root.is_file() {
        return Ok(if matches(root) { vec![root.to_path_buf()] } else { Vec::new() });
    }
    if !root.is_dir() {
        anyhow::bail!("Not a directory: {}", root.display());
    }

    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_exclude(true)
        .filter_entry(|entry| entry.file_name() != ".git")
        .build();

    let mut tracks: Vec<PathBuf> = walker
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| matches(path))
        .collect();
    tracks.sort();

    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discover_filters_by_glob() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "1").unwrap();
        fs::write(dir.path().join("a.csv"), "1").unwrap();
        fs::write(dir.path().join("notes.md"), "x").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.signal"), "1").unwrap();

        let tracks = discover_tracks(dir.path(), DEFAULT_TRACK_GLOBS).unwrap();
        let names: Vec<_> = tracks
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["a.csv", "b.txt", "nested/c.signal"]);
    }

    #[test]
    fn test_build_dir_names_not_skipped() {
        let dir = tempdir().unwrap();
        for sub in ["target", "__pycache__"] {
            fs::create_dir(dir.path().join(sub)).unwrap();
            fs::write(dir.path().join(sub).join("chr1.txt"), "1").unwrap();
        }
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git").join("HEAD.txt"), "1").unwrap();

        let tracks = discover_tracks(dir.path(), DEFAULT_TRACK_GLOBS).unwrap();
        assert_eq!(
            tracks,
            vec![
                dir.path().join("__pycache__").join("chr1.txt"),
                dir.path().join("target").join("chr1.txt"),
            ]
        );
    }

    #[test]
    fn test_custom_globs() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("x.bedgraph"), "1").unwrap();
        fs::write(dir.path().join("y.txt"), "1").unwrap();

        let tracks = discover_tracks(dir.path(), &["*.bedgraph"]).unwrap();
        assert_eq!(tracks, vec![dir.path().join("x.bedgraph")]);
    }

    #[test]
    fn test_single_file_root() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("one.txt");
        fs::write(&path, "1").unwrap();
        assert_eq!(discover_tracks(&path, DEFAULT_TRACK_GLOBS).unwrap(), vec![path.clone()]);
        assert!(discover_tracks(&path, &["*.csv"]).unwrap().is_empty());
    }

    #[test]
    fn test_missing_root_and_bad_glob() {
        let dir = tempdir().unwrap();
        assert!(discover_tracks(&dir.path().join("nope"), DEFAULT_TRACK_GLOBS).is_err());
        assert!(build_globset(&["a[".to_string()]).is_err());
    }
}
