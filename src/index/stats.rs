use crate::index::fm::FmIndex;
use crate::index::reader::IndexReader;
use crate::index::types::IndexHeader;
use crate::signal::Quantizer;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Summary of a built index
#[derive(Debug, Clone, PartialEq)]
pub struct IndexStats {
    /// Data symbols (sentinel excluded)
    pub data_len: usize,
    /// Distinct symbols, sentinel included
    pub alphabet_len: usize,
    pub suffix_array_bytes: usize,
    pub bwt_bytes: usize,
    pub occ_bytes: usize,
    pub total_bytes: usize,
    /// Data symbols with their occurrence counts, ascending
    pub symbol_counts: Vec<(u8, u32)>,
}

impl IndexStats {
    pub fn of(index: &FmIndex) -> Self {
        let alphabet = index.alphabet();
        let symbol_counts = (1..alphabet.len())
            .map(|code| (alphabet.symbol(code), index.occ().total(code)))
            .collect();

        Self {
            data_len: index.data_len(),
            alphabet_len: alphabet.len(),
            suffix_array_bytes: std::mem::size_of_val(index.suffix_array()),
            bwt_bytes: index.bwt().len(),
            occ_bytes: index.occ().size_bytes(),
            total_bytes: index.size_bytes(),
            symbol_counts,
        }
    }
}

/// Display index statistics
pub fn show_stats(path: &Path, quantizer: &Quantizer) -> Result<()> {
    let index = IndexReader::open(path)?;
    let stats = IndexStats::of(&index);
    let header = read_file_header(path)?;

    println!("Index Statistics");
    println!("================");
    println!();
    println!("Index file:       {}", path.display());
    println!("Format version:   {}", header.version);
    println!("Text length:      {} symbols (+ sentinel)", stats.data_len);
    println!("Alphabet size:    {} (sentinel included)", stats.alphabet_len);
    println!();
    println!("Suffix array:     {}", format_size(stats.suffix_array_bytes as u64));
    println!("BWT:              {}", format_size(stats.bwt_bytes as u64));
    println!("Occurrence table: {}", format_size(stats.occ_bytes as u64));
    println!("Total:            {}", format_size(stats.total_bytes as u64));

    println!();
    println!("Most frequent symbols:");
    let mut sorted = stats.symbol_counts.clone();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    for (symbol, count) in sorted.iter().take(15) {
        println!(
            "  {:>3} (~{:>8.3})  {}",
            symbol,
            quantizer.value_of(*symbol),
            count
        );
    }

    if sorted.len() > 15 {
        println!("  ... and {} more", sorted.len() - 15);
    }

    Ok(())
}

/// Format a byte count for display
/// Header of an index file, read without loading the tables
fn read_file_header(path: &Path) -> Result<IndexHeader> {
    let mut buf = [0u8; IndexHeader::SIZE];
    File::open(path)
        .and_then(|mut file| file.read_exact(&mut buf))
        .with_context(|| format!("Failed to read header of {}", path.display()))?;
    Ok(IndexReader::read_header(&buf)?)
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{INDEX_VERSION, IndexBuilder, IndexWriter, Text};
    use tempfile::tempdir;

    #[test]
    fn test_stats_banana() {
        let index = IndexBuilder::with_defaults()
            .build(&Text::new(b"banana".to_vec()).unwrap())
            .unwrap()
            .index;
        let stats = IndexStats::of(&index);
        assert_eq!(stats.data_len, 6);
        assert_eq!(stats.alphabet_len, 4);
        assert_eq!(stats.suffix_array_bytes, 28);
        assert_eq!(stats.bwt_bytes, 7);
        assert_eq!(stats.occ_bytes, 4 * 8 * 4);
        assert_eq!(stats.symbol_counts, vec![(b'a', 3), (b'b', 1), (b'n', 2)]);
    }

    #[test]
    fn test_read_file_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("banana.fmx");
        let index = IndexBuilder::with_defaults()
            .build(&Text::new(b"banana".to_vec()).unwrap())
            .unwrap()
            .index;
        IndexWriter::write(&path, &index).unwrap();

        let header = read_file_header(&path).unwrap();
        assert_eq!(header.version, INDEX_VERSION);
        assert_eq!(header.alphabet_len, 4);

        std::fs::write(&path, b"FMXI").unwrap();
        assert!(read_file_header(&path).is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }
}
