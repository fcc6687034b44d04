//! Core type definitions for the FM-index.

use super::error::{IndexError, Result};
use serde::{Deserialize, Serialize};

/// A text symbol. Quantized signal values are encoded one byte per sample.
pub type Symbol = u8;

/// Position in the text, also the element type of the suffix array
pub type TextPosition = u32;

/// Terminal symbol appended to every text; sorts before every other symbol
pub const SENTINEL: Symbol = 0x00;

/// Longest text (including the sentinel) addressable by [`TextPosition`]
pub const MAX_TEXT_LEN: usize = TextPosition::MAX as usize;

/// Magic number for persisted index files
pub const INDEX_MAGIC: u32 = u32::from_le_bytes(*b"FMXI");

/// Current version of the persisted index format
pub const INDEX_VERSION: u32 = 1;

/// The distinct symbols of a text, with a dense code per symbol.
///
/// Codes follow the symbol order, so the sentinel always has code 0 and
/// every table in the index can be indexed by code instead of by symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<Symbol>,
    codes: [Option<u8>; 256],
}

impl Alphabet {
    /// Collect the alphabet of a sentinel-terminated text
    pub fn from_text(text: &[Symbol]) -> Self {
        let mut seen = [false; 256];
        for &s in text {
            seen[s as usize] = true;
        }
        let symbols = (0..=255u8).filter(|&s| seen[s as usize]).collect();
        Self::with_symbols(symbols)
    }

    /// Rebuild an alphabet from its persisted symbol list.
    ///
    /// The list must be strictly increasing and start with the sentinel.
    pub fn from_sorted(symbols: Vec<Symbol>) -> Result<Self> {
        if symbols.first() != Some(&SENTINEL) {
            return Err(IndexError::corrupt("alphabet does not start with the sentinel"));
        }
        if symbols.windows(2).any(|w| w[0] >= w[1]) {
            return Err(IndexError::corrupt("alphabet is not strictly increasing"));
        }
        Ok(Self::with_symbols(symbols))
    }

    fn with_symbols(symbols: Vec<Symbol>) -> Self {
        let mut codes = [None; 256];
        for (code, &s) in symbols.iter().enumerate() {
            codes[s as usize] = Some(code as u8);
        }
        Self { symbols, codes }
    }

    /// Dense code of a symbol, or `None` if the text never contains it
    #[inline]
    pub fn code(&self, symbol: Symbol) -> Option<usize> {
        self.codes[symbol as usize].map(usize::from)
    }

    /// Symbol for a code
    #[inline]
    pub fn symbol(&self, code: usize) -> Symbol {
        self.symbols[code]
    }

    /// Symbols in ascending order, sentinel first
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Number of distinct symbols, sentinel included
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Suffix array construction algorithm.
///
/// Both strategies produce the same suffix array.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ConstructionStrategy {
    /// Sort positions by comparing whole suffixes. O(n² log n) worst case.
    Naive,
    /// Rank doubling over integer positions. O(n log² n).
    #[default]
    PrefixDoubling,
}

/// Configuration for index construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Suffix array construction algorithm
    #[serde(default)]
    pub strategy: ConstructionStrategy,

    /// Text length above which naive construction is reported as too expensive
    #[serde(default = "default_naive_threshold")]
    pub naive_threshold: usize,

    /// Abort construction after this many seconds (no limit when unset)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_naive_threshold() -> usize {
    20_000
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            strategy: ConstructionStrategy::default(),
            naive_threshold: default_naive_threshold(),
            timeout_secs: None,
        }
    }
}

/// Header of a persisted index file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexHeader {
    /// Magic number (INDEX_MAGIC)
    pub magic: u32,
    /// Version number
    pub version: u32,
    /// Flags (reserved for future use)
    pub flags: u32,
    /// Number of alphabet symbols that follow the header
    pub alphabet_len: u32,
}

impl IndexHeader {
    /// Size of header in bytes
    pub const SIZE: usize = 4 + 4 + 4 + 4; // 16 bytes

    pub fn new(alphabet_len: u32) -> Self {
        Self {
            magic: INDEX_MAGIC,
            version: INDEX_VERSION,
            flags: 0,
            alphabet_len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_codes_follow_symbol_order() {
        let alphabet = Alphabet::from_text(b"banana\x00");
        assert_eq!(alphabet.symbols(), &[0, b'a', b'b', b'n']);
        assert_eq!(alphabet.code(SENTINEL), Some(0));
        assert_eq!(alphabet.code(b'a'), Some(1));
        assert_eq!(alphabet.code(b'n'), Some(3));
        assert_eq!(alphabet.code(b'x'), None);
        assert_eq!(alphabet.symbol(2), b'b');
    }

    #[test]
    fn test_from_sorted_validation() {
        assert!(Alphabet::from_sorted(vec![0, 1, 5]).is_ok());
        assert!(Alphabet::from_sorted(vec![1, 5]).is_err());
        assert!(Alphabet::from_sorted(vec![0, 5, 5]).is_err());
        assert!(Alphabet::from_sorted(vec![0, 7, 3]).is_err());
        assert!(Alphabet::from_sorted(Vec::new()).is_err());
    }

    #[test]
    fn test_magic_spells_fmxi() {
        assert_eq!(&INDEX_MAGIC.to_le_bytes(), b"FMXI");
    }

    #[test]
    fn test_config_defaults_from_empty_json() {
        let config: IndexConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, IndexConfig::default());

        let config: IndexConfig = serde_json::from_str(r#"{"strategy":"naive"}"#).unwrap();
        assert_eq!(config.strategy, ConstructionStrategy::Naive);
    }
}
