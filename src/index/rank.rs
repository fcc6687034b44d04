//! Rank tables for backward search
//!
//! - [`OccTable`]: `occ(c, i)` = occurrences of code `c` in `bwt[0..i]`
//! - [`CountArray`]: `get(c)` = number of text symbols smaller than code `c`
//!
//! Both are indexed by the dense codes of an [`Alphabet`], never by raw
//! symbols. The occurrence table is dense: O(1) lookups for
//! `|Σ| × (n + 2)` words of memory, which is small for the byte alphabets
//! produced by signal quantization.

use super::error::{IndexError, Result};
use super::types::{Alphabet, Symbol};

/// Dense per-code cumulative occurrence table over the BWT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccTable {
    /// Entries per code: `bwt.len() + 1`
    rows: usize,
    /// Code-major: `table[code * rows + i]`
    table: Vec<u32>,
}

impl OccTable {
    /// Build the table with one left-to-right pass over the BWT
    pub fn build(bwt: &[Symbol], alphabet: &Alphabet) -> Result<Self> {
        let sigma = alphabet.len();
        let rows = bwt.len() + 1;
        let mut table = vec![0u32; sigma * rows];
        let mut running = vec![0u32; sigma];

        for (i, &symbol) in bwt.iter().enumerate() {
            let code = alphabet
                .code(symbol)
                .ok_or_else(|| IndexError::invalid(format!("symbol {} missing from alphabet", symbol)))?;
            running[code] += 1;
            for (c, &count) in running.iter().enumerate() {
                table[c * rows + i + 1] = count;
            }
        }

        Ok(Self { rows, table })
    }

    /// Wrap a persisted table; `table.len()` must be `sigma * rows`
    pub fn from_raw(sigma: usize, rows: usize, table: Vec<u32>) -> Result<Self> {
        if rows == 0 || sigma.checked_mul(rows) != Some(table.len()) {
            return Err(IndexError::corrupt(format!(
                "occurrence table has {} entries, expected {} x {}",
                table.len(),
                sigma,
                rows
            )));
        }
        Ok(Self { rows, table })
    }

    /// Occurrences of `code` in `bwt[0..i]`, for `i` in `0..=bwt.len()`
    #[inline]
    pub fn occ(&self, code: usize, i: usize) -> u32 {
        self.table[code * self.rows + i]
    }

    /// Total occurrences of `code` in the BWT
    #[inline]
    pub fn total(&self, code: usize) -> u32 {
        self.occ(code, self.rows - 1)
    }

    /// Entries per code (`n + 2`)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of codes
    pub fn sigma(&self) -> usize {
        self.table.len() / self.rows
    }

    /// Raw code-major table, as persisted
    pub fn as_slice(&self) -> &[u32] {
        &self.table
    }

    /// Every row steps by zero or one from the previous row, starting at zero
    pub fn is_monotone(&self) -> bool {
        self.table.chunks(self.rows).all(|row| {
            row.first() == Some(&0) && row.windows(2).all(|w| w[1] == w[0] || w[1] == w[0] + 1)
        })
    }

    /// Approximate heap size in bytes
    pub fn size_bytes(&self) -> usize {
        self.table.len() * std::mem::size_of::<u32>()
    }
}

/// Per-code count of strictly smaller symbols (the "C array")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountArray {
    starts: Vec<u32>,
}

impl CountArray {
    /// Exclusive prefix sum of per-code totals, in code (= symbol) order.
    ///
    /// Accepts the text or the BWT, which hold the same multiset of symbols.
    pub fn build(symbols: &[Symbol], alphabet: &Alphabet) -> Result<Self> {
        let mut totals = vec![0u32; alphabet.len()];
        for &symbol in symbols {
            let code = alphabet
                .code(symbol)
                .ok_or_else(|| IndexError::invalid(format!("symbol {} missing from alphabet", symbol)))?;
            totals[code] += 1;
        }

        let mut acc = 0u32;
        let starts = totals
            .iter()
            .map(|&total| {
                let start = acc;
                acc += total;
                start
            })
            .collect();

        Ok(Self { starts })
    }

    /// Wrap a persisted array
    pub fn from_raw(starts: Vec<u32>) -> Self {
        Self { starts }
    }

    #[inline]
    pub fn get(&self, code: usize) -> u32 {
        self.starts[code]
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.starts
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banana() -> (Vec<u8>, Alphabet) {
        let bwt = b"annb\x00aa".to_vec();
        let alphabet = Alphabet::from_text(&bwt);
        (bwt, alphabet)
    }

    #[test]
    fn test_occ_banana() {
        let (bwt, alphabet) = banana();
        let occ = OccTable::build(&bwt, &alphabet).unwrap();
        let a = alphabet.code(b'a').unwrap();
        let n = alphabet.code(b'n').unwrap();

        assert_eq!(occ.rows(), 8);
        assert_eq!(occ.sigma(), 4);
        let a_row: Vec<u32> = (0..8).map(|i| occ.occ(a, i)).collect();
        assert_eq!(a_row, vec![0, 1, 1, 1, 1, 1, 2, 3]);
        let n_row: Vec<u32> = (0..8).map(|i| occ.occ(n, i)).collect();
        assert_eq!(n_row, vec![0, 0, 1, 2, 2, 2, 2, 2]);
        assert_eq!(occ.total(a), 3);
        assert_eq!(occ.total(0), 1);
    }

    #[test]
    fn test_occ_monotone() {
        let (bwt, alphabet) = banana();
        let occ = OccTable::build(&bwt, &alphabet).unwrap();
        assert!(occ.is_monotone());

        let mut raw = occ.as_slice().to_vec();
        raw[3] += 2;
        let broken = OccTable::from_raw(occ.sigma(), occ.rows(), raw).unwrap();
        assert!(!broken.is_monotone());
    }

    #[test]
    fn test_occ_rejects_foreign_symbol() {
        let alphabet = Alphabet::from_text(b"ab\x00");
        assert!(OccTable::build(b"abc\x00", &alphabet).is_err());
        assert!(CountArray::build(b"abc\x00", &alphabet).is_err());
    }

    #[test]
    fn test_occ_from_raw_size_check() {
        assert!(OccTable::from_raw(2, 3, vec![0; 6]).is_ok());
        assert!(OccTable::from_raw(2, 3, vec![0; 5]).is_err());
    }

    #[test]
    fn test_count_array_banana() {
        let (bwt, alphabet) = banana();
        let c = CountArray::build(&bwt, &alphabet).unwrap();
        // $ < a(3) < b(1) < n(2)
        assert_eq!(c.as_slice(), &[0, 1, 4, 5]);

        // Text and BWT give the same array.
        assert_eq!(CountArray::build(b"banana\x00", &alphabet).unwrap(), c);
    }

    #[test]
    fn test_count_array_prefix_sums_match_totals() {
        let (bwt, alphabet) = banana();
        let c = CountArray::build(&bwt, &alphabet).unwrap();
        let occ = OccTable::build(&bwt, &alphabet).unwrap();
        for code in 0..alphabet.len() - 1 {
            assert!(c.get(code) < c.get(code + 1));
            assert_eq!(c.get(code) + occ.total(code), c.get(code + 1));
        }
        let last = alphabet.len() - 1;
        assert_eq!((c.get(last) + occ.total(last)) as usize, bwt.len());
    }
}
