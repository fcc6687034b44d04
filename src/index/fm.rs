//! The FM-index
//!
//! An immutable bundle of suffix array, BWT, occurrence table and count
//! array, answering substring counts by backward search in O(m) table
//! lookups for a pattern of length m.

use super::bwt::{build_bwt, text_from_bwt};
use super::error::{IndexError, Result};
use super::rank::{CountArray, OccTable};
use super::suffix_array::verify_suffix_array;
use super::text::Text;
use super::types::{Alphabet, SENTINEL, Symbol, TextPosition};

/// Substring-counting index over one [`Text`].
///
/// Never mutated after construction; share it freely between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FmIndex {
    alphabet: Alphabet,
    suffix_array: Vec<TextPosition>,
    bwt: Vec<Symbol>,
    occ: OccTable,
    counts: CountArray,
}

impl FmIndex {
    /// Derive BWT and rank tables for a text whose suffix array is known
    pub(crate) fn assemble(text: &Text, suffix_array: Vec<TextPosition>) -> Result<Self> {
        let alphabet = Alphabet::from_text(text.as_slice());
        let bwt = build_bwt(text.as_slice(), &suffix_array);
        let occ = OccTable::build(&bwt, &alphabet)?;
        let counts = CountArray::build(text.as_slice(), &alphabet)?;

        Ok(Self {
            alphabet,
            suffix_array,
            bwt,
            occ,
            counts,
        })
    }

    /// Reassemble an index from persisted parts, re-checking every invariant.
    ///
    /// The text is recovered from the BWT and suffix array; the alphabet,
    /// suffix order, occurrence table and count array must all match what a
    /// fresh construction over that text would produce.
    pub fn from_parts(
        alphabet: Alphabet,
        suffix_array: Vec<TextPosition>,
        bwt: Vec<Symbol>,
        occ: OccTable,
        counts: CountArray,
    ) -> Result<Self> {
        let text = text_from_bwt(&bwt, &suffix_array)
            .ok_or_else(|| IndexError::corrupt("suffix array is not a permutation of the BWT rows"))?;
        let text = Text::from_terminated(text).map_err(|e| IndexError::corrupt(e.to_string()))?;

        if Alphabet::from_text(text.as_slice()) != alphabet {
            return Err(IndexError::corrupt("alphabet does not match the text"));
        }
        verify_suffix_array(text.as_slice(), &suffix_array)?;

        if occ.sigma() != alphabet.len() || occ.rows() != bwt.len() + 1 {
            return Err(IndexError::corrupt("occurrence table has the wrong shape"));
        }
        if !occ.is_monotone() || occ != OccTable::build(&bwt, &alphabet)? {
            return Err(IndexError::corrupt("occurrence table does not match the BWT"));
        }
        if counts != CountArray::build(&bwt, &alphabet)? {
            return Err(IndexError::corrupt("count array does not match the BWT"));
        }

        Ok(Self {
            alphabet,
            suffix_array,
            bwt,
            occ,
            counts,
        })
    }

    /// Number of occurrences of `pattern` in the text.
    ///
    /// - A symbol the text never contains yields `Ok(0)`.
    /// - The empty pattern matches at every suffix: `Ok(n + 1)`.
    /// - A pattern containing the sentinel is `InvalidInput`.
    pub fn count(&self, pattern: &[Symbol]) -> Result<u64> {
        if let Some(pos) = pattern.iter().position(|&s| s == SENTINEL) {
            return Err(IndexError::invalid(format!(
                "pattern contains the sentinel at position {}",
                pos
            )));
        }
        if pattern.len() > self.data_len() {
            return Ok(0);
        }

        // Half-open row range [top, end) of suffixes prefixed by the pattern
        // suffix processed so far.
        let mut top = 0usize;
        let mut end = self.bwt.len();

        for &symbol in pattern.iter().rev() {
            let Some(code) = self.alphabet.code(symbol) else {
                return Ok(0);
            };
            let base = self.counts.get(code) as usize;
            top = base + self.occ.occ(code, top) as usize;
            end = base + self.occ.occ(code, end) as usize;
            if top >= end {
                return Ok(0);
            }
        }

        Ok((end - top) as u64)
    }

    /// Whether `pattern` occurs at least once
    pub fn contains(&self, pattern: &[Symbol]) -> Result<bool> {
        Ok(self.count(pattern)? > 0)
    }

    /// Number of data symbols `n` (sentinel excluded)
    pub fn data_len(&self) -> usize {
        self.bwt.len() - 1
    }

    /// Text length including the sentinel (`n + 1`)
    pub fn len(&self) -> usize {
        self.bwt.len()
    }

    /// Always false: an index covers at least one data symbol
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn suffix_array(&self) -> &[TextPosition] {
        &self.suffix_array
    }

    pub fn bwt(&self) -> &[Symbol] {
        &self.bwt
    }

    pub fn occ(&self) -> &OccTable {
        &self.occ
    }

    pub fn counts(&self) -> &CountArray {
        &self.counts
    }

    /// Approximate heap size of all tables in bytes
    pub fn size_bytes(&self) -> usize {
        self.suffix_array.len() * std::mem::size_of::<TextPosition>()
            + self.bwt.len()
            + self.occ.size_bytes()
            + self.counts.len() * std::mem::size_of::<u32>()
            + self.alphabet.len()
    }
}
