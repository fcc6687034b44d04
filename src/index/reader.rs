//! Index reader
//!
//! Memory-maps a persisted index, decodes every section and hands the parts
//! to [`FmIndex::from_parts`], which re-validates all invariants. A file that
//! is truncated, padded, or inconsistent is rejected as a whole.

use super::error::{IndexError, Result};
use super::fm::FmIndex;
use super::rank::{CountArray, OccTable};
use super::types::{Alphabet, INDEX_MAGIC, INDEX_VERSION, IndexHeader, MAX_TEXT_LEN, TextPosition};
use anyhow::Context;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Reads index files
pub struct IndexReader;

impl IndexReader {
    /// Open and validate an index file
    pub fn open(path: &Path) -> anyhow::Result<FmIndex> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let mmap = unsafe { Mmap::map(&file)? };
        let index = Self::from_bytes(&mmap)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        Ok(index)
    }

    /// Decode and validate an index from its serialized bytes
    pub fn from_bytes(data: &[u8]) -> Result<FmIndex> {
        let mut cursor = Cursor::new(data);

        let magic = cursor.u32()?;
        if magic != INDEX_MAGIC {
            return Err(IndexError::corrupt("bad magic number"));
        }
        let version = cursor.u32()?;
        if version != INDEX_VERSION {
            return Err(IndexError::corrupt(format!("unsupported version: {}", version)));
        }
        let _flags = cursor.u32()?;
        let sigma = cursor.u32()? as usize;
        if sigma == 0 || sigma > 256 {
            return Err(IndexError::corrupt(format!("alphabet size {} out of range", sigma)));
        }

        let symbols = cursor.take(sigma)?.to_vec();
        let n = cursor.u64()?;
        let len = usize::try_from(n)
            .ok()
            .and_then(|n| n.checked_add(1))
            .filter(|&len| len <= MAX_TEXT_LEN)
            .ok_or_else(|| IndexError::corrupt(format!("text length {} out of range", n)))?;

        // Reject size mismatches before allocating anything proportional to n.
        let remaining = expected_body_size(sigma, len)
            .ok_or_else(|| IndexError::corrupt("section sizes overflow"))?;
        if cursor.remaining() != remaining {
            return Err(IndexError::corrupt(format!(
                "expected {} bytes of tables, found {}",
                remaining,
                cursor.remaining()
            )));
        }

        let suffix_array: Vec<TextPosition> = cursor.u32s(len)?;
        let bwt = cursor.take(len)?.to_vec();
        let occ = OccTable::from_raw(sigma, len + 1, cursor.u32s(sigma * (len + 1))?)?;
        let counts = CountArray::from_raw(cursor.u32s(sigma)?);

        let alphabet = Alphabet::from_sorted(symbols)?;
        FmIndex::from_parts(alphabet, suffix_array, bwt, occ, counts)
    }

    /// Header of an index file without decoding the tables
    pub fn read_header(data: &[u8]) -> Result<IndexHeader> {
        let mut cursor = Cursor::new(data);
        Ok(IndexHeader {
            magic: cursor.u32()?,
            version: cursor.u32()?,
            flags: cursor.u32()?,
            alphabet_len: cursor.u32()?,
        })
    }
}

/// Bytes following `n`: suffix array, BWT, occurrence table, counts
fn expected_body_size(sigma: usize, len: usize) -> Option<usize> {
    let sa = len.checked_mul(4)?;
    let occ = sigma.checked_mul(len.checked_add(1)?)?.checked_mul(4)?;
    sa.checked_add(len)?.checked_add(occ)?.checked_add(sigma * 4)
}

/// Bounds-checked little-endian reads
struct Cursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(IndexError::corrupt("file too small"));
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    fn u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.array()?))
    }

    fn u32s(&mut self, count: usize) -> Result<Vec<u32>> {
        let bytes = self.take(count * 4)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }
}
