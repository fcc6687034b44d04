//! Index writer
//!
//! Persists an [`FmIndex`] as a single little-endian file:
//!
//! ```text
//! header        magic u32 | version u32 | flags u32 | alphabet_len u32
//! alphabet      alphabet_len x u8 (ascending, sentinel first)
//! n             u64 (data symbols, sentinel excluded)
//! suffix array  (n + 1) x u32
//! bwt           (n + 1) x u8
//! occ           alphabet_len x (n + 2) x u32, code-major
//! counts        alphabet_len x u32
//! ```

use super::fm::FmIndex;
use super::types::IndexHeader;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes index files
pub struct IndexWriter;

impl IndexWriter {
    /// Write `index` to `path`, replacing any existing file
    pub fn write(path: &Path, index: &FmIndex) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut out = BufWriter::with_capacity(65536, file);
        Self::write_to(&mut out, index)
            .and_then(|()| out.flush())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Serialize `index` into any writer
    pub fn write_to<W: Write>(out: &mut W, index: &FmIndex) -> io::Result<()> {
        out.write_all(&Self::to_bytes(index))
    }

    /// Serialize `index` into a byte vector
    pub fn to_bytes(index: &FmIndex) -> Vec<u8> {
        let alphabet = index.alphabet();
        let mut bytes = Vec::with_capacity(index.size_bytes() + IndexHeader::SIZE + 8);

        // Write header
        let header = IndexHeader::new(alphabet.len() as u32);
        put_u32s(&mut bytes, &[header.magic, header.version, header.flags, header.alphabet_len]);

        bytes.extend_from_slice(alphabet.symbols());
        bytes.extend_from_slice(&(index.data_len() as u64).to_le_bytes());
        put_u32s(&mut bytes, index.suffix_array());
        bytes.extend_from_slice(index.bwt());
        put_u32s(&mut bytes, index.occ().as_slice());
        put_u32s(&mut bytes, index.counts().as_slice());

        bytes
    }
}

/// Append u32 values in little-endian order
fn put_u32s(bytes: &mut Vec<u8>, values: &[u32]) {
    bytes.reserve(values.len() * 4);
    for &value in values {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
}
