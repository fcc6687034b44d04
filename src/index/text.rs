//! Sentinel-terminated text
//!
//! A [`Text`] can only be obtained through validation, so every later stage
//! may rely on the sentinel occurring exactly once, at the last position.

use super::error::{IndexError, Result};
use super::types::{MAX_TEXT_LEN, SENTINEL, Symbol};

/// Immutable symbol sequence of `n` data symbols followed by the sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    symbols: Vec<Symbol>,
}

impl Text {
    /// Build a text from data symbols, appending the sentinel
    pub fn new(data: impl Into<Vec<Symbol>>) -> Result<Self> {
        let mut symbols = data.into();
        validate_data(&symbols)?;
        symbols.push(SENTINEL);
        Ok(Self { symbols })
    }

    /// Build a text from symbols that already end in the sentinel
    pub fn from_terminated(mut symbols: Vec<Symbol>) -> Result<Self> {
        match symbols.pop() {
            Some(SENTINEL) => {}
            Some(_) => return Err(IndexError::invalid("text does not end with the sentinel")),
            None => return Err(IndexError::invalid("empty text")),
        }
        validate_data(&symbols)?;
        symbols.push(SENTINEL);
        Ok(Self { symbols })
    }

    /// All symbols, sentinel included
    #[inline]
    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Data symbols without the sentinel
    #[inline]
    pub fn data(&self) -> &[Symbol] {
        &self.symbols[..self.symbols.len() - 1]
    }

    /// Length including the sentinel (`n + 1`)
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Number of data symbols (`n`)
    #[inline]
    pub fn data_len(&self) -> usize {
        self.symbols.len() - 1
    }

    /// Always false: a valid text holds at least one data symbol
    pub fn is_empty(&self) -> bool {
        false
    }
}

fn validate_data(data: &[Symbol]) -> Result<()> {
    if data.is_empty() {
        return Err(IndexError::invalid("empty text"));
    }
    if data.len() >= MAX_TEXT_LEN {
        return Err(IndexError::invalid(format!(
            "text of {} symbols exceeds the maximum of {}",
            data.len(),
            MAX_TEXT_LEN - 1
        )));
    }
    if let Some(pos) = data.iter().position(|&s| s == SENTINEL) {
        return Err(IndexError::invalid(format!(
            "sentinel symbol at non-terminal position {}",
            pos
        )));
    }
    Ok(())
}
