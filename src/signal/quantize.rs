//! Signal quantization
//!
//! Maps real-valued samples to byte symbols:
//!
//! ```text
//! symbol = base_offset + round(value * scale), clamped into 1..=255
//! ```
//!
//! Two values collide exactly when they round to the same code, so the
//! quantization step is `1 / scale`. Codes that fall outside `1..=255` are
//! clamped to the nearest end and counted; the sentinel `0` is never
//! produced. Missing samples (`NaN`, `±inf`) are dropped from the text and
//! counted.

use crate::index::{IndexError, SENTINEL, Symbol};
use serde::{Deserialize, Serialize};

/// Smallest symbol the quantizer emits
const MIN_CODE: f64 = (SENTINEL as f64) + 1.0;

/// Largest symbol the quantizer emits
const MAX_CODE: f64 = u8::MAX as f64;

/// Fixed-step quantizer from samples to symbols
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quantizer {
    /// Symbol assigned to the value zero
    pub base_offset: u8,
    /// Codes per unit of signal
    pub scale: f64,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self {
            base_offset: 128,
            scale: 10.0,
        }
    }
}

/// Symbols produced from a sample sequence, plus what was lost on the way
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    pub symbols: Vec<Symbol>,
    pub report: EncodeReport,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeReport {
    /// Samples read
    pub samples: usize,
    /// Missing samples dropped from the text
    pub dropped: usize,
    /// Samples whose code was clamped into range
    pub clamped: usize,
}

impl Quantizer {
    /// Create a quantizer, rejecting parameters that could emit the sentinel
    /// or never change symbol
    pub fn new(base_offset: u8, scale: f64) -> Result<Self, IndexError> {
        let quantizer = Self { base_offset, scale };
        quantizer.validate()?;
        Ok(quantizer)
    }

    pub fn validate(&self) -> Result<(), IndexError> {
        if self.base_offset == SENTINEL {
            return Err(IndexError::InvalidInput(
                "base offset must differ from the sentinel".to_string(),
            ));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(IndexError::InvalidInput(format!(
                "scale must be positive and finite, got {}",
                self.scale
            )));
        }
        Ok(())
    }

    /// Width of the value interval mapped to one symbol
    pub fn step(&self) -> f64 {
        1.0 / self.scale
    }

    /// Symbol for one sample, and whether it was clamped.
    ///
    /// Returns `None` for missing (non-finite) samples.
    #[inline]
    pub fn symbol(&self, value: f64) -> Option<(Symbol, bool)> {
        if !value.is_finite() {
            return None;
        }
        let raw = self.base_offset as f64 + (value * self.scale).round();
        let code = raw.clamp(MIN_CODE, MAX_CODE);
        Some((code as Symbol, code != raw))
    }

    /// Central value of the interval that maps to `symbol`
    pub fn value_of(&self, symbol: Symbol) -> f64 {
        (symbol as f64 - self.base_offset as f64) / self.scale
    }

    /// Encode a sample sequence into text symbols, dropping missing samples
    pub fn encode(&self, values: &[f64]) -> Encoded {
        let mut symbols = Vec::with_capacity(values.len());
        let mut report = EncodeReport {
            samples: values.len(),
            ..EncodeReport::default()
        };

        for &value in values {
            match self.symbol(value) {
                Some((symbol, clamped)) => {
                    symbols.push(symbol);
                    report.clamped += clamped as usize;
                }
                None => report.dropped += 1,
            }
        }

        Encoded { symbols, report }
    }

    /// Encode query values. Every value must be finite.
    pub fn encode_pattern(&self, values: &[f64]) -> Result<Vec<Symbol>, IndexError> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                self.symbol(value).map(|(symbol, _)| symbol).ok_or_else(|| {
                    IndexError::InvalidInput(format!("pattern value {} at position {} is missing", value, i))
                })
            })
            .collect()
    }
}
