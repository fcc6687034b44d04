//! Index construction pipeline
//!
//! text → suffix array → BWT → occurrence table / count array.
//!
//! Construction is single-threaded and all-or-nothing: either a complete
//! [`FmIndex`] is returned, or an error and nothing else.

use super::cancel::CancelToken;
use super::error::Result;
use super::fm::FmIndex;
use super::suffix_array::build_suffix_array;
use super::text::Text;
use super::types::{ConstructionStrategy, IndexConfig};
use std::fmt;
use std::time::{Duration, Instant};

/// Builder for constructing FM-indexes
#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    config: IndexConfig,
    cancel: CancelToken,
}

impl IndexBuilder {
    /// Create a new builder with the given configuration
    pub fn new(config: IndexConfig) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
        }
    }

    /// Create a builder with default configuration
    pub fn with_defaults() -> Self {
        Self::new(IndexConfig::default())
    }

    /// Use `cancel` to abort construction from elsewhere
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Build the index for `text`
    pub fn build(&self, text: &Text) -> Result<BuiltIndex> {
        let start = Instant::now();
        let cancel = match self.config.timeout_secs {
            Some(secs) => self.cancel.expiring_after(Duration::from_secs(secs)),
            None => self.cancel.clone(),
        };

        let mut warnings = Vec::new();
        if self.config.strategy == ConstructionStrategy::Naive
            && text.len() > self.config.naive_threshold
        {
            warnings.push(BuildWarning::ConstructionTooExpensive {
                len: text.len(),
                threshold: self.config.naive_threshold,
            });
        }

        let suffix_array = build_suffix_array(text, self.config.strategy, &cancel)?;
        cancel.check()?;
        let index = FmIndex::assemble(text, suffix_array)?;

        let report = BuildReport {
            text_len: text.len(),
            alphabet_len: index.alphabet().len(),
            strategy: self.config.strategy,
            elapsed: start.elapsed(),
            warnings,
        };
        Ok(BuiltIndex { index, report })
    }
}

/// Result of building an index
#[derive(Debug)]
pub struct BuiltIndex {
    pub index: FmIndex,
    pub report: BuildReport,
}

/// What happened during construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Text length including the sentinel
    pub text_len: usize,
    /// Distinct symbols, sentinel included
    pub alphabet_len: usize,
    pub strategy: ConstructionStrategy,
    pub elapsed: Duration,
    pub warnings: Vec<BuildWarning>,
}

/// Non-fatal conditions the caller may want to act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// Naive construction ran on a text longer than the configured threshold;
    /// prefer [`ConstructionStrategy::PrefixDoubling`].
    ConstructionTooExpensive { len: usize, threshold: usize },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::ConstructionTooExpensive { len, threshold } => write!(
                f,
                "naive suffix sorting on {} symbols exceeds the threshold of {}; \
                 use the prefix-doubling strategy",
                len, threshold
            ),
        }
    }
}
