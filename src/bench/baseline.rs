//! Linear-scan baseline for substring counting

use crate::index::Symbol;

/// Count overlapping occurrences of `pattern` in `data` by scanning every
/// position.
///
/// Follows the index conventions: `data` excludes the sentinel, and the
/// empty pattern matches at all `data.len() + 1` positions.
pub fn linear_count(data: &[Symbol], pattern: &[Symbol]) -> u64 {
    if pattern.is_empty() {
        return data.len() as u64 + 1;
    }
    if pattern.len() > data.len() {
        return 0;
    }
    data.windows(pattern.len()).filter(|w| *w == pattern).count() as u64
}
