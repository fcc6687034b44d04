//! Burrows-Wheeler transform from a suffix array

use super::types::{Symbol, TextPosition};

/// Derive the BWT: `bwt[i] = text[(sa[i] - 1) mod len]`.
///
/// The row for suffix 0 wraps around to the sentinel at the end of the text.
pub fn build_bwt(text: &[Symbol], sa: &[TextPosition]) -> Vec<Symbol> {
    let last = text.len() - 1;
    sa.iter()
        .map(|&pos| match pos as usize {
            0 => text[last],
            p => text[p - 1],
        })
        .collect()
}

/// Recover the text from its BWT and suffix array.
///
/// Inverse of [`build_bwt`] given the same suffix array: every row `i` names
/// the symbol that precedes suffix `sa[i]`. Returns `None` unless `sa` is a
/// permutation of `0..bwt.len()`.
pub fn text_from_bwt(bwt: &[Symbol], sa: &[TextPosition]) -> Option<Vec<Symbol>> {
    let len = bwt.len();
    if sa.len() != len || len == 0 {
        return None;
    }
    let mut text = vec![0; len];
    let mut filled = vec![false; len];
    for (&pos, &symbol) in sa.iter().zip(bwt) {
        let pos = pos as usize;
        if pos >= len {
            return None;
        }
        let target = if pos == 0 { len - 1 } else { pos - 1 };
        if filled[target] {
            return None;
        }
        filled[target] = true;
        text[target] = symbol;
    }
    Some(text)
}
