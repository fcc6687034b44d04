//! Suffix array construction
//!
//! Sorts the positions of a sentinel-terminated [`Text`] by the suffix that
//! starts at each position. Positions are integers into the one text buffer;
//! suffixes are never copied.
//!
//! Two strategies are available and produce identical output:
//!
//! - [`ConstructionStrategy::Naive`]: direct suffix comparison. Each
//!   comparison may read up to the whole remaining text, so the worst case is
//!   O(n² log n). Fine for short texts.
//! - [`ConstructionStrategy::PrefixDoubling`]: sorts by rank pairs of prefixes
//!   of length 1, 2, 4, ... until every rank is distinct. O(n log² n).
//!
//! Because the sentinel is unique and smallest, no two suffixes are equal and
//! the result is a unique permutation of `0..=n`.

use super::cancel::CancelToken;
use super::error::{IndexError, Result};
use super::text::Text;
use super::types::{ConstructionStrategy, Symbol, TextPosition};
use std::cmp::Ordering;

/// Length of the initial runs sorted in place by the naive strategy.
///
/// Each suffix comparison may read up to the whole text, so runs stay short
/// enough that sorting one costs only a few dozen comparisons.
const NAIVE_RUN_LEN: usize = 16;

/// Merge output slots (one suffix comparison each) between cancellation checks
const CANCEL_CHECK_SLOTS: usize = 64;

/// Build the suffix array of `text` with the given strategy
pub fn build_suffix_array(
    text: &Text,
    strategy: ConstructionStrategy,
    cancel: &CancelToken,
) -> Result<Vec<TextPosition>> {
    cancel.check()?;
    let text = text.as_slice();
    match strategy {
        ConstructionStrategy::Naive => sort_naive(text, cancel),
        ConstructionStrategy::PrefixDoubling => sort_prefix_doubling(text, cancel),
    }
}

/// Naive construction: comparison sort on whole suffixes.
///
/// Short runs are sorted with the standard library sort, then merged
/// bottom-up. Cancellation is observed between runs and every
/// [`CANCEL_CHECK_SLOTS`] merge comparisons, never inside the sort
/// comparator itself.
fn sort_naive(text: &[Symbol], cancel: &CancelToken) -> Result<Vec<TextPosition>> {
    let n = text.len();
    let mut sa: Vec<TextPosition> = (0..n as TextPosition).collect();

    for run in sa.chunks_mut(NAIVE_RUN_LEN) {
        cancel.check()?;
        run.sort_unstable_by(|&a, &b| compare_suffixes(text, a as usize, b as usize));
    }

    let mut buf: Vec<TextPosition> = vec![0; n];
    let mut width = NAIVE_RUN_LEN;
    while width < n {
        for start in (0..n).step_by(2 * width) {
            let mid = (start + width).min(n);
            let end = (start + 2 * width).min(n);
            merge_runs(text, &sa[start..mid], &sa[mid..end], &mut buf[start..end], cancel)?;
        }
        std::mem::swap(&mut sa, &mut buf);
        width *= 2;
    }

    Ok(sa)
}

/// Merge two sorted runs of suffix positions into `out`
fn merge_runs(
    text: &[Symbol],
    left: &[TextPosition],
    right: &[TextPosition],
    out: &mut [TextPosition],
    cancel: &CancelToken,
) -> Result<()> {
    let (mut i, mut j) = (0, 0);
    for (k, slot) in out.iter_mut().enumerate() {
        if k % CANCEL_CHECK_SLOTS == 0 {
            cancel.check()?;
        }
        let take_left = match (left.get(i), right.get(j)) {
            (Some(&a), Some(&b)) => compare_suffixes(text, a as usize, b as usize) == Ordering::Less,
            (Some(_), None) => true,
            _ => false,
        };
        if take_left {
            *slot = left[i];
            i += 1;
        } else {
            *slot = right[j];
            j += 1;
        }
    }
    Ok(())
}

/// Compare two suffixes lexicographically
///
/// Terminates at the latest at the sentinel, which differs from every other
/// symbol.
#[inline]
fn compare_suffixes(text: &[Symbol], a: usize, b: usize) -> Ordering {
    text[a..].cmp(&text[b..])
}

/// Prefix doubling construction.
///
/// After round `k`, `rank[i]` orders suffix `i` by its first `2k` symbols.
/// A suffix shorter than the compared prefix sorts before any longer one
/// sharing its prefix, which the `0` "past the end" key encodes.
fn sort_prefix_doubling(text: &[Symbol], cancel: &CancelToken) -> Result<Vec<TextPosition>> {
    let n = text.len();
    let mut sa: Vec<TextPosition> = (0..n as TextPosition).collect();
    let mut rank: Vec<u32> = text.iter().map(|&s| s as u32).collect();
    let mut next_rank: Vec<u32> = vec![0; n];

    let mut k = 1usize;
    loop {
        cancel.check()?;

        let key = |i: usize| -> u64 {
            let second = if i + k < n { rank[i + k] as u64 + 1 } else { 0 };
            ((rank[i] as u64) << 32) | second
        };

        sa.sort_unstable_by_key(|&i| key(i as usize));

        next_rank[sa[0] as usize] = 0;
        for w in 1..n {
            let prev = sa[w - 1] as usize;
            let curr = sa[w] as usize;
            let bump = (key(prev) != key(curr)) as u32;
            next_rank[curr] = next_rank[prev] + bump;
        }
        std::mem::swap(&mut rank, &mut next_rank);

        if rank[sa[n - 1] as usize] as usize == n - 1 {
            break;
        }
        k *= 2;
    }

    Ok(sa)
}

/// Check that `sa` is the suffix array of `text` in O(n).
///
/// `sa` must be a permutation, and for every adjacent pair `(a, b)` either
/// `text[a] < text[b]`, or the symbols are equal and suffix `a + 1` is ranked
/// before suffix `b + 1`.
pub fn verify_suffix_array(text: &[Symbol], sa: &[TextPosition]) -> Result<()> {
    let n = text.len();
    if sa.len() != n {
        return Err(IndexError::corrupt(format!(
            "suffix array has {} entries, text has {} symbols",
            sa.len(),
            n
        )));
    }

    let mut inverse = vec![TextPosition::MAX; n];
    for (i, &pos) in sa.iter().enumerate() {
        let slot = inverse
            .get_mut(pos as usize)
            .ok_or_else(|| IndexError::corrupt(format!("suffix array entry {} out of range", pos)))?;
        if *slot != TextPosition::MAX {
            return Err(IndexError::corrupt(format!("suffix array repeats position {}", pos)));
        }
        *slot = i as TextPosition;
    }

    for w in sa.windows(2) {
        let (a, b) = (w[0] as usize, w[1] as usize);
        let ordered = match text[a].cmp(&text[b]) {
            Ordering::Less => true,
            Ordering::Greater => false,
            // In a valid text equal symbols are never the sentinel, so both successors exist.
            Ordering::Equal => match (inverse.get(a + 1), inverse.get(b + 1)) {
                (Some(ra), Some(rb)) => ra < rb,
                _ => false,
            },
        };
        if !ordered {
            return Err(IndexError::corrupt(format!(
                "suffixes {} and {} are out of order",
                a, b
            )));
        }
    }

    Ok(())
}
