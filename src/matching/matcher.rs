//! Mismatch-tolerant sliding-window matching of a pattern against a reference.
//!
//! A column of a window matches when the reference and pattern share at least
//! one possible base. An offset is reported when the number of matching columns
//! reaches `pattern_width - max_mismatches`.

use serde::{Deserialize, Serialize};

use crate::core::base::{Base, BaseSet};
use crate::core::error::CoreError;

/// How per-offset match counts are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Count columns whose base sets intersect
    #[default]
    Bitset,
    /// Slide each of the four 0/1 base rows of the pattern along the matching
    /// reference row, then count the columns covered by any row.
    ///
    /// Yields the same counts as `Bitset`.
    Correlation,
}

impl MatchStrategy {
    /// Match count for every offset in `0..=N-M`; empty if the pattern is wider.
    #[must_use]
    pub fn scores(self, reference: &[BaseSet], pattern: &[BaseSet]) -> Vec<u32> {
        if pattern.is_empty() || pattern.len() > reference.len() {
            return Vec::new();
        }
        match self {
            Self::Bitset => overlap_counts(reference, pattern),
            Self::Correlation => correlate_rows(reference, pattern),
        }
    }
}

/// Offsets where `pattern` matches `reference` with at most `max_mismatches`
/// mismatching columns, using the default strategy.
///
/// # Errors
///
/// Returns `CoreError::DegenerateThreshold` if `max_mismatches` is not smaller
/// than the pattern width.
pub fn find_matches(
    reference: impl AsRef<[BaseSet]>,
    pattern: impl AsRef<[BaseSet]>,
    max_mismatches: usize,
) -> Result<Vec<usize>, CoreError> {
    find_matches_with(MatchStrategy::default(), reference, pattern, max_mismatches)
}

/// Like [`find_matches`], with an explicit strategy.
///
/// # Errors
///
/// Returns `CoreError::DegenerateThreshold` if `max_mismatches` is not smaller
/// than the pattern width. The check happens before any scanning.
pub fn find_matches_with(
    strategy: MatchStrategy,
    reference: impl AsRef<[BaseSet]>,
    pattern: impl AsRef<[BaseSet]>,
    max_mismatches: usize,
) -> Result<Vec<usize>, CoreError> {
    let pattern = pattern.as_ref();
    let minimum = minimum_matched(pattern.len(), max_mismatches)?;

    let matches = strategy
        .scores(reference.as_ref(), pattern)
        .into_iter()
        .enumerate()
        .filter(|&(_, score)| score as usize >= minimum)
        .map(|(offset, _)| offset)
        .collect();

    Ok(matches)
}

/// Minimum matching columns for a window to count as a hit.
///
/// # Errors
///
/// Returns `CoreError::DegenerateThreshold` when the result would be zero or less.
pub fn minimum_matched(width: usize, max_mismatches: usize) -> Result<usize, CoreError> {
    width
        .checked_sub(max_mismatches)
        .filter(|&minimum| minimum > 0)
        .ok_or(CoreError::DegenerateThreshold {
            width,
            max_mismatches,
        })
}

#[allow(clippy::cast_possible_truncation)] // window width is a short pattern
fn overlap_counts(reference: &[BaseSet], pattern: &[BaseSet]) -> Vec<u32> {
    reference
        .windows(pattern.len())
        .map(|window| {
            window
                .iter()
                .zip(pattern)
                .filter(|(r, p)| r.overlaps(**p))
                .count() as u32
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation)] // window width is a short pattern
fn correlate_rows(reference: &[BaseSet], pattern: &[BaseSet]) -> Vec<u32> {
    let reference_rows: Vec<Vec<bool>> = Base::ALL
        .iter()
        .map(|&base| reference.iter().map(|c| c.contains(base)).collect())
        .collect();

    // Only pattern positions with a 1 in a row take part in that row's products
    let taps: Vec<Vec<usize>> = Base::ALL
        .iter()
        .map(|&base| {
            pattern
                .iter()
                .enumerate()
                .filter(|(_, c)| c.contains(base))
                .map(|(j, _)| j)
                .collect()
        })
        .collect();

    let mut covered = vec![false; pattern.len()];
    (0..=reference.len() - pattern.len())
        .map(|offset| {
            covered.fill(false);
            for (row, row_taps) in reference_rows.iter().zip(&taps) {
                for &j in row_taps {
                    covered[j] |= row[offset + j];
                }
            }
            covered.iter().filter(|&&c| c).count() as u32
        })
        .collect()
}
