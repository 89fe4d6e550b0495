//! Presence matrices: 4 x n grids recording which bases are possible at each
//! position of a sequence.

use std::fmt;
use std::ops::Range;

use crate::core::base::{Base, BaseSet};
use crate::core::error::CoreError;

/// A 4 x n presence matrix, stored column-wise as one [`BaseSet`] per position.
///
/// Row `b` of column `i` is set when base `b` is possible at position `i`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PresenceMatrix {
    columns: Vec<BaseSet>,
}

impl PresenceMatrix {
    /// Encode a nucleotide sequence, one column per character.
    ///
    /// Input is case-folded. IUPAC codes map to their base sets and unknown
    /// characters map to an empty column. With `ignore_n`, 'N' also maps to an
    /// empty column instead of "any base", so unvaried gaps in a reference never
    /// match anything.
    #[must_use]
    pub fn encode(sequence: &str, ignore_n: bool) -> Self {
        let columns = sequence.chars().map(|c| encode_char(c, ignore_n)).collect();
        Self { columns }
    }

    /// Encode raw sequence bytes, one column per byte.
    ///
    /// Same rules as [`PresenceMatrix::encode`]; bytes outside ASCII map to an
    /// empty column each.
    #[must_use]
    pub fn encode_bytes(sequence: &[u8], ignore_n: bool) -> Self {
        let columns = sequence
            .iter()
            .map(|&b| {
                if b.is_ascii() {
                    encode_char(char::from(b), ignore_n)
                } else {
                    BaseSet::EMPTY
                }
            })
            .collect();
        Self { columns }
    }

    #[must_use]
    pub fn from_columns(columns: Vec<BaseSet>) -> Self {
        Self { columns }
    }

    /// Number of columns (sequence positions)
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn columns(&self) -> &[BaseSet] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, index: usize) -> Option<BaseSet> {
        self.columns.get(index).copied()
    }

    /// Presence of `base` at `index`; false past the end.
    #[must_use]
    pub fn get(&self, base: Base, index: usize) -> bool {
        self.column(index).is_some_and(|c| c.contains(base))
    }

    /// One matrix row as 0/1 values, in column order.
    pub fn row(&self, base: Base) -> impl Iterator<Item = u32> + '_ {
        self.columns.iter().map(move |c| u32::from(c.contains(base)))
    }

    /// Borrow the columns in `range`, or `None` if it runs past the end.
    #[must_use]
    pub fn window(&self, range: Range<usize>) -> Option<&[BaseSet]> {
        self.columns.get(range)
    }

    /// Let a known substitution widen the reference at a 1-based position.
    ///
    /// The alternate base is added alongside whatever the column already
    /// admits; nothing is cleared, so applying the same variant twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidAllele` if `alt` is not one of `A`, `C`, `G`,
    /// `T`, or `CoreError::OutOfRange` if `position` is not in `1..=width`.
    pub fn apply_variant(&mut self, position: usize, alt: char) -> Result<(), CoreError> {
        let base = Base::from_char(alt).ok_or(CoreError::InvalidAllele(alt))?;
        let length = self.columns.len();
        let column = position
            .checked_sub(1)
            .and_then(|index| self.columns.get_mut(index))
            .ok_or(CoreError::OutOfRange { position, length })?;
        column.insert(base);
        Ok(())
    }
}

impl AsRef<[BaseSet]> for PresenceMatrix {
    fn as_ref(&self) -> &[BaseSet] {
        &self.columns
    }
}

fn encode_char(c: char, ignore_n: bool) -> BaseSet {
    let c = c.to_ascii_uppercase();
    if c == 'N' && ignore_n {
        return BaseSet::EMPTY;
    }
    BaseSet::from_iupac(c).unwrap_or(BaseSet::EMPTY)
}

impl fmt::Display for PresenceMatrix {
    /// Renders the four rows as lines of 0/1, A on top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, base) in Base::ALL.into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for present in self.row(base) {
                write!(f, "{present}")?;
            }
        }
        Ok(())
    }
}
