//! Nucleotide alphabet and per-position base sets.
//!
//! Every position of an encoded sequence is a [`BaseSet`]: a 4-bit set with one
//! bit per canonical base. Exact calls set one bit, IUPAC ambiguity codes set
//! several, and unrecognized characters set none.

use std::fmt;

/// One of the four canonical nucleotides, with a fixed index 0-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Base {
    A = 0,
    C = 1,
    G = 2,
    T = 3,
}

impl Base {
    /// All bases in index order.
    pub const ALL: [Base; 4] = [Base::A, Base::C, Base::G, Base::T];

    /// Row index of this base in a presence matrix
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Base::A),
            1 => Some(Base::C),
            2 => Some(Base::G),
            3 => Some(Base::T),
            _ => None,
        }
    }

    /// Parse an uppercase canonical base. Ambiguity codes and lowercase are rejected.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Base::A),
            'C' => Some(Base::C),
            'G' => Some(Base::G),
            'T' => Some(Base::T),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::T => 'T',
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Set of bases possible at a single position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BaseSet(u8);

impl BaseSet {
    pub const EMPTY: BaseSet = BaseSet(0);
    pub const ANY: BaseSet = BaseSet(0b1111);

    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b1111)
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn single(base: Base) -> Self {
        Self(1 << base as u8)
    }

    #[must_use]
    pub const fn contains(self, base: Base) -> bool {
        self.0 & (1 << base as u8) != 0
    }

    pub fn insert(&mut self, base: Base) {
        self.0 |= 1 << base as u8;
    }

    #[must_use]
    pub const fn intersection(self, other: BaseSet) -> BaseSet {
        BaseSet(self.0 & other.0)
    }

    /// True when at least one base is possible in both sets
    #[must_use]
    pub const fn overlaps(self, other: BaseSet) -> bool {
        self.0 & other.0 != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Member bases in ascending index order (A, C, G, T).
    pub fn bases(self) -> impl Iterator<Item = Base> + Clone {
        Base::ALL.into_iter().filter(move |&b| self.contains(b))
    }

    /// Look up an IUPAC nucleotide code, case-insensitively.
    ///
    /// Returns `None` for characters outside the standard table. 'N' is in the
    /// table and maps to [`BaseSet::ANY`]; callers decide whether to honor it.
    #[must_use]
    pub const fn from_iupac(c: char) -> Option<BaseSet> {
        let bits = match c.to_ascii_uppercase() {
            'A' => 0b0001,
            'C' => 0b0010,
            'G' => 0b0100,
            'T' => 0b1000,
            'R' => 0b0101, // A/G
            'Y' => 0b1010, // C/T
            'S' => 0b0110, // C/G
            'W' => 0b1001, // A/T
            'K' => 0b1100, // G/T
            'M' => 0b0011, // A/C
            'B' => 0b1110, // C/G/T
            'D' => 0b1101, // A/G/T
            'H' => 0b1011, // A/C/T
            'V' => 0b0111, // A/C/G
            'N' => 0b1111,
            _ => return None,
        };
        Some(BaseSet(bits))
    }
}

impl From<Base> for BaseSet {
    fn from(base: Base) -> Self {
        BaseSet::single(base)
    }
}

impl FromIterator<Base> for BaseSet {
    fn from_iter<I: IntoIterator<Item = Base>>(iter: I) -> Self {
        let mut set = BaseSet::EMPTY;
        for base in iter {
            set.insert(base);
        }
        set
    }
}
