use std::fmt;

use crate::core::error::CoreError;
use crate::core::matrix::PresenceMatrix;

/// A single-base substitution at a 1-based (VCF style) position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variant {
    pub position: usize,
    pub alt: char,
}

impl Variant {
    #[must_use]
    pub fn new(position: usize, alt: char) -> Self {
        Self { position, alt }
    }

    /// Widen `matrix` so this variant's alternate base is also possible.
    ///
    /// # Errors
    ///
    /// See [`PresenceMatrix::apply_variant`].
    pub fn apply_to(&self, matrix: &mut PresenceMatrix) -> Result<(), CoreError> {
        matrix.apply_variant(self.position, self.alt)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}>{}", self.position, self.alt)
    }
}
