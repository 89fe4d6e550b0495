//! Centralized validation and helper functions.

use std::ops::RangeInclusive;

use crate::core::base::BaseSet;

/// Maximum number of contigs allowed in a single file (DOS protection)
pub const MAX_CONTIGS: usize = 100_000;

/// Allowed spacer lengths
pub const SPACER_LENGTH: RangeInclusive<usize> = 16..=25;

/// Allowed PAM lengths
pub const PAM_LENGTH: RangeInclusive<usize> = 2..=6;

/// Check if adding another contig would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new contig.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```ignore
/// if check_contig_limit(contigs.len()).is_some() {
///     return Err(...);
/// }
/// contigs.push(new_contig); // Safe to add
/// ```
#[must_use]
pub fn check_contig_limit(count: usize) -> Option<String> {
    if count >= MAX_CONTIGS {
        Some(format!(
            "Too many contigs: adding another would exceed maximum of {MAX_CONTIGS}"
        ))
    } else {
        None
    }
}

/// Pattern validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid spacer length {0}: must be between 16 and 25")]
    SpacerLength(usize),
    #[error("Invalid PAM length {0}: must be between 2 and 6")]
    PamLength(usize),
}

/// Validate a spacer sequence given on the command line.
///
/// Length is counted in characters. The pattern is returned unchanged; case
/// folding happens at encode time.
///
/// # Errors
///
/// Returns `ValidationError::SpacerLength` if the length is outside 16-25.
pub fn validate_spacer(spacer: &str) -> Result<String, ValidationError> {
    let length = spacer.chars().count();
    if SPACER_LENGTH.contains(&length) {
        Ok(spacer.to_string())
    } else {
        Err(ValidationError::SpacerLength(length))
    }
}

/// Validate a PAM sequence given on the command line.
///
/// # Errors
///
/// Returns `ValidationError::PamLength` if the length is outside 2-6.
pub fn validate_pam(pam: &str) -> Result<String, ValidationError> {
    let length = pam.chars().count();
    if PAM_LENGTH.contains(&length) {
        Ok(pam.to_string())
    } else {
        Err(ValidationError::PamLength(length))
    }
}

/// Characters that are not IUPAC nucleotide codes.
///
/// These encode to "no base" and can never match, which is tolerated but
/// almost always a typo in a user-supplied pattern.
#[must_use]
pub fn non_iupac_characters(pattern: &str) -> Vec<char> {
    let mut invalid: Vec<char> = pattern
        .chars()
        .filter(|&c| BaseSet::from_iupac(c).is_none())
        .collect();
    invalid.sort_unstable();
    invalid.dedup();
    invalid
}
