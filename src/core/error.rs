use thiserror::Error;

/// Precondition violations raised by the encoding and matching core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Alternate allele must be one of A, C, G or T. Tried to add '{0}'")]
    InvalidAllele(char),

    #[error("Variant position {position} is outside the sequence (length {length})")]
    OutOfRange { position: usize, length: usize },

    #[error(
        "Allowing {max_mismatches} mismatches against a pattern of width {width} would match anything"
    )]
    DegenerateThreshold { width: usize, max_mismatches: usize },

    #[error("Reference window has width {reference} but pattern has width {pattern}")]
    ShapeMismatch { reference: usize, pattern: usize },
}
