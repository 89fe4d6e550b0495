//! Core data types for variant-aware pattern matching.
//!
//! - [`Base`], [`BaseSet`]: the canonical nucleotide alphabet and 4-bit sets of it
//! - [`PresenceMatrix`]: a sequence encoded as one base set per position
//! - [`Contig`]: a named reference sequence as read from FASTA
//! - [`Variant`]: a single-base substitution to inject into a reference
//! - [`CoreError`]: precondition violations raised by the core operations
//!
//! ## IUPAC Codes
//!
//! | Code | Bases   | Code | Bases |
//! |------|---------|------|-------|
//! | R    | A/G     | B    | C/G/T |
//! | Y    | C/T     | D    | A/G/T |
//! | S    | C/G     | H    | A/C/T |
//! | W    | A/T     | V    | A/C/G |
//! | K    | G/T     | N    | any   |
//! | M    | A/C     |      |       |

pub mod base;
pub mod contig;
pub mod error;
pub mod matrix;
pub mod types;

pub use base::{Base, BaseSet};
pub use contig::Contig;
pub use error::CoreError;
pub use matrix::PresenceMatrix;
pub use types::Variant;
