//! # pam-scan
//!
//! A library for finding CRISPR target sites in a reference genome while
//! taking known single-nucleotide variants into account.
//!
//! Given a guide spacer and a PAM requirement, `pam-scan` finds every locus
//! where the spacer matches the reference (allowing a small number of
//! mismatches) and lists each concrete PAM sequence that could follow it,
//! either from the reference itself or from a known variant.
//!
//! ## Features
//!
//! - **IUPAC-aware encoding**: spacer and PAM may use ambiguity codes such as `N` or `R`
//! - **Variant injection**: known SNVs widen the reference so both alleles can match
//! - **Mismatch tolerance**: a hard cap on mismatching spacer positions
//! - **PAM enumeration**: every unambiguous PAM allowed by reference and pattern
//!
//! ## Example
//!
//! ```rust
//! use pam_scan::{compatible_sequences, find_matches, PresenceMatrix};
//!
//! let mut reference = PresenceMatrix::encode("ACGTACGTACGT", true);
//! reference.apply_variant(1, 'C').unwrap();
//!
//! let spacer = PresenceMatrix::encode("CCG", false);
//! assert_eq!(find_matches(&reference, &spacer, 1).unwrap(), vec![0, 4, 8]);
//!
//! let pam = PresenceMatrix::encode("N", false);
//! let window = reference.window(0..1).unwrap();
//! assert_eq!(compatible_sequences(window, &pam).unwrap(), vec!["A", "C"]);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Bases, presence matrices, contigs and variants
//! - [`matching`]: Matcher, PAM enumerator and the per-contig scanner
//! - [`parsing`]: FASTA and VCF readers
//! - [`output`]: Site table, PAM tally and run summary
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod output;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::{Base, BaseSet, Contig, CoreError, PresenceMatrix, Variant};
pub use matching::engine::{ContigScan, ScanConfig, SiteHit, SiteScanner};
pub use matching::enumerate::compatible_sequences;
pub use matching::matcher::{find_matches, MatchStrategy};
