//! Spacer matching and PAM enumeration.
//!
//! This module provides the matching functionality:
//!
//! - [`find_matches`]: offsets where a pattern matches a reference within a mismatch budget
//! - [`compatible_sequences`]: concrete sequences allowed by a reference window and a pattern
//! - [`SiteScanner`]: runs both over a contig with its known variants
//!
//! ## Matching Algorithm
//!
//! Reference and pattern are [`PresenceMatrix`](crate::core::PresenceMatrix)
//! values. For every offset, a column counts as matching when the two base sets
//! intersect, so ambiguity codes and injected variants match any of their bases.
//! An offset is reported when at most `max_mismatches` columns fail to match.
//!
//! ## Example
//!
//! ```rust
//! use pam_scan::core::{Contig, Variant};
//! use pam_scan::matching::{ScanConfig, SiteScanner};
//!
//! let scanner = SiteScanner::new("TAGCTTTTATTCCAGT", "NGG", ScanConfig::default()).unwrap();
//! let contig = Contig::new("chr1", "CCCCTAGCTTTTATTCCAGTTAGAAAA");
//!
//! // A known G at position 22 turns TAG into a usable TGG
//! let scan = scanner.scan_contig(&contig, &[Variant::new(22, 'G')]).unwrap();
//! for site in &scan.sites {
//!     println!("{}\t{}", scan.locus(site), site.pam);
//! }
//! assert_eq!(scan.sites[0].pam, "TGG");
//! ```

pub mod engine;
pub mod enumerate;
pub mod matcher;

pub use engine::{ContigScan, ScanConfig, SiteHit, SiteScanner, VariantPolicy};
pub use enumerate::{compatible_count, compatible_sequences};
pub use matcher::{find_matches, find_matches_with, MatchStrategy};
