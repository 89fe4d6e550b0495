//! Readers for the reference sequence and known variants.
//!
//! - **FASTA**: contigs are streamed one record at a time ([`fasta::ContigReader`])
//! - **VCF**: single-base substitutions are grouped by contig ([`vcf::VariantIndex`])
//!
//! Both accept plain or gzip/bgzip compressed input.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pam_scan::parsing::fasta::ContigReader;
//! use pam_scan::parsing::vcf::VariantIndex;
//! use std::path::Path;
//!
//! let variants = VariantIndex::from_path(Path::new("known.vcf.gz")).unwrap();
//! for contig in ContigReader::from_path(Path::new("ref.fa.gz")).unwrap() {
//!     let contig = contig.unwrap();
//!     println!("{}: {} bp, {} variants", contig.name, contig.len(), variants.variants(&contig.name).len());
//! }
//! ```

use thiserror::Error;

pub mod fasta;
pub mod vcf;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Too many contigs: {0} exceeds maximum allowed (100000)")]
    TooManyContigs(usize),
}
