//! Command-line interface for pam-scan.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **scan**: Find spacer matches and compatible PAM sequences in a reference
//!
//! ## Usage
//!
//! ```text
//! # Scan a reference with known variants
//! pam-scan scan -s TAGCTTTTATTCCAGT -p NGG -r hg38.fa.gz -V gnomad.vcf.gz -o sites.tsv
//!
//! # Also write PAM counts, and print a JSON summary
//! pam-scan --format json scan -s TAGCTTTTATTCCAGT -p NGG -r ref.fa -o sites.tsv -c counts.tsv
//! ```

use clap::{Parser, Subcommand};

pub mod scan;

#[derive(Parser)]
#[command(name = "pam-scan")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Find CRISPR spacer matches and compatible PAMs in a variant-aware reference")]
#[command(
    long_about = "pam-scan finds every locus where a guide spacer matches a reference genome and lists the PAM sequences that can follow it.\n\nKnown single-nucleotide variants from a VCF widen the reference, so a site is reported when either the reference or the alternate allele is compatible:\n- Spacers tolerate a fixed number of mismatching positions\n- IUPAC ambiguity codes are accepted in spacer and PAM\n- Every concrete PAM sequence is listed with its locus"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Summary output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a reference for spacer matches followed by a compatible PAM
    Scan(scan::ScanArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
