use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;
use tracing::{info, warn};

use crate::cli::OutputFormat;
use crate::matching::engine::{ScanConfig, SiteScanner, VariantPolicy, DEFAULT_MAX_MISMATCHES};
use crate::matching::matcher::MatchStrategy;
use crate::output::{PamTally, ScanSummary, SiteWriter};
use crate::parsing::fasta::{is_fasta_file, ContigReader};
use crate::parsing::vcf::VariantIndex;
use crate::utils::validation::{non_iupac_characters, validate_pam, validate_spacer};

#[derive(Args)]
pub struct ScanArgs {
    /// Spacer sequence (16-25 bases, IUPAC codes allowed)
    #[arg(short, long, value_parser = validate_spacer)]
    pub spacer: String,

    /// PAM sequence (2-6 bases, IUPAC codes allowed)
    #[arg(short, long, value_parser = validate_pam)]
    pub pam: String,

    /// Reference FASTA file, optionally gzip/bgzip compressed
    #[arg(short = 'r', long = "ref")]
    pub reference: PathBuf,

    /// VCF file with SNVs to consider when matching (plain or bgzip compressed)
    #[arg(short = 'V', long)]
    pub vcf: Option<PathBuf>,

    /// Output file listing matched loci and PAM sequences
    #[arg(short, long)]
    pub output: PathBuf,

    /// Optional output file with the number of sites per PAM sequence
    #[arg(short, long)]
    pub counts: Option<PathBuf>,

    /// Maximum number of mismatching spacer positions
    #[arg(short, long, default_value_t = DEFAULT_MAX_MISMATCHES)]
    pub max_mismatches: usize,

    /// How spacer match counts are computed
    #[arg(long, value_enum, default_value = "bitset")]
    pub strategy: MatchStrategy,

    /// What to do with variants that cannot be applied to the reference
    #[arg(long, value_enum, default_value = "skip")]
    pub variant_policy: VariantPolicy,
}

/// Execute scan subcommand
///
/// # Errors
///
/// Returns an error if an input cannot be read, an output cannot be written,
/// the mismatch budget is not smaller than the spacer, or a variant fails
/// under `--variant-policy abort`.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ScanArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    warn_on_unknown_codes("spacer", &args.spacer);
    warn_on_unknown_codes("PAM", &args.pam);

    if !args.reference.exists() {
        bail!("Reference FASTA not found: {}", args.reference.display());
    }
    if !is_fasta_file(&args.reference) {
        warn!(
            "{} does not have a FASTA extension (.fa, .fasta, .fna); reading it as FASTA anyway",
            args.reference.display()
        );
    }

    let config = ScanConfig {
        max_mismatches: args.max_mismatches,
        strategy: args.strategy,
        variant_policy: args.variant_policy,
    };
    let scanner = SiteScanner::new(&args.spacer, &args.pam, config)
        .context("Invalid --max-mismatches for this spacer")?;

    let variants = load_variants(&args)?;

    let mut contigs = ContigReader::from_path(&args.reference)
        .with_context(|| format!("Failed to open {}", args.reference.display()))?
        .peekable();
    if contigs.peek().is_none() {
        bail!("No sequences found in FASTA file {}", args.reference.display());
    }

    let output = File::create(&args.output)
        .with_context(|| format!("Failed to create output file {}", args.output.display()))?;
    let mut writer = SiteWriter::new(BufWriter::new(output))?;

    let mut tally = PamTally::new();
    let mut summary = ScanSummary::new(&args.spacer, &args.pam, args.max_mismatches);
    summary.variants_filtered = variants.filtered();
    let mut seen = HashSet::new();

    for contig in contigs {
        let contig = contig.with_context(|| format!("Failed to read {}", args.reference.display()))?;
        let scan = scanner
            .scan_contig(&contig, variants.variants(&contig.name))
            .with_context(|| format!("Failed to scan contig '{}'", contig.name))?;

        writer.write_scan(&scan)?;
        for site in &scan.sites {
            tally.increment(&site.pam);
        }
        summary.add_scan(&scan);
        seen.insert(contig.name);
    }

    let rows = writer.rows();
    writer.finish()?;

    let unmatched = variants
        .contig_names()
        .filter(|name| !seen.contains(*name))
        .count();
    if unmatched > 0 {
        warn!(
            "{unmatched} VCF contig(s) do not appear in the reference; check contig naming (e.g. chr1 vs 1)"
        );
    }

    info!(
        "Scanned {} contigs: {} spacer hits, {rows} sites written to {}",
        summary.contigs_scanned,
        summary.spacer_hits,
        args.output.display()
    );

    summary.set_counts(&tally);

    if let Some(path) = &args.counts {
        let file = File::create(path)
            .with_context(|| format!("Failed to create counts file {}", path.display()))?;
        tally.write_tsv(BufWriter::new(file))?;
    }

    match format {
        OutputFormat::Text => print_text_summary(&summary, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Tsv => print_tsv_summary(&summary),
    }

    Ok(())
}

fn load_variants(args: &ScanArgs) -> anyhow::Result<VariantIndex> {
    let Some(path) = &args.vcf else {
        info!("No VCF given, scanning the reference as is");
        return Ok(VariantIndex::default());
    };

    let variants = VariantIndex::from_path(path)
        .with_context(|| format!("Failed to read variants from {}", path.display()))?;

    info!(
        "Loaded {} SNVs on {} contigs ({} records filtered)",
        variants.len(),
        variants.contig_count(),
        variants.filtered()
    );

    Ok(variants)
}

fn warn_on_unknown_codes(label: &str, pattern: &str) {
    let invalid = non_iupac_characters(pattern);
    if !invalid.is_empty() {
        warn!(
            "{label} {pattern} contains non-IUPAC character(s) {invalid:?}; these positions can never match"
        );
    }
}

fn print_text_summary(summary: &ScanSummary, verbose: bool) {
    if !summary.has_sites() {
        println!("No Spacer-PAM matches found");
        if summary.spacer_hits > 0 {
            println!(
                "   {} spacer hit(s), none followed by a compatible {} PAM",
                summary.spacer_hits, summary.pam
            );
        }
        return;
    }

    println!("Spacer-PAM match(es) found.");
    println!(
        "\n   Spacer: {} (up to {} mismatch(es))",
        summary.spacer, summary.max_mismatches
    );
    println!("   PAM: {}", summary.pam);
    println!(
        "   Sites: {} across {} spacer hit(s) on {} contig(s)",
        summary.pam_sites, summary.spacer_hits, summary.contigs_scanned
    );

    if verbose {
        println!(
            "   Variants: {} applied, {} skipped, {} filtered",
            summary.variants_applied, summary.variants_skipped, summary.variants_filtered
        );
        if summary.truncated_windows > 0 {
            println!(
                "   Spacer hits too close to a contig end for a PAM: {}",
                summary.truncated_windows
            );
        }
    }

    println!("\n   PAM counts:");
    for entry in &summary.pam_counts {
        println!("   - {}: {}", entry.pam, entry.count);
    }
}

fn print_tsv_summary(summary: &ScanSummary) {
    println!("pam\tcount");
    for entry in &summary.pam_counts {
        println!("{}\t{}", entry.pam, entry.count);
    }
}
