use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::contig::Contig;
use crate::core::error::CoreError;
use crate::core::matrix::PresenceMatrix;
use crate::core::types::Variant;
use crate::matching::enumerate::compatible_sequences;
use crate::matching::matcher::{find_matches_with, minimum_matched, MatchStrategy};

/// Default number of mismatches tolerated in the spacer
pub const DEFAULT_MAX_MISMATCHES: usize = 1;

/// What to do with a variant the reference matrix cannot take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum VariantPolicy {
    /// Log a warning and continue without the variant
    #[default]
    Skip,
    /// Stop the scan with an error
    Abort,
}

/// Configuration for the site scanner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Mismatching spacer positions tolerated per hit
    pub max_mismatches: usize,
    /// How spacer match counts are computed
    pub strategy: MatchStrategy,
    /// Handling of variants with unusable alleles or positions
    pub variant_policy: VariantPolicy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_mismatches: DEFAULT_MAX_MISMATCHES,
            strategy: MatchStrategy::default(),
            variant_policy: VariantPolicy::default(),
        }
    }
}

/// A spacer hit with one compatible PAM sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteHit {
    /// 0-based start of the spacer match
    pub offset: usize,
    /// Concrete PAM sequence following the spacer
    pub pam: String,
}

impl SiteHit {
    /// 1-based spacer start, as written in loci
    #[must_use]
    pub fn position(&self) -> usize {
        self.offset + 1
    }
}

/// Everything found on one contig
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContigScan {
    pub contig: String,
    /// One entry per (spacer hit, PAM sequence), ordered by offset then PAM
    pub sites: Vec<SiteHit>,
    /// Spacer matches, whether or not a PAM followed
    pub spacer_hits: usize,
    /// Spacer matches too close to the contig end to hold a PAM
    pub truncated: usize,
    pub variants_applied: usize,
    pub variants_skipped: usize,
}

impl ContigScan {
    /// Locus string for a site on this contig, e.g. `chrM:4582`
    #[must_use]
    pub fn locus(&self, site: &SiteHit) -> String {
        format!("{}:{}", self.contig, site.position())
    }
}

/// Finds spacer matches followed by a compatible PAM.
///
/// Patterns are encoded once on construction; each contig is encoded, widened
/// with its variants and scanned independently.
pub struct SiteScanner {
    spacer: PresenceMatrix,
    pam: PresenceMatrix,
    config: ScanConfig,
}

impl SiteScanner {
    /// Create a scanner for a spacer/PAM pair.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DegenerateThreshold` if `config.max_mismatches` is not
    /// smaller than the spacer length.
    pub fn new(spacer: &str, pam: &str, config: ScanConfig) -> Result<Self, CoreError> {
        let spacer = PresenceMatrix::encode(spacer, false);
        minimum_matched(spacer.width(), config.max_mismatches)?;

        Ok(Self {
            spacer,
            pam: PresenceMatrix::encode(pam, false),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    #[must_use]
    pub fn spacer_width(&self) -> usize {
        self.spacer.width()
    }

    #[must_use]
    pub fn pam_width(&self) -> usize {
        self.pam.width()
    }

    /// Encode a contig and inject its variants.
    ///
    /// Returns the matrix with the number of variants applied and skipped.
    ///
    /// # Errors
    ///
    /// With `VariantPolicy::Abort`, returns the first `CoreError::InvalidAllele`
    /// or `CoreError::OutOfRange` raised by a variant.
    pub fn reference_matrix(
        &self,
        contig: &Contig,
        variants: &[Variant],
    ) -> Result<(PresenceMatrix, usize, usize), CoreError> {
        let mut matrix = contig.to_reference_matrix();
        let mut applied = 0;
        let mut skipped = 0;

        for variant in variants {
            match variant.apply_to(&mut matrix) {
                Ok(()) => applied += 1,
                Err(e) => match self.config.variant_policy {
                    VariantPolicy::Abort => return Err(e),
                    VariantPolicy::Skip => {
                        warn!("Skipping variant {}:{variant}: {e}", contig.name);
                        skipped += 1;
                    }
                },
            }
        }

        Ok((matrix, applied, skipped))
    }

    /// Scan one contig.
    ///
    /// # Errors
    ///
    /// Propagates variant errors under `VariantPolicy::Abort`.
    pub fn scan_contig(&self, contig: &Contig, variants: &[Variant]) -> Result<ContigScan, CoreError> {
        let (reference, variants_applied, variants_skipped) =
            self.reference_matrix(contig, variants)?;

        let offsets = find_matches_with(
            self.config.strategy,
            &reference,
            &self.spacer,
            self.config.max_mismatches,
        )?;

        let mut scan = ContigScan {
            contig: contig.name.clone(),
            spacer_hits: offsets.len(),
            variants_applied,
            variants_skipped,
            ..ContigScan::default()
        };

        for offset in offsets {
            let start = offset + self.spacer.width();
            let Some(window) = reference.window(start..start + self.pam.width()) else {
                debug!(
                    "Spacer hit at {} leaves no room for a PAM",
                    contig.locus(offset)
                );
                scan.truncated += 1;
                continue;
            };

            for pam in compatible_sequences(window, &self.pam)? {
                scan.sites.push(SiteHit { offset, pam });
            }
        }

        debug!(
            "{}: {} bp, {} variants applied, {} spacer hits, {} sites",
            contig.name,
            contig.len(),
            scan.variants_applied,
            scan.spacer_hits,
            scan.sites.len()
        );

        Ok(scan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPACER: &str = "TAGCTTTTATTCCAGT";

    fn scanner(pam: &str) -> SiteScanner {
        SiteScanner::new(SPACER, pam, ScanConfig::default()).unwrap()
    }

    fn pams(scan: &ContigScan) -> Vec<(String, String)> {
        scan.sites
            .iter()
            .map(|s| (scan.locus(s), s.pam.clone()))
            .collect()
    }

    #[test]
    fn test_exact_hit_with_pam() {
        let contig = Contig::new("chr1", format!("CCCC{SPACER}TGGAAAA"));
        let scan = scanner("NGG").scan_contig(&contig, &[]).unwrap();

        assert_eq!(scan.spacer_hits, 1);
        assert_eq!(pams(&scan), vec![("chr1:5".to_string(), "TGG".to_string())]);
    }

    #[test]
    fn test_non_ascii_spacer_keeps_pam_window() {
        // One unknown character is one column, so the PAM still follows 16 columns
        let spacer = "TAGCTTTTATTCCAGé";
        let scanner = SiteScanner::new(spacer, "NGG", ScanConfig::default()).unwrap();
        assert_eq!(scanner.spacer_width(), 16);

        let contig = Contig::new("chr1", format!("CCCC{SPACER}TGGAAAA"));
        let scan = scanner.scan_contig(&contig, &[]).unwrap();
        assert_eq!(pams(&scan), vec![("chr1:5".to_string(), "TGG".to_string())]);
    }

    #[test]
    fn test_hit_without_compatible_pam() {
        let contig = Contig::new("chr1", format!("CCCC{SPACER}TCGAAAA"));
        let scan = scanner("NGG").scan_contig(&contig, &[]).unwrap();

        assert_eq!(scan.spacer_hits, 1);
        assert!(scan.sites.is_empty());
    }

    #[test]
    fn test_variant_enables_pam() {
        let contig = Contig::new("chr1", format!("CCCC{SPACER}TAGAAAA"));
        // PAM middle base sits at 1-based 4 + 16 + 2 = 22
        let variants = [Variant::new(22, 'G')];
        let scan = scanner("NGG").scan_contig(&contig, &variants).unwrap();

        assert_eq!(scan.variants_applied, 1);
        assert_eq!(pams(&scan), vec![("chr1:5".to_string(), "TGG".to_string())]);
    }

    #[test]
    fn test_variant_adds_second_pam() {
        let contig = Contig::new("chr1", format!("CCCC{SPACER}TGGAAAA"));
        let variants = [Variant::new(21, 'A')];
        let scan = scanner("NGG").scan_contig(&contig, &variants).unwrap();

        assert_eq!(
            pams(&scan),
            vec![
                ("chr1:5".to_string(), "AGG".to_string()),
                ("chr1:5".to_string(), "TGG".to_string()),
            ]
        );
    }

    #[test]
    fn test_variant_rescues_spacer_mismatches() {
        // Two mismatches in the spacer: one too many without the variant
        let mut spacer = SPACER.as_bytes().to_vec();
        spacer[0] = b'C';
        spacer[5] = b'A';
        let mut sequence = b"CCCC".to_vec();
        sequence.extend_from_slice(&spacer);
        sequence.extend_from_slice(b"AGGAAAA");
        let contig = Contig::new("chr1", sequence);

        let scanner = scanner("NGG");
        assert_eq!(scanner.scan_contig(&contig, &[]).unwrap().spacer_hits, 0);

        let variants = [Variant::new(5 + 5, 'T')];
        let scan = scanner.scan_contig(&contig, &variants).unwrap();
        assert_eq!(pams(&scan), vec![("chr1:5".to_string(), "AGG".to_string())]);
    }

    #[test]
    fn test_truncated_pam_window() {
        let contig = Contig::new("chr1", format!("CCCC{SPACER}TG"));
        let scan = scanner("NGG").scan_contig(&contig, &[]).unwrap();

        assert_eq!(scan.spacer_hits, 1);
        assert_eq!(scan.truncated, 1);
        assert!(scan.sites.is_empty());
    }

    #[test]
    fn test_reference_n_blocks_pam_unless_varied() {
        let contig = Contig::new("chr1", format!("{SPACER}NGG"));
        let scanner = scanner("NGG");
        assert!(scanner.scan_contig(&contig, &[]).unwrap().sites.is_empty());

        let scan = scanner
            .scan_contig(&contig, &[Variant::new(17, 'C')])
            .unwrap();
        assert_eq!(pams(&scan), vec![("chr1:1".to_string(), "CGG".to_string())]);
    }

    #[test]
    fn test_soft_masked_reference() {
        let contig = Contig::new("chr1", format!("cccc{}tggaaaa", SPACER.to_lowercase()));
        let scan = scanner("NGG").scan_contig(&contig, &[]).unwrap();
        assert_eq!(pams(&scan), vec![("chr1:5".to_string(), "TGG".to_string())]);
    }

    #[test]
    fn test_skip_invalid_variants() {
        let contig = Contig::new("chr1", format!("CCCC{SPACER}TGGAAAA"));
        let variants = [
            Variant::new(1, 'N'),
            Variant::new(1_000, 'A'),
            Variant::new(21, 'A'),
        ];
        let scan = scanner("NGG").scan_contig(&contig, &variants).unwrap();
        assert_eq!(scan.variants_applied, 1);
        assert_eq!(scan.variants_skipped, 2);
        assert_eq!(scan.sites.len(), 2);
    }

    #[test]
    fn test_abort_on_invalid_variant() {
        let config = ScanConfig {
            variant_policy: VariantPolicy::Abort,
            ..ScanConfig::default()
        };
        let scanner = SiteScanner::new(SPACER, "NGG", config).unwrap();
        let contig = Contig::new("chr1", format!("CCCC{SPACER}TGGAAAA"));

        let err = scanner
            .scan_contig(&contig, &[Variant::new(2, '*')])
            .unwrap_err();
        assert_eq!(err, CoreError::InvalidAllele('*'));

        let err = scanner
            .scan_contig(&contig, &[Variant::new(99, 'A')])
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::OutOfRange {
                position: 99,
                length: 27
            }
        );
    }

    #[test]
    fn test_degenerate_config() {
        let config = ScanConfig {
            max_mismatches: 16,
            ..ScanConfig::default()
        };
        assert!(matches!(
            SiteScanner::new(SPACER, "NGG", config),
            Err(CoreError::DegenerateThreshold { width: 16, .. })
        ));
    }

    #[test]
    fn test_strategies_agree() {
        let contig = Contig::new("chr1", format!("CCCC{SPACER}TGGAAAA"));
        let variants = [Variant::new(21, 'A')];
        let bitset = scanner("NGG").scan_contig(&contig, &variants).unwrap();

        let config = ScanConfig {
            strategy: MatchStrategy::Correlation,
            ..ScanConfig::default()
        };
        let correlation = SiteScanner::new(SPACER, "NGG", config)
            .unwrap()
            .scan_contig(&contig, &variants)
            .unwrap();

        assert_eq!(bitset.sites, correlation.sites);
    }

    #[test]
    fn test_empty_contig() {
        let scan = scanner("NGG")
            .scan_contig(&Contig::new("chrUn", ""), &[])
            .unwrap();
        assert_eq!(scan.spacer_hits, 0);
        assert!(scan.sites.is_empty());
    }
}
