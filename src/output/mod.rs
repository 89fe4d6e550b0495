//! Result sinks for scan output.
//!
//! - [`SiteWriter`]: the `locus\tpam` site table, one row per compatible PAM
//! - [`PamTally`]: occurrence counts per PAM sequence
//! - [`ScanSummary`]: run totals, serializable for `--format json`

use serde::Serialize;

pub mod sites;
pub mod tally;

pub use sites::SiteWriter;
pub use tally::PamTally;

use crate::matching::engine::ContigScan;

/// A PAM sequence and how often it was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PamCount {
    pub pam: String,
    pub count: usize,
}

/// Totals for a whole run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanSummary {
    pub spacer: String,
    pub pam: String,
    pub max_mismatches: usize,
    pub contigs_scanned: usize,
    pub variants_applied: usize,
    pub variants_skipped: usize,
    /// VCF records dropped before injection (indels, multi-allelic sites)
    pub variants_filtered: usize,
    pub spacer_hits: usize,
    pub truncated_windows: usize,
    pub pam_sites: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pam_counts: Vec<PamCount>,
}

impl ScanSummary {
    #[must_use]
    pub fn new(spacer: &str, pam: &str, max_mismatches: usize) -> Self {
        Self {
            spacer: spacer.to_string(),
            pam: pam.to_string(),
            max_mismatches,
            ..Self::default()
        }
    }

    /// Accumulate the totals of one contig
    pub fn add_scan(&mut self, scan: &ContigScan) {
        self.contigs_scanned += 1;
        self.variants_applied += scan.variants_applied;
        self.variants_skipped += scan.variants_skipped;
        self.spacer_hits += scan.spacer_hits;
        self.truncated_windows += scan.truncated;
        self.pam_sites += scan.sites.len();
    }

    /// Copy the final tally in, most frequent first
    pub fn set_counts(&mut self, tally: &PamTally) {
        self.pam_counts = tally
            .sorted()
            .into_iter()
            .map(|(pam, count)| PamCount {
                pam: pam.to_string(),
                count,
            })
            .collect();
    }

    #[must_use]
    pub fn has_sites(&self) -> bool {
        self.pam_sites > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::engine::SiteHit;

    #[test]
    fn test_add_scan() {
        let scan = ContigScan {
            contig: "chr1".to_string(),
            sites: vec![SiteHit {
                offset: 0,
                pam: "AGG".to_string(),
            }],
            spacer_hits: 2,
            truncated: 1,
            variants_applied: 5,
            variants_skipped: 1,
        };

        let mut summary = ScanSummary::new("TAGCTTTTATTCCAGT", "NGG", 1);
        assert!(!summary.has_sites());
        summary.add_scan(&scan);
        summary.add_scan(&scan);

        assert_eq!(summary.contigs_scanned, 2);
        assert_eq!(summary.variants_applied, 10);
        assert_eq!(summary.variants_skipped, 2);
        assert_eq!(summary.spacer_hits, 4);
        assert_eq!(summary.truncated_windows, 2);
        assert_eq!(summary.pam_sites, 2);
        assert!(summary.has_sites());
    }

    #[test]
    fn test_json_counts() {
        let mut tally = PamTally::new();
        tally.increment("TGG");
        tally.increment("AGG");
        tally.increment("TGG");

        let mut summary = ScanSummary::new("TAGCTTTTATTCCAGT", "NGG", 1);
        summary.set_counts(&tally);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["pam_counts"][0]["pam"], "TGG");
        assert_eq!(json["pam_counts"][0]["count"], 2);
        assert_eq!(json["pam_counts"][1]["pam"], "AGG");
        assert_eq!(json["max_mismatches"], 1);
    }

    #[test]
    fn test_json_omits_empty_counts() {
        let summary = ScanSummary::new("TAGCTTTTATTCCAGT", "NGG", 1);
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("pam_counts").is_none());
        assert_eq!(json["pam_sites"], 0);
    }
}
