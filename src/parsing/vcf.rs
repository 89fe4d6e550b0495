//! Known single-base substitutions from a VCF file.
//!
//! Records are read with noodles and grouped by contig. Only biallelic SNVs
//! are kept: exactly one alternate allele, and both the reference and the
//! alternate allele a single base long. Indels, symbolic alleles and
//! multi-allelic sites are counted as filtered.

use std::collections::HashMap;
use std::path::Path;

use noodles::vcf;
use tracing::debug;

use crate::core::types::Variant;
use crate::parsing::ParseError;
use crate::utils::validation::check_contig_limit;

/// Substitution variants grouped by contig name, in file order
#[derive(Debug, Clone, Default)]
pub struct VariantIndex {
    by_contig: HashMap<String, Vec<Variant>>,
    total: usize,
    filtered: usize,
}

impl VariantIndex {
    /// Read every usable record from a VCF (`.vcf` or bgzip `.vcf.gz`).
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be opened, `ParseError::Noodles`
    /// if the header or a record cannot be parsed, or `ParseError::TooManyContigs`
    /// if variants span more contigs than allowed.
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let mut reader = vcf::io::reader::Builder::default().build_from_path(path)?;
        let header = reader
            .read_header()
            .map_err(|e| ParseError::Noodles(format!("Failed to read VCF header: {e}")))?;

        let mut index = Self::default();

        for result in reader.record_bufs(&header) {
            let record = result
                .map_err(|e| ParseError::Noodles(format!("Failed to parse VCF record: {e}")))?;

            let contig = record.reference_sequence_name();
            let Some(position) = record.variant_start() else {
                index.filtered += 1;
                continue;
            };

            let alternates: &[String] = record.alternate_bases().as_ref();
            match single_base_alternate(record.reference_bases(), alternates) {
                Some(alt) => index.insert(contig, Variant::new(usize::from(position), alt))?,
                None => {
                    debug!(
                        "Skipping {contig}:{position} {}>{}: not a biallelic SNV",
                        record.reference_bases(),
                        alternates.join(",")
                    );
                    index.filtered += 1;
                }
            }
        }

        debug!(
            "Loaded {} variants on {} contigs from {} ({} filtered)",
            index.total,
            index.by_contig.len(),
            path.display(),
            index.filtered
        );

        Ok(index)
    }

    /// Add a variant for `contig`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::TooManyContigs` if `contig` is new and the limit is reached.
    pub fn insert(&mut self, contig: &str, variant: Variant) -> Result<(), ParseError> {
        if let Some(variants) = self.by_contig.get_mut(contig) {
            variants.push(variant);
        } else {
            // Check contig limit for DOS protection
            if check_contig_limit(self.by_contig.len()).is_some() {
                return Err(ParseError::TooManyContigs(self.by_contig.len()));
            }
            self.by_contig.insert(contig.to_string(), vec![variant]);
        }
        self.total += 1;
        Ok(())
    }

    /// Variants for `contig`; empty if the contig has none.
    #[must_use]
    pub fn variants(&self, contig: &str) -> &[Variant] {
        self.by_contig
            .get(contig)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of variants kept
    #[must_use]
    pub fn len(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of records skipped because they were not biallelic SNVs
    #[must_use]
    pub fn filtered(&self) -> usize {
        self.filtered
    }

    /// Number of contigs with at least one variant
    #[must_use]
    pub fn contig_count(&self) -> usize {
        self.by_contig.len()
    }

    /// Names of contigs with at least one variant, in no particular order
    pub fn contig_names(&self) -> impl Iterator<Item = &str> {
        self.by_contig.keys().map(String::as_str)
    }
}

/// The alternate base if the record is a single-base substitution with one alternate allele.
fn single_base_alternate(reference: &str, alternates: &[String]) -> Option<char> {
    if reference.len() != 1 {
        return None;
    }

    match alternates {
        [alt] => {
            let mut chars = alt.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "##fileformat=VCFv4.2
##contig=<ID=chr1,length=100>
##contig=<ID=chr2,length=100>
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
";

    fn write_vcf(records: &str) -> NamedTempFile {
        let mut temp = NamedTempFile::with_suffix(".vcf").unwrap();
        temp.write_all(HEADER.as_bytes()).unwrap();
        temp.write_all(records.as_bytes()).unwrap();
        temp.flush().unwrap();
        temp
    }

    #[test]
    fn test_single_base_alternate() {
        assert_eq!(single_base_alternate("A", &["G".to_string()]), Some('G'));
        assert_eq!(single_base_alternate("A", &["N".to_string()]), Some('N'));
        assert_eq!(single_base_alternate("AT", &["A".to_string()]), None);
        assert_eq!(single_base_alternate("A", &["AT".to_string()]), None);
        assert_eq!(single_base_alternate("A", &["<DEL>".to_string()]), None);
        assert_eq!(
            single_base_alternate("A", &["C".to_string(), "G".to_string()]),
            None
        );
        assert_eq!(single_base_alternate("A", &[]), None);
    }

    #[test]
    fn test_from_path_groups_by_contig() {
        let temp = write_vcf(
            "chr1\t1\t.\tA\tC\t.\t.\t.
chr1\t7\t.\tG\tT\t.\t.\t.
chr2\t3\t.\tC\tA\t.\t.\t.
",
        );

        let index = VariantIndex::from_path(temp.path()).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.contig_count(), 2);
        assert_eq!(index.filtered(), 0);
        assert_eq!(
            index.variants("chr1"),
            &[Variant::new(1, 'C'), Variant::new(7, 'T')]
        );
        assert_eq!(index.variants("chr2"), &[Variant::new(3, 'A')]);
        assert!(index.variants("chrM").is_empty());
    }

    #[test]
    fn test_from_path_filters_non_snvs() {
        let temp = write_vcf(
            "chr1\t1\t.\tA\tC,G\t.\t.\t.
chr1\t2\t.\tAT\tA\t.\t.\t.
chr1\t4\t.\tA\tAGG\t.\t.\t.
chr1\t5\t.\tA\tT\t.\t.\t.
",
        );

        let index = VariantIndex::from_path(temp.path()).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.filtered(), 3);
        assert_eq!(index.variants("chr1"), &[Variant::new(5, 'T')]);
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = VariantIndex::from_path(Path::new("/nonexistent/known.vcf"));
        assert!(matches!(result, Err(ParseError::Io(_))));
    }

    #[test]
    fn test_insert() {
        let mut index = VariantIndex::default();
        assert!(index.is_empty());
        index.insert("chrM", Variant::new(4582, 'T')).unwrap();
        index.insert("chrM", Variant::new(4582, 'T')).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.contig_count(), 1);
    }
}
