//! Streaming FASTA reader using noodles.
//!
//! Yields one [`Contig`] at a time so whole genomes never need to be held in
//! memory at once. Supports both uncompressed and gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use tracing::debug;

use crate::core::contig::Contig;
use crate::parsing::ParseError;
use crate::utils::validation::check_contig_limit;

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    // Check for gzipped FASTA
    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".fna.gz")
        || path_str.ends_with(".fa.bgz")
        || path_str.ends_with(".fasta.bgz")
        || path_str.ends_with(".fna.bgz")
    {
        return true;
    }

    // Check for uncompressed FASTA
    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Iterator over the records of a FASTA file
pub struct ContigReader<R> {
    inner: fasta::io::Reader<R>,
    count: usize,
    finished: bool,
}

impl ContigReader<Box<dyn BufRead>> {
    /// Open a FASTA file, decompressing `.gz`/`.bgz` transparently.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be opened.
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let file = File::open(path)?;
        let reader: Box<dyn BufRead> = if is_gzipped(path) {
            // bgzip files are multi-member gzip streams
            Box::new(BufReader::new(MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        debug!("Reading FASTA from {}", path.display());
        Ok(Self::new(reader))
    }
}

impl<R: BufRead> ContigReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: fasta::io::Reader::new(reader),
            count: 0,
            finished: false,
        }
    }

    /// Number of contigs yielded so far
    pub fn count_read(&self) -> usize {
        self.count
    }

    fn read_contig(&mut self) -> Result<Option<Contig>, ParseError> {
        let mut definition = String::new();
        let read = self
            .inner
            .read_definition(&mut definition)
            .map_err(|e| ParseError::Noodles(format!("Failed to read FASTA definition: {e}")))?;

        if read == 0 {
            return Ok(None);
        }

        // Check contig limit for DOS protection
        if check_contig_limit(self.count).is_some() {
            return Err(ParseError::TooManyContigs(self.count));
        }

        let name = parse_definition(&definition)?;

        let mut sequence = Vec::new();
        self.inner
            .read_sequence(&mut sequence)
            .map_err(|e| ParseError::Noodles(format!("Failed to read sequence for '{name}': {e}")))?;

        self.count += 1;
        Ok(Some(Contig::new(name, sequence)))
    }
}

impl<R: BufRead> Iterator for ContigReader<R> {
    type Item = Result<Contig, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.read_contig().transpose();
        if !matches!(result, Some(Ok(_))) {
            self.finished = true;
        }
        result
    }
}

/// Extract the contig name: the first whitespace-delimited token after `>`.
fn parse_definition(line: &str) -> Result<String, ParseError> {
    let name = line
        .trim_end()
        .strip_prefix('>')
        .and_then(|rest| rest.split_whitespace().next())
        .ok_or_else(|| {
            ParseError::InvalidFormat(format!("Invalid FASTA definition line: '{line}'"))
        })?;

    Ok(name.to_string())
}
