use std::io::{self, Write};

use crate::matching::engine::ContigScan;

/// Writes the `locus\tpam` site table.
pub struct SiteWriter<W: Write> {
    inner: W,
    rows: usize,
}

impl<W: Write> SiteWriter<W> {
    /// Wrap a writer and emit the header line.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from writing the header.
    pub fn new(mut inner: W) -> io::Result<Self> {
        writeln!(inner, "locus\tpam")?;
        Ok(Self { inner, rows: 0 })
    }

    /// Write a single site row
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    pub fn write_site(&mut self, locus: &str, pam: &str) -> io::Result<()> {
        writeln!(self.inner, "{locus}\t{pam}")?;
        self.rows += 1;
        Ok(())
    }

    /// Write every site found on a contig, in scan order
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    pub fn write_scan(&mut self, scan: &ContigScan) -> io::Result<()> {
        for site in &scan.sites {
            self.write_site(&scan.locus(site), &site.pam)?;
        }
        Ok(())
    }

    /// Rows written so far, excluding the header
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and return the inner writer.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from flushing.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
