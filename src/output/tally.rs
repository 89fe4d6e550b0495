use std::collections::HashMap;
use std::io::{self, Write};

/// Occurrence counts per PAM sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PamTally {
    counts: HashMap<String, usize>,
    total: usize,
}

impl PamTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, pam: &str) {
        *self.counts.entry(pam.to_string()).or_insert(0) += 1;
        self.total += 1;
    }

    #[must_use]
    pub fn get(&self, pam: &str) -> usize {
        self.counts.get(pam).copied().unwrap_or(0)
    }

    /// Sum of all counts
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct sequences
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sequences by descending count, ties broken alphabetically
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(pam, &count)| (pam.as_str(), count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Write a `pam\tcount` table in [`sorted`](Self::sorted) order.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub fn write_tsv<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "pam\tcount")?;
        for (pam, count) in self.sorted() {
            writeln!(writer, "{pam}\t{count}")?;
        }
        writer.flush()
    }
}
