use crate::core::matrix::PresenceMatrix;

/// A single named reference sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contig {
    /// Sequence name (first token of the FASTA definition line)
    pub name: String,

    /// Raw sequence bytes, soft-masking preserved
    pub sequence: Vec<u8>,
}

impl Contig {
    pub fn new(name: impl Into<String>, sequence: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            sequence: sequence.into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Encode for searching: 'N' asserts no base until a variant says otherwise.
    #[must_use]
    pub fn to_reference_matrix(&self) -> PresenceMatrix {
        PresenceMatrix::encode_bytes(&self.sequence, true)
    }

    /// Locus string for a 0-based offset, e.g. `chr1:100` (1-based).
    #[must_use]
    pub fn locus(&self, offset: usize) -> String {
        format!("{}:{}", self.name, offset + 1)
    }
}
