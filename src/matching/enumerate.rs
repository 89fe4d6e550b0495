//! Enumeration of concrete sequences allowed by both a reference window and a
//! pattern.

use itertools::Itertools;

use crate::core::base::{Base, BaseSet};
use crate::core::error::CoreError;

/// Every unambiguous sequence consistent with `reference_window` and `pattern`.
///
/// Each column contributes the bases in the intersection of the two sets, in
/// A, C, G, T order. Results are the Cartesian product of those choices with
/// the first column varying slowest. If any column has an empty intersection
/// there is no compatible sequence and the result is empty.
///
/// The number of results is the product of the per-column intersection sizes,
/// so heavily ambiguous wide windows grow quickly.
///
/// # Errors
///
/// Returns `CoreError::ShapeMismatch` if the two inputs differ in width.
pub fn compatible_sequences(
    reference_window: impl AsRef<[BaseSet]>,
    pattern: impl AsRef<[BaseSet]>,
) -> Result<Vec<String>, CoreError> {
    let Some(intersections) = intersect(reference_window.as_ref(), pattern.as_ref())? else {
        return Ok(Vec::new());
    };

    if intersections.is_empty() {
        return Ok(vec![String::new()]);
    }

    let sequences: Vec<String> = intersections
        .iter()
        .map(|set| set.bases())
        .multi_cartesian_product()
        .map(|bases| bases.into_iter().map(Base::as_char).collect::<String>())
        .collect();

    Ok(sequences)
}

/// Number of sequences [`compatible_sequences`] would return, without building them.
///
/// # Errors
///
/// Returns `CoreError::ShapeMismatch` if the two inputs differ in width.
pub fn compatible_count(
    reference_window: impl AsRef<[BaseSet]>,
    pattern: impl AsRef<[BaseSet]>,
) -> Result<usize, CoreError> {
    let count = intersect(reference_window.as_ref(), pattern.as_ref())?
        .map_or(0, |sets| sets.iter().map(|set| set.len()).product());
    Ok(count)
}

/// Column-wise intersections, or `None` as soon as one is empty.
fn intersect(reference: &[BaseSet], pattern: &[BaseSet]) -> Result<Option<Vec<BaseSet>>, CoreError> {
    if reference.len() != pattern.len() {
        return Err(CoreError::ShapeMismatch {
            reference: reference.len(),
            pattern: pattern.len(),
        });
    }

    let mut intersections = Vec::with_capacity(pattern.len());
    for (r, p) in reference.iter().zip(pattern) {
        let shared = r.intersection(*p);
        if shared.is_empty() {
            return Ok(None);
        }
        intersections.push(shared);
    }
    Ok(Some(intersections))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::matrix::PresenceMatrix;

    fn encode(seq: &str) -> PresenceMatrix {
        PresenceMatrix::encode(seq, false)
    }

    #[test]
    fn test_1bp() {
        assert_eq!(
            compatible_sequences(encode("A"), encode("A")).unwrap(),
            vec!["A"]
        );
    }

    #[test]
    fn test_1bp_ambiguous() {
        assert_eq!(
            compatible_sequences(encode("A"), encode("N")).unwrap(),
            vec!["A"]
        );
        assert_eq!(
            compatible_sequences(encode("A"), encode("M")).unwrap(),
            vec!["A"]
        );
    }

    #[test]
    fn test_1bp_with_variant() {
        let mut reference = encode("A");
        reference.apply_variant(1, 'T').unwrap();

        assert_eq!(
            compatible_sequences(&reference, encode("A")).unwrap(),
            vec!["A"]
        );
        assert_eq!(
            compatible_sequences(&reference, encode("T")).unwrap(),
            vec!["T"]
        );
        assert_eq!(
            compatible_sequences(&reference, encode("N")).unwrap(),
            vec!["A", "T"]
        );
    }

    #[test]
    fn test_multibp_with_variant() {
        let mut reference = encode("CT");
        reference.apply_variant(2, 'C').unwrap();

        assert_eq!(
            compatible_sequences(&reference, encode("CT")).unwrap(),
            vec!["CT"]
        );
        assert_eq!(
            compatible_sequences(&reference, encode("CC")).unwrap(),
            vec!["CC"]
        );
        assert_eq!(
            compatible_sequences(&reference, encode("CN")).unwrap(),
            vec!["CC", "CT"]
        );
        assert_eq!(
            compatible_sequences(&reference, encode("NN")).unwrap(),
            vec!["CC", "CT"]
        );
    }

    #[test]
    fn test_empty_column_short_circuits() {
        let mut reference = encode("CT");
        reference.apply_variant(2, 'C').unwrap();

        assert!(compatible_sequences(&reference, encode("TT")).unwrap().is_empty());
        assert_eq!(compatible_count(&reference, encode("TT")).unwrap(), 0);

        // An ignored N in the reference blocks every sequence
        let reference = PresenceMatrix::encode("ANG", true);
        assert!(compatible_sequences(&reference, encode("NNN")).unwrap().is_empty());
    }

    #[test]
    fn test_first_column_varies_slowest() {
        let reference = encode("NNG");
        let pattern = encode("MRN");
        assert_eq!(
            compatible_sequences(&reference, &pattern).unwrap(),
            vec!["AAG", "AGG", "CAG", "CGG"]
        );
        assert_eq!(compatible_count(&reference, &pattern).unwrap(), 4);
    }

    #[test]
    fn test_zero_width() {
        assert_eq!(
            compatible_sequences(encode(""), encode("")).unwrap(),
            vec![String::new()]
        );
        assert_eq!(compatible_count(encode(""), encode("")).unwrap(), 1);
    }

    #[test]
    fn test_shape_mismatch() {
        let err = compatible_sequences(encode("ACG"), encode("AC")).unwrap_err();
        assert_eq!(
            err,
            CoreError::ShapeMismatch {
                reference: 3,
                pattern: 2
            }
        );
        assert!(compatible_count(encode("A"), encode("")).is_err());
    }

    #[test]
    fn test_accepts_slices() {
        let reference = encode("TTGGA");
        let window = reference.window(1..4).unwrap();
        assert_eq!(
            compatible_sequences(window, encode("NGG")).unwrap(),
            vec!["TGG"]
        );
    }
}
