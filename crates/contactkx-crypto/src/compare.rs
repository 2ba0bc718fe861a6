//! Lexicographic byte comparison

use std::cmp::Ordering;

use crate::error::KxError;

/// Compare two fixed-length buffers lexicographically by byte value.
///
/// Scans from index 0 and stops at the first differing byte. Both inputs share
/// the length `N`, so a length mismatch cannot be expressed.
///
/// Not constant-time. Intended for public keys and for verification of tokens
/// that both sides already hold.
pub fn compare_bytes<const N: usize>(x: &[u8; N], y: &[u8; N]) -> Ordering {
    compare_equal_length(x, y)
}

/// Compare two byte slices that are expected to have the same length.
///
/// Used at boundaries where key material arrives as untyped bytes.
///
/// # Errors
///
/// - `InvalidComparatorInput`: the slices differ in length
pub fn compare_slices(x: &[u8], y: &[u8]) -> Result<Ordering, KxError> {
    if x.len() != y.len() {
        return Err(KxError::InvalidComparatorInput { left: x.len(), right: y.len() });
    }

    Ok(compare_equal_length(x, y))
}

fn compare_equal_length(x: &[u8], y: &[u8]) -> Ordering {
    for (a, b) in x.iter().zip(y) {
        match a.cmp(b) {
            Ordering::Equal => {},
            ordering => return ordering,
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_buffers_compare_equal() {
        assert_eq!(compare_bytes(&[1, 2, 3], &[1, 2, 3]), Ordering::Equal);
    }

    #[test]
    fn first_byte_decides() {
        assert_eq!(compare_bytes(&[0x01, 0xFF, 0xFF], &[0x02, 0x00, 0x00]), Ordering::Less);
        assert_eq!(compare_bytes(&[0x02, 0x00, 0x00], &[0x01, 0xFF, 0xFF]), Ordering::Greater);
    }

    #[test]
    fn last_byte_decides_when_prefix_matches() {
        assert_eq!(compare_bytes(&[7, 7, 7, 1], &[7, 7, 7, 2]), Ordering::Less);
        assert_eq!(compare_bytes(&[7, 7, 7, 2], &[7, 7, 7, 1]), Ordering::Greater);
    }

    #[test]
    fn bytes_compare_unsigned() {
        // 0x80 would be negative as i8
        assert_eq!(compare_bytes(&[0x80], &[0x7F]), Ordering::Greater);
    }

    #[test]
    fn empty_buffers_are_equal() {
        assert_eq!(compare_bytes::<0>(&[], &[]), Ordering::Equal);
        assert_eq!(compare_slices(&[], &[]), Ok(Ordering::Equal));
    }

    #[test]
    fn slices_match_array_comparison() {
        let x = [9u8, 1, 4];
        let y = [9u8, 2, 0];
        assert_eq!(compare_slices(&x, &y), Ok(compare_bytes(&x, &y)));
    }

    #[test]
    fn slices_of_different_length_are_rejected() {
        let result = compare_slices(&[1, 2, 3], &[1, 2]);
        assert_eq!(result, Err(KxError::InvalidComparatorInput { left: 3, right: 2 }));
    }
}
