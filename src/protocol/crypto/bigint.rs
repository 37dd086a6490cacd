//! Fixed-width big-endian integer conversion.
//!
//! Every group element on the wire is big-endian and sized exactly to
//! the byte length of the group prime, so conversions here are strict:
//! a value that does not fit the requested width is an error, never a
//! truncation.

use num_bigint::BigUint;

use super::CryptoError;

/// Encode `n` as exactly `width` big-endian bytes, left-zero-padded.
///
/// # Errors
///
/// Returns [`CryptoError::IntegerTooWide`] if `n` needs more than
/// `width` bytes.
pub fn to_fixed_width_be(n: &BigUint, width: usize) -> Result<Vec<u8>, CryptoError> {
    let raw = n.to_bytes_be();
    // BigUint encodes zero as a single 0x00 byte
    let raw: &[u8] = if n.bits() == 0 { &[] } else { &raw };
    if raw.len() > width {
        return Err(CryptoError::IntegerTooWide { width });
    }
    let mut out = vec![0u8; width];
    out[width - raw.len()..].copy_from_slice(raw);
    Ok(out)
}
