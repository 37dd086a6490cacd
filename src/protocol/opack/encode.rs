//! OPACK2 binary encoder.
//!
//! Type-dispatched recursive encoder. Scalar number payloads are
//! little-endian; string and data length headers are big-endian.
//! Containers switch to sentinel-terminated variable forms above
//! their small-form capacity.

use thiserror::Error;

use super::OpackValue;

/// Largest integer the format can carry without loss.
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Errors that can occur during OPACK2 encoding
#[derive(Debug, Error)]
pub enum OpackEncodeError {
    #[error("number exceeds 2^53 - 1")]
    IntegerTooLarge,

    #[error("non-finite number")]
    NonFiniteNumber,

    #[error("length {0} exceeds 2^32 - 1")]
    LengthTooLarge(usize),
}

/// Encode `value` to OPACK2 bytes.
///
/// # Errors
///
/// Returns an error for integers above `2^53 - 1`, non-finite floats,
/// or string/data lengths above `2^32 - 1`.
pub fn encode(value: &OpackValue) -> Result<Vec<u8>, OpackEncodeError> {
    let mut out = Vec::new();
    encode_value(value, &mut out)?;
    Ok(out)
}

fn encode_value(value: &OpackValue, out: &mut Vec<u8>) -> Result<(), OpackEncodeError> {
    match value {
        OpackValue::Null => out.push(0x03),
        OpackValue::Boolean(true) => out.push(0x01),
        OpackValue::Boolean(false) => out.push(0x02),
        OpackValue::Integer(i) => {
            if *i < 0 {
                // Negative integers take the float path; the peer owns
                // this single-precision representation.
                #[allow(clippy::cast_precision_loss)]
                encode_float(*i as f32, out);
            } else {
                #[allow(clippy::cast_sign_loss)]
                encode_integer(*i as u64, out)?;
            }
        }
        OpackValue::Float(f) => encode_number(*f, out)?,
        OpackValue::String(s) => encode_string(s, out)?,
        OpackValue::Data(d) => {
            write_blob_header(d.len(), 0x70, 0x91, 0x92, 0x93, out)?;
            out.extend_from_slice(d);
        }
        OpackValue::Array(items) => {
            // The short form covers lengths 0..=15 for arrays but only
            // 0..=14 for dictionaries; the peer's decoder depends on
            // this split.
            if items.len() <= 15 {
                #[allow(clippy::cast_possible_truncation)]
                out.push(0xD0 + items.len() as u8);
                for item in items {
                    encode_value(item, out)?;
                }
            } else {
                out.push(0xDF);
                for item in items {
                    encode_value(item, out)?;
                }
                out.push(0x03);
            }
        }
        OpackValue::Dictionary(dict) => {
            if dict.len() < 15 {
                #[allow(clippy::cast_possible_truncation)]
                out.push(0xE0 + dict.len() as u8);
                for (key, val) in dict.iter() {
                    encode_string(key, out)?;
                    encode_value(val, out)?;
                }
            } else {
                out.push(0xEF);
                for (key, val) in dict.iter() {
                    encode_string(key, out)?;
                    encode_value(val, out)?;
                }
                out.extend_from_slice(&[0x03, 0x03]);
            }
        }
    }
    Ok(())
}

/// Dispatch a float: non-negative integral values are carried as
/// integers, everything else as a single-precision float.
fn encode_number(value: f64, out: &mut Vec<u8>) -> Result<(), OpackEncodeError> {
    if !value.is_finite() {
        return Err(OpackEncodeError::NonFiniteNumber);
    }
    if value.fract() == 0.0 && value >= 0.0 {
        #[allow(clippy::cast_precision_loss)]
        let max = MAX_SAFE_INTEGER as f64;
        if value > max {
            return Err(OpackEncodeError::IntegerTooLarge);
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let integral = value as u64;
        encode_integer(integral, out)
    } else {
        // Single precision regardless of what fits; callers needing
        // doubles pre-round.
        #[allow(clippy::cast_possible_truncation)]
        let single = value as f32;
        encode_float(single, out);
        Ok(())
    }
}

fn encode_integer(value: u64, out: &mut Vec<u8>) -> Result<(), OpackEncodeError> {
    #[allow(clippy::cast_possible_truncation)]
    if value <= 0x27 {
        out.push(0x08 + value as u8);
    } else if value <= 0xFF {
        out.push(0x30);
        out.push(value as u8);
    } else if value <= 0xFFFF_FFFF {
        out.push(0x32);
        out.extend_from_slice(&(value as u32).to_le_bytes());
    } else if value <= MAX_SAFE_INTEGER {
        out.push(0x33);
        out.extend_from_slice(&value.to_le_bytes());
    } else {
        return Err(OpackEncodeError::IntegerTooLarge);
    }
    Ok(())
}

fn encode_float(value: f32, out: &mut Vec<u8>) {
    out.push(0x35);
    out.extend_from_slice(&value.to_le_bytes());
}

fn encode_string(value: &str, out: &mut Vec<u8>) -> Result<(), OpackEncodeError> {
    let bytes = value.as_bytes();
    write_blob_header(bytes.len(), 0x40, 0x61, 0x62, 0x63, out)?;
    out.extend_from_slice(bytes);
    Ok(())
}

/// Shared header shape for strings and data: a small form embedding
/// the length in the marker, then 1/2/4-byte big-endian length forms.
fn write_blob_header(
    len: usize,
    small_base: u8,
    u8_marker: u8,
    u16_marker: u8,
    u32_marker: u8,
    out: &mut Vec<u8>,
) -> Result<(), OpackEncodeError> {
    #[allow(clippy::cast_possible_truncation)]
    if len <= 0x20 {
        out.push(small_base + len as u8);
    } else if len <= 0xFF {
        out.push(u8_marker);
        out.push(len as u8);
    } else if len <= 0xFFFF {
        out.push(u16_marker);
        out.extend_from_slice(&(len as u16).to_be_bytes());
    } else if len <= 0xFFFF_FFFF {
        out.push(u32_marker);
        out.extend_from_slice(&(len as u32).to_be_bytes());
    } else {
        return Err(OpackEncodeError::LengthTooLarge(len));
    }
    Ok(())
}
