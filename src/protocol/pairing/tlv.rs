//! TLV8 framing for pairing messages
//!
//! Each record is `[tag:1][length:1][payload:length]`. A value longer
//! than 255 bytes spans consecutive records carrying the same tag;
//! receivers treat a record with length below 255 as the end of the
//! value. No zero-length tail record is emitted when a value's length
//! is an exact multiple of 255.

use thiserror::Error;

/// Maximum payload bytes a single TLV8 record can carry.
pub const MAX_FRAGMENT: usize = 255;

/// TLV type codes used by Pair-Setup and Pair-Verify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TlvType {
    /// Pairing method
    Method = 0x00,
    /// Pairing identifier
    Identifier = 0x01,
    /// Salt for SRP
    Salt = 0x02,
    /// Public key
    PublicKey = 0x03,
    /// Proof (M1/M2 in SRP)
    Proof = 0x04,
    /// Encrypted data
    EncryptedData = 0x05,
    /// Pairing state/sequence number
    State = 0x06,
    /// Error code
    Error = 0x07,
    /// Retry delay
    RetryDelay = 0x08,
    /// Certificate
    Certificate = 0x09,
    /// Signature
    Signature = 0x0A,
    /// Permissions
    Permissions = 0x0B,
    /// Fragment data
    FragmentData = 0x0C,
    /// Fragment last
    FragmentLast = 0x0D,
    /// Session ID
    SessionID = 0x0E,
    /// Flags
    Flags = 0x13,
    /// Separator (empty value between items)
    Separator = 0xFF,
}

impl TlvType {
    /// Create from byte value
    #[must_use]
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x00 => Some(Self::Method),
            0x01 => Some(Self::Identifier),
            0x02 => Some(Self::Salt),
            0x03 => Some(Self::PublicKey),
            0x04 => Some(Self::Proof),
            0x05 => Some(Self::EncryptedData),
            0x06 => Some(Self::State),
            0x07 => Some(Self::Error),
            0x08 => Some(Self::RetryDelay),
            0x09 => Some(Self::Certificate),
            0x0A => Some(Self::Signature),
            0x0B => Some(Self::Permissions),
            0x0C => Some(Self::FragmentData),
            0x0D => Some(Self::FragmentLast),
            0x0E => Some(Self::SessionID),
            0x13 => Some(Self::Flags),
            0xFF => Some(Self::Separator),
            _ => None,
        }
    }
}

impl From<TlvType> for u8 {
    fn from(t: TlvType) -> Self {
        t as Self
    }
}

/// TLV framing errors
#[derive(Debug, Error)]
pub enum TlvError {
    #[error("truncated record at offset {0}")]
    Truncated(usize),

    #[error("missing required field: 0x{0:02x}")]
    MissingField(u8),

    #[error("invalid value for field 0x{0:02x}")]
    InvalidValue(u8),
}

/// A single `(tag, value)` pair prior to framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvItem {
    /// Record tag; duplicate tags represent continuation on the wire.
    pub tag: u8,
    /// Unfragmented value bytes.
    pub data: Vec<u8>,
}

impl TlvItem {
    /// Create an item from any tag representation.
    pub fn new(tag: impl Into<u8>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            tag: tag.into(),
            data: data.into(),
        }
    }
}

/// Frame `items` in input order, fragmenting values longer than
/// [`MAX_FRAGMENT`] bytes.
#[must_use]
pub fn encode(items: &[TlvItem]) -> Vec<u8> {
    let mut out = Vec::new();
    for item in items {
        append_value(&mut out, item.tag, &item.data);
    }
    out
}

fn append_value(out: &mut Vec<u8>, tag: u8, value: &[u8]) {
    if value.is_empty() {
        out.push(tag);
        out.push(0);
        return;
    }
    for chunk in value.chunks(MAX_FRAGMENT) {
        out.push(tag);
        #[allow(clippy::cast_possible_truncation)]
        out.push(chunk.len() as u8);
        out.extend_from_slice(chunk);
    }
}

/// Chainable TLV encoder for building pairing messages.
pub struct TlvEncoder {
    buffer: Vec<u8>,
}

impl TlvEncoder {
    /// Create a new encoder
    #[must_use]
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Append a value, fragmenting as needed.
    #[must_use]
    pub fn add(mut self, tag: impl Into<u8>, value: &[u8]) -> Self {
        append_value(&mut self.buffer, tag.into(), value);
        self
    }

    /// Append a single-byte value.
    #[must_use]
    pub fn add_byte(self, tag: impl Into<u8>, value: u8) -> Self {
        self.add(tag, &[value])
    }

    /// Finish and return the framed bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.buffer
    }
}

impl Default for TlvEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decoded TLV stream with fragmented values reassembled.
pub struct TlvDecoder {
    items: Vec<TlvItem>,
}

impl TlvDecoder {
    /// Parse a TLV8 buffer.
    ///
    /// A record continues the previous item only when it carries the
    /// same tag and the previous record was a full 255-byte fragment;
    /// otherwise it starts a new item. Item order is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`TlvError::Truncated`] if the buffer ends inside a
    /// record header or payload.
    pub fn decode(data: &[u8]) -> Result<Self, TlvError> {
        let mut items: Vec<TlvItem> = Vec::new();
        let mut continuing = false;
        let mut pos = 0;

        while pos < data.len() {
            if pos + 2 > data.len() {
                return Err(TlvError::Truncated(pos));
            }
            let tag = data[pos];
            let length = data[pos + 1] as usize;
            pos += 2;

            if pos + length > data.len() {
                return Err(TlvError::Truncated(pos));
            }
            let payload = &data[pos..pos + length];
            pos += length;

            match items.last_mut() {
                Some(prev) if continuing && prev.tag == tag => {
                    prev.data.extend_from_slice(payload);
                }
                _ => items.push(TlvItem {
                    tag,
                    data: payload.to_vec(),
                }),
            }
            continuing = length == MAX_FRAGMENT;
        }

        Ok(Self { items })
    }

    /// All reassembled items in wire order.
    #[must_use]
    pub fn items(&self) -> &[TlvItem] {
        &self.items
    }

    /// First value with the given tag.
    #[must_use]
    pub fn get(&self, tag: impl Into<u8>) -> Option<&[u8]> {
        let tag = tag.into();
        self.items
            .iter()
            .find(|item| item.tag == tag)
            .map(|item| item.data.as_slice())
    }

    /// First value with the given tag, or [`TlvError::MissingField`].
    ///
    /// # Errors
    ///
    /// Returns error if the field is absent.
    pub fn get_required(&self, tag: impl Into<u8>) -> Result<&[u8], TlvError> {
        let tag = tag.into();
        self.get(tag).ok_or(TlvError::MissingField(tag))
    }

    /// First value with the given tag as a single byte.
    #[must_use]
    pub fn get_u8(&self, tag: impl Into<u8>) -> Option<u8> {
        self.get(tag).and_then(|v| v.first().copied())
    }

    /// The pairing state field.
    ///
    /// # Errors
    ///
    /// Returns error if the field is missing or not one byte long.
    pub fn state(&self) -> Result<u8, TlvError> {
        let value = self.get_required(TlvType::State)?;
        if value.len() != 1 {
            return Err(TlvError::InvalidValue(TlvType::State.into()));
        }
        Ok(value[0])
    }

    /// Device error code, if the message carries one.
    #[must_use]
    pub fn error_code(&self) -> Option<u8> {
        self.get_u8(TlvType::Error)
    }

    /// Whether the message carries an error field.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.get(TlvType::Error).is_some()
    }
}

/// Pairing method constants
pub mod methods {
    /// Pair-Setup
    pub const PAIR_SETUP: u8 = 0;
    /// Pair-Setup with auth (`MFi`)
    pub const PAIR_SETUP_AUTH: u8 = 1;
    /// Pair-Verify
    pub const PAIR_VERIFY: u8 = 2;
    /// Add pairing
    pub const ADD_PAIRING: u8 = 3;
    /// Remove pairing
    pub const REMOVE_PAIRING: u8 = 4;
    /// List pairings
    pub const LIST_PAIRINGS: u8 = 5;
}

/// Error codes from device
pub mod errors {
    pub const UNKNOWN: u8 = 0x01;
    pub const AUTHENTICATION: u8 = 0x02;
    pub const BACKOFF: u8 = 0x03;
    pub const MAX_PEERS: u8 = 0x04;
    pub const MAX_TRIES: u8 = 0x05;
    pub const UNAVAILABLE: u8 = 0x06;
    pub const BUSY: u8 = 0x07;
}
