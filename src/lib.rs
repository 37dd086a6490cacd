//! # remotexpc-core
//!
//! Pairing cryptography and wire-format codecs for Apple RemoteXPC
//! services.
//!
//! This crate is the protocol core shared by the transports that talk
//! to Apple devices: the SRP-6a client half of the Pair-Setup
//! handshake, TLV8 framing for pairing messages, and the OPACK2 object
//! encoding carried inside XPC frames. It performs no I/O; callers
//! hand it buffers and get buffers back.
//!
//! ## Example
//!
//! ```rust
//! use remotexpc_core::opack_dict;
//! use remotexpc_core::protocol::opack;
//! use remotexpc_core::protocol::pairing::tlv::{TlvEncoder, TlvType, methods};
//!
//! // First Pair-Setup message: state = 1, method = 0
//! let m1 = TlvEncoder::new()
//!     .add_byte(TlvType::State, 1)
//!     .add_byte(TlvType::Method, methods::PAIR_SETUP)
//!     .build();
//! assert_eq!(m1, vec![0x06, 0x01, 0x01, 0x00, 0x01, 0x00]);
//!
//! // XPC payload wrapping
//! let payload = opack_dict! {
//!     "messageType" => "Handshake",
//! };
//! let bytes = opack::encode(&payload).unwrap();
//! assert_eq!(bytes[0], 0xE1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Error types
pub mod error;
/// Wire protocol implementations
pub mod protocol;

// Re-exports
pub use error::RemoteXpcError;
pub use protocol::crypto::{CryptoError, HkdfSha512, SrpClient, derive_key};
pub use protocol::opack::{OpackDict, OpackEncodeError, OpackValue};
pub use protocol::pairing::tlv::{TlvDecoder, TlvEncoder, TlvError, TlvItem, TlvType};
