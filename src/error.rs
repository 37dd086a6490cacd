//! Error types

use crate::protocol::crypto::CryptoError;
use crate::protocol::opack::OpackEncodeError;
use crate::protocol::pairing::tlv::TlvError;

/// Umbrella error for core operations.
#[derive(Debug, thiserror::Error)]
pub enum RemoteXpcError {
    /// SRP or key-derivation failure.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// TLV8 framing failure.
    #[error(transparent)]
    Tlv(#[from] TlvError),

    /// OPACK2 encoding failure.
    #[error(transparent)]
    Opack(#[from] OpackEncodeError),
}
