//! Cryptographic primitives for the Pair-Setup handshake

pub mod bigint;
mod error;
mod hash;
mod hkdf;
mod srp;

#[cfg(test)]
mod tests;

pub use self::error::CryptoError;
pub use self::hash::{DIGEST_LEN, sha512, sha512_concat};
pub use self::hkdf::{HkdfSha512, PAIRING_OKM_LEN, derive_key};
pub use self::srp::{DEFAULT_USERNAME, KEY_BYTES, PRIVATE_KEY_BYTES, SrpClient};

/// Length of various cryptographic values
pub mod lengths {
    /// Padded SRP group element (public keys, shared secret)
    pub const SRP_KEY: usize = super::KEY_BYTES;
    /// SRP proof (M1/M2)
    pub const SRP_PROOF: usize = super::DIGEST_LEN;
    /// SRP session key
    pub const SESSION_KEY: usize = super::DIGEST_LEN;
    /// Random SRP private exponent
    pub const SRP_PRIVATE_KEY: usize = super::PRIVATE_KEY_BYTES;
}
