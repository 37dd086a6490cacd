use thiserror::Error;

/// Cryptographic operation errors
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("server public key out of range")]
    InvalidServerPublicKey,

    #[error("username and password must not be empty")]
    EmptyIdentity,

    #[error("salt must not be empty")]
    EmptySalt,

    #[error("missing {0}")]
    MissingPrerequisite(&'static str),

    #[error("client already disposed")]
    Disposed,

    #[error("key generation failed after {0} attempts")]
    KeyGenerationExhausted(usize),

    #[error("integer does not fit in {width} bytes")]
    IntegerTooWide { width: usize },

    #[error("key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("server proof verification failed")]
    VerificationFailed,
}
