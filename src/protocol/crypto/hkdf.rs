use hkdf::Hkdf;
use sha2::Sha512;

use super::CryptoError;

/// Output length the pairing layer requests for derived keys.
pub const PAIRING_OKM_LEN: usize = 64;

/// HKDF-SHA512 key derivation.
///
/// Used by the pairing layer to derive transport keys from the SRP
/// session key; the SRP exchange itself never calls this.
pub struct HkdfSha512 {
    hkdf: Hkdf<Sha512>,
}

impl HkdfSha512 {
    /// Extract from input key material.
    ///
    /// `salt` may be `None` when the protocol step defines no salt.
    #[must_use]
    pub fn new(salt: Option<&[u8]>, ikm: &[u8]) -> Self {
        Self {
            hkdf: Hkdf::<Sha512>::new(salt, ikm),
        }
    }

    /// Expand `length` bytes of output key material for `info`.
    ///
    /// # Errors
    ///
    /// Returns an error when `length` exceeds what HKDF-SHA512 can
    /// produce (255 * 64 bytes).
    pub fn expand(&self, info: &[u8], length: usize) -> Result<Vec<u8>, CryptoError> {
        let mut okm = vec![0u8; length];
        self.hkdf
            .expand(info, &mut okm)
            .map_err(|_| CryptoError::KeyDerivationFailed("HKDF expand failed".into()))?;
        Ok(okm)
    }

    /// Expand into a fixed-size array.
    ///
    /// # Errors
    ///
    /// Same failure condition as [`HkdfSha512::expand`].
    pub fn expand_fixed<const N: usize>(&self, info: &[u8]) -> Result<[u8; N], CryptoError> {
        let mut okm = [0u8; N];
        self.hkdf
            .expand(info, &mut okm)
            .map_err(|_| CryptoError::KeyDerivationFailed("HKDF expand failed".into()))?;
        Ok(okm)
    }
}

/// One-shot key derivation.
///
/// # Errors
///
/// Returns an error when `length` exceeds what HKDF-SHA512 can produce.
pub fn derive_key(
    salt: Option<&[u8]>,
    ikm: &[u8],
    info: &[u8],
    length: usize,
) -> Result<Vec<u8>, CryptoError> {
    HkdfSha512::new(salt, ikm).expand(info, length)
}
