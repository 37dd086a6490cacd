//! SHA-512 wrappers shared by the SRP derivations.

use sha2::{Digest, Sha512};

/// SHA-512 digest length in bytes.
pub const DIGEST_LEN: usize = 64;

/// One-shot SHA-512.
#[must_use]
pub fn sha512(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&Sha512::digest(data));
    out
}

/// SHA-512 over the concatenation of `parts`, without materializing it.
#[must_use]
pub fn sha512_concat(parts: &[&[u8]]) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&hasher.finalize());
    out
}
