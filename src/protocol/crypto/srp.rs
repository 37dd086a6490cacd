//! SRP-6a client for the Pair-Setup handshake.
//!
//! Client half of RFC 5054 with the 3072-bit group, `g = 5` and
//! SHA-512, using the proof construction Apple devices expect: every
//! group element is left-padded to 384 bytes before hashing, and `M1`
//! hashes the session key `K` rather than the raw shared secret `S`.
//!
//! A client accumulates its inputs in any order (identity, salt,
//! server public key), generates its ephemeral key pair once salt and
//! server key are both present, and derives `K` and `M1` lazily on the
//! first call that needs them.

use hex_literal::hex;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::RngCore;
use zeroize::Zeroize;

use super::CryptoError;
use super::bigint;
use super::hash::{DIGEST_LEN, sha512, sha512_concat};

/// Byte length of the group prime; every exchanged group element is
/// padded to this size.
pub const KEY_BYTES: usize = 384;

/// Byte length of the random private exponent.
pub const PRIVATE_KEY_BYTES: usize = 32;

/// Username Apple devices expect during Pair-Setup.
pub const DEFAULT_USERNAME: &str = "Pair-Setup";

/// Candidate limit for private-key rejection sampling.
const MAX_KEYGEN_ATTEMPTS: usize = 100;

const GENERATOR: u8 = 5;

/// RFC 5054 Appendix A, 3072-bit safe prime.
const GROUP_PRIME: [u8; KEY_BYTES] = hex!(
    "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E088A67CC74"
    "020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B302B0A6DF25F1437"
    "4FE1356D6D51C245E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED"
    "EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3DC2007CB8A163BF05"
    "98DA48361C55D39A69163FA8FD24CF5F83655D23DCA3AD961C62F356208552BB"
    "9ED529077096966D670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B"
    "E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9DE2BCBF695581718"
    "3995497CEA956AE515D2261898FA051015728E5A8AAAC42DAD33170D04507A33"
    "A85521ABDF1CBA64ECFB850458DBEF0A8AEA71575D060C7DB3970F85A6E1E4C7"
    "ABF5AE8CDB0933D71E8C94E04A25619DCEE3D2261AD2EE6BF12FFA06D98A0864"
    "D87602733EC86A64521F2B18177B200CBBE117577A615D6C770988C0BAD946E2"
    "08E24FA074E5AB3143DB5BFCE0FD108E4B82D120A93AD2CAFFFFFFFFFFFFFFFF"
);

fn generator_padded() -> [u8; KEY_BYTES] {
    let mut padded = [0u8; KEY_BYTES];
    padded[KEY_BYTES - 1] = GENERATOR;
    padded
}

/// SRP-6a client state for one pairing attempt.
///
/// Not thread-safe; callers serialize access to an instance. Sensitive
/// material is zeroized by [`SrpClient::dispose`] and on drop.
pub struct SrpClient {
    n: BigUint,
    g: BigUint,
    k: BigUint,
    n_minus_one: BigUint,
    username: String,
    password: Vec<u8>,
    identity_set: bool,
    salt: Option<Vec<u8>>,
    server_public: Option<BigUint>,
    private_seed: [u8; PRIVATE_KEY_BYTES],
    private_key: Option<BigUint>,
    public_key: Option<Vec<u8>>,
    session_key: Option<Vec<u8>>,
    proof: Option<[u8; DIGEST_LEN]>,
    disposed: bool,
}

impl SrpClient {
    /// Create a client with the group constants and `k` initialized.
    ///
    /// `k = H(PAD(N) || PAD(g))` per the SRP-6a multiplier definition.
    #[must_use]
    pub fn new() -> Self {
        let n = BigUint::from_bytes_be(&GROUP_PRIME);
        let g = BigUint::from(GENERATOR);
        let k = BigUint::from_bytes_be(&sha512_concat(&[&GROUP_PRIME, &generator_padded()]));
        let n_minus_one = &n - 1u32;

        Self {
            n,
            g,
            k,
            n_minus_one,
            username: DEFAULT_USERNAME.to_string(),
            password: Vec::new(),
            identity_set: false,
            salt: None,
            server_public: None,
            private_seed: [0u8; PRIVATE_KEY_BYTES],
            private_key: None,
            public_key: None,
            session_key: None,
            proof: None,
            disposed: false,
        }
    }

    /// Store the identity used for the `x` derivation.
    ///
    /// The username is trimmed; the password is taken as raw bytes.
    ///
    /// # Errors
    ///
    /// Fails with [`CryptoError::EmptyIdentity`] if either argument is
    /// empty, or [`CryptoError::Disposed`] after [`SrpClient::dispose`].
    pub fn set_identity(&mut self, username: &str, password: &str) -> Result<(), CryptoError> {
        self.ensure_live()?;
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(CryptoError::EmptyIdentity);
        }
        self.username = username.to_string();
        self.password.zeroize();
        self.password = password.as_bytes().to_vec();
        self.identity_set = true;
        Ok(())
    }

    /// Store the salt received from the device.
    ///
    /// Generates the ephemeral key pair if the server public key has
    /// already arrived.
    ///
    /// # Errors
    ///
    /// Fails on an empty salt, after dispose, or if key generation
    /// exhausts its candidate limit.
    pub fn provide_salt(&mut self, salt: &[u8]) -> Result<(), CryptoError> {
        self.ensure_live()?;
        if salt.is_empty() {
            return Err(CryptoError::EmptySalt);
        }
        self.salt = Some(salt.to_vec());
        self.maybe_generate_keys()
    }

    /// Store the device's public key `B` (384 big-endian bytes).
    ///
    /// Generates the ephemeral key pair if the salt has already
    /// arrived.
    ///
    /// # Errors
    ///
    /// Fails if the buffer is not exactly [`KEY_BYTES`] long, if
    /// `B <= 1`, `B >= N - 1` or `B mod N == 0`, after dispose, or if
    /// key generation exhausts its candidate limit.
    pub fn provide_server_public_key(&mut self, server_public: &[u8]) -> Result<(), CryptoError> {
        self.ensure_live()?;
        if server_public.len() != KEY_BYTES {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_BYTES,
                actual: server_public.len(),
            });
        }
        let b = BigUint::from_bytes_be(server_public);
        if b <= BigUint::one() || b >= self.n_minus_one || (&b % &self.n).is_zero() {
            return Err(CryptoError::InvalidServerPublicKey);
        }
        self.server_public = Some(b);
        self.maybe_generate_keys()
    }

    /// The client public key `A = g^a mod N`, padded to 384 bytes.
    ///
    /// # Errors
    ///
    /// Fails until both salt and server public key have been provided,
    /// or after dispose.
    pub fn public_key(&self) -> Result<&[u8], CryptoError> {
        self.ensure_live()?;
        self.public_key
            .as_deref()
            .ok_or(CryptoError::MissingPrerequisite("key pair"))
    }

    /// The client proof `M1`, deriving the session state on first use.
    ///
    /// `M1 = H(H(PAD(N)) xor H(PAD(g)) || H(user) || salt || PAD(A) ||
    /// PAD(B) || K)`.
    ///
    /// # Errors
    ///
    /// Fails if identity, salt, server public key or the key pair is
    /// missing, or after dispose.
    pub fn compute_proof(&mut self) -> Result<[u8; DIGEST_LEN], CryptoError> {
        self.ensure_session()?;
        self.proof.ok_or(CryptoError::MissingPrerequisite("proof"))
    }

    /// The session key `K = H(PAD(S))`, deriving it on first use.
    ///
    /// # Errors
    ///
    /// Same prerequisites as [`SrpClient::compute_proof`].
    pub fn session_key(&mut self) -> Result<&[u8], CryptoError> {
        self.ensure_session()?;
        self.session_key
            .as_deref()
            .ok_or(CryptoError::MissingPrerequisite("session key"))
    }

    /// Check the device's proof `M2 = H(PAD(A) || M1 || K)`.
    ///
    /// # Errors
    ///
    /// [`CryptoError::VerificationFailed`] on mismatch; otherwise the
    /// same prerequisites as [`SrpClient::compute_proof`].
    pub fn verify_server_proof(&mut self, server_proof: &[u8]) -> Result<(), CryptoError> {
        self.ensure_session()?;
        let a_pub = self
            .public_key
            .as_deref()
            .ok_or(CryptoError::MissingPrerequisite("key pair"))?;
        let m1 = self
            .proof
            .as_ref()
            .ok_or(CryptoError::MissingPrerequisite("proof"))?;
        let key = self
            .session_key
            .as_deref()
            .ok_or(CryptoError::MissingPrerequisite("session key"))?;
        let expected = sha512_concat(&[a_pub, m1, key]);
        if expected.as_slice() != server_proof {
            return Err(CryptoError::VerificationFailed);
        }
        Ok(())
    }

    /// True once salt, server public key and the key pair are present.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.disposed
            && self.salt.is_some()
            && self.server_public.is_some()
            && self.private_key.is_some()
    }

    /// True once the session key has been derived.
    #[must_use]
    pub fn has_session_key(&self) -> bool {
        !self.disposed && self.session_key.is_some()
    }

    /// Zeroize sensitive material and retire the client.
    ///
    /// Idempotent; every subsequent operation except this one,
    /// [`SrpClient::is_ready`] and [`SrpClient::has_session_key`]
    /// fails with [`CryptoError::Disposed`].
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.password.zeroize();
        self.private_seed.zeroize();
        if let Some(key) = self.session_key.as_mut() {
            key.zeroize();
        }
        self.session_key = None;
        self.proof = None;
        // BigUint offers no in-place scrubbing; dropping the values is
        // the best available for the group elements themselves.
        self.private_key = None;
        self.public_key = None;
        self.salt = None;
        self.server_public = None;
        self.disposed = true;
    }

    fn ensure_live(&self) -> Result<(), CryptoError> {
        if self.disposed {
            return Err(CryptoError::Disposed);
        }
        Ok(())
    }

    /// Generate `(a, A)` once both salt and server public key are in.
    ///
    /// Candidates are sampled as 32 random bytes and discarded, never
    /// folded back into range with a modulo, when `a == 0`, `a >= N`
    /// or `A` falls outside `(1, N - 1)`.
    fn maybe_generate_keys(&mut self) -> Result<(), CryptoError> {
        if self.private_key.is_some() || self.salt.is_none() || self.server_public.is_none() {
            return Ok(());
        }
        let mut rng = rand::thread_rng();
        for attempt in 1..=MAX_KEYGEN_ATTEMPTS {
            let mut seed = [0u8; PRIVATE_KEY_BYTES];
            rng.fill_bytes(&mut seed);
            let a = BigUint::from_bytes_be(&seed);
            if a.is_zero() || a >= self.n {
                seed.zeroize();
                continue;
            }
            let a_pub = self.g.modpow(&a, &self.n);
            if a_pub <= BigUint::one() || a_pub >= self.n_minus_one {
                seed.zeroize();
                tracing::trace!(attempt, "rejected SRP private key candidate");
                continue;
            }
            self.public_key = Some(bigint::to_fixed_width_be(&a_pub, KEY_BYTES)?);
            self.private_seed = seed;
            self.private_key = Some(a);
            tracing::debug!(attempt, "generated SRP ephemeral key pair");
            return Ok(());
        }
        Err(CryptoError::KeyGenerationExhausted(MAX_KEYGEN_ATTEMPTS))
    }

    /// Derive `S`, `K` and `M1` exactly once.
    fn ensure_session(&mut self) -> Result<(), CryptoError> {
        self.ensure_live()?;
        if self.session_key.is_some() {
            return Ok(());
        }
        if !self.identity_set {
            return Err(CryptoError::MissingPrerequisite("identity"));
        }
        let salt = self
            .salt
            .as_deref()
            .ok_or(CryptoError::MissingPrerequisite("salt"))?;
        let b = self
            .server_public
            .as_ref()
            .ok_or(CryptoError::MissingPrerequisite("server public key"))?;
        let a = self
            .private_key
            .as_ref()
            .ok_or(CryptoError::MissingPrerequisite("key pair"))?;
        let a_pub = self
            .public_key
            .as_deref()
            .ok_or(CryptoError::MissingPrerequisite("key pair"))?;
        let b_padded = bigint::to_fixed_width_be(b, KEY_BYTES)?;

        // u = H(PAD(A) || PAD(B))
        let u = BigUint::from_bytes_be(&sha512_concat(&[a_pub, &b_padded]));

        // x = H(salt || H(username || ":" || password))
        let inner = sha512_concat(&[self.username.as_bytes(), b":", &self.password]);
        let x = BigUint::from_bytes_be(&sha512_concat(&[salt, &inner]));

        // base = (B - k * g^x) mod N; BigUint cannot go negative, so
        // the subtraction is rearranged to stay in range.
        let k_g_x = (&self.k * self.g.modpow(&x, &self.n)) % &self.n;
        let base = if *b >= k_g_x {
            (b - &k_g_x) % &self.n
        } else {
            (&self.n - (k_g_x - b) % &self.n) % &self.n
        };

        // The exponent a + u*x is used at full width, never reduced
        // mod N; the proof construction depends on it.
        let exp = a + &u * &x;
        let s = base.modpow(&exp, &self.n);

        let k_session = sha512(&bigint::to_fixed_width_be(&s, KEY_BYTES)?);

        // M1 = H(H(PAD(N)) xor H(PAD(g)) || H(user) || salt || PAD(A)
        //        || PAD(B) || K)
        let hn = sha512(&GROUP_PRIME);
        let hg = sha512(&generator_padded());
        let mut hn_xor_hg = [0u8; DIGEST_LEN];
        for (out, (lhs, rhs)) in hn_xor_hg.iter_mut().zip(hn.iter().zip(hg.iter())) {
            *out = lhs ^ rhs;
        }
        let h_user = sha512(self.username.as_bytes());
        let m1 = sha512_concat(&[&hn_xor_hg, &h_user, salt, a_pub, &b_padded, &k_session]);

        tracing::debug!("SRP session key derived");
        self.session_key = Some(k_session.to_vec());
        self.proof = Some(m1);
        Ok(())
    }

    /// Install a fixed private key, bypassing random generation.
    #[cfg(test)]
    pub(crate) fn install_private_key(&mut self, seed: &[u8; PRIVATE_KEY_BYTES]) {
        let a = BigUint::from_bytes_be(seed);
        let a_pub = self.g.modpow(&a, &self.n);
        self.private_seed = *seed;
        self.public_key = bigint::to_fixed_width_be(&a_pub, KEY_BYTES).ok();
        self.private_key = Some(a);
    }
}

impl Default for SrpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SrpClient {
    fn drop(&mut self) {
        self.dispose();
    }
}
