//! Password hashing (Argon2id, PHC strings).
//!
//! Digests are self-contained: algorithm, version, cost parameters and salt
//! all live inside the PHC string, so verification works across cost changes.

use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier as _, Version};
use thiserror::Error;

const SALT_LEN: usize = 16;

/// A stored password digest (PHC string).
///
/// `Debug` is redacted so digests never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a digest loaded from the credential store.
    pub fn from_stored(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

/// Hashing failure. Messages never include the plaintext.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("failed to generate salt")]
    Salt,

    #[error("failed to hash password")]
    Hash,

    #[error("invalid hashing parameters: {0}")]
    Params(String),
}

/// Salted, cost-bound one-way password hasher.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Argon2 defaults (memory KiB, iterations, lanes), used for any cost
    /// that is not configured explicitly.
    pub const DEFAULT_M_COST: u32 = Params::DEFAULT_M_COST;
    pub const DEFAULT_T_COST: u32 = Params::DEFAULT_T_COST;
    pub const DEFAULT_P_COST: u32 = Params::DEFAULT_P_COST;

    pub fn new(params: Params) -> Self {
        Self { params }
    }

    /// Build a hasher from explicit Argon2 costs (memory KiB, iterations, lanes).
    pub fn with_cost(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, PasswordError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| PasswordError::Params(e.to_string()))?;
        Ok(Self::new(params))
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> Result<PasswordDigest, PasswordError> {
        let mut salt_bytes = [0u8; SALT_LEN];
        getrandom::getrandom(&mut salt_bytes).map_err(|_| PasswordError::Salt)?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|_| PasswordError::Salt)?;

        let phc = self
            .argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|_| PasswordError::Hash)?
            .to_string();

        Ok(PasswordDigest(phc))
    }

    /// Check a plaintext against a stored digest.
    ///
    /// Wrong password and malformed digest both yield `false`.
    pub fn verify(&self, plaintext: &str, digest: &PasswordDigest) -> bool {
        match PasswordHash::new(digest.as_str()) {
            Ok(parsed) => self
                .argon2()
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(Params::default())
    }
}
