//! Password-based key stretching using PBKDF2-HMAC-SHA256.
//!
//! The iteration count comes from `KdfParams` (compiled-in default or
//! `.passkeep.toml`), never from a serialized keychain, so an attacker
//! who controls a blob cannot lower the cost of guessing.

use rand::RngCore;
use sha2::Sha256;

use crate::errors::{KeychainError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the stretched key in bytes (256 bits).
const KEY_LEN: usize = 32;

/// Minimum iteration count accepted by `stretch_password`.
pub const MIN_ITERATIONS: u32 = 100_000;

/// PBKDF2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Number of PBKDF2 iterations (default: 100 000).
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: MIN_ITERATIONS,
        }
    }
}

impl KdfParams {
    /// Reject parameters below the safety floor.
    pub fn validate(&self) -> Result<()> {
        if self.iterations < MIN_ITERATIONS {
            return Err(KeychainError::InvalidInput(format!(
                "PBKDF2 iterations must be at least {MIN_ITERATIONS} (got {})",
                self.iterations
            )));
        }
        Ok(())
    }
}

/// Stretch `password` with `salt` into a 32-byte key.
///
/// The same password + salt + params always produce the same key.
pub fn stretch_password(password: &[u8], salt: &[u8], params: &KdfParams) -> Result<[u8; KEY_LEN]> {
    if password.is_empty() {
        return Err(KeychainError::InvalidInput(
            "password cannot be empty".into(),
        ));
    }
    if salt.len() != SALT_LEN {
        return Err(KeychainError::InvalidInput(format!(
            "salt must be {SALT_LEN} bytes (got {})",
            salt.len()
        )));
    }
    params.validate()?;

    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, params.iterations, &mut key);
    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
