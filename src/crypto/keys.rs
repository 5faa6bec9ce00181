//! Purpose-specific sub-keys derived from the stretched password.
//!
//! From the single PBKDF2 output we derive, with HKDF-SHA256:
//! - an **entry key** used by AES-256-GCM to seal credential values;
//! - a **tag key** used by HMAC-SHA256 to compute domain tags.
//!
//! Separate `info` labels keep the two roles cryptographically
//! independent even though they come from the same password.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

use super::kdf::{generate_salt, stretch_password, KdfParams, SALT_LEN};
use crate::errors::{KeychainError, Result};

/// Length of derived sub-keys (256 bits).
pub const KEY_LEN: usize = 32;

const ENTRY_KEY_INFO: &[u8] = b"passkeep-entry-key";
const TAG_KEY_INFO: &[u8] = b"passkeep-domain-tag-key";

/// The key material owned by one keychain instance.
///
/// Both keys are zeroed when the value is dropped. Never serialized.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct KeychainKeys {
    entry_key: [u8; KEY_LEN],
    tag_key: [u8; KEY_LEN],
}

impl KeychainKeys {
    /// Split a stretched master key into the entry and tag keys.
    pub fn from_master(master_key: &[u8]) -> Result<Self> {
        Ok(Self {
            entry_key: hkdf_derive(master_key, ENTRY_KEY_INFO)?,
            tag_key: hkdf_derive(master_key, TAG_KEY_INFO)?,
        })
    }

    /// Key for AES-256-GCM entry encryption.
    pub fn entry_key(&self) -> &[u8; KEY_LEN] {
        &self.entry_key
    }

    /// Key for HMAC-SHA256 domain tagging.
    pub fn tag_key(&self) -> &[u8; KEY_LEN] {
        &self.tag_key
    }
}

impl std::fmt::Debug for KeychainKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeychainKeys")
            .field("entry_key", &"[REDACTED]")
            .field("tag_key", &"[REDACTED]")
            .finish()
    }
}

/// Derive the keychain keys from a password.
///
/// With `salt = None` a fresh random salt is generated (used by `init`);
/// with `Some(salt)` the stored salt is reused (used by `load`). The salt
/// actually used is returned alongside the keys.
pub fn derive_keys(
    password: &[u8],
    salt: Option<&[u8]>,
    params: &KdfParams,
) -> Result<(KeychainKeys, [u8; SALT_LEN])> {
    let salt: [u8; SALT_LEN] = match salt {
        Some(s) => s.try_into().map_err(|_| {
            KeychainError::InvalidInput(format!(
                "salt must be {SALT_LEN} bytes (got {})",
                s.len()
            ))
        })?,
        None => generate_salt(),
    };

    let mut master = stretch_password(password, &salt, params)?;
    let keys = KeychainKeys::from_master(&master);
    master.zeroize();

    Ok((keys?, salt))
}

/// Run HKDF-SHA256 expand with the given `info`.
fn hkdf_derive(ikm: &[u8], info: &[u8]) -> Result<[u8; KEY_LEN]> {
    let hk = Hkdf::<Sha256>::new(None, ikm);

    let mut okm = [0u8; KEY_LEN];
    hk.expand(info, &mut okm)
        .map_err(|e| KeychainError::KeyDerivationFailed(format!("HKDF expand failed: {e}")))?;

    Ok(okm)
}
