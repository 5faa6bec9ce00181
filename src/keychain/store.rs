//! The `Keychain` orchestrator.
//!
//! `Keychain` ties the crypto layer to the entry map so the rest of the
//! application can work with `init`, `load`, `set`, `get`, `remove` and
//! `dump`. A value of this type is always initialized; the
//! uninitialized state lives in `KeychainSession`.

use std::collections::BTreeMap;

use zeroize::Zeroize;

use crate::crypto::checksum;
use crate::crypto::encryption::{open, seal};
use crate::crypto::kdf::{KdfParams, SALT_LEN};
use crate::crypto::keys::{derive_keys, KeychainKeys};
use crate::crypto::tagging::domain_tag;
use crate::errors::{KeychainError, Result};

use super::entry::{DomainTag, StoredEntry};
use super::format::{self, KeychainBlob, StoredKdfParams, CURRENT_VERSION};

/// Associated data for the password check record. Distinct from any
/// domain tag, which is always 32 bytes.
const CHECK_AAD: &[u8] = b"passkeep-password-check";

/// Output of `Keychain::dump`.
#[derive(Debug, Clone)]
pub struct Dump {
    /// Canonical serialized keychain. This is what the checksum covers.
    pub blob: String,

    /// Lowercase hex SHA-256 of `blob`.
    pub checksum: String,

    /// Copy of the tag -> entry map, present only when requested.
    /// Never part of `blob`.
    pub raw_view: Option<BTreeMap<DomainTag, StoredEntry>>,
}

/// An open keychain: salt, derived keys and the sealed entries.
pub struct Keychain {
    salt: [u8; SALT_LEN],

    /// Iteration count the keys were derived with.
    kdf: StoredKdfParams,

    /// Entry and tag keys (zeroized on drop).
    keys: KeychainKeys,

    /// Sealed empty value proving the password on `load`.
    check: StoredEntry,

    entries: BTreeMap<DomainTag, StoredEntry>,
}

impl Keychain {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a new, empty keychain with the default KDF parameters.
    pub fn init(password: &str) -> Result<Self> {
        Self::init_with_params(password, &KdfParams::default())
    }

    /// Create a new, empty keychain.
    ///
    /// Generates a fresh random salt and derives the keys from it.
    pub fn init_with_params(password: &str, params: &KdfParams) -> Result<Self> {
        let (keys, salt) = derive_keys(password.as_bytes(), None, params)?;
        let check = seal(keys.entry_key(), CHECK_AAD, b"")?;

        tracing::debug!("initialized empty keychain");

        Ok(Self {
            salt,
            kdf: StoredKdfParams::from(params),
            keys,
            check,
            entries: BTreeMap::new(),
        })
    }

    /// Restore a keychain from a dump with the default KDF parameters.
    pub fn load(password: &str, blob: &str, expected_checksum: &str) -> Result<Self> {
        Self::load_with_params(password, blob, expected_checksum, &KdfParams::default())
    }

    /// Restore a keychain from a `(blob, checksum)` pair.
    ///
    /// 1. Verify the checksum over the exact blob bytes, before anything
    ///    else is parsed or decrypted.
    /// 2. Parse the blob and compare its recorded iteration count with
    ///    `params`. A mismatch is a `ConfigError`; the recorded count is
    ///    never used for derivation.
    /// 3. Re-derive the keys from the blob's salt.
    /// 4. Open the check record and every entry under its own tag.
    ///
    /// Any failure in step 4 fails the whole load; no partially opened
    /// keychain is ever returned.
    pub fn load_with_params(
        password: &str,
        blob: &str,
        expected_checksum: &str,
        params: &KdfParams,
    ) -> Result<Self> {
        if password.is_empty() {
            return Err(KeychainError::InvalidInput(
                "password cannot be empty".into(),
            ));
        }

        if !checksum::verify(blob.as_bytes(), expected_checksum) {
            return Err(open_failed(KeychainError::IntegrityError));
        }

        let parsed = format::parse_blob(blob).map_err(open_failed)?;
        if parsed.salt.len() != SALT_LEN {
            return Err(open_failed(KeychainError::WrongPasswordOrCorruptData));
        }

        if parsed.kdf.iterations != params.iterations {
            return Err(KeychainError::ConfigError(format!(
                "keychain was created with {} PBKDF2 iterations but {} are configured; \
                 set pbkdf2_iterations = {} in .passkeep.toml",
                parsed.kdf.iterations, params.iterations, parsed.kdf.iterations
            )));
        }

        let (keys, salt) = derive_keys(password.as_bytes(), Some(&parsed.salt), params)?;

        open(keys.entry_key(), CHECK_AAD, &parsed.check).map_err(open_failed)?;

        for (tag, entry) in &parsed.entries {
            open(keys.entry_key(), tag.as_bytes(), entry).map_err(open_failed)?;
        }

        tracing::debug!(entries = parsed.entries.len(), "loaded keychain");

        Ok(Self {
            salt,
            kdf: parsed.kdf,
            keys,
            check: parsed.check,
            entries: parsed.entries,
        })
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Store `value` for `domain`, replacing any previous value.
    pub fn set(&mut self, domain: &str, value: &str) -> Result<()> {
        let tag = self.tag_for(domain)?;
        let entry = seal(self.keys.entry_key(), tag.as_bytes(), value.as_bytes())?;
        self.entries.insert(tag, entry);
        Ok(())
    }

    /// Return the value stored for `domain`, or `None` if there is none.
    pub fn get(&self, domain: &str) -> Result<Option<String>> {
        let tag = self.tag_for(domain)?;
        let Some(entry) = self.entries.get(&tag) else {
            return Ok(None);
        };

        let mut plaintext = open(self.keys.entry_key(), tag.as_bytes(), entry)?;

        // Take the bytes out of the Zeroizing wrapper. On a UTF-8 error,
        // wipe the bytes inside the error before discarding it.
        let bytes = std::mem::take(&mut *plaintext);
        String::from_utf8(bytes).map(Some).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            KeychainError::WrongPasswordOrCorruptData
        })
    }

    /// Remove the entry for `domain`. Returns whether one was present.
    pub fn remove(&mut self, domain: &str) -> Result<bool> {
        let tag = self.tag_for(domain)?;
        Ok(self.entries.remove(&tag).is_some())
    }

    /// Returns `true` if an entry exists for `domain`.
    ///
    /// Metadata-only: nothing is decrypted.
    pub fn contains(&self, domain: &str) -> Result<bool> {
        let tag = self.tag_for(domain)?;
        Ok(self.entries.contains_key(&tag))
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Serialize the keychain and compute its checksum.
    ///
    /// With `include_raw_view`, a copy of the entry map is attached to the
    /// result. It is never part of the checksummed blob.
    pub fn dump(&self, include_raw_view: bool) -> Result<Dump> {
        let blob = format::serialize_blob(&KeychainBlob {
            version: CURRENT_VERSION,
            kdf: self.kdf,
            salt: self.salt.to_vec(),
            check: self.check.clone(),
            entries: self.entries.clone(),
        })?;
        let checksum = checksum::digest(blob.as_bytes());

        tracing::debug!(entries = self.entries.len(), "dumped keychain");

        Ok(Dump {
            blob,
            checksum,
            raw_view: include_raw_view.then(|| self.entries.clone()),
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the keychain holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn tag_for(&self, domain: &str) -> Result<DomainTag> {
        domain_tag(self.keys.tag_key(), domain)
    }
}

/// Log a load failure. Every open failure logs the same event so the
/// log never says which check failed.
fn open_failed(err: KeychainError) -> KeychainError {
    tracing::debug!("keychain could not be opened");
    err
}

impl std::fmt::Debug for Keychain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keychain")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}
