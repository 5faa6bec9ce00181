//! `KeychainSession`: an owned, lockable slot for at most one keychain.
//!
//! A front end holds one session per user and passes it by reference to
//! whatever needs the keychain. The session starts uninitialized; every
//! entry operation fails with `NotInitialized` until `init` or `load`
//! succeeds.
//!
//! Reads (`get`, `dump`, `len`) share a read lock and may run
//! concurrently. Mutations (`init`, `load`, `set`, `remove`, `close`)
//! take the write lock and exclude each other and all readers.

use parking_lot::RwLock;

use crate::crypto::kdf::KdfParams;
use crate::errors::{KeychainError, Result};

use super::store::{Dump, Keychain};

pub struct KeychainSession {
    params: KdfParams,
    inner: RwLock<Option<Keychain>>,
}

impl Default for KeychainSession {
    fn default() -> Self {
        Self::new(KdfParams::default())
    }
}

impl KeychainSession {
    /// Create an uninitialized session using `params` for key derivation.
    pub fn new(params: KdfParams) -> Self {
        Self {
            params,
            inner: RwLock::new(None),
        }
    }

    /// Returns `true` once `init` or `load` has succeeded.
    pub fn is_active(&self) -> bool {
        self.inner.read().is_some()
    }

    /// Replace the session's keychain with a new, empty one.
    pub fn init(&self, password: &str) -> Result<()> {
        let keychain = Keychain::init_with_params(password, &self.params)?;
        *self.inner.write() = Some(keychain);
        Ok(())
    }

    /// Replace the session's keychain with one restored from a dump.
    ///
    /// The keychain is fully loaded before the swap, so on failure the
    /// session keeps whatever state it had before.
    pub fn load(&self, password: &str, blob: &str, checksum: &str) -> Result<()> {
        let keychain = Keychain::load_with_params(password, blob, checksum, &self.params)?;
        *self.inner.write() = Some(keychain);
        Ok(())
    }

    pub fn set(&self, domain: &str, value: &str) -> Result<()> {
        self.inner
            .write()
            .as_mut()
            .ok_or(KeychainError::NotInitialized)?
            .set(domain, value)
    }

    pub fn get(&self, domain: &str) -> Result<Option<String>> {
        self.inner
            .read()
            .as_ref()
            .ok_or(KeychainError::NotInitialized)?
            .get(domain)
    }

    pub fn remove(&self, domain: &str) -> Result<bool> {
        self.inner
            .write()
            .as_mut()
            .ok_or(KeychainError::NotInitialized)?
            .remove(domain)
    }

    pub fn dump(&self, include_raw_view: bool) -> Result<Dump> {
        self.inner
            .read()
            .as_ref()
            .ok_or(KeychainError::NotInitialized)?
            .dump(include_raw_view)
    }

    /// Number of entries in the active keychain.
    pub fn len(&self) -> Result<usize> {
        Ok(self
            .inner
            .read()
            .as_ref()
            .ok_or(KeychainError::NotInitialized)?
            .len())
    }

    /// Drop the active keychain (and its keys), returning to uninitialized.
    pub fn close(&self) {
        *self.inner.write() = None;
    }
}
