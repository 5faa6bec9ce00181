//! AES-256-GCM sealing of fixed-size padded credential values.
//!
//! Every value is padded to the same block before encryption so the
//! serialized keychain does not leak credential lengths:
//!
//! ```text
//! [len: 1 byte][value: len bytes][zero fill up to MAX_VALUE_LEN]
//! ```
//!
//! Each call to `seal` draws a fresh random 12-byte nonce. The caller's
//! associated data (the entry's domain tag) is authenticated but not
//! stored, so an entry only opens under the slot it was sealed for.

use aes_gcm::aead::{AeadInPlace, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce, Tag};
use zeroize::Zeroizing;

use crate::errors::{KeychainError, Result};
use crate::keychain::entry::StoredEntry;

/// Longest credential value, in bytes, that fits in one padded block.
pub const MAX_VALUE_LEN: usize = 64;

/// Size of the padded plaintext block, and therefore of every ciphertext.
pub const PADDED_LEN: usize = MAX_VALUE_LEN + 1;

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const AUTH_TAG_LEN: usize = 16;

/// Pad `value` into a `PADDED_LEN` block.
pub fn pad_value(value: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    if value.len() > MAX_VALUE_LEN {
        return Err(KeychainError::InvalidInput(format!(
            "value is {} bytes, maximum is {MAX_VALUE_LEN}",
            value.len()
        )));
    }

    let mut block = Zeroizing::new(vec![0u8; PADDED_LEN]);
    // Fits in a u8: MAX_VALUE_LEN < 256.
    block[0] = value.len() as u8;
    block[1..=value.len()].copy_from_slice(value);
    Ok(block)
}

/// Strip the padding added by `pad_value`.
///
/// Returns `None` if the length marker is out of range or the fill is
/// not all zeros.
pub fn unpad_value(block: &[u8]) -> Option<Zeroizing<Vec<u8>>> {
    if block.len() != PADDED_LEN {
        return None;
    }
    let len = usize::from(block[0]);
    if len > MAX_VALUE_LEN {
        return None;
    }
    let (value, fill) = block[1..].split_at(len);
    if fill.iter().any(|&b| b != 0) {
        return None;
    }
    Some(Zeroizing::new(value.to_vec()))
}

/// Pad and encrypt `plaintext` under a 32-byte `key`, binding `aad`.
pub fn seal(key: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<StoredEntry> {
    let mut block = pad_value(plaintext)?;

    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| KeychainError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    // Encrypts the block in place and returns the detached tag.
    let auth_tag = cipher
        .encrypt_in_place_detached(&nonce, aad, block.as_mut_slice())
        .map_err(|e| KeychainError::EncryptionFailed(format!("encryption error: {e}")))?;

    Ok(StoredEntry {
        iv: nonce.to_vec(),
        ciphertext: block.to_vec(),
        auth_tag: auth_tag.to_vec(),
    })
}

/// Decrypt and unpad an entry produced by `seal` with the same `aad`.
///
/// Every failure (wrong key, wrong slot, corrupted bytes, malformed
/// lengths or padding) is reported as `WrongPasswordOrCorruptData`.
pub fn open(key: &[u8], aad: &[u8], entry: &StoredEntry) -> Result<Zeroizing<Vec<u8>>> {
    if entry.iv.len() != NONCE_LEN
        || entry.auth_tag.len() != AUTH_TAG_LEN
        || entry.ciphertext.len() != PADDED_LEN
    {
        return Err(KeychainError::WrongPasswordOrCorruptData);
    }

    let cipher =
        Aes256Gcm::new_from_slice(key).map_err(|_| KeychainError::WrongPasswordOrCorruptData)?;

    let mut block = Zeroizing::new(entry.ciphertext.clone());
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(&entry.iv),
            aad,
            block.as_mut_slice(),
            Tag::from_slice(&entry.auth_tag),
        )
        .map_err(|_| KeychainError::WrongPasswordOrCorruptData)?;

    unpad_value(&block).ok_or(KeychainError::WrongPasswordOrCorruptData)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_and_unpad() {
        let block = pad_value(b"hunter2").unwrap();
        assert_eq!(block.len(), PADDED_LEN);
        assert_eq!(block[0], 7);
        assert_eq!(unpad_value(&block).unwrap().as_slice(), b"hunter2");
    }

    #[test]
    fn pad_accepts_empty_and_max_values() {
        assert_eq!(unpad_value(&pad_value(b"").unwrap()).unwrap().len(), 0);
        let max = vec![b'x'; MAX_VALUE_LEN];
        assert_eq!(unpad_value(&pad_value(&max).unwrap()).unwrap().as_slice(), &max[..]);
    }

    #[test]
    fn pad_rejects_oversized_value() {
        let big = vec![b'x'; MAX_VALUE_LEN + 1];
        assert!(matches!(
            pad_value(&big),
            Err(KeychainError::InvalidInput(_))
        ));
    }

    #[test]
    fn unpad_rejects_dirty_fill() {
        let mut block = pad_value(b"abc").unwrap();
        block[PADDED_LEN - 1] = 1;
        assert!(unpad_value(&block).is_none());
    }

    #[test]
    fn unpad_rejects_bad_marker() {
        let mut block = pad_value(b"abc").unwrap();
        block[0] = (MAX_VALUE_LEN + 1) as u8;
        assert!(unpad_value(&block).is_none());
    }

    #[test]
    fn open_rejects_truncated_fields() {
        let key = [9u8; 32];
        let mut entry = seal(&key, b"aad", b"v").unwrap();
        entry.iv.pop();
        assert!(matches!(
            open(&key, b"aad", &entry),
            Err(KeychainError::WrongPasswordOrCorruptData)
        ));
    }
}
