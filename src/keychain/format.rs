//! Canonical serialized keychain and its parser.
//!
//! A dump is a compact JSON document:
//!
//! ```text
//! {"version":1,"kdf":{"iterations":100000},"salt":"<b64>","check":{..},"entries":{"<hex tag>":{"iv":..,"ciphertext":..,"auth_tag":..},..}}
//! ```
//!
//! - **version**: format version (currently `1`).
//! - **kdf**: the PBKDF2 iteration count the keychain was created with.
//! - **salt**: the PBKDF2 salt, fixed for the keychain's lifetime.
//! - **check**: the empty value sealed under the entry key; opening it
//!   proves the password even when there are no entries.
//! - **entries**: tag -> sealed entry, ordered by tag.
//!
//! Field order is fixed by the struct and entry order by the `BTreeMap`,
//! so the same keychain state always serializes to the same bytes and
//! therefore the same checksum.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entry::{DomainTag, StoredEntry};
use crate::crypto::kdf::KdfParams;
use crate::errors::{KeychainError, Result};

/// Current blob format version.
pub const CURRENT_VERSION: u8 = 1;

/// PBKDF2 parameters recorded in the blob.
///
/// Only compared against the configured parameters on load, never used
/// to derive keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoredKdfParams {
    pub iterations: u32,
}

impl From<&KdfParams> for StoredKdfParams {
    fn from(params: &KdfParams) -> Self {
        Self {
            iterations: params.iterations,
        }
    }
}

/// The exact structure covered by the checksum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeychainBlob {
    pub version: u8,

    pub kdf: StoredKdfParams,

    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    pub check: StoredEntry,

    pub entries: BTreeMap<DomainTag, StoredEntry>,
}

/// Serialize a blob to its canonical text form.
pub fn serialize_blob(blob: &KeychainBlob) -> Result<String> {
    serde_json::to_string(blob)
        .map_err(|e| KeychainError::SerializationError(format!("keychain blob: {e}")))
}

/// Parse a blob whose checksum has already been verified.
///
/// Malformed JSON and unknown versions are reported as
/// `WrongPasswordOrCorruptData`, like any other unreadable keychain.
pub fn parse_blob(text: &str) -> Result<KeychainBlob> {
    let blob: KeychainBlob =
        serde_json::from_str(text).map_err(|_| KeychainError::WrongPasswordOrCorruptData)?;

    if blob.version != CURRENT_VERSION {
        return Err(KeychainError::WrongPasswordOrCorruptData);
    }

    Ok(blob)
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(byte: u8) -> StoredEntry {
        StoredEntry {
            iv: vec![byte; 12],
            ciphertext: vec![byte; 65],
            auth_tag: vec![byte; 16],
        }
    }

    fn sample_blob() -> KeychainBlob {
        let mut entries = BTreeMap::new();
        entries.insert(DomainTag::from_bytes([0xEE; 32]), entry(2));
        entries.insert(DomainTag::from_bytes([0x11; 32]), entry(3));
        KeychainBlob {
            version: CURRENT_VERSION,
            kdf: StoredKdfParams { iterations: 100_000 },
            salt: vec![5; 16],
            check: entry(1),
            entries,
        }
    }

    #[test]
    fn serialized_fields_are_in_canonical_order() {
        let text = serialize_blob(&sample_blob()).unwrap();
        let version = text.find("\"version\"").unwrap();
        let kdf = text.find("\"kdf\"").unwrap();
        let salt = text.find("\"salt\"").unwrap();
        let check = text.find("\"check\"").unwrap();
        let entries = text.find("\"entries\"").unwrap();
        assert!(version < kdf && kdf < salt && salt < check && check < entries);

        let low = text.find(&"11".repeat(32)).unwrap();
        let high = text.find(&"ee".repeat(32)).unwrap();
        assert!(low < high, "entries must be ordered by tag");
    }

    #[test]
    fn parse_accepts_own_output() {
        let blob = sample_blob();
        let parsed = parse_blob(&serialize_blob(&blob).unwrap()).unwrap();
        assert_eq!(parsed, blob);
    }

    #[test]
    fn parse_rejects_unknown_fields() {
        let mut value: serde_json::Value =
            serde_json::from_str(&serialize_blob(&sample_blob()).unwrap()).unwrap();
        value["raw"] = serde_json::json!({});
        let result = parse_blob(&value.to_string());
        assert!(matches!(result, Err(KeychainError::WrongPasswordOrCorruptData)));
    }

    #[test]
    fn parse_rejects_future_version() {
        let mut blob = sample_blob();
        blob.version = CURRENT_VERSION + 1;
        let result = parse_blob(&serialize_blob(&blob).unwrap());
        assert!(matches!(result, Err(KeychainError::WrongPasswordOrCorruptData)));
    }

    #[test]
    fn parse_rejects_non_json() {
        assert!(matches!(
            parse_blob("not json"),
            Err(KeychainError::WrongPasswordOrCorruptData)
        ));
    }
}
