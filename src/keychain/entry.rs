//! `DomainTag` and `StoredEntry`, the typed key and value of the entry map.
//!
//! Byte fields serialize as base64 strings and tags as lowercase hex so
//! the blob stays readable JSON. Hex preserves byte order, so a
//! `BTreeMap<DomainTag, _>` serializes in the same order it iterates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::format::{base64_decode, base64_encode};
use crate::errors::KeychainError;

/// Length of a domain tag in bytes (HMAC-SHA256 output).
pub const TAG_LEN: usize = 32;

/// Keyed-hash lookup key for one domain.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DomainTag([u8; TAG_LEN]);

impl DomainTag {
    pub fn from_bytes(bytes: [u8; TAG_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; TAG_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for DomainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DomainTag({})", self.to_hex())
    }
}

impl fmt::Display for DomainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for DomainTag {
    type Err = KeychainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; TAG_LEN];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| KeychainError::InvalidInput(format!("bad domain tag '{s}': {e}")))?;
        Ok(Self(bytes))
    }
}

impl Serialize for DomainTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for DomainTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One sealed credential: AES-GCM nonce, ciphertext and auth tag.
///
/// The ciphertext always covers a fixed-size padded block, so every
/// entry in a keychain has the same length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoredEntry {
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub iv: Vec<u8>,

    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub ciphertext: Vec<u8>,

    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub auth_tag: Vec<u8>,
}
