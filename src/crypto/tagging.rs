//! Deterministic domain tags using HMAC-SHA256.
//!
//! The tag is the storage key for a domain. It must be deterministic so
//! a domain always resolves to the same slot, and keyed so the serialized
//! keychain does not reveal which domains it holds.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::errors::{KeychainError, Result};
use crate::keychain::entry::{DomainTag, TAG_LEN};

/// Compute the tag for `domain` under `tag_key`.
pub fn domain_tag(tag_key: &[u8], domain: &str) -> Result<DomainTag> {
    if domain.is_empty() {
        return Err(KeychainError::InvalidInput(
            "domain cannot be empty".into(),
        ));
    }

    let mut mac = Hmac::<Sha256>::new_from_slice(tag_key)
        .map_err(|e| KeychainError::InvalidInput(format!("invalid tag key: {e}")))?;
    mac.update(domain.as_bytes());

    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    Ok(DomainTag::from_bytes(tag))
}
