//! Cryptographic primitives for PassKeep.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 password stretching (`kdf`)
//! - HKDF-based entry key and tag key derivation (`keys`)
//! - HMAC-SHA256 domain tags (`tagging`)
//! - Padded AES-256-GCM sealing of credential values (`encryption`)
//! - SHA-256 checksums over serialized keychains (`checksum`)

pub mod checksum;
pub mod encryption;
pub mod kdf;
pub mod keys;
pub mod tagging;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, derive_keys, ...};
pub use encryption::{open, seal, MAX_VALUE_LEN};
pub use kdf::{generate_salt, stretch_password, KdfParams, SALT_LEN};
pub use keys::{derive_keys, KeychainKeys};
pub use tagging::domain_tag;
