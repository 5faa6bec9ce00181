//! SHA-256 checksum over the serialized keychain.
//!
//! The checksum is returned next to the blob rather than inside it.
//! It only detects tampering if the caller keeps it somewhere an
//! attacker cannot also overwrite; a consistent older (blob, checksum)
//! pair is indistinguishable from the current one.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Length of the raw digest in bytes.
pub const CHECKSUM_LEN: usize = 32;

/// Compute the lowercase hex SHA-256 digest of `bytes`.
pub fn digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Check `bytes` against a hex checksum in constant time.
///
/// A malformed `expected` value (wrong length, not hex) is a mismatch.
pub fn verify(bytes: &[u8], expected: &str) -> bool {
    let mut expected_bytes = [0u8; CHECKSUM_LEN];
    if hex::decode_to_slice(expected.trim(), &mut expected_bytes).is_err() {
        return false;
    }
    let actual = Sha256::digest(bytes);
    actual.as_slice().ct_eq(&expected_bytes).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_matches_known_vector() {
        assert_eq!(
            digest(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn verify_accepts_uppercase_and_whitespace() {
        let sum = digest(b"payload").to_uppercase();
        assert!(verify(b"payload", &format!("{sum}\n")));
    }

    #[test]
    fn verify_rejects_garbage() {
        assert!(!verify(b"payload", "not-hex"));
        assert!(!verify(b"payload", ""));
        assert!(!verify(b"payload", &digest(b"payload")[..10]));
    }
}
