use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassKeep.
#[derive(Debug, Error)]
pub enum KeychainError {
    // --- Core errors ---
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Keychain is not initialized — run init or load first")]
    NotInitialized,

    #[error("Checksum mismatch — keychain data may be tampered or rolled back")]
    IntegrityError,

    #[error("Cannot open keychain — wrong password or corrupted data")]
    WrongPasswordOrCorruptData,

    #[error("No entry for '{0}'")]
    NotFound(String),

    // --- Crypto errors ---
    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Keychain already exists at {0}")]
    KeychainAlreadyExists(PathBuf),

    #[error("Keychain not found at {0}")]
    KeychainNotFound(PathBuf),

    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl KeychainError {
    /// True for the two load failures a front end must report with one
    /// shared message, never revealing which check failed.
    pub fn is_open_failure(&self) -> bool {
        matches!(
            self,
            KeychainError::IntegrityError | KeychainError::WrongPasswordOrCorruptData
        )
    }
}

/// Convenience type alias for PassKeep results.
pub type Result<T> = std::result::Result<T, KeychainError>;
