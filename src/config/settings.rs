use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{KdfParams, MIN_ITERATIONS};
use crate::errors::{KeychainError, Result};

/// File name of the serialized keychain inside the keychain directory.
pub const BLOB_FILE: &str = "keychain.json";

/// File name of the checksum inside the keychain directory.
pub const CHECKSUM_FILE: &str = "keychain.sha256";

/// Project-level configuration, loaded from `.passkeep.toml`.
///
/// Every field has a sensible default so PassKeep works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) holding the keychain.
    #[serde(default = "default_keychain_dir")]
    pub keychain_dir: String,

    /// PBKDF2 iteration count (default and minimum: 100 000).
    ///
    /// Must match the count recorded in the keychain when it was created;
    /// a mismatch is reported as a config error on load.
    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_keychain_dir() -> String {
    ".passkeep".to_string()
}

fn default_pbkdf2_iterations() -> u32 {
    MIN_ITERATIONS
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            keychain_dir: default_keychain_dir(),
            pbkdf2_iterations: default_pbkdf2_iterations(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".passkeep.toml";

    /// Load settings from `<project_dir>/.passkeep.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            KeychainError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        tracing::debug!(path = %config_path.display(), "loaded settings");

        Ok(settings)
    }

    /// Directory holding the keychain files, resolved against `project_dir`.
    ///
    /// An absolute `keychain_dir` is used as is.
    pub fn resolve_keychain_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.keychain_dir)
    }

    /// Convert the PBKDF2 settings into crypto-layer params, enforcing
    /// the iteration floor.
    pub fn kdf_params(&self) -> Result<KdfParams> {
        let params = KdfParams {
            iterations: self.pbkdf2_iterations,
        };
        params
            .validate()
            .map_err(|e| KeychainError::ConfigError(e.to_string()))?;
        Ok(params)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
