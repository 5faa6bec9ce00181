//! On-disk location of the keychain used by the CLI.
//!
//! The core only produces and consumes `(blob, checksum)` strings; the
//! CLI keeps them as two files in the keychain directory:
//!
//! ```text
//! <keychain_dir>/keychain.json     serialized keychain
//! <keychain_dir>/keychain.sha256   hex SHA-256 of keychain.json
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::settings::{BLOB_FILE, CHECKSUM_FILE};
use crate::errors::{KeychainError, Result};

/// Path of the serialized keychain inside `dir`.
pub fn blob_path(dir: &Path) -> PathBuf {
    dir.join(BLOB_FILE)
}

/// Path of the checksum file inside `dir`.
pub fn checksum_path(dir: &Path) -> PathBuf {
    dir.join(CHECKSUM_FILE)
}

/// Returns `true` if a keychain blob already exists in `dir`.
pub fn keychain_exists(dir: &Path) -> bool {
    blob_path(dir).exists()
}

/// Read the blob and checksum exactly as stored.
pub fn read_keychain(dir: &Path) -> Result<(String, String)> {
    let blob_path = blob_path(dir);
    if !blob_path.exists() {
        return Err(KeychainError::KeychainNotFound(blob_path));
    }
    let blob = fs::read_to_string(&blob_path)?;

    let checksum_path = checksum_path(dir);
    if !checksum_path.exists() {
        return Err(KeychainError::KeychainNotFound(checksum_path));
    }
    let checksum = fs::read_to_string(&checksum_path)?;

    Ok((blob, checksum.trim().to_string()))
}

/// Write the blob and checksum **atomically**, each via temp file + rename.
///
/// The blob is renamed into place before the checksum; an interrupted
/// write therefore leaves a mismatch that `load` reports, never a
/// silently mixed state.
pub fn write_keychain(dir: &Path, blob: &str, checksum: &str) -> Result<()> {
    fs::create_dir_all(dir)?;
    write_atomic(&blob_path(dir), blob.as_bytes())?;
    write_atomic(&checksum_path(dir), format!("{checksum}\n").as_bytes())?;
    Ok(())
}

/// Write to a temp file in the same directory, then rename over `path`.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    // Owner-only access on Unix, from the moment the file exists.
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    // A stale temp file from an interrupted write keeps its old mode.
    match fs::remove_file(&tmp_path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
        _ => {}
    }

    let mut file = options.open(&tmp_path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);

    fs::rename(&tmp_path, path)?;
    Ok(())
}
