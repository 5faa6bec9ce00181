//! CLI module — Clap argument parser, output helpers, and command implementations.
//!
//! The CLI is a thin front end over the core: it decides where the
//! serialized keychain and its checksum live on disk, reads the master
//! password, and maps core errors to user-facing messages.

pub mod commands;
pub mod files;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{KeychainError, Result};
use crate::keychain::Keychain;

/// Minimum password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable consulted before prompting for the password.
pub const PASSWORD_ENV: &str = "PASSKEEP_PASSWORD";

/// PassKeep CLI: password-protected credential keychain.
#[derive(Parser)]
#[command(
    name = "passkeep",
    about = "Password-protected credential keychain",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Keychain directory (overrides `keychain_dir` in .passkeep.toml)
    #[arg(long, global = true)]
    pub keychain_dir: Option<String>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty keychain
    Init,

    /// Store a credential for a domain (add or replace)
    Set {
        /// Domain or URL (e.g. mail.com)
        domain: String,
        /// Credential value (omit for interactive prompt)
        value: Option<String>,
    },

    /// Print the credential stored for a domain
    Get {
        /// Domain or URL
        domain: String,
    },

    /// Remove the credential stored for a domain
    Remove {
        /// Domain or URL
        domain: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Print the serialized keychain and its checksum
    Dump {
        /// Also print the tag -> entry map (outside the checksum)
        #[arg(long)]
        raw: bool,
    },

    /// Check the stored keychain against its checksum (no password needed)
    Verify,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Everything a command needs to locate and open the keychain.
pub struct Context {
    pub settings: Settings,
    pub dir: PathBuf,
}

impl Context {
    /// Load `.passkeep.toml` from the working directory and resolve the
    /// keychain directory (the `--keychain-dir` flag wins).
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let mut settings = Settings::load(&cwd)?;
        if let Some(dir) = &cli.keychain_dir {
            settings.keychain_dir.clone_from(dir);
        }
        let dir = settings.resolve_keychain_dir(&cwd);
        Ok(Self { settings, dir })
    }

    /// Read the stored keychain and open it with the user's password.
    pub fn open_keychain(&self) -> Result<Keychain> {
        let (blob, checksum) = files::read_keychain(&self.dir)?;
        let params = self.settings.kdf_params()?;
        let password = prompt_password()?;
        Keychain::load_with_params(&password, &blob, &checksum, &params)
    }

    /// Dump `keychain` and write it back to the keychain directory.
    pub fn save_keychain(&self, keychain: &Keychain) -> Result<()> {
        let dump = keychain.dump(false)?;
        files::write_keychain(&self.dir, &dump.blob, &dump.checksum)
    }
}

/// Get the master password, trying in order:
/// 1. `PASSKEEP_PASSWORD` env var (scripts/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| KeychainError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used during `init`).
///
/// Also respects `PASSKEEP_PASSWORD` for scripted usage.
/// Enforces a minimum password length.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        validate_new_password(&pw)?;
        return Ok(pw);
    }

    loop {
        let password = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Choose master password")
                .with_confirmation(
                    "Confirm master password",
                    "Passwords do not match, try again",
                )
                .interact()
                .map_err(|e| KeychainError::CommandFailed(format!("password prompt: {e}")))?,
        );

        if let Err(e) = validate_new_password(&password) {
            output::warning(&format!("{e}. Try again."));
            continue;
        }

        return Ok(password);
    }
}

fn password_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

/// Reject passwords shorter than `MIN_PASSWORD_LEN` characters.
pub fn validate_new_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(KeychainError::InvalidInput(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Message shown to the user for an error.
///
/// Checksum and authentication failures collapse into one message so
/// the output never says which check failed.
pub fn user_message(err: &KeychainError) -> String {
    if err.is_open_failure() {
        "Cannot open keychain: wrong password or damaged keychain files".to_string()
    } else {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_passwords_rejected() {
        assert!(validate_new_password("short").is_err());
        assert!(validate_new_password("").is_err());
    }

    #[test]
    fn long_enough_passwords_accepted() {
        assert!(validate_new_password("correct horse").is_ok());
        assert!(validate_new_password("12345678").is_ok());
    }

    #[test]
    fn open_failures_share_one_message() {
        assert_eq!(
            user_message(&KeychainError::IntegrityError),
            user_message(&KeychainError::WrongPasswordOrCorruptData)
        );
    }

    #[test]
    fn other_errors_keep_their_message() {
        let msg = user_message(&KeychainError::NotFound("mail.com".into()));
        assert!(msg.contains("mail.com"));
    }
}
