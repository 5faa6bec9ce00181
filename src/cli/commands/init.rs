//! `passkeep init` — create a new, empty keychain.

use crate::cli::output;
use crate::cli::{files, prompt_new_password, Cli, Context};
use crate::errors::{KeychainError, Result};
use crate::keychain::Keychain;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::from_cli(cli)?;

    // 1. Refuse to overwrite an existing keychain.
    if files::keychain_exists(&ctx.dir) {
        output::tip("Use `passkeep set` to add credentials to the existing keychain.");
        return Err(KeychainError::KeychainAlreadyExists(files::blob_path(&ctx.dir)));
    }

    // 2. Prompt for a new password (with confirmation).
    let params = ctx.settings.kdf_params()?;
    let password = prompt_new_password()?;

    // 3. Derive keys and persist the empty keychain.
    let keychain = Keychain::init_with_params(&password, &params)?;
    ctx.save_keychain(&keychain)?;

    output::success(&format!("Keychain created at {}", ctx.dir.display()));
    output::tip("Run `passkeep set <DOMAIN>` to store a credential.");
    output::tip("Keep a copy of keychain.sha256 somewhere the keychain file cannot be overwritten.");

    Ok(())
}
