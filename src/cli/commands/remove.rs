//! `passkeep remove` — delete the credential stored for a domain.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{KeychainError, Result};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, domain: &str, force: bool) -> Result<()> {
    let ctx = Context::from_cli(cli)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove credential for '{domain}'?"))
            .default(false)
            .interact()
            .map_err(|e| KeychainError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let mut keychain = ctx.open_keychain()?;

    if !keychain.remove(domain)? {
        return Err(KeychainError::NotFound(domain.to_string()));
    }
    ctx.save_keychain(&keychain)?;

    output::success(&format!("Removed credential for '{domain}'"));

    Ok(())
}
