//! `passkeep get` — print the credential stored for a domain.

use crate::cli::{Cli, Context};
use crate::errors::{KeychainError, Result};

/// Execute the `get` command.
pub fn execute(cli: &Cli, domain: &str) -> Result<()> {
    let ctx = Context::from_cli(cli)?;
    let keychain = ctx.open_keychain()?;

    // Decrypt and print the credential to stdout.
    let value = keychain
        .get(domain)?
        .ok_or_else(|| KeychainError::NotFound(domain.to_string()))?;
    println!("{value}");

    Ok(())
}
