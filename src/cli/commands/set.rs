//! `passkeep set` — add or replace the credential for a domain.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{KeychainError, Result};

/// Execute the `set` command.
pub fn execute(cli: &Cli, domain: &str, value: Option<&str>) -> Result<()> {
    let ctx = Context::from_cli(cli)?;

    // Determine the credential from one of three sources.
    let credential = Zeroizing::new(if let Some(v) = value {
        // Source 1: Inline value on the command line.
        output::warning("Value provided on command line — it may appear in shell history.");
        v.to_string()
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        strip_line_ending(&buf).to_string()
    } else {
        // Source 3: Interactive secure prompt (default).
        dialoguer::Password::new()
            .with_prompt(format!("Enter credential for {domain}"))
            .interact()
            .map_err(|e| KeychainError::CommandFailed(format!("input prompt: {e}")))?
    });

    // Open the keychain, set the credential, and save.
    let mut keychain = ctx.open_keychain()?;
    let existed = keychain.contains(domain)?;
    keychain.set(domain, &credential)?;
    ctx.save_keychain(&keychain)?;

    let verb = if existed { "updated" } else { "added" };
    output::success(&format!(
        "Credential for '{domain}' {verb} ({} total)",
        keychain.len()
    ));

    Ok(())
}

/// Drop one trailing `\n` or `\r\n`; everything else is part of the value.
fn strip_line_ending(input: &str) -> &str {
    input
        .strip_suffix("\r\n")
        .or_else(|| input.strip_suffix('\n'))
        .unwrap_or(input)
}
