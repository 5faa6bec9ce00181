//! `passkeep verify` — check the stored keychain against its checksum.
//!
//! Needs no password: only the unkeyed checksum is recomputed.

use crate::cli::output;
use crate::cli::{files, Cli, Context};
use crate::crypto::checksum;
use crate::errors::{KeychainError, Result};

/// Execute the `verify` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::from_cli(cli)?;
    let (blob, expected) = files::read_keychain(&ctx.dir)?;

    if !checksum::verify(blob.as_bytes(), &expected) {
        return Err(KeychainError::CommandFailed(
            "keychain does not match its checksum".into(),
        ));
    }

    output::success("Keychain checksum OK");
    Ok(())
}
