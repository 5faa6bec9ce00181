//! `passkeep dump` — print the serialized keychain and its checksum.
//!
//! Output is JSON on stdout so it can be redirected into a backup:
//! `{"blob": "...", "checksum": "...", "raw_view": {...}}`. The blob is
//! re-serialized from the opened keychain, so a successful dump also
//! proves the password and the stored files are intact.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::cli::{Cli, Context};
use crate::errors::{KeychainError, Result};
use crate::keychain::{DomainTag, StoredEntry};

#[derive(Serialize)]
struct DumpOutput<'a> {
    blob: &'a str,
    checksum: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_view: Option<&'a BTreeMap<DomainTag, StoredEntry>>,
}

/// Execute the `dump` command.
pub fn execute(cli: &Cli, raw: bool) -> Result<()> {
    let ctx = Context::from_cli(cli)?;
    let keychain = ctx.open_keychain()?;
    let dump = keychain.dump(raw)?;

    let out = DumpOutput {
        blob: &dump.blob,
        checksum: &dump.checksum,
        raw_view: dump.raw_view.as_ref(),
    };
    let json = serde_json::to_string_pretty(&out)
        .map_err(|e| KeychainError::SerializationError(format!("dump output: {e}")))?;
    println!("{json}");

    Ok(())
}
