//! Keychain module — the encrypted domain → credential store.
//!
//! This module provides:
//! - `DomainTag` and `StoredEntry` types (`entry`)
//! - The canonical, checksummed serialized form (`format`)
//! - The `Keychain` orchestrator with init/load/set/get/remove/dump (`store`)
//! - `KeychainSession`, a lockable owner for one keychain (`session`)

pub mod entry;
pub mod format;
pub mod session;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{DomainTag, StoredEntry};
pub use format::{KeychainBlob, StoredKdfParams};
pub use session::KeychainSession;
pub use store::{Dump, Keychain};
