pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod keychain;
pub mod logging;

pub use errors::{KeychainError, Result};
pub use keychain::{Dump, Keychain, KeychainSession};
