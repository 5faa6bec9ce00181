//! One module per subcommand, each exposing `execute`.

pub mod dump;
pub mod get;
pub mod init;
pub mod remove;
pub mod set;
pub mod verify;
