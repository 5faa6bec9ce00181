//! Tracing subscriber setup for the `passkeep` binary.
//!
//! Library code only emits events; installing a subscriber is left to
//! the binary so embedders keep control of their own logging.

use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise PassKeep logs at `debug` when
/// `verbose` is set and `warn` when it is not. Calling this twice is
/// harmless: the second call leaves the first subscriber in place.
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("passkeep={level},warn")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
