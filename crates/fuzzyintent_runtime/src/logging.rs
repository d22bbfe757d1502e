//! Console logging setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Builds the log filter.
///
/// `debug` forces DEBUG for everything. Otherwise `RUST_LOG` is honored,
/// falling back to INFO.
#[must_use]
pub fn filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Installs the global subscriber, writing to standard error.
///
/// Returns false if a subscriber was already installed.
pub fn init_logging(debug: bool) -> bool {
    tracing_subscriber::registry()
        .with(filter(debug))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .is_ok()
}
