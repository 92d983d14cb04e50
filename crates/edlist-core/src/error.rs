//! Error types for edlist.
//!
//! The component model itself has no error channel: unparseable dates become
//! the invalid date. Errors only arise around it, when loading configuration.
//! Binaries wrap these in `anyhow`.

use std::path::PathBuf;

use thiserror::Error;

/// A configuration file could not be read or parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{}{}", path_prefix(.path.as_deref()), .message)]
pub struct ConfigError {
    /// The file, when the error came from [`EdlistConfig::load`](crate::EdlistConfig::load).
    pub path: Option<PathBuf>,
    /// Human-readable description, prefixed with a line number when known.
    pub message: String,
}

fn path_prefix(path: Option<&std::path::Path>) -> String {
    path.map(|p| format!("{}: ", p.display())).unwrap_or_default()
}
