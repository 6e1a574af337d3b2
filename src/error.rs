//! Crate-level error type.

use std::path::PathBuf;

/// Errors surfaced by the editor core and its terminal collaborators.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O operation on the terminal failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file could not be read or written.
    #[error("{path}: {source}")]
    File {
        /// Path the operation was addressed to.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The terminal window size could not be determined.
    #[error("cannot determine terminal window size")]
    WindowSize,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
