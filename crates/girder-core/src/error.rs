//! Error types for parameter and version-file operations.

use std::path::PathBuf;

/// Errors that can occur in the core parameter model.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// I/O error reading a version file.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
