//! Output error types.

use thiserror::Error;

/// Errors that can occur while writing generated files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create a parent directory.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("Failed to write file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
