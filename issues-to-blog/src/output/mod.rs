//! Generated files and writing them into the working tree.

mod error;

pub use error::OutputError;

use std::path::{Path, PathBuf};
use tracing::debug;

/// A rendered file, addressed relative to the working tree root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Path relative to the working tree root.
    pub path: PathBuf,

    /// Complete file contents.
    pub contents: String,
}

impl RenderedFile {
    /// Creates a rendered file.
    pub fn new(path: PathBuf, contents: String) -> Self {
        Self { path, contents }
    }

    /// Writes the file below `root`, creating parent directories.
    ///
    /// An existing file is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] if a directory or the file cannot be written.
    pub fn write(&self, root: &Path) -> Result<PathBuf, OutputError> {
        let target = root.join(&self.path);

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| OutputError::CreateDir {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        std::fs::write(&target, &self.contents).map_err(|e| OutputError::Write {
            path: target.display().to_string(),
            source: e,
        })?;

        debug!(path = %target.display(), bytes = self.contents.len(), "Wrote file");
        Ok(target)
    }
}
