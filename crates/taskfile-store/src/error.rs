//! Error types for task file persistence.

use std::path::PathBuf;
use taskfile_xml::WriteError;
use thiserror::Error;

/// Errors that can occur while saving task files.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Serializing the document failed.
    #[error("Failed to write document: {0}")]
    Write(#[from] WriteError),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The finished temporary file could not replace the target.
    #[error("Failed to replace {}: {source}", path.display())]
    Persist {
        /// Target path.
        path: PathBuf,
        /// Rename failure.
        #[source]
        source: std::io::Error,
    },

    /// Target path does not name a file.
    #[error("Path has no file name: {}", .0.display())]
    MissingFileName(PathBuf),
}
