//! Error types for the reconciliation engine.
//!
//! Absence (a missing source document, a missing or corrupt snapshot) is
//! never an error here; it is modeled as `Option` at the call sites that
//! can encounter it. The variants below cover the genuinely fallible
//! operations: snapshot file I/O and serialization.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for fallible engine operations.
#[derive(Error, Debug)]
pub enum SyncError {
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

/// Extension trait for I/O Results to attach the offending path.
pub trait FsResultExt<T> {
    /// Map an I/O error into a [`SyncError::FileSystem`] carrying `path`.
    fn fs_context(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> FsResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| SyncError::FileSystem {
            path: path.into(),
            source,
        })
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, SyncError>;
