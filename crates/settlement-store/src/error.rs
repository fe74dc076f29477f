//! Error types for the storage layer.
//!
//! Only saves can fail. Loads degrade to an empty collection and log why.

use std::path::PathBuf;

/// Errors that can occur when persisting a collection.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Writing the collection file (or creating its directory) failed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// The file or directory being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The collection could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
