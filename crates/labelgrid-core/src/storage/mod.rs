//! Sheet document persistence.
//!
//! The editor itself never touches disk; a [`Storage`] backend moves
//! [`SheetDocument`]s in and out by name.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::document::SheetDocument;
use crate::error::EditorError;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

impl From<EditorError> for StorageError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::MalformedDocument(msg) => StorageError::Serialization(msg),
            other => StorageError::Other(other.to_string()),
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future returned by storage backends.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A place to keep named sheet documents.
pub trait Storage: Send + Sync {
    /// Save a document under `id`, replacing any previous one.
    fn save(&self, id: &str, document: &SheetDocument) -> BoxFuture<'_, StorageResult<()>>;

    /// Load the document saved under `id`.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<SheetDocument>>;

    /// Delete a document. Deleting a missing id is not an error.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// All stored ids, sorted.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a document exists.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_document_maps_to_serialization() {
        let err = StorageError::from(EditorError::MalformedDocument("eof".into()));
        assert!(matches!(err, StorageError::Serialization(ref m) if m == "eof"));
        let err = StorageError::from(EditorError::NoSelection);
        assert!(matches!(err, StorageError::Other(_)));
    }
}
