//! In-memory storage.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::document::SheetDocument;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Keeps serialized documents in a map, for tests and throwaway sessions.
///
/// Documents are stored as JSON so a load goes through the same parsing and
/// validation as a file would.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    documents: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw JSON under `id` without validating it.
    pub fn insert_raw(&self, id: &str, json: impl Into<String>) -> StorageResult<()> {
        self.write()?.insert(id.to_string(), json.into());
        Ok(())
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, BTreeMap<String, String>>> {
        self.documents
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, BTreeMap<String, String>>> {
        self.documents
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, document: &SheetDocument) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let json = document.to_json();
        Box::pin(async move {
            let json = json.map_err(|e| StorageError::Serialization(e.to_string()))?;
            self.write()?.insert(id, json);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<SheetDocument>> {
        let id = id.to_string();
        Box::pin(async move {
            let json = self
                .read()?
                .get(&id)
                .cloned()
                .ok_or(StorageError::NotFound(id))?;
            Ok(SheetDocument::from_json(&json)?)
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            self.write()?.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move { Ok(self.read()?.keys().cloned().collect()) })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move { Ok(self.read()?.contains_key(&id)) })
    }
}
