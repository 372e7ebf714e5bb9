//! Whole-document JSON persistence.
//!
//! Every collection is a single JSON document holding the entire data set,
//! read fully into memory and rewritten in full on each mutation. Two
//! concurrent writers to the same collection race read-modify-write and the
//! last write wins; write volume is a single admin user, so no cross-request
//! lock is taken. Individual writes go through a temp file and rename, so a
//! reader never observes a torn document.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Backend holding one opaque document per collection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the full contents of a collection. `None` when the collection
    /// has never been written.
    async fn read(&self, collection: &str) -> Result<Option<String>, StoreError>;

    /// Replace the full contents of a collection.
    async fn write(&self, collection: &str, contents: &str) -> Result<(), StoreError>;
}

/// Typed handle over a [`DocumentStore`] backend.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn DocumentStore>,
}

impl Store {
    pub fn new(backend: Arc<dyn DocumentStore>) -> Self {
        Self { backend }
    }

    /// Store backed by [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::default()))
    }

    pub async fn load<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Option<T>, StoreError> {
        match self.backend.read(collection).await? {
            Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            None => Ok(None),
        }
    }

    pub async fn load_or_default<T: DeserializeOwned + Default>(
        &self,
        collection: &str,
    ) -> Result<T, StoreError> {
        Ok(self.load(collection).await?.unwrap_or_default())
    }

    pub async fn save<T: Serialize>(
        &self,
        collection: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(value)?;
        self.backend.write(collection, &contents).await
    }
}

/// Filesystem backend: one `<collection>.json` file per collection under the
/// data directory.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn read(&self, collection: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.path_for(collection)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, collection: &str, contents: &str) -> Result<(), StoreError> {
        let path = self.path_for(collection);
        let tmp = self.data_dir.join(format!("{collection}.json.tmp"));
        tokio::fs::write(&tmp, contents).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

/// In-memory backend for tests.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read(&self, collection: &str) -> Result<Option<String>, StoreError> {
        Ok(self.documents.read().get(collection).cloned())
    }

    async fn write(&self, collection: &str, contents: &str) -> Result<(), StoreError> {
        self.documents
            .write()
            .insert(collection.to_string(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        tokio_test::block_on(async {
            let store = Store::in_memory();
            assert!(store.load::<Vec<String>>("things").await.unwrap().is_none());

            store
                .save("things", &vec!["a".to_string(), "b".to_string()])
                .await
                .unwrap();

            let loaded: Vec<String> = store.load("things").await.unwrap().unwrap();
            assert_eq!(loaded, vec!["a", "b"]);
        });
    }

    #[test]
    fn file_store_roundtrip_and_missing_collection() {
        tokio_test::block_on(async {
            let dir = tempfile::tempdir().unwrap();
            let store = Store::new(Arc::new(FileStore::new(dir.path())));

            assert!(store.load::<Vec<u32>>("numbers").await.unwrap().is_none());

            store.save("numbers", &vec![1u32, 2, 3]).await.unwrap();
            let loaded: Vec<u32> = store.load("numbers").await.unwrap().unwrap();
            assert_eq!(loaded, vec![1, 2, 3]);

            // A second handle over the same directory sees the write.
            let reopened = Store::new(Arc::new(FileStore::new(dir.path())));
            let loaded: Vec<u32> = reopened.load("numbers").await.unwrap().unwrap();
            assert_eq!(loaded, vec![1, 2, 3]);
        });
    }

    #[test]
    fn file_store_overwrites_whole_document() {
        tokio_test::block_on(async {
            let dir = tempfile::tempdir().unwrap();
            let store = Store::new(Arc::new(FileStore::new(dir.path())));

            store.save("numbers", &vec![1u32, 2, 3]).await.unwrap();
            store.save("numbers", &vec![9u32]).await.unwrap();

            let loaded: Vec<u32> = store.load("numbers").await.unwrap().unwrap();
            assert_eq!(loaded, vec![9]);
        });
    }
}
