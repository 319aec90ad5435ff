//! Object storage access for original media and cached derivatives
//! Backed by the `object_store` crate

use bytes::Bytes;
use object_store::{ObjectStore, local::LocalFileSystem, memory::InMemory, path::Path as StoragePath};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{StorageConfig, StorageProvider};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to prepare storage root {path}: {source}")]
    Root {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Object store error: {0}")]
    ObjectStoreError(#[from] object_store::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage client wrapping object_store
#[derive(Clone, Debug)]
pub struct StorageClient {
    store: Arc<dyn ObjectStore>,
    pub name: String,
}

impl StorageClient {
    pub fn new(store: Arc<dyn ObjectStore>, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
        }
    }

    /// In-memory storage for tests and local development
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()), "memory")
    }

    /// Filesystem storage rooted at `root`, created if missing
    pub fn local(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        std::fs::create_dir_all(root).map_err(|source| StorageError::Root {
            path: root.display().to_string(),
            source,
        })?;

        let store = LocalFileSystem::new_with_prefix(root)?;
        Ok(Self::new(Arc::new(store), root.display().to_string()))
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        match config.provider {
            StorageProvider::Local => Self::local(&config.root),
            StorageProvider::Memory => Ok(Self::in_memory()),
        }
    }

    /// Write `data` under `key`, replacing any existing object in one put
    pub async fn upload(&self, key: &str, data: Bytes) -> Result<usize> {
        let path = StoragePath::from(key);
        let size = data.len();

        self.store.put(&path, data.into()).await?;

        tracing::info!(key, size, store = %self.name, "Uploaded to storage");
        Ok(size)
    }

    pub async fn download(&self, key: &str) -> Result<Bytes> {
        let path = StoragePath::from(key);

        let result = match self.store.get(&path).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => {
                return Err(StorageError::NotFound(key.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let bytes = result.bytes().await?;
        tracing::debug!(key, size = bytes.len(), store = %self.name, "Downloaded from storage");

        Ok(bytes)
    }

    pub async fn exists(&self, key: &str) -> Result<bool> {
        let path = StoragePath::from(key);

        match self.store.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Size in bytes of the object at `key`
    pub async fn size(&self, key: &str) -> Result<u64> {
        let path = StoragePath::from(key);

        match self.store.head(&path).await {
            Ok(meta) => Ok(meta.size as u64),
            Err(object_store::Error::NotFound { .. }) => Err(StorageError::NotFound(key.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_upload_then_download() {
        let storage = StorageClient::in_memory();
        storage
            .upload("media/a.txt", Bytes::from_static(b"hello"))
            .await
            .unwrap();

        assert!(storage.exists("media/a.txt").await.unwrap());
        assert_eq!(storage.size("media/a.txt").await.unwrap(), 5);
        assert_eq!(
            storage.download("media/a.txt").await.unwrap(),
            Bytes::from_static(b"hello")
        );
    }

    #[tokio::test]
    async fn test_missing_object() {
        let storage = StorageClient::in_memory();

        assert!(!storage.exists("missing").await.unwrap());
        assert!(matches!(
            storage.download("missing").await,
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            storage.size("missing").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_local_storage_creates_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("media");

        let storage = StorageClient::local(&root).unwrap();
        storage
            .upload("cache/thumb/x.jpg", Bytes::from_static(b"jpeg"))
            .await
            .unwrap();

        assert!(root.join("cache/thumb/x.jpg").exists());
    }
}
