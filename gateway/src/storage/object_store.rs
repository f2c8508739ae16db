use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;

use mammoscan_common::generate_unique_id;

use crate::error::ObjectStoreError;

/// Bucket/key addressed binary storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError>;

    async fn put(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), ObjectStoreError>;
}

/// Object store backed by a local directory, one subdirectory per bucket.
pub struct FsObjectStore {
    base_path: PathBuf,
}

impl FsObjectStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn object_path(&self, bucket: &str, key: &str) -> PathBuf {
        self.base_path.join(bucket).join(key)
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        match fs::read(self.object_path(bucket, key)).await {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(ObjectStoreError::NotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn put(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), ObjectStoreError> {
        let path = self.object_path(bucket, key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write-then-rename so a concurrent reader never sees a partial object.
        let tmp_path = path.with_extension(format!("tmp-{}", generate_unique_id()));
        fs::write(&tmp_path, body).await?;
        fs::rename(&tmp_path, &path).await?;

        Ok(())
    }
}

/// In-memory store for tests and local experimentation.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: RwLock<HashMap<(String, String), Vec<u8>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        self.objects
            .read()
            .await
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| ObjectStoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    async fn put(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), ObjectStoreError> {
        self.objects
            .write()
            .await
            .insert((bucket.to_string(), key.to_string()), body.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn fs_store_round_trips_objects() {
        let dir = TempDir::new().unwrap();
        let store = FsObjectStore::new(dir.path().to_path_buf());

        store
            .put("bucket", "downloaded/original/scan.png", b"bytes")
            .await
            .unwrap();
        let content = store
            .get("bucket", "downloaded/original/scan.png")
            .await
            .unwrap();
        assert_eq!(content, b"bytes");
    }

    #[tokio::test]
    async fn fs_store_reports_missing_objects() {
        let dir = TempDir::new().unwrap();
        let store = FsObjectStore::new(dir.path().to_path_buf());

        let err = store.get("bucket", "missing.png").await.unwrap_err();
        assert!(matches!(err, ObjectStoreError::NotFound { .. }));
    }
}
