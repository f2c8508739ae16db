use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use mammoscan_pipeline::{ParameterStore, ParameterStoreError};

/// Parameter store persisted as a single JSON document on disk, shared by
/// every process on the host that points at the same file.
pub struct FileParameterStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileParameterStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<HashMap<String, String>, ParameterStoreError> {
        match fs::read(&self.path).await {
            Ok(content) => Ok(serde_json::from_slice(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl ParameterStore for FileParameterStore {
    async fn get(&self, name: &str) -> Result<Option<String>, ParameterStoreError> {
        Ok(self.load().await?.get(name).cloned())
    }

    async fn put(&self, name: &str, value: &str) -> Result<(), ParameterStoreError> {
        let _guard = self.write_lock.lock().await;

        let mut values = self.load().await?;
        values.insert(name.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&values)?).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn parameters_survive_reopening_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("parameters.json");

        let store = FileParameterStore::new(path.clone());
        store.put("classification-endpoint", "arn:endpoint/a").await.unwrap();
        store.put("resize-img-endpoint", "http://host/resize").await.unwrap();

        let reopened = FileParameterStore::new(path);
        assert_eq!(
            reopened.get("classification-endpoint").await.unwrap().as_deref(),
            Some("arn:endpoint/a")
        );
        assert_eq!(
            reopened.get("resize-img-endpoint").await.unwrap().as_deref(),
            Some("http://host/resize")
        );
        assert_eq!(reopened.get("unknown").await.unwrap(), None);
    }
}
