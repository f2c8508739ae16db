use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::ParameterStoreError;

/// Well-known key the pipeline publishes the live endpoint identity under.
pub const ENDPOINT_PARAMETER: &str = "classification-endpoint";

/// Well-known key the gateway publishes its resize URL under.
pub const RESIZE_ENDPOINT_PARAMETER: &str = "resize-img-endpoint";

/// Durable key/value registry used to publish and discover endpoint
/// addresses across deployment boundaries.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    async fn get(&self, name: &str) -> Result<Option<String>, ParameterStoreError>;

    async fn put(&self, name: &str, value: &str) -> Result<(), ParameterStoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryParameterStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryParameterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParameterStore for InMemoryParameterStore {
    async fn get(&self, name: &str) -> Result<Option<String>, ParameterStoreError> {
        Ok(self.values.read().await.get(name).cloned())
    }

    async fn put(&self, name: &str, value: &str) -> Result<(), ParameterStoreError> {
        self.values
            .write()
            .await
            .insert(name.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = InMemoryParameterStore::new();

        assert_eq!(store.get(ENDPOINT_PARAMETER).await.unwrap(), None);

        store
            .put(ENDPOINT_PARAMETER, "arn:endpoint/mammography-classification-endpoint")
            .await
            .unwrap();
        assert_eq!(
            store.get(ENDPOINT_PARAMETER).await.unwrap().as_deref(),
            Some("arn:endpoint/mammography-classification-endpoint")
        );
    }
}
