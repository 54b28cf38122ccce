use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use super::KvSubstrate;

/// Process-local substrate; contents are lost when the last handle drops.
#[derive(Clone, Debug, Default)]
pub struct MemoryKvStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self { Self::default() }

    /// Namespaces currently holding a value.
    pub async fn namespaces(&self) -> Vec<String> {
        let map = self.inner.read().await;
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl KvSubstrate for MemoryKvStore {
    async fn get(&self, namespace: &str) -> Result<Option<String>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.get(namespace).cloned())
    }

    async fn set(&self, namespace: &str, value: String) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        map.insert(namespace.to_string(), value);
        Ok(())
    }

    async fn remove(&self, namespace: &str) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        map.remove(namespace);
        Ok(())
    }
}
