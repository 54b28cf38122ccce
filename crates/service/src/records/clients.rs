use std::sync::Arc;

use models::client::{Client, ClientInput};

use crate::errors::ServiceError;
use crate::notify::Notifier;
use crate::storage::{Collection, KvSubstrate};
use super::impl_record_collection;

/// Client registry (`clients` namespace).
#[derive(Clone)]
pub struct ClientStore {
    inner: Collection<Client>,
}

impl ClientStore {
    pub fn new(kv: Arc<dyn KvSubstrate>, notifier: Arc<dyn Notifier>) -> Self {
        Self { inner: Collection::new(kv, notifier) }
    }

    pub async fn list(&self) -> Vec<Client> {
        self.inner.list().await
    }

    /// Validate and register a client; returns the stored record with its id.
    pub async fn add(&self, input: ClientInput) -> Result<Client, ServiceError> {
        let client = Client::new(input).map_err(|e| self.inner.report("add", e.into()))?;
        self.inner.add(client).await
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), ServiceError> {
        self.inner.delete_by_id(id).await
    }

    /// Remove every client.
    pub async fn clear(&self) -> Result<(), ServiceError> {
        self.inner.clear().await
    }
}

impl_record_collection!(ClientStore, Client);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::storage::MemoryKvStore;

    fn store() -> (ClientStore, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        (ClientStore::new(Arc::new(MemoryKvStore::new()), notifier.clone()), notifier)
    }

    #[tokio::test]
    async fn client_store_crud() -> Result<(), anyhow::Error> {
        let (store, _) = store();
        let maria = store
            .add(ClientInput { name: "Maria".into(), phone: "51999999999".into(), address: Some("".into()) })
            .await?;
        let joao = store
            .add(ClientInput { name: "João".into(), phone: "51888888888".into(), address: None })
            .await?;

        let list = store.list().await;
        assert_eq!(list, vec![maria.clone(), joao.clone()]);

        store.delete_by_id(&maria.id).await?;
        assert_eq!(store.list().await, vec![joao]);

        store.clear().await?;
        assert!(store.list().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn invalid_client_is_reported_and_not_stored() {
        let (store, notifier) = store();
        let err = store
            .add(ClientInput { name: "".into(), phone: "1".into(), address: None })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(store.list().await.is_empty());
        let notices = notifier.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "name is required");
    }
}
