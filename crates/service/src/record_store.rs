use std::sync::Arc;

use configs::{StorageBackend, StorageConfig};
use tracing::info;

use crate::errors::ServiceError;
use crate::notify::{LogNotifier, Notifier};
use crate::records::{AppointmentStore, ClientStore, FinanceStore, ServiceStore, StockStore};
use crate::storage::{FileKvStore, KvSubstrate, MemoryKvStore};

/// The five workshop collections behind one explicitly constructed handle.
///
/// Cloning is cheap and clones share the substrate and per-collection locks,
/// so one instance can be handed to every screen that needs it.
///
/// # Examples
/// ```
/// use service::RecordStore;
/// use models::client::ClientInput;
///
/// let store = RecordStore::in_memory();
/// let added = tokio_test::block_on(store.clients().add(ClientInput {
///     name: "Maria".into(),
///     phone: "51999999999".into(),
///     address: None,
/// })).unwrap();
/// let list = tokio_test::block_on(store.clients().list());
/// assert_eq!(list, vec![added]);
/// ```
#[derive(Clone)]
pub struct RecordStore {
    clients: ClientStore,
    services: ServiceStore,
    stock: StockStore,
    finance: FinanceStore,
    appointments: AppointmentStore,
}

impl RecordStore {
    pub fn new(kv: Arc<dyn KvSubstrate>, notifier: Arc<dyn Notifier>) -> Self {
        let finance = FinanceStore::new(kv.clone(), notifier.clone());
        Self {
            clients: ClientStore::new(kv.clone(), notifier.clone()),
            services: ServiceStore::new(kv.clone(), notifier.clone(), finance.clone()),
            stock: StockStore::new(kv.clone(), notifier.clone()),
            appointments: AppointmentStore::new(kv, notifier),
            finance,
        }
    }

    /// Memory-backed store that logs notices; handy for tests and demos.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKvStore::new()), Arc::new(LogNotifier))
    }

    /// Build the substrate selected by `cfg`.
    pub async fn open(cfg: &StorageConfig, notifier: Arc<dyn Notifier>) -> Result<Self, ServiceError> {
        let kv: Arc<dyn KvSubstrate> = match cfg.backend {
            StorageBackend::File => Arc::new(FileKvStore::new(&cfg.data_dir).await?),
            StorageBackend::Memory => Arc::new(MemoryKvStore::new()),
        };
        info!(backend = ?cfg.backend, data_dir = %cfg.data_dir, event = "store_opened", "record store opened");
        Ok(Self::new(kv, notifier))
    }

    pub fn clients(&self) -> &ClientStore { &self.clients }
    pub fn services(&self) -> &ServiceStore { &self.services }
    pub fn stock(&self) -> &StockStore { &self.stock }
    pub fn finance(&self) -> &FinanceStore { &self.finance }
    pub fn appointments(&self) -> &AppointmentStore { &self.appointments }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecordCollection;
    use models::client::ClientInput;
    use models::stock::StockItemInput;
    use uuid::Uuid;

    async fn clear_all(store: &RecordStore) -> Result<(), ServiceError> {
        store.clients().clear().await?;
        RecordCollection::clear(store.services()).await?;
        RecordCollection::clear(store.stock()).await?;
        RecordCollection::clear(store.finance()).await?;
        RecordCollection::clear(store.appointments()).await?;
        Ok(())
    }

    #[tokio::test]
    async fn collections_use_their_own_namespaces() {
        let store = RecordStore::in_memory();
        assert_eq!(store.clients().namespace(), "clients");
        assert_eq!(store.services().namespace(), "services");
        assert_eq!(store.stock().namespace(), "stockItems");
        assert_eq!(store.finance().namespace(), "financialRecords");
        assert_eq!(store.appointments().namespace(), "appointments");
    }

    #[tokio::test]
    async fn file_backed_store_persists_across_reopen() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("record_store_{}", Uuid::new_v4()));
        let cfg = StorageConfig { backend: StorageBackend::File, data_dir: dir.to_string_lossy().to_string() };

        let store = RecordStore::open(&cfg, Arc::new(LogNotifier)).await?;
        let client = store
            .clients()
            .add(ClientInput { name: "Maria".into(), phone: "51999999999".into(), address: None })
            .await?;
        store.stock().add(StockItemInput::parse("Spark plug", "8", "15,00")?).await?;
        assert!(dir.join("clients.json").exists());
        assert!(dir.join("stockItems.json").exists());

        let reopened = RecordStore::open(&cfg, Arc::new(LogNotifier)).await?;
        assert_eq!(reopened.clients().list().await, vec![client]);
        assert_eq!(reopened.stock().list().await.len(), 1);

        clear_all(&reopened).await?;
        assert!(!dir.join("clients.json").exists());

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn clones_share_state() -> Result<(), anyhow::Error> {
        let store = RecordStore::in_memory();
        let other = store.clone();
        other
            .clients()
            .add(ClientInput { name: "Ana".into(), phone: "1".into(), address: None })
            .await?;
        assert_eq!(store.clients().list().await.len(), 1);
        Ok(())
    }
}
