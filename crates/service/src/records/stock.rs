use std::sync::Arc;

use rust_decimal::Decimal;

use models::stock::{inventory_value, StockItem, StockItemInput};

use crate::errors::ServiceError;
use crate::notify::Notifier;
use crate::storage::{Collection, KvSubstrate};
use super::impl_record_collection;

/// Inventory (`stockItems` namespace).
#[derive(Clone)]
pub struct StockStore {
    inner: Collection<StockItem>,
}

impl StockStore {
    pub fn new(kv: Arc<dyn KvSubstrate>, notifier: Arc<dyn Notifier>) -> Self {
        Self { inner: Collection::new(kv, notifier) }
    }

    pub async fn list(&self) -> Vec<StockItem> {
        self.inner.list().await
    }

    pub async fn add(&self, input: StockItemInput) -> Result<StockItem, ServiceError> {
        let item = StockItem::new(input).map_err(|e| self.inner.report("add", e.into()))?;
        self.inner.add(item).await
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), ServiceError> {
        self.inner.delete_by_id(id).await
    }

    pub async fn clear(&self) -> Result<(), ServiceError> {
        self.inner.clear().await
    }

    /// Value of everything on the shelf (Σ quantity × unit price).
    pub async fn inventory_value(&self) -> Result<Decimal, ServiceError> {
        inventory_value(&self.inner.list().await).map_err(|e| self.inner.report("value", e.into()))
    }
}

impl_record_collection!(StockStore, StockItem);
