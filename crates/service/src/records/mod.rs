//! Domain stores, one per collection.
//!
//! Each store validates its input, builds the record, and delegates
//! persistence to a [`Collection`](crate::storage::Collection).

use async_trait::async_trait;

use models::Record;

use crate::errors::ServiceError;

/// Implements [`RecordCollection`] by forwarding to the store's `inner` collection.
macro_rules! impl_record_collection {
    ($store:ty, $item:ty) => {
        #[async_trait::async_trait]
        impl $crate::records::RecordCollection for $store {
            type Item = $item;
            async fn list(&self) -> Vec<$item> { self.inner.list().await }
            async fn delete_by_id(&self, id: &str) -> Result<(), $crate::errors::ServiceError> { self.inner.delete_by_id(id).await }
            async fn clear(&self) -> Result<(), $crate::errors::ServiceError> { self.inner.clear().await }
        }
    };
}
pub(crate) use impl_record_collection;

pub mod clients;
pub mod services;
pub mod stock;
pub mod finance;
pub mod appointments;

pub use appointments::AppointmentStore;
pub use clients::ClientStore;
pub use finance::FinanceStore;
pub use services::{ServiceRegistration, ServiceStore};
pub use stock::StockStore;

/// Operations every collection exposes regardless of entity type.
#[async_trait]
pub trait RecordCollection: Send + Sync {
    type Item: Record;

    fn namespace(&self) -> &'static str { <Self::Item as Record>::NAMESPACE }
    async fn list(&self) -> Vec<Self::Item>;
    async fn delete_by_id(&self, id: &str) -> Result<(), ServiceError>;
    async fn clear(&self) -> Result<(), ServiceError>;
}
