//! Storage abstractions for the record store
//!
//! A [`KvSubstrate`] maps a namespace to one serialized text blob.
//! [`collection::Collection`] layers a typed, ordered record list on top.

pub mod file_kv;
pub mod memory_kv;
pub mod collection;

use async_trait::async_trait;

use crate::errors::ServiceError;

pub use collection::Collection;
pub use file_kv::FileKvStore;
pub use memory_kv::MemoryKvStore;

/// Key-value persistence the record store is written against.
/// Implementations can be file-backed, in-memory, or a device store.
#[async_trait]
pub trait KvSubstrate: Send + Sync {
    /// `None` when the namespace has never been written (or was removed).
    async fn get(&self, namespace: &str) -> Result<Option<String>, ServiceError>;
    async fn set(&self, namespace: &str, value: String) -> Result<(), ServiceError>;
    /// Removing an absent namespace is not an error.
    async fn remove(&self, namespace: &str) -> Result<(), ServiceError>;
}
