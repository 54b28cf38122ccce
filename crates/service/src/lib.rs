//! Record store service: namespaced JSON collections for the workshop domain.
//! - `storage` holds the key-value substrate seam and the generic collection.
//! - `records` wraps each collection with its domain operations.
//! - `RecordStore` bundles the five collections behind one injected handle.
//! - Faults are logged, turned into user notices, and returned as `ServiceError`.

pub mod errors;
pub mod notify;
pub mod storage;
pub mod records;
pub mod record_store;
pub mod auth;
pub mod runtime;
#[cfg(test)]
pub mod test_support;

pub use record_store::RecordStore;
