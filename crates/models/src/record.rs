use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

/// A flat record stored as one element of a namespaced JSON array.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Storage key holding the whole collection.
    const NAMESPACE: &'static str;
    /// Human readable entity name used in logs and notices.
    const ENTITY: &'static str;

    fn id(&self) -> &str;
}

/// Fresh record identifier (random UUID v4, hyphenated).
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
