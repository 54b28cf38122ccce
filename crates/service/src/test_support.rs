#![cfg(test)]
use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::storage::{KvSubstrate, MemoryKvStore};

/// Substrate that fails reads, writes, or both; the rest goes to memory.
#[derive(Clone, Debug, Default)]
pub struct FailingKv {
    inner: MemoryKvStore,
    fail_reads: bool,
    fail_writes: bool,
}

impl FailingKv {
    pub fn reads() -> Self { Self { fail_reads: true, ..Self::default() } }

    pub fn writes() -> Self { Self { fail_writes: true, ..Self::default() } }

    /// Read `inner` as seeded but reject every write.
    pub fn writes_over(inner: MemoryKvStore) -> Self { Self { inner, fail_reads: false, fail_writes: true } }

    /// Fail writes to `namespace` only, backed by `inner`.
    pub fn writes_to(inner: MemoryKvStore, namespace: &'static str) -> NamespaceFailingKv {
        NamespaceFailingKv { inner, namespace }
    }
}

#[async_trait]
impl KvSubstrate for FailingKv {
    async fn get(&self, namespace: &str) -> Result<Option<String>, ServiceError> {
        if self.fail_reads {
            return Err(ServiceError::Storage("injected read fault".into()));
        }
        self.inner.get(namespace).await
    }

    async fn set(&self, namespace: &str, value: String) -> Result<(), ServiceError> {
        if self.fail_writes {
            return Err(ServiceError::Storage("injected write fault".into()));
        }
        self.inner.set(namespace, value).await
    }

    async fn remove(&self, namespace: &str) -> Result<(), ServiceError> {
        if self.fail_writes {
            return Err(ServiceError::Storage("injected remove fault".into()));
        }
        self.inner.remove(namespace).await
    }
}

#[derive(Clone, Debug)]
pub struct NamespaceFailingKv {
    inner: MemoryKvStore,
    namespace: &'static str,
}

#[async_trait]
impl KvSubstrate for NamespaceFailingKv {
    async fn get(&self, namespace: &str) -> Result<Option<String>, ServiceError> {
        self.inner.get(namespace).await
    }

    async fn set(&self, namespace: &str, value: String) -> Result<(), ServiceError> {
        if namespace == self.namespace {
            return Err(ServiceError::Storage(format!("injected write fault on {namespace}")));
        }
        self.inner.set(namespace, value).await
    }

    async fn remove(&self, namespace: &str) -> Result<(), ServiceError> {
        self.inner.remove(namespace).await
    }
}
