use std::{marker::PhantomData, sync::Arc};

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use models::Record;

use crate::errors::ServiceError;
use crate::notify::{Notice, Notifier};
use super::KvSubstrate;

/// Typed view over one namespace: an ordered JSON array of `T`.
///
/// Every mutation reads the whole array, changes it in memory and writes the
/// whole array back. Mutations on handles cloned from the same collection are
/// serialized by `write_lock`; separate processes are not coordinated.
pub struct Collection<T: Record> {
    kv: Arc<dyn KvSubstrate>,
    notifier: Arc<dyn Notifier>,
    write_lock: Arc<Mutex<()>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            kv: Arc::clone(&self.kv),
            notifier: Arc::clone(&self.notifier),
            write_lock: Arc::clone(&self.write_lock),
            _marker: PhantomData,
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn new(kv: Arc<dyn KvSubstrate>, notifier: Arc<dyn Notifier>) -> Self {
        Self { kv, notifier, write_lock: Arc::new(Mutex::new(())), _marker: PhantomData }
    }

    pub fn namespace(&self) -> &'static str { T::NAMESPACE }

    async fn load(&self) -> Result<Vec<T>, ServiceError> {
        match self.kv.get(T::NAMESPACE).await? {
            Some(text) => serde_json::from_str(&text)
                .map_err(|e| ServiceError::storage(&format!("decode {}", T::NAMESPACE), e)),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, records: &[T]) -> Result<(), ServiceError> {
        let text = serde_json::to_string(records)
            .map_err(|e| ServiceError::storage(&format!("encode {}", T::NAMESPACE), e))?;
        self.kv.set(T::NAMESPACE, text).await
    }

    /// Log `err` and notify the user where appropriate, then hand it back.
    ///
    /// Storage faults get a generic notice; validation and transition errors
    /// carry their own message; not-found is only a warning in the log.
    pub fn report(&self, action: &str, err: ServiceError) -> ServiceError {
        let namespace = T::NAMESPACE;
        match &err {
            ServiceError::Storage(_) => {
                error!(namespace, action, error = %err, "storage fault");
                self.notifier.notify(Notice::error(
                    "Storage error",
                    format!("Could not {} {} data.", action, T::ENTITY),
                ));
            }
            ServiceError::NotFound(_) => {
                warn!(namespace, action, error = %err, "record not found");
            }
            ServiceError::Validation(msg) | ServiceError::InvalidTransition(msg) => {
                warn!(namespace, action, error = %err, "rejected");
                self.notifier.notify(Notice::warning("Invalid request", msg.clone()));
            }
            ServiceError::Unauthorized => {
                warn!(namespace, action, "unauthorized");
            }
        }
        err
    }

    /// All records in insertion order; a read fault is reported and yields empty.
    pub async fn list(&self) -> Vec<T> {
        match self.try_list().await {
            Ok(records) => records,
            Err(e) => {
                self.report("load", e);
                Vec::new()
            }
        }
    }

    /// Like [`Self::list`] but surfaces faults instead of reporting them.
    pub async fn try_list(&self) -> Result<Vec<T>, ServiceError> {
        let records = self.load().await?;
        debug!(namespace = T::NAMESPACE, count = records.len(), "collection loaded");
        Ok(records)
    }

    /// Append `record` and persist the whole collection.
    pub async fn add(&self, record: T) -> Result<T, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let result = async {
            let mut records = self.load().await?;
            records.push(record.clone());
            self.save(&records).await
        }
        .await;
        match result {
            Ok(()) => {
                info!(namespace = T::NAMESPACE, id = record.id(), event = "added", "{} added", T::ENTITY);
                Ok(record)
            }
            Err(e) => Err(self.report("save", e)),
        }
    }

    /// Remove the record with `id`. Writes only when something was removed.
    pub async fn delete_by_id(&self, id: &str) -> Result<(), ServiceError> {
        self.update_map("delete", |records| {
            let before = records.len();
            records.retain(|r| r.id() != id);
            if records.len() < before {
                Ok(())
            } else {
                Err(ServiceError::not_found(T::ENTITY, id))
            }
        })
        .await?;
        info!(namespace = T::NAMESPACE, id, event = "deleted", "{} deleted", T::ENTITY);
        Ok(())
    }

    /// Drop the whole namespace.
    pub async fn clear(&self) -> Result<(), ServiceError> {
        let _guard = self.write_lock.lock().await;
        self.kv
            .remove(T::NAMESPACE)
            .await
            .map_err(|e| self.report("clear", e))?;
        info!(namespace = T::NAMESPACE, event = "cleared", "collection cleared");
        Ok(())
    }

    /// Apply `f` to the loaded collection and persist it if `f` succeeds.
    /// When `f` fails nothing is written.
    pub async fn update_map<F, R>(&self, action: &str, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let _guard = self.write_lock.lock().await;
        let result = async {
            let mut records = self.load().await?;
            let out = f(&mut records)?;
            self.save(&records).await?;
            Ok::<R, ServiceError>(out)
        }
        .await;
        result.map_err(|e| self.report(action, e))
    }
}
