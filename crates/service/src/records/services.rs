use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use models::finance::FinancialRecord;
use models::service_record::{ServiceInput, ServiceRecord};

use crate::errors::ServiceError;
use crate::notify::Notifier;
use crate::storage::{Collection, KvSubstrate};
use super::finance::FinanceStore;
use super::impl_record_collection;

/// Outcome of [`ServiceStore::register`].
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRegistration {
    pub service: ServiceRecord,
    /// Present when a positive billing amount was given.
    pub receivable: Option<FinancialRecord>,
}

/// Vehicle services (`services` namespace), with billing into the ledger.
#[derive(Clone)]
pub struct ServiceStore {
    inner: Collection<ServiceRecord>,
    finance: FinanceStore,
}

impl ServiceStore {
    pub fn new(kv: Arc<dyn KvSubstrate>, notifier: Arc<dyn Notifier>, finance: FinanceStore) -> Self {
        Self { inner: Collection::new(kv, notifier), finance }
    }

    pub async fn list(&self) -> Vec<ServiceRecord> {
        self.inner.list().await
    }

    /// Register a service without billing it.
    pub async fn add(&self, input: ServiceInput) -> Result<ServiceRecord, ServiceError> {
        let service = ServiceRecord::new(input).map_err(|e| self.inner.report("add", e.into()))?;
        self.inner.add(service).await
    }

    /// Register a service and, for a positive `billing`, a pending receivable.
    ///
    /// Two steps: the service is written first, then the receivable. If the
    /// receivable write fails the service is deleted again and the whole
    /// registration fails. A zero amount registers the service unbilled; a
    /// negative amount is rejected before anything is written.
    #[instrument(skip(self, input), fields(client = %input.client_name, plate = %input.plate))]
    pub async fn register(&self, input: ServiceInput, billing: Option<Decimal>) -> Result<ServiceRegistration, ServiceError> {
        let billing = match billing {
            Some(amount) if amount < Decimal::ZERO => {
                let err = ServiceError::Validation("billing amount must not be negative".into());
                return Err(self.inner.report("add", err));
            }
            Some(amount) if amount > Decimal::ZERO => Some(amount),
            _ => None,
        };

        let service = self.add(input).await?;
        let Some(amount) = billing else {
            return Ok(ServiceRegistration { service, receivable: None });
        };

        match self.finance.bill_service(&service, amount).await {
            Ok(receivable) => {
                info!(service_id = %service.id, receivable_id = %receivable.id, %amount, event = "service_billed", "service registered with receivable");
                Ok(ServiceRegistration { service, receivable: Some(receivable) })
            }
            Err(e) => {
                warn!(service_id = %service.id, error = %e, event = "billing_failed", "billing failed; removing service");
                if let Err(undo) = self.inner.delete_by_id(&service.id).await {
                    error!(service_id = %service.id, error = %undo, event = "compensation_failed", "service left without receivable");
                }
                Err(e)
            }
        }
    }

    /// Deleting a service leaves its receivable in the ledger.
    pub async fn delete_by_id(&self, id: &str) -> Result<(), ServiceError> {
        self.inner.delete_by_id(id).await
    }

    pub async fn clear(&self) -> Result<(), ServiceError> {
        self.inner.clear().await
    }
}

impl_record_collection!(ServiceStore, ServiceRecord);
