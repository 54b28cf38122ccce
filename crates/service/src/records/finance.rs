use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, instrument};

use models::finance::{sort_newest_first, FinancialRecord, FinancialRecordInput, FinancialSummary, ReceivableStatus};
use models::service_record::ServiceRecord;

use crate::errors::ServiceError;
use crate::notify::Notifier;
use crate::storage::{Collection, KvSubstrate};
use super::impl_record_collection;

/// Financial ledger (`financialRecords` namespace).
#[derive(Clone)]
pub struct FinanceStore {
    inner: Collection<FinancialRecord>,
}

impl FinanceStore {
    pub fn new(kv: Arc<dyn KvSubstrate>, notifier: Arc<dyn Notifier>) -> Self {
        Self { inner: Collection::new(kv, notifier) }
    }

    pub async fn list(&self) -> Vec<FinancialRecord> {
        self.inner.list().await
    }

    /// Ledger for display, newest entry first.
    pub async fn list_newest_first(&self) -> Vec<FinancialRecord> {
        let mut records = self.inner.list().await;
        sort_newest_first(&mut records);
        records
    }

    /// Record a manual income or expense entry.
    pub async fn add(&self, input: FinancialRecordInput) -> Result<FinancialRecord, ServiceError> {
        let record = FinancialRecord::new(input).map_err(|e| self.inner.report("add", e.into()))?;
        self.inner.add(record).await
    }

    /// Create the pending receivable billed against `service`.
    pub async fn bill_service(&self, service: &ServiceRecord, amount: Decimal) -> Result<FinancialRecord, ServiceError> {
        let record = FinancialRecord::receivable_for(service, amount)
            .map_err(|e| self.inner.report("bill", e.into()))?;
        self.inner.add(record).await
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), ServiceError> {
        self.inner.delete_by_id(id).await
    }

    pub async fn clear(&self) -> Result<(), ServiceError> {
        self.inner.clear().await
    }

    /// Move a service receivable to `status`.
    ///
    /// Marking it received also appends an income entry for the same amount,
    /// in the same write. Returns that income entry. Unknown ids, records that
    /// are not receivables, and any move other than pending → received are
    /// rejected without writing.
    #[instrument(skip(self), fields(namespace = "financialRecords"))]
    pub async fn update_status(&self, id: &str, status: ReceivableStatus) -> Result<FinancialRecord, ServiceError> {
        let income = self
            .inner
            .update_map("update", |records| {
                let rec = records
                    .iter_mut()
                    .find(|r| r.id == id)
                    .ok_or_else(|| ServiceError::not_found("financial record", id))?;
                let income = rec.transition(status, Utc::now())?;
                records.push(income.clone());
                Ok(income)
            })
            .await?;
        info!(receivable_id = id, income_id = %income.id, amount = %income.amount, event = "receivable_received", "receivable marked received");
        Ok(income)
    }

    /// Totals for the finance screen. Fails only when a total leaves the
    /// `Decimal` range.
    pub async fn summary(&self) -> Result<FinancialSummary, ServiceError> {
        FinancialSummary::from_records(&self.inner.list().await).map_err(|e| self.inner.report("summarize", e.into()))
    }
}

impl_record_collection!(FinanceStore, FinancialRecord);
