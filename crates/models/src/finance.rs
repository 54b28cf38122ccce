//! Ledger entries: manual income/expense plus receivables billed for services.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::input::{parse_amount, require};
use crate::record::{new_id, Record};
use crate::service_record::ServiceRecord;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FinancialKind {
    Income,
    Expense,
    /// Money owed for a rendered service; not revenue until received.
    ServiceReceivable,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ReceivableStatus {
    Pending,
    Received,
}

impl std::fmt::Display for ReceivableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Received => f.write_str("received"),
        }
    }
}

/// `status`, `service_id` and `payment_timestamp` are only present on
/// `ServiceReceivable` entries.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    pub id: String,
    pub kind: FinancialKind,
    pub description: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReceivableStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_timestamp: Option<DateTime<Utc>>,
}

/// Manual ledger entry; receivables are only created through service billing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecordInput {
    pub kind: FinancialKind,
    pub description: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
}

impl FinancialRecordInput {
    pub fn parse(kind: FinancialKind, description: &str, amount: &str) -> Result<Self, ModelError> {
        let input = Self { kind, description: description.to_string(), amount: parse_amount("amount", amount)? };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.kind == FinancialKind::ServiceReceivable {
            return Err(ModelError::Validation("receivables are created by service billing only".into()));
        }
        require("description", &self.description)?;
        ensure_positive(self.amount)
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), ModelError> {
    if amount <= Decimal::ZERO {
        return Err(ModelError::Validation("amount must be greater than zero".into()));
    }
    Ok(())
}

impl FinancialRecord {
    pub fn new(input: FinancialRecordInput) -> Result<Self, ModelError> {
        input.validate()?;
        Ok(Self {
            id: new_id(),
            kind: input.kind,
            description: input.description,
            amount: input.amount,
            timestamp: Utc::now(),
            status: None,
            service_id: None,
            payment_timestamp: None,
        })
    }

    /// Pending receivable billed against `service`.
    pub fn receivable_for(service: &ServiceRecord, amount: Decimal) -> Result<Self, ModelError> {
        ensure_positive(amount)?;
        Ok(Self {
            id: new_id(),
            kind: FinancialKind::ServiceReceivable,
            description: service.billing_description(),
            amount,
            timestamp: Utc::now(),
            status: Some(ReceivableStatus::Pending),
            service_id: Some(service.id.clone()),
            payment_timestamp: None,
        })
    }

    pub fn is_pending_receivable(&self) -> bool {
        self.kind == FinancialKind::ServiceReceivable && self.status == Some(ReceivableStatus::Pending)
    }

    /// Move a receivable to `next`. Only pending → received is accepted.
    ///
    /// On success returns the independent income entry recording the payment,
    /// which the caller must persist together with the updated receivable.
    pub fn transition(&mut self, next: ReceivableStatus, at: DateTime<Utc>) -> Result<FinancialRecord, ModelError> {
        if self.kind != FinancialKind::ServiceReceivable {
            return Err(ModelError::InvalidTransition(format!("record {} is not a service receivable", self.id)));
        }
        let current = self.status.unwrap_or(ReceivableStatus::Pending);
        if current != ReceivableStatus::Pending || next != ReceivableStatus::Received {
            return Err(ModelError::InvalidTransition(format!("receivable {} cannot move from {} to {}", self.id, current, next)));
        }
        self.status = Some(ReceivableStatus::Received);
        self.payment_timestamp = Some(at);
        Ok(FinancialRecord {
            id: new_id(),
            kind: FinancialKind::Income,
            description: format!("Payment received: {}", self.description),
            amount: self.amount,
            timestamp: at,
            status: None,
            service_id: None,
            payment_timestamp: None,
        })
    }
}

impl Record for FinancialRecord {
    const NAMESPACE: &'static str = "financialRecords";
    const ENTITY: &'static str = "financial record";

    fn id(&self) -> &str { &self.id }
}

/// Ledger totals as shown on the finance screen.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub profit: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_pending: Decimal,
    pub pending: Vec<FinancialRecord>,
}

impl FinancialSummary {
    /// Received receivables are skipped: their payment already exists as income.
    pub fn from_records(records: &[FinancialRecord]) -> Result<Self, ModelError> {
        let mut summary = Self::default();
        for rec in records {
            match rec.kind {
                FinancialKind::Income => summary.total_income = add_total("total income", summary.total_income, rec.amount)?,
                FinancialKind::Expense => summary.total_expense = add_total("total expense", summary.total_expense, rec.amount)?,
                FinancialKind::ServiceReceivable if rec.is_pending_receivable() => {
                    summary.total_pending = add_total("total pending", summary.total_pending, rec.amount)?;
                    summary.pending.push(rec.clone());
                }
                FinancialKind::ServiceReceivable => {}
            }
        }
        summary.profit = summary
            .total_income
            .checked_sub(summary.total_expense)
            .ok_or_else(|| ModelError::Overflow("profit".into()))?;
        Ok(summary)
    }
}

fn add_total(what: &str, acc: Decimal, amount: Decimal) -> Result<Decimal, ModelError> {
    acc.checked_add(amount).ok_or_else(|| ModelError::Overflow(what.to_string()))
}

/// Display order: newest first. Stored order is left untouched.
pub fn sort_newest_first(records: &mut [FinancialRecord]) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
