use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::input::{parse_amount, parse_quantity, require};
use crate::record::{new_id, Record};

/// Inventory line: a part or consumable on the shelf.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,
    pub entry_timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockItemInput {
    pub name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,
}

impl StockItemInput {
    /// Build from raw form text; the price may use a comma separator.
    pub fn parse(name: &str, quantity: &str, unit_price: &str) -> Result<Self, ModelError> {
        let input = Self {
            name: name.to_string(),
            quantity: parse_quantity("quantity", quantity)?,
            unit_price: parse_amount("unitPrice", unit_price)?,
        };
        input.validate()?;
        Ok(input)
    }

    /// New entries must add at least one unit; a free item (price 0) is allowed.
    pub fn validate(&self) -> Result<(), ModelError> {
        require("name", &self.name)?;
        if self.quantity == 0 {
            return Err(ModelError::Validation("quantity must be greater than zero".into()));
        }
        if self.unit_price < Decimal::ZERO {
            return Err(ModelError::Validation("unitPrice must not be negative".into()));
        }
        Ok(())
    }
}

impl StockItem {
    pub fn new(input: StockItemInput) -> Result<Self, ModelError> {
        input.validate()?;
        Ok(Self {
            id: new_id(),
            name: input.name,
            quantity: input.quantity,
            unit_price: input.unit_price,
            entry_timestamp: Utc::now(),
        })
    }

    pub fn total_value(&self) -> Result<Decimal, ModelError> {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| ModelError::Overflow(format!("value of stock item {}", self.id)))
    }
}

impl Record for StockItem {
    const NAMESPACE: &'static str = "stockItems";
    const ENTITY: &'static str = "stock item";

    fn id(&self) -> &str { &self.id }
}

/// Σ quantity × unit price over the given items.
pub fn inventory_value(items: &[StockItem]) -> Result<Decimal, ModelError> {
    items.iter().try_fold(Decimal::ZERO, |acc, item| {
        acc.checked_add(item.total_value()?)
            .ok_or_else(|| ModelError::Overflow("inventory value".into()))
    })
}
