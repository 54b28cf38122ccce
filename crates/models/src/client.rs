use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::input::require;
use crate::record::{new_id, Record};

/// Registered workshop customer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Create input: everything but the id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl ClientInput {
    /// Name and phone are mandatory; address is free text.
    pub fn validate(&self) -> Result<(), ModelError> {
        require("name", &self.name)?;
        require("phone", &self.phone)?;
        Ok(())
    }
}

impl Client {
    pub fn new(input: ClientInput) -> Result<Self, ModelError> {
        input.validate()?;
        Ok(Self { id: new_id(), name: input.name, phone: input.phone, address: input.address })
    }
}

impl Record for Client {
    const NAMESPACE: &'static str = "clients";
    const ENTITY: &'static str = "client";

    fn id(&self) -> &str { &self.id }
}
