use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::input::require;
use crate::record::{new_id, Record};

/// A vehicle service registered at the workshop.
/// `client_name` is free text and is not checked against the client registry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: String,
    pub client_name: String,
    pub car: String,
    pub plate: String,
    pub model: String,
    pub year: String,
    pub registration_timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInput {
    pub client_name: String,
    pub car: String,
    pub plate: String,
    pub model: String,
    pub year: String,
}

impl ServiceInput {
    pub fn validate(&self) -> Result<(), ModelError> {
        require("clientName", &self.client_name)?;
        require("car", &self.car)?;
        require("plate", &self.plate)?;
        require("model", &self.model)?;
        require("year", &self.year)?;
        Ok(())
    }
}

impl ServiceRecord {
    pub fn new(input: ServiceInput) -> Result<Self, ModelError> {
        input.validate()?;
        Ok(Self {
            id: new_id(),
            client_name: input.client_name,
            car: input.car,
            plate: input.plate,
            model: input.model,
            year: input.year,
            registration_timestamp: Utc::now(),
        })
    }

    /// Text used for the receivable billed against this service.
    pub fn billing_description(&self) -> String {
        format!("Service: {} {} ({}) for {}", self.car, self.model, self.plate, self.client_name)
    }
}

impl Record for ServiceRecord {
    const NAMESPACE: &'static str = "services";
    const ENTITY: &'static str = "service";

    fn id(&self) -> &str { &self.id }
}
