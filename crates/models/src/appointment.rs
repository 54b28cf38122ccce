use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::input::require;
use crate::record::{new_id, Record};

/// Any status may move to any other; `Pending` is the only initial state.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub client_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub description: String,
    pub status: AppointmentStatus,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentInput {
    pub client_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub description: String,
}

impl AppointmentInput {
    pub fn validate(&self) -> Result<(), ModelError> {
        require("clientName", &self.client_name)?;
        require("description", &self.description)?;
        Ok(())
    }
}

impl Appointment {
    pub fn new(input: AppointmentInput) -> Result<Self, ModelError> {
        input.validate()?;
        Ok(Self {
            id: new_id(),
            client_name: input.client_name,
            scheduled_at: input.scheduled_at,
            description: input.description,
            status: AppointmentStatus::Pending,
        })
    }
}

impl Record for Appointment {
    const NAMESPACE: &'static str = "appointments";
    const ENTITY: &'static str = "appointment";

    fn id(&self) -> &str { &self.id }
}

/// Display order: soonest first.
pub fn sort_by_schedule(appointments: &mut [Appointment]) {
    appointments.sort_by(|a, b| a.scheduled_at.cmp(&b.scheduled_at));
}
