use std::sync::Arc;

use tracing::info;

use models::appointment::{sort_by_schedule, Appointment, AppointmentInput, AppointmentStatus};

use crate::errors::ServiceError;
use crate::notify::Notifier;
use crate::storage::{Collection, KvSubstrate};
use super::impl_record_collection;

/// Appointment book (`appointments` namespace).
#[derive(Clone)]
pub struct AppointmentStore {
    inner: Collection<Appointment>,
}

impl AppointmentStore {
    pub fn new(kv: Arc<dyn KvSubstrate>, notifier: Arc<dyn Notifier>) -> Self {
        Self { inner: Collection::new(kv, notifier) }
    }

    pub async fn list(&self) -> Vec<Appointment> {
        self.inner.list().await
    }

    /// Appointments ordered by scheduled time, soonest first.
    pub async fn list_by_schedule(&self) -> Vec<Appointment> {
        let mut list = self.inner.list().await;
        sort_by_schedule(&mut list);
        list
    }

    /// New appointments always start as `Pending`.
    pub async fn add(&self, input: AppointmentInput) -> Result<Appointment, ServiceError> {
        let appointment = Appointment::new(input).map_err(|e| self.inner.report("add", e.into()))?;
        self.inner.add(appointment).await
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), ServiceError> {
        self.inner.delete_by_id(id).await
    }

    pub async fn clear(&self) -> Result<(), ServiceError> {
        self.inner.clear().await
    }

    /// Set the status of an appointment. Any status may follow any other.
    pub async fn update_status(&self, id: &str, status: AppointmentStatus) -> Result<Appointment, ServiceError> {
        let updated = self
            .inner
            .update_map("update", |list| {
                let appt = list
                    .iter_mut()
                    .find(|a| a.id == id)
                    .ok_or_else(|| ServiceError::not_found("appointment", id))?;
                appt.status = status;
                Ok(appt.clone())
            })
            .await?;
        info!(namespace = "appointments", id, %status, event = "status_updated", "appointment status updated");
        Ok(updated)
    }
}

impl_record_collection!(AppointmentStore, Appointment);
