use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// Read or write against the key-value substrate failed (I/O, serialization).
    #[error("storage fault: {0}")]
    Storage(String),
    #[error("invalid transition: {0}")]
    InvalidTransition(String),
    #[error("invalid username or password")]
    Unauthorized,
}

impl ServiceError {
    pub fn not_found(entity: &str, id: &str) -> Self { Self::NotFound(format!("{} {} not found", entity, id)) }

    pub fn storage(context: &str, err: impl std::fmt::Display) -> Self { Self::Storage(format!("{}: {}", context, err)) }

    pub fn is_storage_fault(&self) -> bool { matches!(self, Self::Storage(_)) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(m) | ModelError::Overflow(m) => Self::Validation(m),
            ModelError::InvalidTransition(m) => Self::InvalidTransition(m),
        }
    }
}
