use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid transition: {0}")]
    InvalidTransition(String),
    /// A money total left the range `Decimal` can represent.
    #[error("amount out of range: {0}")]
    Overflow(String),
}

impl ModelError {
    pub fn required(field: &str) -> Self { Self::Validation(format!("{} is required", field)) }
}
