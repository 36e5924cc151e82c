use thiserror::Error;

/// Error del dominio YSI
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),
}
