//! Infrastructure and service-level errors.

use thiserror::Error;

use kitchenpos_core::DomainError;

/// Record-access failure.
///
/// Absence of a row is never an error; lookups return `Option` instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    #[error("value out of range in {operation}: {message}")]
    Conversion {
        operation: &'static str,
        message: String,
    },

    #[error("migration failed: {0}")]
    Migration(String),

    #[error("store requires a tokio runtime: {0}")]
    Runtime(String),

    #[error("store lock poisoned")]
    LockPoisoned,

    #[error("store did not assign an identity on insert")]
    MissingIdentity,
}

/// Failure of an application service operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
