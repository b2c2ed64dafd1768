//! Error types for the todo store.
//!
//! # Design
//! Three kinds of failure reach callers: the caller sent something invalid
//! (`Validation`), the referenced todo does not exist (`NotFound`), or the
//! database could not be reached or rejected the statement (`Database`,
//! `Migration`). Only the last kind is worth logging on the server side.

use thiserror::Error;

pub use sqlx::Error as SqlxError;

/// Errors returned by `TodoStore` operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request payload failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No todo with the requested id exists.
    #[error("todo not found")]
    NotFound,

    /// The database was unreachable or the statement failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying the schema migrations failed.
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    /// True for failures caused by the infrastructure rather than the caller.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, StoreError::Database(_) | StoreError::Migration(_))
    }
}

/// Configuration errors raised while reading environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
}
