//! Unified error types for the planner.
//!
//! The domain store itself never fails; these errors come from validation,
//! the backend tables, configuration and local state storage.

use thiserror::Error;

/// Errors produced by validation, the backend tables and local storage.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment could not be used
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Backend database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Local filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Local state could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local state storage is unusable (e.g. a poisoned lock)
    #[error("Local state storage error: {message}")]
    Storage { message: String },

    /// Input rejected before reaching the backend or the store
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The backend has no row with this id
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// An operation needs a current wedding but none is selected
    #[error("No wedding selected")]
    NoActiveWedding,
}

impl Error {
    /// Shorthand for building a validation error.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
