//! Application error types
//!
//! Process-level failures: startup, configuration, and store bootstrap.
//! Per-event failures never reach this type; the engine contains them.

use warden_core::DomainError;

use crate::config::ConfigError;
use crate::telemetry::TracingError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tracing(#[from] TracingError),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Event source errors
    #[error("Event source error: {0}")]
    EventSource(#[from] std::io::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// Get error code for logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Tracing(_) => "TRACING_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::EventSource(_) => "EVENT_SOURCE_ERROR",
            Self::Domain(e) => e.code(),
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Process exit code for this failure
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78,
            Self::Database(_) => 69,
            _ => 1,
        }
    }

    /// Create a database error from any displayable error
    #[must_use]
    pub fn database(err: impl std::fmt::Display) -> Self {
        Self::Database(err.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
