//! Service layer error types
//!
//! Provides a unified error type for all engine operations.

use std::fmt;

use warden_common::AppError;
use warden_core::{ActionError, DomainError};

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or store failure
    Domain(DomainError),

    /// An outbound action the operation depends on failed
    Action {
        action: &'static str,
        source: ActionError,
    },

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Validation error
    Validation(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::Action { action, source } => write!(f, "{action} failed: {source}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Action { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create an action failure
    pub fn action(action: &'static str, source: ActionError) -> Self {
        Self::Action { action, source }
    }

    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether a store read or write failed
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_store_failure())
    }

    /// Get the error code for logs and command replies
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Action { source, .. } if source.is_permission() => "ACTION_FORBIDDEN",
            Self::Action { .. } => "ACTION_FAILED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            other => AppError::internal(other),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
