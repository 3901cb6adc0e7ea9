//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Role menu must offer between 1 and {max} roles, got {got}")]
    InvalidMenuSize { max: usize, got: usize },

    #[error("Role offered more than once in menu: {0}")]
    DuplicateMenuRole(Snowflake),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Role cannot be managed by the automation: {0}")]
    UnmanageableRole(Snowflake),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for logs and command replies
    pub fn code(&self) -> &'static str {
        match self {
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::InvalidMenuSize { .. } => "INVALID_MENU_SIZE",
            Self::DuplicateMenuRole(_) => "DUPLICATE_MENU_ROLE",
            Self::UnmanageableRole(_) => "UNMANAGEABLE_ROLE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this error came from the record store
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::DatabaseError(_))
    }
}
