//! Failures reported by the action gateway
//!
//! Every outbound action is attempted at most once; these kinds only drive
//! how the failure is logged.

use thiserror::Error;

/// Outbound action failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The automation lacks the privilege for this action
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Target member, role, channel or message no longer exists
    #[error("not found: {0}")]
    NotFound(String),

    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),
}

impl ActionError {
    /// Configuration/permission problem rather than a transient fault
    pub fn is_permission(&self) -> bool {
        matches!(self, Self::Forbidden(_) | Self::NotFound(_))
    }

    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Timeout | Self::Transport(_)
        )
    }
}

/// Result of a single outbound action
pub type ActionResult<T> = Result<T, ActionError>;
