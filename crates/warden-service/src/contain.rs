//! Containment for best-effort outbound actions

use tracing::warn;
use warden_core::ActionResult;

/// Log a failed action and carry on without its value
///
/// Actions are attempted once; callers that can live without the result
/// route it through here instead of propagating.
pub fn contain<T>(action: &'static str, result: ActionResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) if e.is_permission() => {
            warn!(action, error = %e, "Action skipped: missing privilege or target");
            None
        }
        Err(e) => {
            warn!(action, error = %e, transient = e.is_transient(), "Action failed");
            None
        }
    }
}
