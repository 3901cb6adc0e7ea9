//! Domain and action error types

mod action_error;
mod domain_error;

pub use action_error::{ActionError, ActionResult};
pub use domain_error::DomainError;
