//! # warden-service
//!
//! Application layer: the event-reaction engine. Services for leveling,
//! automod, onboarding and role menus, the router that dispatches inbound
//! events to them, and the pump that feeds the router.

pub mod contain;
pub mod locks;
pub mod notices;
pub mod services;
pub mod xp;


pub use contain::contain;
pub use locks::{KeyGuard, KeyedLocks};
pub use services::*;
pub use xp::{FixedXp, RandomXp, XpSource};
