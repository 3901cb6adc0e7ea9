//! Engine services
//!
//! Each service borrows the shared [`EngineContext`] and implements one
//! reaction of the engine; the router and pump tie them to the event stream.

pub mod automod;
pub mod config;
pub mod context;
pub mod error;
pub mod leveling;
pub mod onboarding;
pub mod pump;
pub mod role_menu;
pub mod router;

// Re-export all services for convenience
pub use automod::{AutomodDecision, AutomodFilter, AutomodService};
pub use config::ConfigService;
pub use context::{EngineContext, EngineContextBuilder, ProgressionKey};
pub use error::{ServiceError, ServiceResult};
pub use leveling::{LevelOutcome, LevelingService, MAX_LEADERBOARD_SIZE};
pub use onboarding::{OnboardingReport, OnboardingService};
pub use pump::EventPump;
pub use role_menu::{Reconciliation, RoleMenuService};
pub use router::{Dispatch, EventRouter};
