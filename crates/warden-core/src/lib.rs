//! # warden-core
//!
//! Domain layer containing entities, value objects, inbound events, and the
//! ports (repository and action gateway traits) the engine is written against.
//! This crate has zero dependencies on infrastructure (database, platform client, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    render_welcome, xp_threshold, BotPrivilege, CommunityConfig, CommunityInfo, ConfigUpdate,
    MemberProgression, MemberSnapshot, RoleInfo, RoleMenu,
};
pub use error::{ActionError, ActionResult, DomainError};
pub use events::{InboundEvent, InteractionRef, MemberJoined, MessageAuthor, MessagePosted, SelectionMade};
pub use traits::{ActionGateway, ConfigRepository, ProgressionRepository, RepoResult};
pub use value_objects::{Permissions, Snowflake, SnowflakeParseError};
