//! Database models - SQLx-compatible structs for PostgreSQL tables

mod config;
mod progression;

pub use config::CommunityConfigModel;
pub use progression::MemberProgressionModel;
