//! Repository traits (ports) - define the interface for record storage
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{CommunityConfig, ConfigUpdate, MemberProgression};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Config Repository
// ============================================================================

#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// Find the settings record for a community
    async fn find(&self, community_id: Snowflake) -> RepoResult<Option<CommunityConfig>>;

    /// Overlay one field onto the stored record, creating it on first write
    ///
    /// Must be atomic per community: a concurrent merge of a different
    /// field is never lost.
    async fn merge(
        &self,
        community_id: Snowflake,
        update: &ConfigUpdate,
    ) -> RepoResult<CommunityConfig>;
}

// ============================================================================
// Progression Repository
// ============================================================================

#[async_trait]
pub trait ProgressionRepository: Send + Sync {
    /// Find a member's progression record
    async fn find(
        &self,
        community_id: Snowflake,
        member_id: Snowflake,
    ) -> RepoResult<Option<MemberProgression>>;

    /// Replace the record for `(record.community_id, record.member_id)`
    async fn put(&self, record: &MemberProgression) -> RepoResult<()>;

    /// Highest-ranked members: level desc, then xp desc
    async fn top(&self, community_id: Snowflake, limit: i64) -> RepoResult<Vec<MemberProgression>>;
}
