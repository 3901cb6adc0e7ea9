//! In-memory ConfigRepository
//!
//! Merges run under the map's per-shard entry lock, so two updates for
//! the same community serialize and neither is lost.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::instrument;

use warden_core::entities::{CommunityConfig, ConfigUpdate};
use warden_core::traits::{ConfigRepository, RepoResult};
use warden_core::value_objects::Snowflake;

#[derive(Debug, Default)]
pub struct MemoryConfigRepository {
    records: DashMap<Snowflake, CommunityConfig>,
}

impl MemoryConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ConfigRepository for MemoryConfigRepository {
    #[instrument(skip(self))]
    async fn find(&self, community_id: Snowflake) -> RepoResult<Option<CommunityConfig>> {
        Ok(self.records.get(&community_id).map(|r| r.value().clone()))
    }

    #[instrument(skip(self), fields(field = update.field()))]
    async fn merge(
        &self,
        community_id: Snowflake,
        update: &ConfigUpdate,
    ) -> RepoResult<CommunityConfig> {
        let mut entry = self
            .records
            .entry(community_id)
            .or_insert_with(|| CommunityConfig::new(community_id));
        entry.apply(update);
        Ok(entry.value().clone())
    }
}
