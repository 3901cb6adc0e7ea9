//! In-memory ProgressionRepository

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::instrument;

use warden_core::entities::MemberProgression;
use warden_core::traits::{ProgressionRepository, RepoResult};
use warden_core::value_objects::Snowflake;

#[derive(Debug, Default)]
pub struct MemoryProgressionRepository {
    records: DashMap<(Snowflake, Snowflake), MemberProgression>,
}

impl MemoryProgressionRepository {
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
impl ProgressionRepository for MemoryProgressionRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        community_id: Snowflake,
        member_id: Snowflake,
    ) -> RepoResult<Option<MemberProgression>> {
        Ok(self
            .records
            .get(&(community_id, member_id))
            .map(|r| r.value().clone()))
    }

    #[instrument(skip(self, record), fields(community_id = %record.community_id, member_id = %record.member_id))]
    async fn put(&self, record: &MemberProgression) -> RepoResult<()> {
        self.records
            .insert((record.community_id, record.member_id), record.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn top(&self, community_id: Snowflake, limit: i64) -> RepoResult<Vec<MemberProgression>> {
        let mut ranked: Vec<MemberProgression> = self
            .records
            .iter()
            .filter(|r| r.key().0 == community_id)
            .map(|r| r.value().clone())
            .collect();

        ranked.sort_by(|a, b| {
            b.level
                .cmp(&a.level)
                .then(b.xp.cmp(&a.xp))
                .then(a.member_id.cmp(&b.member_id))
        });
        ranked.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        Ok(ranked)
    }
}
