//! PostgreSQL implementation of ProgressionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use warden_core::entities::MemberProgression;
use warden_core::traits::{ProgressionRepository, RepoResult};
use warden_core::value_objects::Snowflake;

use super::error::map_db_error;
use crate::mappers::ProgressionUpsert;
use crate::models::MemberProgressionModel;

/// PostgreSQL progression repository
#[derive(Clone)]
pub struct PgProgressionRepository {
    pool: PgPool,
}

impl PgProgressionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressionRepository for PgProgressionRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        community_id: Snowflake,
        member_id: Snowflake,
    ) -> RepoResult<Option<MemberProgression>> {
        let result = sqlx::query_as::<_, MemberProgressionModel>(
            r#"
            SELECT community_id, member_id, xp, level, last_gain_at
            FROM member_progressions
            WHERE community_id = $1 AND member_id = $2
            "#,
        )
        .bind(community_id.into_inner())
        .bind(member_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(MemberProgression::from))
    }

    #[instrument(skip(self, record), fields(community_id = %record.community_id, member_id = %record.member_id))]
    async fn put(&self, record: &MemberProgression) -> RepoResult<()> {
        let row = ProgressionUpsert::new(record);

        sqlx::query(
            r#"
            INSERT INTO member_progressions (community_id, member_id, xp, level, last_gain_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (community_id, member_id) DO UPDATE SET
                xp = EXCLUDED.xp,
                level = EXCLUDED.level,
                last_gain_at = EXCLUDED.last_gain_at
            "#,
        )
        .bind(row.community_id)
        .bind(row.member_id)
        .bind(row.xp)
        .bind(row.level)
        .bind(row.last_gain_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn top(&self, community_id: Snowflake, limit: i64) -> RepoResult<Vec<MemberProgression>> {
        let rows = sqlx::query_as::<_, MemberProgressionModel>(
            r#"
            SELECT community_id, member_id, xp, level, last_gain_at
            FROM member_progressions
            WHERE community_id = $1
            ORDER BY level DESC, xp DESC, member_id ASC
            LIMIT $2
            "#,
        )
        .bind(community_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(MemberProgression::from).collect())
    }
}
