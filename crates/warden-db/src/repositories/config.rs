//! PostgreSQL implementation of ConfigRepository
//!
//! Every merge is a single `INSERT ... ON CONFLICT DO UPDATE` touching only
//! the columns of the update, so concurrent merges of different fields for
//! the same community never overwrite each other.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use warden_core::entities::{CommunityConfig, ConfigUpdate};
use warden_core::traits::{ConfigRepository, RepoResult};
use warden_core::value_objects::Snowflake;

use super::error::map_db_error;
use crate::models::CommunityConfigModel;

/// PostgreSQL config repository
#[derive(Clone)]
pub struct PgConfigRepository {
    pool: PgPool,
}

impl PgConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConfigRepository for PgConfigRepository {
    #[instrument(skip(self))]
    async fn find(&self, community_id: Snowflake) -> RepoResult<Option<CommunityConfig>> {
        let result = sqlx::query_as::<_, CommunityConfigModel>(
            r#"
            SELECT community_id, welcome_channel_id, welcome_message, autorole_id,
                   leveling_enabled, log_channel_id, updated_at
            FROM community_configs
            WHERE community_id = $1
            "#,
        )
        .bind(community_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CommunityConfig::from))
    }

    #[instrument(skip(self), fields(field = update.field()))]
    async fn merge(
        &self,
        community_id: Snowflake,
        update: &ConfigUpdate,
    ) -> RepoResult<CommunityConfig> {
        let id = community_id.into_inner();

        let query = match update {
            ConfigUpdate::Welcome {
                channel_id,
                template,
            } => sqlx::query_as::<_, CommunityConfigModel>(
                r#"
                INSERT INTO community_configs (community_id, welcome_channel_id, welcome_message, updated_at)
                VALUES ($1, $2, $3, NOW())
                ON CONFLICT (community_id) DO UPDATE SET
                    welcome_channel_id = EXCLUDED.welcome_channel_id,
                    welcome_message = COALESCE(EXCLUDED.welcome_message, community_configs.welcome_message),
                    updated_at = NOW()
                RETURNING community_id, welcome_channel_id, welcome_message, autorole_id,
                          leveling_enabled, log_channel_id, updated_at
                "#,
            )
            .bind(id)
            .bind(channel_id.into_inner())
            .bind(template.clone()),

            ConfigUpdate::Autorole(role_id) => sqlx::query_as::<_, CommunityConfigModel>(
                r#"
                INSERT INTO community_configs (community_id, autorole_id, updated_at)
                VALUES ($1, $2, NOW())
                ON CONFLICT (community_id) DO UPDATE SET
                    autorole_id = EXCLUDED.autorole_id,
                    updated_at = NOW()
                RETURNING community_id, welcome_channel_id, welcome_message, autorole_id,
                          leveling_enabled, log_channel_id, updated_at
                "#,
            )
            .bind(id)
            .bind(role_id.map(Snowflake::into_inner)),

            ConfigUpdate::LevelingEnabled(enabled) => sqlx::query_as::<_, CommunityConfigModel>(
                r#"
                INSERT INTO community_configs (community_id, leveling_enabled, updated_at)
                VALUES ($1, $2, NOW())
                ON CONFLICT (community_id) DO UPDATE SET
                    leveling_enabled = EXCLUDED.leveling_enabled,
                    updated_at = NOW()
                RETURNING community_id, welcome_channel_id, welcome_message, autorole_id,
                          leveling_enabled, log_channel_id, updated_at
                "#,
            )
            .bind(id)
            .bind(*enabled),

            ConfigUpdate::LogChannel(channel_id) => sqlx::query_as::<_, CommunityConfigModel>(
                r#"
                INSERT INTO community_configs (community_id, log_channel_id, updated_at)
                VALUES ($1, $2, NOW())
                ON CONFLICT (community_id) DO UPDATE SET
                    log_channel_id = EXCLUDED.log_channel_id,
                    updated_at = NOW()
                RETURNING community_id, welcome_channel_id, welcome_message, autorole_id,
                          leveling_enabled, log_channel_id, updated_at
                "#,
            )
            .bind(id)
            .bind(channel_id.map(Snowflake::into_inner)),
        };

        let model = query
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(CommunityConfig::from(model))
    }
}
