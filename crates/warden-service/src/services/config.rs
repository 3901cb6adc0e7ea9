//! Config service
//!
//! Read and single-field update API over the Configuration Store, consumed
//! by the command layer.

use tracing::{info, instrument};

use warden_core::entities::{CommunityConfig, ConfigUpdate};
use warden_core::Snowflake;

use super::context::EngineContext;
use super::error::ServiceResult;

/// Config service
pub struct ConfigService<'a> {
    ctx: &'a EngineContext,
}

impl<'a> ConfigService<'a> {
    /// Create a new ConfigService
    pub fn new(ctx: &'a EngineContext) -> Self {
        Self { ctx }
    }

    /// Settings in effect, defaults when nothing was stored yet
    #[instrument(skip(self))]
    pub async fn get(&self, community_id: Snowflake) -> ServiceResult<CommunityConfig> {
        let config = self.ctx.config_repo().find(community_id).await?;
        Ok(config.unwrap_or_else(|| CommunityConfig::new(community_id)))
    }

    /// Validate and merge one field
    #[instrument(skip(self, update), fields(field = update.field()))]
    pub async fn apply(
        &self,
        community_id: Snowflake,
        update: ConfigUpdate,
    ) -> ServiceResult<CommunityConfig> {
        update.validate()?;
        let config = self.ctx.config_repo().merge(community_id, &update).await?;

        info!(community_id = %community_id, field = update.field(), "Config updated");
        Ok(config)
    }

    /// Set the welcome channel and, when given, the template
    pub async fn merge_welcome(
        &self,
        community_id: Snowflake,
        channel_id: Snowflake,
        template: Option<String>,
    ) -> ServiceResult<CommunityConfig> {
        self.apply(
            community_id,
            ConfigUpdate::Welcome {
                channel_id,
                template,
            },
        )
        .await
    }

    pub async fn merge_autorole(
        &self,
        community_id: Snowflake,
        role_id: Option<Snowflake>,
    ) -> ServiceResult<CommunityConfig> {
        self.apply(community_id, ConfigUpdate::Autorole(role_id))
            .await
    }

    pub async fn merge_leveling_enabled(
        &self,
        community_id: Snowflake,
        enabled: bool,
    ) -> ServiceResult<CommunityConfig> {
        self.apply(community_id, ConfigUpdate::LevelingEnabled(enabled))
            .await
    }

    pub async fn merge_log_channel(
        &self,
        community_id: Snowflake,
        channel_id: Option<Snowflake>,
    ) -> ServiceResult<CommunityConfig> {
        self.apply(community_id, ConfigUpdate::LogChannel(channel_id))
            .await
    }
}
