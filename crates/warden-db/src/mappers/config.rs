//! CommunityConfig entity <-> model mapper

use warden_core::entities::CommunityConfig;
use warden_core::value_objects::Snowflake;

use crate::models::CommunityConfigModel;

/// Convert CommunityConfigModel to CommunityConfig entity
impl From<CommunityConfigModel> for CommunityConfig {
    fn from(model: CommunityConfigModel) -> Self {
        CommunityConfig {
            community_id: Snowflake::new(model.community_id),
            welcome_channel_id: model.welcome_channel_id.map(Snowflake::new),
            welcome_message: model.welcome_message,
            autorole_id: model.autorole_id.map(Snowflake::new),
            leveling_enabled: model.leveling_enabled,
            log_channel_id: model.log_channel_id.map(Snowflake::new),
            updated_at: model.updated_at,
        }
    }
}
