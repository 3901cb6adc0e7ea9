//! Community config database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for community_configs table
#[derive(Debug, Clone, FromRow)]
pub struct CommunityConfigModel {
    pub community_id: i64,
    pub welcome_channel_id: Option<i64>,
    pub welcome_message: Option<String>,
    pub autorole_id: Option<i64>,
    pub leveling_enabled: bool,
    pub log_channel_id: Option<i64>,
    pub updated_at: DateTime<Utc>,
}
