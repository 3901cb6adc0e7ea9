//! Member progression database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for member_progressions table
#[derive(Debug, Clone, FromRow)]
pub struct MemberProgressionModel {
    pub community_id: i64,
    pub member_id: i64,
    pub xp: i64,
    pub level: i32,
    pub last_gain_at: DateTime<Utc>,
}
