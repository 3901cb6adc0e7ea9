//! MemberProgression entity <-> model mapper

use chrono::{DateTime, Utc};
use warden_core::entities::MemberProgression;
use warden_core::value_objects::Snowflake;

use crate::models::MemberProgressionModel;

/// Convert MemberProgressionModel to MemberProgression entity
///
/// The table's CHECK constraints keep both counters non-negative.
impl From<MemberProgressionModel> for MemberProgression {
    fn from(model: MemberProgressionModel) -> Self {
        MemberProgression {
            community_id: Snowflake::new(model.community_id),
            member_id: Snowflake::new(model.member_id),
            xp: model.xp.max(0) as u64,
            level: model.level.max(0) as u32,
            last_gain_at: model.last_gain_at,
        }
    }
}

/// Entity values prepared for a full-row upsert
pub struct ProgressionUpsert {
    pub community_id: i64,
    pub member_id: i64,
    pub xp: i64,
    pub level: i32,
    pub last_gain_at: DateTime<Utc>,
}

impl ProgressionUpsert {
    pub fn new(record: &MemberProgression) -> Self {
        Self {
            community_id: record.community_id.into_inner(),
            member_id: record.member_id.into_inner(),
            xp: i64::try_from(record.xp).unwrap_or(i64::MAX),
            level: i32::try_from(record.level).unwrap_or(i32::MAX),
            last_gain_at: record.last_gain_at,
        }
    }
}
