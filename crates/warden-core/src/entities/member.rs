//! Member snapshot - a member's state as fetched from the platform

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Permissions, Snowflake};

/// Community member as seen at reaction time (never cached)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSnapshot {
    pub community_id: Snowflake,
    pub user_id: Snowflake,
    pub role_ids: Vec<Snowflake>,
    pub joined_at: DateTime<Utc>,
    #[serde(default)]
    pub permissions: Permissions,
}

impl MemberSnapshot {
    pub fn new(community_id: Snowflake, user_id: Snowflake, joined_at: DateTime<Utc>) -> Self {
        Self {
            community_id,
            user_id,
            role_ids: Vec::new(),
            joined_at,
            permissions: Permissions::empty(),
        }
    }

    /// Check if member has a specific role
    #[inline]
    pub fn has_role(&self, role_id: Snowflake) -> bool {
        self.role_ids.contains(&role_id)
    }
}
