//! Role metadata and the automation's own privilege within a community

use serde::{Deserialize, Serialize};

use crate::value_objects::{Permissions, Snowflake};

/// Role as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleInfo {
    pub id: Snowflake,
    pub name: String,
    /// Higher position = more authority
    pub position: i32,
    /// Owned by an integration; nobody can grant it by hand
    #[serde(default)]
    pub managed: bool,
    #[serde(default)]
    pub is_everyone: bool,
}

impl RoleInfo {
    pub fn new(id: Snowflake, name: impl Into<String>, position: i32) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            managed: false,
            is_everyone: false,
        }
    }
}

/// What the automation itself is allowed to do in a community
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotPrivilege {
    pub permissions: Permissions,
    /// Position of the automation's highest role
    pub highest_position: i32,
}

impl BotPrivilege {
    /// Whether the automation may grant or revoke `role`
    ///
    /// Requires MANAGE_ROLES, and the role must sit strictly below the
    /// automation's highest role. `@everyone` and integration roles never qualify.
    pub fn can_manage(&self, role: &RoleInfo) -> bool {
        self.permissions.has(Permissions::MANAGE_ROLES)
            && !role.is_everyone
            && !role.managed
            && self.highest_position > role.position
    }
}

/// Community metadata needed to render onboarding text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityInfo {
    pub id: Snowflake,
    pub name: String,
    /// The platform's default channel for system notices
    pub system_channel_id: Option<Snowflake>,
}
