//! Role menu descriptor - the fixed candidate set behind a self-service selector
//!
//! The automation does not store menus. The candidate set is encoded into the
//! selector's custom id when the menu is published and decoded again from
//! every selection event, so the selector always declares its own candidates.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Most roles a single menu may offer
pub const MAX_MENU_ROLES: usize = 5;

/// Namespace prefix of role-menu selector ids
pub const CUSTOM_ID_PREFIX: &str = "rolemenu:";

/// Platform limit on selector id length
pub const MAX_CUSTOM_ID_LENGTH: usize = 100;

/// Candidate roles offered by one selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMenu {
    /// Only known at creation time; menus decoded from events have no title
    pub title: Option<String>,
    pub role_ids: Vec<Snowflake>,
}

impl RoleMenu {
    /// Build a menu, enforcing 1..=5 distinct candidates
    pub fn new(title: Option<String>, role_ids: Vec<Snowflake>) -> Result<Self, DomainError> {
        if role_ids.is_empty() || role_ids.len() > MAX_MENU_ROLES {
            return Err(DomainError::InvalidMenuSize {
                max: MAX_MENU_ROLES,
                got: role_ids.len(),
            });
        }

        let mut seen = HashSet::with_capacity(role_ids.len());
        for id in &role_ids {
            if !seen.insert(*id) {
                return Err(DomainError::DuplicateMenuRole(*id));
            }
        }

        Ok(Self { title, role_ids })
    }

    /// Selector id carrying the candidate set (`rolemenu:<base36>,<base36>`)
    pub fn custom_id(&self) -> String {
        let encoded: Vec<String> = self
            .role_ids
            .iter()
            .map(|id| to_base36(id.into_inner() as u64))
            .collect();
        format!("{CUSTOM_ID_PREFIX}{}", encoded.join(","))
    }

    /// Decode a selector id produced by [`RoleMenu::custom_id`]
    pub fn from_custom_id(custom_id: &str) -> Result<Self, DomainError> {
        let body = custom_id.strip_prefix(CUSTOM_ID_PREFIX).ok_or_else(|| {
            DomainError::ValidationError(format!("not a role menu selector: {custom_id}"))
        })?;

        let role_ids = body
            .split(',')
            .map(|part| {
                u64::from_str_radix(part, 36)
                    .ok()
                    .and_then(|raw| i64::try_from(raw).ok())
                    .map(Snowflake::new)
                    .ok_or_else(|| {
                        DomainError::ValidationError(format!("bad role id in selector: {part}"))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(None, role_ids)
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::with_capacity(13);
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

// On the wire a menu travels as its selector id
impl Serialize for RoleMenu {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.custom_id())
    }
}

impl<'de> Deserialize<'de> for RoleMenu {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let custom_id = String::deserialize(deserializer)?;
        RoleMenu::from_custom_id(&custom_id).map_err(serde::de::Error::custom)
    }
}
