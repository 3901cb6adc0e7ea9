//! Permission flags as reported by the chat platform
//!
//! Only the bits the automation reasons about are named; unknown bits are
//! truncated on the way in.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Platform permission flags carried on members and the automation itself
    ///
    /// Serialized as a decimal string in JSON for JavaScript safety.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        /// View channel and read messages
        const VIEW_CHANNEL     = 1 << 0;
        /// Send messages in text channels
        const SEND_MESSAGES    = 1 << 1;
        /// Delete other users' messages
        const MANAGE_MESSAGES  = 1 << 2;
        /// Create, edit, delete, assign roles
        const MANAGE_ROLES     = 1 << 4;
        /// Edit community settings
        const MANAGE_GUILD     = 1 << 5;
        /// Bypass all permission checks
        const ADMINISTRATOR    = 1 << 8;

        /// Permissions that exempt a member from automod
        const AUTOMOD_BYPASS = Self::MANAGE_MESSAGES.bits() | Self::ADMINISTRATOR.bits();
    }
}

impl Permissions {
    /// Check if the permission set contains a required permission
    ///
    /// Administrators bypass all permission checks.
    #[inline]
    pub fn has(&self, permission: Permissions) -> bool {
        if self.contains(Permissions::ADMINISTRATOR) {
            return true;
        }
        self.contains(permission)
    }

    /// Whether a message author holding these permissions is exempt from automod
    #[inline]
    pub fn bypasses_automod(&self) -> bool {
        self.intersects(Permissions::AUTOMOD_BYPASS)
    }

    /// Create from raw i64 bits
    #[inline]
    pub fn from_i64(bits: i64) -> Self {
        Permissions::from_bits_truncate(bits as u64)
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::empty()
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl Serialize for Permissions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.bits().to_string())
    }
}

// Deserialize from string or number
impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct PermissionsVisitor;

        impl Visitor<'_> for PermissionsVisitor {
            type Value = Permissions;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer representing permission bits")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                Ok(Permissions::from_i64(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                Ok(Permissions::from_bits_truncate(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                value
                    .parse::<u64>()
                    .map(Permissions::from_bits_truncate)
                    .map_err(|_| de::Error::custom("invalid permissions string"))
            }
        }

        deserializer.deserialize_any(PermissionsVisitor)
    }
}
