//! Community configuration entity and the typed updates that mutate it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Welcome text used when a community has not set its own
pub const DEFAULT_WELCOME_TEMPLATE: &str = "Welcome {user} to **{server}**! \u{1f44b}";

/// Longest template a community may store (one platform message)
pub const MAX_TEMPLATE_LENGTH: usize = 2000;

/// Per-community automation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityConfig {
    pub community_id: Snowflake,
    pub welcome_channel_id: Option<Snowflake>,
    pub welcome_message: Option<String>,
    pub autorole_id: Option<Snowflake>,
    pub leveling_enabled: bool,
    pub log_channel_id: Option<Snowflake>,
    pub updated_at: DateTime<Utc>,
}

impl CommunityConfig {
    /// Settings a community has before anything was configured
    pub fn new(community_id: Snowflake) -> Self {
        Self {
            community_id,
            welcome_channel_id: None,
            welcome_message: None,
            autorole_id: None,
            leveling_enabled: true,
            log_channel_id: None,
            updated_at: Utc::now(),
        }
    }

    /// The welcome template in effect
    pub fn welcome_template(&self) -> &str {
        self.welcome_message
            .as_deref()
            .unwrap_or(DEFAULT_WELCOME_TEMPLATE)
    }

    /// Overlay a single-field update, leaving every other field untouched
    pub fn apply(&mut self, update: &ConfigUpdate) {
        match update {
            ConfigUpdate::Welcome {
                channel_id,
                template,
            } => {
                self.welcome_channel_id = Some(*channel_id);
                if let Some(template) = template {
                    self.welcome_message = Some(template.clone());
                }
            }
            ConfigUpdate::Autorole(role_id) => self.autorole_id = *role_id,
            ConfigUpdate::LevelingEnabled(enabled) => self.leveling_enabled = *enabled,
            ConfigUpdate::LogChannel(channel_id) => self.log_channel_id = *channel_id,
        }
        self.updated_at = Utc::now();
    }
}

/// A configuration mutation touching exactly one setting
///
/// `Welcome` sets the channel and, when supplied, replaces the template;
/// omitting the template keeps the stored one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ConfigUpdate {
    Welcome {
        channel_id: Snowflake,
        template: Option<String>,
    },
    /// `None` turns autorole off
    Autorole(Option<Snowflake>),
    LevelingEnabled(bool),
    /// `None` turns audit logging off
    LogChannel(Option<Snowflake>),
}

impl ConfigUpdate {
    /// Reject updates that could never be stored
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Self::Welcome {
            template: Some(template),
            ..
        } = self
        {
            if template.trim().is_empty() {
                return Err(DomainError::ValidationError(
                    "welcome template must not be empty".to_string(),
                ));
            }
            if template.chars().count() > MAX_TEMPLATE_LENGTH {
                return Err(DomainError::ContentTooLong {
                    max: MAX_TEMPLATE_LENGTH,
                });
            }
        }
        Ok(())
    }

    /// Stable field name for logs
    pub fn field(&self) -> &'static str {
        match self {
            Self::Welcome { .. } => "welcome",
            Self::Autorole(_) => "autorole",
            Self::LevelingEnabled(_) => "leveling_enabled",
            Self::LogChannel(_) => "log_channel",
        }
    }
}

/// Substitute `{user}` and `{server}` in a welcome template
pub fn render_welcome(template: &str, user_mention: &str, server_name: &str) -> String {
    template
        .replace("{user}", user_mention)
        .replace("{server}", server_name)
}
