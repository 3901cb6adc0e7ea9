//! Inbound events - what the platform tells the automation happened
//!
//! The event source delivers each occurrence exactly once. Anything the
//! engine does not react to deserializes as [`InboundEvent::Unsupported`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::RoleMenu;
use crate::value_objects::{Permissions, Snowflake};

/// All events the engine can receive
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InboundEvent {
    MessagePosted(MessagePosted),
    MemberJoined(MemberJoined),
    SelectionMade(SelectionMade),
    #[serde(other)]
    Unsupported,
}

impl InboundEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::MessagePosted(_) => "MESSAGE_POSTED",
            Self::MemberJoined(_) => "MEMBER_JOINED",
            Self::SelectionMade(_) => "SELECTION_MADE",
            Self::Unsupported => "UNSUPPORTED",
        }
    }

    /// Community the event belongs to
    pub fn community_id(&self) -> Option<Snowflake> {
        match self {
            Self::MessagePosted(e) => Some(e.community_id),
            Self::MemberJoined(e) => Some(e.community_id),
            Self::SelectionMade(e) => Some(e.community_id),
            Self::Unsupported => None,
        }
    }

    /// Member who caused the event
    pub fn actor_id(&self) -> Option<Snowflake> {
        match self {
            Self::MessagePosted(e) => Some(e.author.user_id),
            Self::MemberJoined(e) => Some(e.user_id),
            Self::SelectionMade(e) => Some(e.user_id),
            Self::Unsupported => None,
        }
    }
}

/// Author details delivered with a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageAuthor {
    pub user_id: Snowflake,
    pub joined_at: DateTime<Utc>,
    #[serde(default)]
    pub permissions: Permissions,
    #[serde(default)]
    pub bot: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePosted {
    pub community_id: Snowflake,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    pub author: MessageAuthor,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberJoined {
    pub community_id: Snowflake,
    pub user_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

/// Handle used to answer an interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRef {
    pub id: Snowflake,
    pub token: String,
}

/// A member submitted a role-menu selector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionMade {
    pub community_id: Snowflake,
    pub channel_id: Snowflake,
    pub user_id: Snowflake,
    pub interaction: InteractionRef,
    /// Candidate set, decoded from the selector id
    #[serde(rename = "custom_id")]
    pub menu: RoleMenu,
    /// Chosen subset (may be empty)
    #[serde(default)]
    pub values: Vec<Snowflake>,
    pub timestamp: DateTime<Utc>,
}
