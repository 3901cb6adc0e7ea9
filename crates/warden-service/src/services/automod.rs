//! Automod
//!
//! Removes invite links posted by members who joined recently and lack the
//! bypass permission.

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use tracing::{info, instrument, warn};

use warden_core::events::MessagePosted;
use warden_core::Snowflake;

use super::context::EngineContext;
use super::error::{ServiceError, ServiceResult};
use crate::contain::contain;
use crate::notices;

/// Invite links in both the short and the long form
const INVITE_PATTERN: &str = r"(?i)(?:discord\.gg|discord(?:app)?\.com/invite)/[a-z0-9-]+";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomodDecision {
    Allow,
    Block,
}

impl AutomodDecision {
    pub fn is_block(self) -> bool {
        self == Self::Block
    }
}

/// Stateless decision function over one message
#[derive(Debug, Clone)]
pub struct AutomodFilter {
    invite: Regex,
    new_member_window: Duration,
}

impl AutomodFilter {
    /// Filter treating members younger than `new_member_window` as new
    pub fn new(new_member_window: Duration) -> ServiceResult<Self> {
        let invite = Regex::new(INVITE_PATTERN)
            .map_err(|e| ServiceError::internal(format!("invalid invite pattern: {e}")))?;
        Ok(Self {
            invite,
            new_member_window,
        })
    }

    pub fn contains_invite(&self, text: &str) -> bool {
        self.invite.is_match(text)
    }

    /// A member is new while strictly less than the window has passed
    pub fn is_new_member(&self, joined_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(joined_at) < self.new_member_window
    }

    pub fn evaluate(
        &self,
        text: &str,
        joined_at: DateTime<Utc>,
        now: DateTime<Utc>,
        bypass: bool,
    ) -> AutomodDecision {
        if !bypass && self.is_new_member(joined_at, now) && self.contains_invite(text) {
            AutomodDecision::Block
        } else {
            AutomodDecision::Allow
        }
    }
}

/// Automod service
pub struct AutomodService<'a> {
    ctx: &'a EngineContext,
}

impl<'a> AutomodService<'a> {
    /// Create a new AutomodService
    pub fn new(ctx: &'a EngineContext) -> Self {
        Self { ctx }
    }

    /// Evaluate a message and enforce the decision
    ///
    /// On Block the delete, the warning and the audit line are issued
    /// concurrently and each failure is contained on its own.
    #[instrument(skip(self, message), fields(community_id = %message.community_id, member_id = %message.author.user_id))]
    pub async fn screen(&self, message: &MessagePosted) -> AutomodDecision {
        let decision = self.ctx.automod().evaluate(
            &message.content,
            message.author.joined_at,
            message.timestamp,
            message.author.permissions.bypasses_automod(),
        );

        if decision.is_block() {
            self.enforce(message).await;
        }
        decision
    }

    async fn enforce(&self, message: &MessagePosted) {
        let gateway = self.ctx.gateway();
        let member = message.author.user_id.user_mention();

        let delete = async {
            contain(
                "delete_message",
                gateway
                    .delete_message(message.channel_id, message.message_id)
                    .await,
            );
        };

        let warning = async {
            contain(
                "send_message",
                gateway
                    .send_message(message.channel_id, &notices::automod_warning(&member))
                    .await,
            );
        };

        let audit = async {
            if let Some(log_channel) = self.log_channel(message.community_id).await {
                let line = notices::automod_audit(&member, &message.channel_id.channel_mention());
                contain("send_message", gateway.send_message(log_channel, &line).await);
            }
        };

        tokio::join!(delete, warning, audit);

        info!(channel_id = %message.channel_id, message_id = %message.message_id, "Invite link removed");
    }

    /// The configured log channel; a store failure only skips the audit line
    async fn log_channel(&self, community_id: Snowflake) -> Option<Snowflake> {
        match self.ctx.config_repo().find(community_id).await {
            Ok(config) => config.and_then(|c| c.log_channel_id),
            Err(e) => {
                warn!(error = %e, "Config lookup failed, skipping audit line");
                None
            }
        }
    }
}
