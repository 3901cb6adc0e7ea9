//! Onboarding service
//!
//! On member join: grant the autorole, post the welcome, and write an audit
//! line. The three run concurrently and each failure is swallowed on its
//! own; only a config store failure aborts the join.

use tracing::{debug, instrument, warn};

use warden_core::entities::{render_welcome, CommunityConfig};
use warden_core::events::MemberJoined;
use warden_core::Snowflake;

use super::context::EngineContext;
use super::error::ServiceResult;
use crate::contain::contain;
use crate::notices;

/// What onboarding managed to do for one join
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OnboardingReport {
    pub autorole_granted: bool,
    pub welcome_sent: bool,
    pub audit_sent: bool,
}

/// Onboarding service
pub struct OnboardingService<'a> {
    ctx: &'a EngineContext,
}

impl<'a> OnboardingService<'a> {
    /// Create a new OnboardingService
    pub fn new(ctx: &'a EngineContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, event), fields(community_id = %event.community_id, member_id = %event.user_id))]
    pub async fn on_join(&self, event: &MemberJoined) -> ServiceResult<OnboardingReport> {
        let config = self
            .ctx
            .config_repo()
            .find(event.community_id)
            .await?
            .unwrap_or_else(|| CommunityConfig::new(event.community_id));

        let (autorole_granted, welcome_sent, audit_sent) = tokio::join!(
            self.grant_autorole(&config, event.user_id),
            self.send_welcome(&config, event.user_id),
            self.send_audit(&config, event.user_id),
        );

        Ok(OnboardingReport {
            autorole_granted,
            welcome_sent,
            audit_sent,
        })
    }

    async fn grant_autorole(&self, config: &CommunityConfig, member_id: Snowflake) -> bool {
        let Some(role_id) = config.autorole_id else {
            return false;
        };
        let gateway = self.ctx.gateway();

        let (role, privilege) = tokio::join!(
            gateway.fetch_role(config.community_id, role_id),
            gateway.fetch_privilege(config.community_id),
        );
        let (Some(role), Some(privilege)) =
            (contain("fetch_role", role), contain("fetch_privilege", privilege))
        else {
            return false;
        };

        if !privilege.can_manage(&role) {
            warn!(role_id = %role_id, "Autorole is not assignable, skipping");
            return false;
        }

        contain(
            "add_roles",
            gateway
                .add_roles(config.community_id, member_id, &[role_id])
                .await,
        )
        .is_some()
    }

    async fn send_welcome(&self, config: &CommunityConfig, member_id: Snowflake) -> bool {
        let Some(community) = contain(
            "fetch_community",
            self.ctx.gateway().fetch_community(config.community_id).await,
        ) else {
            return false;
        };

        let Some(channel_id) = config.welcome_channel_id.or(community.system_channel_id) else {
            debug!("No welcome channel, skipping");
            return false;
        };

        let text = render_welcome(
            config.welcome_template(),
            &member_id.user_mention(),
            &community.name,
        );
        contain(
            "send_message",
            self.ctx.gateway().send_message(channel_id, &text).await,
        )
        .is_some()
    }

    async fn send_audit(&self, config: &CommunityConfig, member_id: Snowflake) -> bool {
        let Some(log_channel) = config.log_channel_id else {
            return false;
        };
        contain(
            "send_message",
            self.ctx
                .gateway()
                .send_message(log_channel, &notices::join_audit(&member_id.user_mention()))
                .await,
        )
        .is_some()
    }
}
