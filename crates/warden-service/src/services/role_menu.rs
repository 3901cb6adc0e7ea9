//! Role-menu service
//!
//! Publishes self-service role selectors and reconciles selections. A
//! selection resets every manageable candidate the member holds and then
//! applies the new choice, so the member converges on exactly the selection
//! regardless of earlier drift.

use futures::future::join_all;
use tracing::{info, instrument, warn};

use warden_core::entities::{BotPrivilege, RoleInfo, RoleMenu};
use warden_core::events::SelectionMade;
use warden_core::{DomainError, Snowflake};

use super::context::EngineContext;
use super::error::{ServiceError, ServiceResult};
use crate::contain::contain;
use crate::notices;

/// Role changes applied for one selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub removed: Vec<Snowflake>,
    pub added: Vec<Snowflake>,
}

/// Role-menu service
pub struct RoleMenuService<'a> {
    ctx: &'a EngineContext,
}

impl<'a> RoleMenuService<'a> {
    /// Create a new RoleMenuService
    pub fn new(ctx: &'a EngineContext) -> Self {
        Self { ctx }
    }

    /// Publish a selector offering `role_ids` in `channel_id`
    ///
    /// Every role must exist and be manageable by the automation.
    #[instrument(skip(self, title))]
    pub async fn create_menu(
        &self,
        community_id: Snowflake,
        channel_id: Snowflake,
        title: Option<String>,
        role_ids: Vec<Snowflake>,
    ) -> ServiceResult<(RoleMenu, Snowflake)> {
        let menu = RoleMenu::new(title, role_ids)?;
        let gateway = self.ctx.gateway();

        let privilege = gateway
            .fetch_privilege(community_id)
            .await
            .map_err(|e| ServiceError::action("fetch_privilege", e))?;

        let mut options = Vec::with_capacity(menu.role_ids.len());
        for role_id in &menu.role_ids {
            let role = gateway
                .fetch_role(community_id, *role_id)
                .await
                .map_err(|_| ServiceError::not_found("Role", role_id.to_string()))?;
            if !privilege.can_manage(&role) {
                return Err(DomainError::UnmanageableRole(*role_id).into());
            }
            options.push(role);
        }

        let message_id = gateway
            .send_role_menu(channel_id, &menu, &options)
            .await
            .map_err(|e| ServiceError::action("send_role_menu", e))?;

        info!(message_id = %message_id, roles = menu.role_ids.len(), "Role menu published");
        Ok((menu, message_id))
    }

    /// Converge the member's candidate roles onto their selection
    ///
    /// Acknowledges the interaction on success. Any failed step returns an
    /// error and leaves the failure reply to the caller.
    #[instrument(skip(self, event), fields(community_id = %event.community_id, member_id = %event.user_id))]
    pub async fn on_selection(&self, event: &SelectionMade) -> ServiceResult<Reconciliation> {
        let gateway = self.ctx.gateway();

        let (member, privilege) = tokio::join!(
            gateway.fetch_member(event.community_id, event.user_id),
            gateway.fetch_privilege(event.community_id),
        );
        let member = member.map_err(|e| ServiceError::action("fetch_member", e))?;
        let privilege = privilege.map_err(|e| ServiceError::action("fetch_privilege", e))?;

        let manageable = self
            .manageable_candidates(event.community_id, &event.menu, privilege)
            .await;

        let removed: Vec<Snowflake> = member
            .role_ids
            .iter()
            .copied()
            .filter(|id| manageable.contains(id))
            .collect();

        let mut added: Vec<Snowflake> = Vec::with_capacity(event.values.len());
        for id in &event.values {
            if manageable.contains(id) && !added.contains(id) {
                added.push(*id);
            }
        }

        if !removed.is_empty() {
            gateway
                .remove_roles(event.community_id, event.user_id, &removed)
                .await
                .map_err(|e| ServiceError::action("remove_roles", e))?;
        }
        if !added.is_empty() {
            gateway
                .add_roles(event.community_id, event.user_id, &added)
                .await
                .map_err(|e| ServiceError::action("add_roles", e))?;
        }

        contain(
            "acknowledge",
            gateway
                .acknowledge(&event.interaction, notices::ROLES_UPDATED)
                .await,
        );

        info!(removed = removed.len(), added = added.len(), "Role menu applied");
        Ok(Reconciliation { removed, added })
    }

    /// Candidates the automation may grant right now; failed lookups count as unmanageable
    async fn manageable_candidates(
        &self,
        community_id: Snowflake,
        menu: &RoleMenu,
        privilege: BotPrivilege,
    ) -> Vec<Snowflake> {
        let gateway = self.ctx.gateway();
        let lookups = join_all(
            menu.role_ids
                .iter()
                .map(|id| gateway.fetch_role(community_id, *id)),
        )
        .await;

        lookups
            .into_iter()
            .filter_map(|result| contain("fetch_role", result))
            .filter(|role: &RoleInfo| {
                let ok = privilege.can_manage(role);
                if !ok {
                    warn!(role_id = %role.id, "Candidate role not manageable, excluded");
                }
                ok
            })
            .map(|role| role.id)
            .collect()
    }
}
