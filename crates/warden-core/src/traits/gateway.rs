//! Action gateway (port) - the outbound side of the chat platform
//!
//! Each call is an independent asynchronous request that may fail; the
//! engine never assumes ordering between calls it did not sequence itself.

use async_trait::async_trait;

use crate::entities::{BotPrivilege, CommunityInfo, MemberSnapshot, RoleInfo, RoleMenu};
use crate::error::ActionResult;
use crate::events::InteractionRef;
use crate::value_objects::Snowflake;

#[async_trait]
pub trait ActionGateway: Send + Sync {
    // === Messages ===

    /// Post a message, returning its id
    async fn send_message(&self, channel_id: Snowflake, content: &str) -> ActionResult<Snowflake>;

    async fn delete_message(&self, channel_id: Snowflake, message_id: Snowflake)
        -> ActionResult<()>;

    /// Post a role-menu selector offering `options`
    async fn send_role_menu(
        &self,
        channel_id: Snowflake,
        menu: &RoleMenu,
        options: &[RoleInfo],
    ) -> ActionResult<Snowflake>;

    /// Answer an interaction privately to the member who triggered it
    async fn acknowledge(&self, interaction: &InteractionRef, content: &str) -> ActionResult<()>;

    // === Roles ===

    async fn add_roles(
        &self,
        community_id: Snowflake,
        member_id: Snowflake,
        role_ids: &[Snowflake],
    ) -> ActionResult<()>;

    async fn remove_roles(
        &self,
        community_id: Snowflake,
        member_id: Snowflake,
        role_ids: &[Snowflake],
    ) -> ActionResult<()>;

    // === Metadata ===

    async fn fetch_member(
        &self,
        community_id: Snowflake,
        member_id: Snowflake,
    ) -> ActionResult<MemberSnapshot>;

    async fn fetch_role(&self, community_id: Snowflake, role_id: Snowflake)
        -> ActionResult<RoleInfo>;

    async fn fetch_community(&self, community_id: Snowflake) -> ActionResult<CommunityInfo>;

    /// The automation's own permissions and highest role position
    async fn fetch_privilege(&self, community_id: Snowflake) -> ActionResult<BotPrivilege>;
}
