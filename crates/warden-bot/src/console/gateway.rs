//! Console action gateway
//!
//! Prints every outbound action as one JSON line instead of calling a
//! platform. Role mutations are remembered so later member fetches see
//! them; all other metadata is synthesized.

use std::io::Write;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::DateTime;
use dashmap::DashMap;
use serde::Serialize;

use warden_core::entities::{BotPrivilege, CommunityInfo, MemberSnapshot, RoleInfo, RoleMenu};
use warden_core::events::InteractionRef;
use warden_core::{ActionError, ActionGateway, ActionResult, Permissions, Snowflake};

/// One line of console output
#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ConsoleAction<'a> {
    SendMessage {
        channel_id: Snowflake,
        message_id: Snowflake,
        content: &'a str,
    },
    DeleteMessage {
        channel_id: Snowflake,
        message_id: Snowflake,
    },
    SendRoleMenu {
        channel_id: Snowflake,
        message_id: Snowflake,
        custom_id: String,
        title: Option<&'a str>,
        options: Vec<&'a str>,
    },
    Acknowledge {
        interaction_id: Snowflake,
        content: &'a str,
    },
    AddRoles {
        community_id: Snowflake,
        member_id: Snowflake,
        role_ids: &'a [Snowflake],
    },
    RemoveRoles {
        community_id: Snowflake,
        member_id: Snowflake,
        role_ids: &'a [Snowflake],
    },
}

/// Dry-run gateway writing actions to `out`
pub struct ConsoleGateway<W: Write + Send> {
    out: Mutex<W>,
    next_message_id: AtomicI64,
    member_roles: DashMap<(Snowflake, Snowflake), Vec<Snowflake>>,
}

impl ConsoleGateway<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleGateway<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            next_message_id: AtomicI64::new(1),
            member_roles: DashMap::new(),
        }
    }

    /// Recover the writer, e.g. to inspect captured output
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn emit(&self, action: &ConsoleAction<'_>) -> ActionResult<()> {
        let line =
            serde_json::to_string(action).map_err(|e| ActionError::Transport(e.to_string()))?;
        let mut out = self
            .out
            .lock()
            .map_err(|_| ActionError::Transport("console writer poisoned".to_string()))?;
        writeln!(out, "{line}").map_err(|e| ActionError::Transport(e.to_string()))?;
        out.flush()
            .map_err(|e| ActionError::Transport(e.to_string()))
    }

    fn message_id(&self) -> Snowflake {
        Snowflake::new(self.next_message_id.fetch_add(1, Ordering::Relaxed))
    }
}

#[async_trait]
impl<W: Write + Send> ActionGateway for ConsoleGateway<W> {
    async fn send_message(&self, channel_id: Snowflake, content: &str) -> ActionResult<Snowflake> {
        let message_id = self.message_id();
        self.emit(&ConsoleAction::SendMessage {
            channel_id,
            message_id,
            content,
        })?;
        Ok(message_id)
    }

    async fn delete_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> ActionResult<()> {
        self.emit(&ConsoleAction::DeleteMessage {
            channel_id,
            message_id,
        })
    }

    async fn send_role_menu(
        &self,
        channel_id: Snowflake,
        menu: &RoleMenu,
        options: &[RoleInfo],
    ) -> ActionResult<Snowflake> {
        let message_id = self.message_id();
        self.emit(&ConsoleAction::SendRoleMenu {
            channel_id,
            message_id,
            custom_id: menu.custom_id(),
            title: menu.title.as_deref(),
            options: options.iter().map(|role| role.name.as_str()).collect(),
        })?;
        Ok(message_id)
    }

    async fn acknowledge(&self, interaction: &InteractionRef, content: &str) -> ActionResult<()> {
        self.emit(&ConsoleAction::Acknowledge {
            interaction_id: interaction.id,
            content,
        })
    }

    async fn add_roles(
        &self,
        community_id: Snowflake,
        member_id: Snowflake,
        role_ids: &[Snowflake],
    ) -> ActionResult<()> {
        self.emit(&ConsoleAction::AddRoles {
            community_id,
            member_id,
            role_ids,
        })?;
        let mut held = self.member_roles.entry((community_id, member_id)).or_default();
        for id in role_ids {
            if !held.contains(id) {
                held.push(*id);
            }
        }
        Ok(())
    }

    async fn remove_roles(
        &self,
        community_id: Snowflake,
        member_id: Snowflake,
        role_ids: &[Snowflake],
    ) -> ActionResult<()> {
        self.emit(&ConsoleAction::RemoveRoles {
            community_id,
            member_id,
            role_ids,
        })?;
        if let Some(mut held) = self.member_roles.get_mut(&(community_id, member_id)) {
            held.retain(|id| !role_ids.contains(id));
        }
        Ok(())
    }

    async fn fetch_member(
        &self,
        community_id: Snowflake,
        member_id: Snowflake,
    ) -> ActionResult<MemberSnapshot> {
        let mut member = MemberSnapshot::new(community_id, member_id, DateTime::UNIX_EPOCH);
        if let Some(held) = self.member_roles.get(&(community_id, member_id)) {
            member.role_ids = held.value().clone();
        }
        Ok(member)
    }

    async fn fetch_role(&self, _community_id: Snowflake, role_id: Snowflake) -> ActionResult<RoleInfo> {
        Ok(RoleInfo::new(role_id, format!("role-{role_id}"), 1))
    }

    async fn fetch_community(&self, community_id: Snowflake) -> ActionResult<CommunityInfo> {
        Ok(CommunityInfo {
            id: community_id,
            name: format!("community-{community_id}"),
            system_channel_id: None,
        })
    }

    async fn fetch_privilege(&self, _community_id: Snowflake) -> ActionResult<BotPrivilege> {
        Ok(BotPrivilege {
            permissions: Permissions::MANAGE_ROLES | Permissions::MANAGE_MESSAGES,
            highest_position: i32::MAX,
        })
    }
}
