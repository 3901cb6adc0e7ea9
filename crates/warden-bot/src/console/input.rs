//! Console input
//!
//! Each stdin line is either an inbound event or an operator command.
//! Events are queued for the pump; commands run inline against the
//! engine's config and role-menu services.

use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{info, warn};

use warden_core::entities::ConfigUpdate;
use warden_core::events::InboundEvent;
use warden_core::Snowflake;
use warden_service::{ConfigService, EngineContext, RoleMenuService, ServiceResult};

/// Operator commands accepted alongside events
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ConsoleCommand {
    Configure {
        community_id: Snowflake,
        update: ConfigUpdate,
    },
    CreateRoleMenu {
        community_id: Snowflake,
        channel_id: Snowflake,
        #[serde(default)]
        title: Option<String>,
        role_ids: Vec<Snowflake>,
    },
}

/// A parsed console line
#[derive(Debug)]
pub enum ConsoleLine {
    Command(ConsoleCommand),
    Event(InboundEvent),
}

impl ConsoleLine {
    /// Lines carrying a `command` field are commands, everything else is an event
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(line)?;
        if value.get("command").is_some() {
            serde_json::from_value(value).map(Self::Command)
        } else {
            serde_json::from_value(value).map(Self::Event)
        }
    }
}

impl ConsoleCommand {
    pub async fn execute(self, ctx: &EngineContext) -> ServiceResult<()> {
        match self {
            Self::Configure {
                community_id,
                update,
            } => {
                ConfigService::new(ctx).apply(community_id, update).await?;
            }
            Self::CreateRoleMenu {
                community_id,
                channel_id,
                title,
                role_ids,
            } => {
                RoleMenuService::new(ctx)
                    .create_menu(community_id, channel_id, title, role_ids)
                    .await?;
            }
        }
        Ok(())
    }
}

/// Read lines until EOF, running commands and forwarding events
///
/// Malformed lines are logged and skipped. Returns the number of lines read.
pub async fn read_lines<R>(
    reader: R,
    ctx: &EngineContext,
    events: mpsc::Sender<InboundEvent>,
) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut count = 0usize;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        count += 1;

        match ConsoleLine::parse(line) {
            Ok(ConsoleLine::Event(event)) => {
                if events.send(event).await.is_err() {
                    warn!("Event pump stopped, no longer reading input");
                    break;
                }
            }
            Ok(ConsoleLine::Command(command)) => {
                if let Err(e) = command.execute(ctx).await {
                    warn!(error = %e, code = e.error_code(), "Command failed");
                }
            }
            Err(e) => warn!(line = count, error = %e, "Ignoring malformed input line"),
        }
    }

    info!(lines = count, "Input exhausted");
    Ok(count)
}
