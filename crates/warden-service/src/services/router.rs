//! Event router
//!
//! Dispatches each inbound event to its handler. Handlers share no state
//! across events, and every failure stops here: it is logged and, for
//! selections, answered with a generic notice. Nothing is re-raised.

use tracing::{debug, error, instrument};

use warden_core::events::{InboundEvent, MemberJoined, MessagePosted, SelectionMade};

use super::automod::AutomodService;
use super::context::EngineContext;
use super::error::ServiceError;
use super::leveling::LevelingService;
use super::onboarding::OnboardingService;
use super::role_menu::RoleMenuService;
use crate::contain::contain;
use crate::notices;

/// How an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    /// Dropped on purpose (unsupported kind, automation's own message)
    Ignored,
    /// The handler failed; the failure was logged and contained
    Failed,
}

/// Event router
#[derive(Debug, Clone)]
pub struct EventRouter {
    ctx: EngineContext,
}

impl EventRouter {
    pub fn new(ctx: EngineContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    /// Handle one event to completion
    #[instrument(
        skip(self, event),
        fields(
            event_type = event.event_type(),
            community_id = ?event.community_id(),
            actor_id = ?event.actor_id()
        )
    )]
    pub async fn dispatch(&self, event: InboundEvent) -> Dispatch {
        match event {
            InboundEvent::MessagePosted(message) => self.on_message(&message).await,
            InboundEvent::MemberJoined(join) => self.on_join(&join).await,
            InboundEvent::SelectionMade(selection) => self.on_selection(&selection).await,
            InboundEvent::Unsupported => {
                debug!("Ignoring unsupported event");
                Dispatch::Ignored
            }
        }
    }

    async fn on_message(&self, message: &MessagePosted) -> Dispatch {
        if message.author.bot {
            return Dispatch::Ignored;
        }

        let decision = AutomodService::new(&self.ctx).screen(message).await;
        if decision.is_block() {
            return Dispatch::Handled;
        }

        let outcome = LevelingService::new(&self.ctx)
            .on_message(
                message.community_id,
                message.author.user_id,
                message.timestamp,
            )
            .await;

        match outcome {
            Ok(outcome) => {
                if let Some(level) = outcome.leveled_up() {
                    let notice = notices::level_up(&message.author.user_id.user_mention(), level);
                    contain(
                        "send_message",
                        self.ctx
                            .gateway()
                            .send_message(message.channel_id, &notice)
                            .await,
                    );
                }
                Dispatch::Handled
            }
            Err(e) => report("leveling", &e),
        }
    }

    async fn on_join(&self, join: &MemberJoined) -> Dispatch {
        match OnboardingService::new(&self.ctx).on_join(join).await {
            Ok(_) => Dispatch::Handled,
            Err(e) => report("onboarding", &e),
        }
    }

    async fn on_selection(&self, selection: &SelectionMade) -> Dispatch {
        match RoleMenuService::new(&self.ctx).on_selection(selection).await {
            Ok(_) => Dispatch::Handled,
            Err(e) => {
                let dispatch = report("role_menu", &e);
                contain(
                    "acknowledge",
                    self.ctx
                        .gateway()
                        .acknowledge(&selection.interaction, notices::INTERACTION_FAILURE)
                        .await,
                );
                dispatch
            }
        }
    }
}

fn report(handler: &'static str, e: &ServiceError) -> Dispatch {
    error!(
        handler,
        error = %e,
        code = e.error_code(),
        store_failure = e.is_store_failure(),
        "Event handling failed"
    );
    Dispatch::Failed
}
