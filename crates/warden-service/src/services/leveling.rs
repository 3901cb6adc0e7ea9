//! Leveling service
//!
//! Grants XP for qualifying messages and rolls levels over. Each member's
//! read-modify-write runs under that member's lock so concurrent messages
//! cannot lose an update.

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use warden_core::entities::MemberProgression;
use warden_core::Snowflake;

use super::context::EngineContext;
use super::error::ServiceResult;

/// Most entries a leaderboard returns
pub const MAX_LEADERBOARD_SIZE: i64 = 100;

/// Result of one qualifying message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    /// Leveling disabled, or the member is still on cooldown
    NoOp,
    Gained { level: u32, xp: u64 },
    LeveledUp { level: u32, xp: u64, levels_gained: u32 },
}

impl LevelOutcome {
    pub fn leveled_up(&self) -> Option<u32> {
        match self {
            Self::LeveledUp { level, .. } => Some(*level),
            _ => None,
        }
    }
}

/// Leveling service
pub struct LevelingService<'a> {
    ctx: &'a EngineContext,
}

impl<'a> LevelingService<'a> {
    /// Create a new LevelingService
    pub fn new(ctx: &'a EngineContext) -> Self {
        Self { ctx }
    }

    /// Apply one message to the member's progression
    ///
    /// Exactly one store write when XP is granted, none on NoOp.
    #[instrument(skip(self))]
    pub async fn on_message(
        &self,
        community_id: Snowflake,
        member_id: Snowflake,
        now: DateTime<Utc>,
    ) -> ServiceResult<LevelOutcome> {
        let enabled = self
            .ctx
            .config_repo()
            .find(community_id)
            .await?
            .map_or(true, |config| config.leveling_enabled);
        if !enabled {
            return Ok(LevelOutcome::NoOp);
        }

        let _guard = self
            .ctx
            .progression_locks()
            .lock((community_id, member_id))
            .await;

        let mut record = self
            .ctx
            .progression_repo()
            .find(community_id, member_id)
            .await?
            .unwrap_or_else(|| MemberProgression::new(community_id, member_id));

        if record.on_cooldown(now, self.ctx.settings().cooldown()) {
            debug!("Member on cooldown");
            return Ok(LevelOutcome::NoOp);
        }

        let gain = self.ctx.xp_source().draw();
        let levels_gained = record.grant(gain, now);
        self.ctx.progression_repo().put(&record).await?;

        if levels_gained > 0 {
            info!(level = record.level, levels_gained, "Member leveled up");
            Ok(LevelOutcome::LeveledUp {
                level: record.level,
                xp: record.xp,
                levels_gained,
            })
        } else {
            Ok(LevelOutcome::Gained {
                level: record.level,
                xp: record.xp,
            })
        }
    }

    /// A member's current record, zeroed when they never earned XP
    #[instrument(skip(self))]
    pub async fn progress(
        &self,
        community_id: Snowflake,
        member_id: Snowflake,
    ) -> ServiceResult<MemberProgression> {
        let record = self
            .ctx
            .progression_repo()
            .find(community_id, member_id)
            .await?;
        Ok(record.unwrap_or_else(|| MemberProgression::new(community_id, member_id)))
    }

    /// Top members by level, then XP; `limit` is clamped to 1..=100
    #[instrument(skip(self))]
    pub async fn leaderboard(
        &self,
        community_id: Snowflake,
        limit: i64,
    ) -> ServiceResult<Vec<MemberProgression>> {
        let limit = limit.clamp(1, MAX_LEADERBOARD_SIZE);
        Ok(self.ctx.progression_repo().top(community_id, limit).await?)
    }
}
