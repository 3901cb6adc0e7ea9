//! Member progression entity - experience and level within one community

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// XP needed to advance from `level` to `level + 1`
#[inline]
pub const fn xp_threshold(level: u32) -> u64 {
    let level = level as u64;
    5 * level * level + 50 * level + 100
}

/// Experience record for one member in one community
///
/// `xp` is the remainder toward the next level and always stays below
/// `xp_threshold(level)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProgression {
    pub community_id: Snowflake,
    pub member_id: Snowflake,
    pub xp: u64,
    pub level: u32,
    /// Unix epoch means the member never earned XP
    pub last_gain_at: DateTime<Utc>,
}

impl MemberProgression {
    /// A member who has never earned XP
    pub fn new(community_id: Snowflake, member_id: Snowflake) -> Self {
        Self {
            community_id,
            member_id,
            xp: 0,
            level: 0,
            last_gain_at: DateTime::UNIX_EPOCH,
        }
    }

    /// Whether a gain at `now` falls inside the cooldown window
    pub fn on_cooldown(&self, now: DateTime<Utc>, cooldown: Duration) -> bool {
        now.signed_duration_since(self.last_gain_at) < cooldown
    }

    /// Add XP at `now`, rolling over as many levels as it covers
    ///
    /// Returns the number of levels gained.
    pub fn grant(&mut self, gain: u64, now: DateTime<Utc>) -> u32 {
        self.xp += gain;
        let mut gained = 0;
        while self.xp >= xp_threshold(self.level) {
            self.xp -= xp_threshold(self.level);
            self.level += 1;
            gained += 1;
        }
        self.last_gain_at = now;
        gained
    }

    /// XP still needed to reach the next level
    pub fn remaining(&self) -> u64 {
        xp_threshold(self.level) - self.xp
    }

    /// Total XP earned across all levels
    pub fn total_xp(&self) -> u64 {
        (0..self.level).map(xp_threshold).sum::<u64>() + self.xp
    }
}
