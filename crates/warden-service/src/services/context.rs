//! Engine context - dependency container for services
//!
//! Holds the two stores, the action gateway, and the tuning every service
//! reads. Built once at startup and shared by clone.

use std::sync::Arc;

use warden_common::EngineConfig;
use warden_core::traits::{ActionGateway, ConfigRepository, ProgressionRepository};
use warden_core::Snowflake;

use super::automod::AutomodFilter;
use super::error::{ServiceError, ServiceResult};
use crate::locks::KeyedLocks;
use crate::xp::{RandomXp, XpSource};

/// Lock key for one member's progression record
pub type ProgressionKey = (Snowflake, Snowflake);

/// Engine context containing all dependencies
#[derive(Clone)]
pub struct EngineContext {
    // Stores
    config_repo: Arc<dyn ConfigRepository>,
    progression_repo: Arc<dyn ProgressionRepository>,

    // Outbound actions
    gateway: Arc<dyn ActionGateway>,

    // Policy
    settings: EngineConfig,
    xp_source: Arc<dyn XpSource>,
    automod: AutomodFilter,

    // Serializes progression read-modify-write per member
    progression_locks: KeyedLocks<ProgressionKey>,
}

impl EngineContext {
    /// Create a new engine context with all dependencies
    pub fn new(
        config_repo: Arc<dyn ConfigRepository>,
        progression_repo: Arc<dyn ProgressionRepository>,
        gateway: Arc<dyn ActionGateway>,
        settings: EngineConfig,
        xp_source: Arc<dyn XpSource>,
    ) -> ServiceResult<Self> {
        let automod = AutomodFilter::new(settings.new_member_window())?;

        Ok(Self {
            config_repo,
            progression_repo,
            gateway,
            settings,
            xp_source,
            automod,
            progression_locks: KeyedLocks::new(),
        })
    }

    // === Stores ===

    /// Get the config repository
    pub fn config_repo(&self) -> &dyn ConfigRepository {
        self.config_repo.as_ref()
    }

    /// Get the progression repository
    pub fn progression_repo(&self) -> &dyn ProgressionRepository {
        self.progression_repo.as_ref()
    }

    // === Gateway ===

    /// Get the action gateway
    pub fn gateway(&self) -> &dyn ActionGateway {
        self.gateway.as_ref()
    }

    // === Policy ===

    pub fn settings(&self) -> &EngineConfig {
        &self.settings
    }

    pub fn xp_source(&self) -> &dyn XpSource {
        self.xp_source.as_ref()
    }

    pub fn automod(&self) -> &AutomodFilter {
        &self.automod
    }

    pub fn progression_locks(&self) -> &KeyedLocks<ProgressionKey> {
        &self.progression_locks
    }
}

impl std::fmt::Debug for EngineContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineContext")
            .field("settings", &self.settings)
            .field("repositories", &"...")
            .field("gateway", &"...")
            .finish()
    }
}

/// Builder for creating EngineContext with custom configuration
pub struct EngineContextBuilder {
    config_repo: Option<Arc<dyn ConfigRepository>>,
    progression_repo: Option<Arc<dyn ProgressionRepository>>,
    gateway: Option<Arc<dyn ActionGateway>>,
    settings: EngineConfig,
    xp_source: Option<Arc<dyn XpSource>>,
}

impl EngineContextBuilder {
    pub fn new() -> Self {
        Self {
            config_repo: None,
            progression_repo: None,
            gateway: None,
            settings: EngineConfig::default(),
            xp_source: None,
        }
    }

    pub fn config_repo(mut self, repo: Arc<dyn ConfigRepository>) -> Self {
        self.config_repo = Some(repo);
        self
    }

    pub fn progression_repo(mut self, repo: Arc<dyn ProgressionRepository>) -> Self {
        self.progression_repo = Some(repo);
        self
    }

    pub fn gateway(mut self, gateway: Arc<dyn ActionGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn settings(mut self, settings: EngineConfig) -> Self {
        self.settings = settings;
        self
    }

    /// Override the XP draw; defaults to a uniform draw over the configured range
    pub fn xp_source(mut self, source: Arc<dyn XpSource>) -> Self {
        self.xp_source = Some(source);
        self
    }

    /// Build the EngineContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<EngineContext> {
        let xp_source = self.xp_source.unwrap_or_else(|| {
            Arc::new(RandomXp::new(self.settings.xp_min, self.settings.xp_max))
        });

        EngineContext::new(
            self.config_repo
                .ok_or_else(|| ServiceError::validation("config_repo is required"))?,
            self.progression_repo
                .ok_or_else(|| ServiceError::validation("progression_repo is required"))?,
            self.gateway
                .ok_or_else(|| ServiceError::validation("gateway is required"))?,
            self.settings,
            xp_source,
        )
    }
}

impl Default for EngineContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
