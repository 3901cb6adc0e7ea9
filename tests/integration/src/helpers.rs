//! Test helpers for integration tests
//!
//! Provides a fully wired engine over in-memory stores and a recording
//! gateway, and a router over caller-supplied stores.

use std::sync::Arc;

use anyhow::Result;
use warden_common::EngineConfig;
use warden_core::events::InboundEvent;
use warden_core::{ConfigRepository, ProgressionRepository};
use warden_db::{MemoryConfigRepository, MemoryProgressionRepository};
use warden_service::{Dispatch, EngineContext, EngineContextBuilder, EventRouter, FixedXp};

use crate::fixtures::RecordingGateway;

/// Engine instance with direct access to its stores and gateway
pub struct TestEngine {
    pub router: EventRouter,
    pub gateway: Arc<RecordingGateway>,
    pub configs: Arc<MemoryConfigRepository>,
    pub progressions: Arc<MemoryProgressionRepository>,
}

impl TestEngine {
    /// Engine whose every qualifying message grants `xp`
    pub fn with_xp(xp: u64) -> Result<Self> {
        Self::build(EngineConfig::default(), Some(xp))
    }

    /// Engine drawing XP from the configured random range
    pub fn random() -> Result<Self> {
        Self::build(EngineConfig::default(), None)
    }

    pub fn build(settings: EngineConfig, xp: Option<u64>) -> Result<Self> {
        let gateway = Arc::new(RecordingGateway::new());
        let configs = Arc::new(MemoryConfigRepository::new());
        let progressions = Arc::new(MemoryProgressionRepository::new());

        let ctx = wire(
            configs.clone(),
            progressions.clone(),
            gateway.clone(),
            settings,
            xp,
        )?;

        Ok(Self {
            router: EventRouter::new(ctx),
            gateway,
            configs,
            progressions,
        })
    }

    pub fn ctx(&self) -> &EngineContext {
        self.router.context()
    }

    pub async fn dispatch(&self, event: InboundEvent) -> Dispatch {
        self.router.dispatch(event).await
    }
}

/// Router over the given stores with a fixed XP gain
pub fn router_over(
    configs: Arc<dyn ConfigRepository>,
    progressions: Arc<dyn ProgressionRepository>,
    xp: u64,
) -> Result<(EventRouter, Arc<RecordingGateway>)> {
    let gateway = Arc::new(RecordingGateway::new());
    let ctx = wire(
        configs,
        progressions,
        gateway.clone(),
        EngineConfig::default(),
        Some(xp),
    )?;
    Ok((EventRouter::new(ctx), gateway))
}

fn wire(
    configs: Arc<dyn ConfigRepository>,
    progressions: Arc<dyn ProgressionRepository>,
    gateway: Arc<RecordingGateway>,
    settings: EngineConfig,
    xp: Option<u64>,
) -> Result<EngineContext> {
    let mut builder = EngineContextBuilder::new()
        .config_repo(configs)
        .progression_repo(progressions)
        .gateway(gateway)
        .settings(settings);
    if let Some(xp) = xp {
        builder = builder.xp_source(Arc::new(FixedXp(xp)));
    }
    Ok(builder.build()?)
}
