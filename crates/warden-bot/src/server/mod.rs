//! Engine setup and initialization
//!
//! Opens the configured store, builds the engine context, and runs the
//! console harness until stdin closes.

use std::sync::Arc;

use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{info, warn};

use warden_common::{AppConfig, AppError, AppResult};
use warden_core::traits::{ActionGateway, ConfigRepository, ProgressionRepository};
use warden_db::{
    create_pool, ensure_schema, MemoryConfigRepository, MemoryProgressionRepository,
    PgConfigRepository, PgProgressionRepository, PoolConfig,
};
use warden_service::{EngineContext, EngineContextBuilder, EventPump, EventRouter};

use crate::console::{read_lines, ConsoleGateway};

/// Pending events buffered between the reader and the pump
const EVENT_BUFFER: usize = 1024;

/// Config and progression stores behind their traits
pub type Stores = (Arc<dyn ConfigRepository>, Arc<dyn ProgressionRepository>);

/// PostgreSQL when a database is configured, memory otherwise
pub async fn open_stores(config: &AppConfig) -> AppResult<Stores> {
    let Some(database) = &config.database else {
        warn!("DATABASE_URL not set, using the in-memory store; nothing survives a restart");
        return Ok((
            Arc::new(MemoryConfigRepository::new()),
            Arc::new(MemoryProgressionRepository::new()),
        ));
    };

    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(database))
        .await
        .map_err(AppError::database)?;
    ensure_schema(&pool).await.map_err(AppError::database)?;
    info!("PostgreSQL connection established");

    Ok((
        Arc::new(PgConfigRepository::new(pool.clone())),
        Arc::new(PgProgressionRepository::new(pool)),
    ))
}

/// Build the engine context over the given stores and gateway
pub fn create_engine(
    config: &AppConfig,
    stores: Stores,
    gateway: Arc<dyn ActionGateway>,
) -> AppResult<EngineContext> {
    let (config_repo, progression_repo) = stores;
    let ctx = EngineContextBuilder::new()
        .config_repo(config_repo)
        .progression_repo(progression_repo)
        .gateway(gateway)
        .settings(config.engine.clone())
        .build()?;
    Ok(ctx)
}

/// Run the engine over stdin until it closes
pub async fn run(config: AppConfig) -> AppResult<()> {
    let stores = open_stores(&config).await?;
    let ctx = create_engine(&config, stores, Arc::new(ConsoleGateway::stdout()))?;

    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    let pump = EventPump::new(EventRouter::new(ctx.clone()), config.engine.max_in_flight);
    let pump = tokio::spawn(pump.run(rx));

    info!(max_in_flight = config.engine.max_in_flight, "Engine ready, reading events from stdin");
    let reader = BufReader::new(tokio::io::stdin());
    let read = read_lines(reader, &ctx, tx).await;

    // The sender was moved into the reader, so the pump drains and stops
    let dispatched = pump.await.map_err(AppError::internal)?;
    let lines = read?;

    info!(lines, dispatched, "Engine stopped");
    Ok(())
}
