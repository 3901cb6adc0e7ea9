//! Warden engine entry point
//!
//! Run with:
//! ```bash
//! cargo run -p warden-bot < events.jsonl
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use tracing::{error, info};
use warden_common::{
    try_init_tracing, try_init_tracing_with_config, AppConfig, AppError, TracingConfig,
};

#[tokio::main]
async fn main() {
    // Load configuration first so tracing can follow the environment
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = try_init_tracing();
            error!(error = %e, "Failed to load configuration");
            std::process::exit(AppError::from(e).exit_code());
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        store = if config.database.is_some() { "postgres" } else { "memory" },
        "Configuration loaded"
    );

    if let Err(e) = warden_bot::run(config).await {
        error!(error = %e, code = e.error_code(), "Engine stopped");
        std::process::exit(e.exit_code());
    }
}
