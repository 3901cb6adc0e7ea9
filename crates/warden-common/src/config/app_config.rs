//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use chrono::Duration;
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    /// `None` runs the engine on the in-memory store
    pub database: Option<DatabaseConfig>,
    pub engine: EngineConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Tuning for the event-reaction engine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Minimum seconds between two XP gains of the same member
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: i64,
    /// Inclusive lower bound of a single XP gain
    #[serde(default = "default_xp_min")]
    pub xp_min: u64,
    /// Inclusive upper bound of a single XP gain
    #[serde(default = "default_xp_max")]
    pub xp_max: u64,
    /// Members younger than this many days are subject to invite filtering
    #[serde(default = "default_new_member_days")]
    pub new_member_days: i64,
    /// Events handled concurrently by the pump
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: default_cooldown_secs(),
            xp_min: default_xp_min(),
            xp_max: default_xp_max(),
            new_member_days: default_new_member_days(),
            max_in_flight: default_max_in_flight(),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::seconds(self.cooldown_secs)
    }

    #[must_use]
    pub fn new_member_window(&self) -> Duration {
        Duration::days(self.new_member_days)
    }

    /// Check the values are usable together
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cooldown_secs < 0 {
            return Err(ConfigError::InvalidValue(
                "LEVELING_COOLDOWN_SECS",
                "must not be negative".to_string(),
            ));
        }
        if self.xp_min == 0 {
            return Err(ConfigError::InvalidValue(
                "LEVELING_XP_MIN",
                "must be at least 1".to_string(),
            ));
        }
        if self.xp_min > self.xp_max {
            return Err(ConfigError::InvalidValue(
                "LEVELING_XP_MAX",
                format!("must be >= LEVELING_XP_MIN ({})", self.xp_min),
            ));
        }
        if self.new_member_days < 0 {
            return Err(ConfigError::InvalidValue(
                "AUTOMOD_NEW_MEMBER_DAYS",
                "must not be negative".to_string(),
            ));
        }
        if self.max_in_flight == 0 {
            return Err(ConfigError::InvalidValue(
                "ENGINE_MAX_IN_FLIGHT",
                "must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// Default value functions
fn default_app_name() -> String {
    "warden".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_cooldown_secs() -> i64 {
    60
}

fn default_xp_min() -> u64 {
    15
}

fn default_xp_max() -> u64 {
    25
}

fn default_new_member_days() -> i64 {
    7
}

fn default_max_in_flight() -> usize {
    64
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a value is present but unusable
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let env = match env::var("APP_ENV") {
            Ok(raw) => Environment::parse(&raw)
                .ok_or_else(|| ConfigError::InvalidValue("APP_ENV", raw.clone()))?,
            Err(_) => default_env(),
        };

        let database = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(|url| DatabaseConfig {
                url,
                max_connections: parsed_var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(default_max_connections),
                min_connections: parsed_var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or_else(default_min_connections),
            });

        let engine = EngineConfig {
            cooldown_secs: parsed_var("LEVELING_COOLDOWN_SECS").unwrap_or_else(default_cooldown_secs),
            xp_min: parsed_var("LEVELING_XP_MIN").unwrap_or_else(default_xp_min),
            xp_max: parsed_var("LEVELING_XP_MAX").unwrap_or_else(default_xp_max),
            new_member_days: parsed_var("AUTOMOD_NEW_MEMBER_DAYS")
                .unwrap_or_else(default_new_member_days),
            max_in_flight: parsed_var("ENGINE_MAX_IN_FLIGHT").unwrap_or_else(default_max_in_flight),
        };
        engine.validate()?;

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env,
            },
            database,
            engine,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
