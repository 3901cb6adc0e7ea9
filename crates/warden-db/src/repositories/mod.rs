//! PostgreSQL repository implementations

mod config;
mod error;
mod progression;

pub use config::PgConfigRepository;
pub use error::map_db_error;
pub use progression::PgProgressionRepository;
