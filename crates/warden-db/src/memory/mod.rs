//! In-memory repositories, used when no database is configured and in tests

mod config;
mod progression;

pub use config::MemoryConfigRepository;
pub use progression::MemoryProgressionRepository;
