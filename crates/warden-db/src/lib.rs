//! # warden-db
//!
//! Storage layer for the engine's two stores:
//! - PostgreSQL repositories (implements warden-core traits)
//! - In-memory repositories with the same guarantees
//! - Connection pool and schema bootstrap

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

pub use memory::{MemoryConfigRepository, MemoryProgressionRepository};
pub use pool::{create_pool, ensure_schema, PgPool, PoolConfig};
pub use repositories::{PgConfigRepository, PgProgressionRepository};
