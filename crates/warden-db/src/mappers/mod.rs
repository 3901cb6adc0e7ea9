//! Entity to model mappers
//!
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Upsert` structs: Prepare entity data for database writes

mod config;
mod progression;

pub use progression::ProgressionUpsert;
