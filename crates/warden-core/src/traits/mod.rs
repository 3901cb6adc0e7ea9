//! Ports implemented by the infrastructure layer

mod gateway;
mod repositories;

pub use gateway::ActionGateway;
pub use repositories::{ConfigRepository, ProgressionRepository, RepoResult};
