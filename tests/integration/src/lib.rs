//! Integration test utilities for the engine
//!
//! This crate provides a recording action gateway, event builders, and a
//! test engine over in-memory stores for end-to-end scenarios.

pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
