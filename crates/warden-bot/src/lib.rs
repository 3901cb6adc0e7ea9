//! # warden-bot
//!
//! Process wiring for the engine: store selection, engine construction,
//! and a console harness that reads events as JSON lines from stdin and
//! prints every outbound action as a JSON line on stdout.

pub mod console;
pub mod server;

pub use server::{create_engine, open_stores, run};
