//! Console harness: JSON-lines events in, JSON-lines actions out

mod gateway;
mod input;

pub use gateway::{ConsoleAction, ConsoleGateway};
pub use input::{read_lines, ConsoleCommand, ConsoleLine};
