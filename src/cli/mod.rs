// CLI module for tagprobe
//
// Path walking and output only; all parsing lives in the library.

pub mod commands;
pub mod config;
pub mod output;

pub use commands::{command_detect, command_read};
pub use config::{Commands, Config};
pub use output::OutputFormatter;
