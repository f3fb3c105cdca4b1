//! Veatunes command-line front end
//!
//! Loads configuration, restores the persisted player, applies one command
//! and prints the resulting queue.

pub mod commands;
pub mod config;
pub mod display;

pub use commands::Command;
pub use config::{CliConfig, ConfigError};
