//! CLI module for cribar
//!
//! This module contains all CLI command handlers and utilities.

mod collect;
mod commands;
mod logging;

pub use collect::StdinCollector;
pub use commands::{run_command, Cli, Command};
pub use logging::LogLevel;
