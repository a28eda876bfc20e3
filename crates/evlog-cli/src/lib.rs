//! Event logger CLI library.
//!
//! This crate provides the CLI interface for the event logger.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
