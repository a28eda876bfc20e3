//! CLI subcommand implementations.

pub mod entry;
pub mod events;
pub mod export;
pub mod format;
pub mod table;
pub mod util;
