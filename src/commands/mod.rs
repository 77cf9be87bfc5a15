//! Command implementations
//!
//! Each module corresponds to a subcommand in the CLI.

pub mod chat;
pub mod export;
pub mod menu;
pub mod train;
