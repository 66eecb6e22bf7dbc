//! Command-line interface for rendercache.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ExpireArgs, LocateArgs, RenderArgs, StatusArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
