//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads the
//! configuration once, applies global flags and routes each subcommand
//! to its implementation.

pub mod dispatcher;
pub mod expire;
pub mod locate;
pub mod render;
pub mod status;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
