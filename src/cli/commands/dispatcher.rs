//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{self, CacheConfig, LoadMode, WriteMode};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    config: CacheConfig,
}

impl CommandDispatcher {
    /// Create a dispatcher with an already resolved configuration.
    pub fn new(project_root: PathBuf, config: CacheConfig) -> Self {
        Self {
            project_root,
            config,
        }
    }

    /// Load configuration for `project_root`, apply the CLI's overrides and
    /// validate the result.
    pub fn from_cli(project_root: PathBuf, cli: &Cli) -> Result<Self> {
        let mut config = config::load_config(&project_root, cli.config.as_deref())?;
        apply_overrides(&mut config, cli);
        config::validate(&config)?;
        Ok(Self::new(project_root, config))
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// The effective configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Render(args) => {
                let cmd = super::render::RenderCommand::new(
                    &self.project_root,
                    self.config.clone(),
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Commands::Status(args) => {
                let cmd = super::status::StatusCommand::new(self.config.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Locate(args) => {
                let cmd = super::locate::LocateCommand::new(self.config.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Expire(args) => {
                let cmd = super::expire::ExpireCommand::new(self.config.clone(), args.clone());
                cmd.execute(ui)
            }
        }
    }
}

/// Command-line flags take precedence over the config file.
fn apply_overrides(config: &mut CacheConfig, cli: &Cli) {
    if let Some(dir) = &cli.cache_dir {
        config.set_cache_dir(dir);
    }
    if let Some(ext) = &cli.ext {
        config.file_extension = ext.clone();
    }
    if let Some(expr) = &cli.default_expiration {
        config.default_expiration = expr.clone();
    }
    if cli.atomic {
        config.write_mode = WriteMode::Atomic;
    }
    if cli.execute_cache {
        config.load_mode = LoadMode::Execute;
    }
}
