//! Locate command implementation.

use crate::cache::CacheStore;
use crate::cli::args::LocateArgs;
use crate::config::CacheConfig;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Prints the cache file path a template resolves to.
pub struct LocateCommand {
    config: CacheConfig,
    args: LocateArgs,
}

impl LocateCommand {
    /// Create a new locate command.
    pub fn new(config: CacheConfig, args: LocateArgs) -> Self {
        Self { config, args }
    }
}

impl Command for LocateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let location = CacheStore::new(self.config.clone())
            .locate(&self.args.template, self.args.cache_file.as_deref());
        ui.emit(&format!("{}\n", location));
        Ok(CommandResult::success())
    }
}
