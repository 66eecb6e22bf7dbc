//! Expire command implementation.
//!
//! Converts an expiration expression to seconds, e.g.
//! `rendercache expire 2w-2d-15mt` prints `1383300`.

use crate::cli::args::ExpireArgs;
use crate::config::CacheConfig;
use crate::duration::{format_expiration, parse_expiration};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The expire command implementation.
pub struct ExpireCommand {
    config: CacheConfig,
    args: ExpireArgs,
}

impl ExpireCommand {
    /// Create a new expire command.
    pub fn new(config: CacheConfig, args: ExpireArgs) -> Self {
        Self { config, args }
    }
}

impl Command for ExpireCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let seconds = parse_expiration(
            self.args.expression.as_deref(),
            &self.config.default_expiration,
        )?;

        ui.emit(&format!("{}\n", seconds));
        ui.message(&format!("= {}", format_expiration(seconds)));
        Ok(CommandResult::success())
    }
}
