//! Status command implementation.
//!
//! Shows where a template's cache file lives and whether a render would
//! be served from it, without rendering or writing anything.

use chrono::Utc;

use crate::cache::{CacheStatus, CacheStore};
use crate::cli::args::StatusArgs;
use crate::config::CacheConfig;
use crate::duration::format_expiration;
use crate::error::Result;
use crate::ui::{CacheTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The status command implementation.
pub struct StatusCommand {
    config: CacheConfig,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(config: CacheConfig, args: StatusArgs) -> Self {
        Self { config, args }
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = CacheStore::new(self.config.clone());
        let now = Utc::now();
        let status = store.inspect_at(
            &self.args.template,
            self.args.expire.as_deref(),
            self.args.cache_file.as_deref(),
            now,
        )?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&status)
                .map_err(|e| anyhow::anyhow!("Failed to serialize status: {}", e))?;
            ui.emit(&format!("{}\n", json));
        } else {
            let details = ui.output_mode().shows_details();
            for line in describe(&status, now, details, &theme()) {
                ui.message(&line);
            }
            match rerender_reason(&status) {
                None => ui.success("Next render is served from cache"),
                Some(reason) => ui.warning(&format!("Next render re-renders: {}", reason)),
            }
        }

        Ok(CommandResult::success())
    }
}

fn theme() -> CacheTheme {
    if crate::ui::should_use_colors() {
        CacheTheme::new()
    } else {
        CacheTheme::plain()
    }
}

/// Human-readable lines for a status.
fn describe(
    status: &CacheStatus,
    now: chrono::DateTime<Utc>,
    details: bool,
    theme: &CacheTheme,
) -> Vec<String> {
    let mut lines = vec![
        theme.format_key_value("Cache file", &status.location.to_string()),
        theme.format_key_value(
            "Expiration",
            &format!(
                "{} {}",
                format_expiration(status.budget),
                theme.dim.apply_to(format!("({}s)", status.budget))
            ),
        ),
    ];

    match &status.entry {
        None => lines.push(theme.format_key_value("State", "missing")),
        Some(entry) => {
            let state = if status.fresh { "fresh" } else { "stale" };
            lines.push(theme.format_key_value("State", state));
            lines.push(theme.format_key_value(
                "Modified",
                &entry.modified_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            ));
            lines.push(theme.format_key_value(
                "Age",
                &format!("{}s", entry.age(now).num_seconds().max(0)),
            ));
            lines.push(theme.format_key_value(
                "Remaining",
                &format!("{}s", entry.remaining_ttl(status.budget, now)),
            ));
            if details {
                if let Some(expires_at) = entry.expires_at(status.budget) {
                    lines.push(theme.format_key_value(
                        "Expires",
                        &expires_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                    ));
                }
                lines.push(theme.format_key_value("Size", &format!("{} bytes", entry.size_bytes)));
            }
        }
    }

    lines
}

/// Why `obtain` would render instead of serving the cache file.
fn rerender_reason(status: &CacheStatus) -> Option<&'static str> {
    if status.serves_cached {
        None
    } else if status.entry.is_none() {
        Some("no cache file")
    } else if !status.fresh {
        Some("cache file expired")
    } else {
        Some("no expiration given")
    }
}
