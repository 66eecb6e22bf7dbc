//! Render command implementation.
//!
//! `rendercache render <TEMPLATE> [--expire EXPR]` prints the template's
//! output, served from its cache file while that is fresh.

use std::path::{Path, PathBuf};

use crate::cache::{CacheStore, Outcome};
use crate::cli::args::RenderArgs;
use crate::config::CacheConfig;
use crate::error::Result;
use crate::host::{ErrorReporter, RecordingReporter, TracingReporter};
use crate::template::TemplateRenderer;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The render command implementation.
pub struct RenderCommand {
    project_root: PathBuf,
    config: CacheConfig,
    args: RenderArgs,
}

impl RenderCommand {
    /// Create a new render command.
    pub fn new(project_root: &Path, config: CacheConfig, args: RenderArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            args,
        }
    }

    fn renderer(&self) -> TemplateRenderer {
        self.args
            .vars
            .iter()
            .fold(TemplateRenderer::new(&self.project_root), |r, (k, v)| {
                r.with_var(k, v)
            })
    }
}

impl Command for RenderCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = CacheStore::new(self.config.clone());
        let renderer = self.renderer();
        let recorder = RecordingReporter::new();
        let reporter: &dyn ErrorReporter = if self.args.json {
            &recorder
        } else {
            &TracingReporter
        };

        let result = store.obtain_at(
            &renderer,
            reporter,
            &self.args.template,
            self.args.expire.as_deref(),
            self.args.cache_file.as_deref(),
            chrono::Utc::now(),
        );

        match result {
            Ok(obtained) => {
                let verb = match obtained.outcome {
                    Outcome::Cached => "Served",
                    Outcome::Rendered => "Rendered",
                };
                tracing::debug!("{} {} via {}", verb, self.args.template, obtained.location);
                ui.emit(&obtained.output);
                Ok(CommandResult::success())
            }
            Err(e) if self.args.json => {
                let report = recorder.last().unwrap_or_else(|| e.report());
                let json = serde_json::to_string_pretty(&report)
                    .map_err(|e| anyhow::anyhow!("Failed to serialize error report: {}", e))?;
                ui.emit(&format!("{}\n", json));
                Ok(CommandResult::failure(1))
            }
            Err(e) => Err(e),
        }
    }
}
