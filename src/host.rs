//! Interfaces the cache needs from its host template engine.
//!
//! The cache never renders anything itself. It asks a [`Renderer`] for
//! output and routes every failure through an [`ErrorReporter`] before
//! returning it, so the host decides whether a failure is fatal.

use std::cell::RefCell;

use crate::error::ErrorReport;

/// Produces rendered output for a render identifier.
pub trait Renderer {
    /// Render `render_id` to its complete output.
    ///
    /// A failure here means nothing is written to the cache.
    fn render_to_string(&self, render_id: &str) -> anyhow::Result<String>;

    /// Execute a stored cache entry as a template fragment.
    ///
    /// Only called when the store runs in [`LoadMode::Execute`](crate::config::LoadMode::Execute).
    /// The default treats the entry as already rendered text.
    fn evaluate(&self, source: &str) -> anyhow::Result<String> {
        Ok(source.to_string())
    }
}

impl<F> Renderer for F
where
    F: Fn(&str) -> anyhow::Result<String>,
{
    fn render_to_string(&self, render_id: &str) -> anyhow::Result<String> {
        self(render_id)
    }
}

/// The host's structured error channel.
pub trait ErrorReporter {
    /// Receive a failure before it is returned to the caller.
    fn report(&self, report: &ErrorReport);
}

/// Reporter that logs each failure as a warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, report: &ErrorReport) {
        tracing::warn!(code = %report.code, context = ?report.context, "render cache failure");
    }
}

/// Reporter that keeps every report for later inspection.
///
/// # Example
///
/// ```
/// use rendercache::host::{ErrorReporter, RecordingReporter};
/// use rendercache::ErrorReport;
///
/// let reporter = RecordingReporter::new();
/// reporter.report(&ErrorReport {
///     code: "ERR_CACHE_FILE_NOT_ACCESIBLE".to_string(),
///     context: Default::default(),
/// });
/// assert_eq!(reporter.codes(), vec!["ERR_CACHE_FILE_NOT_ACCESIBLE"]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: RefCell<Vec<ErrorReport>>,
}

impl RecordingReporter {
    /// Create an empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports received so far.
    pub fn reports(&self) -> Vec<ErrorReport> {
        self.reports.borrow().clone()
    }

    /// Codes of all reports received so far.
    pub fn codes(&self) -> Vec<String> {
        self.reports.borrow().iter().map(|r| r.code.clone()).collect()
    }

    /// Most recent report, if any.
    pub fn last(&self) -> Option<ErrorReport> {
        self.reports.borrow().last().cloned()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, report: &ErrorReport) {
        self.reports.borrow_mut().push(report.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn closures_are_renderers() {
        let renderer = |id: &str| -> anyhow::Result<String> { Ok(format!("<p>{}</p>", id)) };
        assert_eq!(renderer.render_to_string("home").unwrap(), "<p>home</p>");
    }

    #[test]
    fn default_evaluate_returns_source() {
        let renderer = |_: &str| -> anyhow::Result<String> { Ok(String::new()) };
        assert_eq!(renderer.evaluate("${raw}").unwrap(), "${raw}");
    }

    #[test]
    fn recording_reporter_keeps_order() {
        let reporter = RecordingReporter::new();
        for code in ["A", "B"] {
            reporter.report(&ErrorReport {
                code: code.to_string(),
                context: BTreeMap::new(),
            });
        }

        assert_eq!(reporter.codes(), vec!["A", "B"]);
        assert_eq!(reporter.last().unwrap().code, "B");
        assert_eq!(reporter.reports().len(), 2);
    }

    #[test]
    fn tracing_reporter_does_not_panic_without_subscriber() {
        TracingReporter.report(&ErrorReport {
            code: "X".to_string(),
            context: BTreeMap::new(),
        });
    }
}
