//! Fetch-or-render cache store.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;

use crate::config::{CacheConfig, LoadMode, WriteMode};
use crate::duration::parse_expiration;
use crate::error::{CacheError, Result};
use crate::host::{ErrorReporter, Renderer};

use super::entry::{check_expiration, CacheEntry};
use super::location::CacheLocation;

/// How an [`Obtained`] output was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Served from a fresh cache file.
    Cached,
    /// Rendered and written to the cache file.
    Rendered,
}

/// Output of [`CacheStore::obtain_at`].
#[derive(Debug, Clone)]
pub struct Obtained {
    /// Final output.
    pub output: String,
    /// Whether the renderer ran.
    pub outcome: Outcome,
    /// Cache file used.
    pub location: CacheLocation,
}

/// Read-only view of a cache entry for a render id.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    /// Resolved cache file.
    pub location: CacheLocation,
    /// Budget in seconds.
    pub budget: u64,
    /// Entry on disk, if any.
    pub entry: Option<CacheEntry>,
    /// Whether the entry is within its budget.
    pub fresh: bool,
    /// Whether `obtain` with the same arguments would skip rendering.
    pub serves_cached: bool,
}

/// Disk-backed store for rendered output.
///
/// Each render id owns one cache file (see [`CacheLocation`]). A call to
/// [`obtain`](Self::obtain) serves that file while it is fresh, otherwise
/// renders, writes and serves the new content.
///
/// # Example
///
/// ```
/// use rendercache::cache::CacheStore;
/// use rendercache::config::CacheConfig;
/// use rendercache::host::RecordingReporter;
/// use tempfile::TempDir;
///
/// let temp = TempDir::new().unwrap();
/// let store = CacheStore::new(CacheConfig::default().with_cache_dir(temp.path()));
/// let render = |id: &str| -> anyhow::Result<String> { Ok(format!("<h1>{}</h1>", id)) };
/// let reporter = RecordingReporter::new();
///
/// let html = store.obtain(&render, &reporter, "home.tpl", Some("1h"), None).unwrap();
/// assert_eq!(html, "<h1>home.tpl</h1>");
/// assert!(temp.path().join("home.html").exists());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CacheStore {
    config: CacheConfig,
}

impl CacheStore {
    /// Create a store with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    /// The store's configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Change the cache directory. An empty path colocates entries with templates.
    pub fn set_cache_dir(&mut self, dir: impl Into<std::path::PathBuf>) {
        self.config.set_cache_dir(dir);
    }

    /// Resolve the cache file for a render id.
    pub fn locate(&self, render_id: &str, cache_file: Option<&str>) -> CacheLocation {
        CacheLocation::resolve(render_id, cache_file, &self.config)
    }

    /// Parse an expiration expression, falling back to the configured default.
    pub fn budget(&self, expiration: Option<&str>) -> Result<u64> {
        parse_expiration(expiration, &self.config.default_expiration)
    }

    /// Describe the cache entry for a render id without writing anything.
    pub fn inspect(
        &self,
        render_id: &str,
        expiration: Option<&str>,
        cache_file: Option<&str>,
    ) -> Result<CacheStatus> {
        self.inspect_at(render_id, expiration, cache_file, Utc::now())
    }

    /// [`inspect`](Self::inspect) with an explicit clock.
    pub fn inspect_at(
        &self,
        render_id: &str,
        expiration: Option<&str>,
        cache_file: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<CacheStatus> {
        let location = self.locate(render_id, cache_file);
        let budget = self.budget(expiration)?;
        let entry = CacheEntry::read(&location)?;
        let fresh = entry
            .as_ref()
            .is_some_and(|e| e.is_fresh_at(budget, now));

        Ok(CacheStatus {
            location,
            budget,
            entry,
            fresh,
            serves_cached: fresh && is_explicit(expiration),
        })
    }

    /// Serve the cached output for `render_id`, rendering it if needed.
    ///
    /// The cache file is used only when it is fresh **and** `expiration`
    /// was given. Without an expiration the template is always rendered
    /// and the cache rewritten.
    ///
    /// Every failure is passed to `reporter` before being returned.
    pub fn obtain(
        &self,
        renderer: &dyn Renderer,
        reporter: &dyn ErrorReporter,
        render_id: &str,
        expiration: Option<&str>,
        cache_file: Option<&str>,
    ) -> Result<String> {
        self.obtain_at(renderer, reporter, render_id, expiration, cache_file, Utc::now())
            .map(|obtained| obtained.output)
    }

    /// [`obtain`](Self::obtain) with an explicit clock, reporting how the
    /// output was produced.
    pub fn obtain_at(
        &self,
        renderer: &dyn Renderer,
        reporter: &dyn ErrorReporter,
        render_id: &str,
        expiration: Option<&str>,
        cache_file: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Obtained> {
        let result = self.fetch_or_render(renderer, render_id, expiration, cache_file, now);
        if let Err(e) = &result {
            reporter.report(&e.report());
        }
        result
    }

    fn fetch_or_render(
        &self,
        renderer: &dyn Renderer,
        render_id: &str,
        expiration: Option<&str>,
        cache_file: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Obtained> {
        let location = self.locate(render_id, cache_file);
        let budget = self.budget(expiration)?;

        let outcome = if is_explicit(expiration) && check_expiration(&location, budget, now) {
            tracing::debug!("Cache hit for {} at {}", render_id, location);
            Outcome::Cached
        } else {
            tracing::debug!("Rendering {} into {}", render_id, location);
            match self.config.write_mode {
                WriteMode::Truncate => self.store_in_place(renderer, render_id, &location)?,
                WriteMode::Atomic => self.store_atomic(renderer, render_id, &location)?,
            }
            Outcome::Rendered
        };

        let output = self.load(renderer, render_id, &location)?;

        Ok(Obtained {
            output,
            outcome,
            location,
        })
    }

    /// Open the cache file, render, then truncate and write.
    ///
    /// The file is only truncated once rendering succeeded. A failed render
    /// leaves an existing entry and its mtime untouched, and removes a file
    /// this call created.
    fn store_in_place(
        &self,
        renderer: &dyn Renderer,
        render_id: &str,
        location: &CacheLocation,
    ) -> Result<()> {
        let path = location.path();
        let existed = path.exists();
        let mut file = File::options()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| not_accessible(location, render_id, source))?;

        let output = match render(renderer, render_id) {
            Ok(output) => output,
            Err(e) => {
                drop(file);
                if !existed {
                    fs::remove_file(&path).ok();
                }
                return Err(e);
            }
        };

        file.set_len(0)
            .and_then(|()| file.write_all(output.as_bytes()))
            .and_then(|()| file.flush())
            .map_err(|source| cannot_write(location, render_id, source))
    }

    /// Render into a temporary file in the cache directory, then rename it
    /// over the entry.
    fn store_atomic(
        &self,
        renderer: &dyn Renderer,
        render_id: &str,
        location: &CacheLocation,
    ) -> Result<()> {
        let mut temp = tempfile::Builder::new()
            .prefix(".rendercache-")
            .suffix(".tmp")
            .tempfile_in(&location.dir)
            .map_err(|source| not_accessible(location, render_id, source))?;

        let output = render(renderer, render_id)?;

        temp.write_all(output.as_bytes())
            .and_then(|()| temp.flush())
            .map_err(|source| cannot_write(location, render_id, source))?;

        temp.persist(location.path())
            .map_err(|e| cannot_write(location, render_id, e.error))?;

        Ok(())
    }

    /// Turn the stored entry into output according to the load mode.
    fn load(
        &self,
        renderer: &dyn Renderer,
        render_id: &str,
        location: &CacheLocation,
    ) -> Result<String> {
        let content = fs::read_to_string(location.path()).map_err(|source| {
            CacheError::CannotRead {
                cache_dir: location.dir_display(),
                cache_file: location.file_name.clone(),
                template: render_id.to_string(),
                source,
            }
        })?;

        match self.config.load_mode {
            LoadMode::Verbatim => Ok(content),
            LoadMode::Execute => renderer
                .evaluate(&content)
                .map_err(|e| render_failed(render_id, e)),
        }
    }
}

/// Whether the caller supplied an expiration at all.
fn is_explicit(expiration: Option<&str>) -> bool {
    expiration.is_some_and(|e| !e.trim().is_empty())
}

fn render(renderer: &dyn Renderer, render_id: &str) -> Result<String> {
    renderer
        .render_to_string(render_id)
        .map_err(|e| render_failed(render_id, e))
}

fn render_failed(render_id: &str, e: anyhow::Error) -> CacheError {
    CacheError::RenderFailed {
        template: render_id.to_string(),
        message: format!("{:#}", e),
    }
}

fn not_accessible(location: &CacheLocation, render_id: &str, source: std::io::Error) -> CacheError {
    CacheError::FileNotAccessible {
        cache_dir: location.dir_display(),
        cache_file: location.file_name.clone(),
        template: render_id.to_string(),
        source,
    }
}

fn cannot_write(location: &CacheLocation, render_id: &str, source: std::io::Error) -> CacheError {
    CacheError::CannotWrite {
        cache_dir: location.dir_display(),
        cache_file: location.file_name.clone(),
        template: render_id.to_string(),
        source,
    }
}
