//! Library integration tests.

use std::cell::Cell;
use std::fs;
use std::time::{Duration, SystemTime};

use rendercache::cache::{CacheStore, Outcome};
use rendercache::config::{CacheConfig, LoadMode, WriteMode};
use rendercache::host::{RecordingReporter, Renderer};
use rendercache::template::TemplateRenderer;
use rendercache::{CacheError, ErrorReport};
use tempfile::TempDir;

/// Renders `<render_id>#<call count>` so repeated renders are visible.
struct CountingRenderer {
    calls: Cell<u32>,
}

impl CountingRenderer {
    fn new() -> Self {
        Self {
            calls: Cell::new(0),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.get()
    }
}

impl Renderer for CountingRenderer {
    fn render_to_string(&self, render_id: &str) -> anyhow::Result<String> {
        self.calls.set(self.calls.get() + 1);
        Ok(format!("{}#{}", render_id, self.calls.get()))
    }
}

fn backdate(path: &std::path::Path, secs: u64) {
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::now() - Duration::from_secs(secs))
        .unwrap();
}

#[test]
fn error_types_are_public() {
    let err = CacheError::ExpireFormat {
        expire_data: "5h-10x".into(),
        bad_tag: "10x".into(),
    };
    assert_eq!(err.code(), "ERR_CACHE_EXPIRE_BAD_FORMATTING");
    assert!(err.to_string().contains("10x"));

    let report = ErrorReport::from(&err);
    assert_eq!(report.context["expire_data"], "5h-10x");
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> rendercache::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use rendercache::cli::{Cli, Commands};

    let cli = Cli::parse_from(["rendercache", "status", "books.tpl.php", "--json"]);
    match cli.command {
        Commands::Status(args) => {
            assert!(args.json);
            assert_eq!(args.template, "books.tpl.php");
        }
        other => panic!("expected status, got {:?}", other),
    }
}

#[test]
fn cached_render_lifecycle() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("books.tpl.php");
    let render_id = template.display().to_string();
    let cache_path = temp.path().join("books.tpl.html");

    let store = CacheStore::default();
    let renderer = CountingRenderer::new();
    let reporter = RecordingReporter::new();

    // First call renders and writes the cache file.
    let first = store
        .obtain(&renderer, &reporter, &render_id, Some("1h"), None)
        .unwrap();
    assert_eq!(renderer.calls(), 1);
    assert_eq!(fs::read_to_string(&cache_path).unwrap(), first);

    // Within the hour the cache file is served.
    let second = store
        .obtain(&renderer, &reporter, &render_id, Some("1h"), None)
        .unwrap();
    assert_eq!(second, first);
    assert_eq!(renderer.calls(), 1);

    // Two hours later it is stale and gets replaced.
    backdate(&cache_path, 7200);
    let third = store
        .obtain(&renderer, &reporter, &render_id, Some("1h"), None)
        .unwrap();
    assert_eq!(renderer.calls(), 2);
    assert_ne!(third, first);
    assert_eq!(fs::read_to_string(&cache_path).unwrap(), third);

    assert!(reporter.reports().is_empty());
}

#[test]
fn missing_expiration_always_renders() {
    let temp = TempDir::new().unwrap();
    let store = CacheStore::new(CacheConfig::default().with_cache_dir(temp.path()));
    let renderer = CountingRenderer::new();
    let reporter = RecordingReporter::new();

    store.obtain(&renderer, &reporter, "page.tpl", None, None).unwrap();
    store.obtain(&renderer, &reporter, "page.tpl", None, None).unwrap();

    assert_eq!(renderer.calls(), 2);
    assert_eq!(
        fs::read_to_string(temp.path().join("page.html")).unwrap(),
        "page.tpl#2"
    );
}

#[test]
fn bad_expiration_is_reported_and_nothing_is_written() {
    let temp = TempDir::new().unwrap();
    let store = CacheStore::new(CacheConfig::default().with_cache_dir(temp.path()));
    let renderer = CountingRenderer::new();
    let reporter = RecordingReporter::new();

    let err = store
        .obtain(&renderer, &reporter, "page.tpl", Some("2h-5x"), None)
        .unwrap_err();

    assert_eq!(err.code(), "ERR_CACHE_EXPIRE_BAD_FORMATTING");
    assert_eq!(reporter.codes(), ["ERR_CACHE_EXPIRE_BAD_FORMATTING"]);
    assert_eq!(renderer.calls(), 0);
    assert!(!temp.path().join("page.html").exists());
}

#[test]
fn unwritable_cache_dir_is_reported() {
    let temp = TempDir::new().unwrap();
    let store = CacheStore::new(
        CacheConfig::default().with_cache_dir(temp.path().join("does-not-exist")),
    );
    let renderer = CountingRenderer::new();
    let reporter = RecordingReporter::new();

    let err = store
        .obtain(&renderer, &reporter, "page.tpl", Some("1h"), None)
        .unwrap_err();

    assert_eq!(err.code(), "ERR_CACHE_FILE_NOT_ACCESIBLE");
    let report = reporter.last().unwrap();
    assert_eq!(report.context["cache_file"], "page.html");
    assert_eq!(report.context["template"], "page.tpl");
}

#[test]
fn atomic_store_with_template_renderer() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("hello.tpl"), "Hello ${name}").unwrap();

    let config = CacheConfig::default()
        .with_cache_dir(temp.path())
        .with_write_mode(WriteMode::Atomic);
    let store = CacheStore::new(config);
    let renderer = TemplateRenderer::new(temp.path()).with_var("name", "world");
    let reporter = RecordingReporter::new();

    let out = store
        .obtain(&renderer, &reporter, "hello.tpl", Some("1d"), Some("greeting.txt"))
        .unwrap();

    assert_eq!(out, "Hello world");
    assert_eq!(
        fs::read_to_string(temp.path().join("greeting.txt")).unwrap(),
        "Hello world"
    );
    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn execute_mode_evaluates_cached_directives() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("clock.tpl"), "<p>$${now}</p>").unwrap();

    let config = CacheConfig::default()
        .with_cache_dir(temp.path())
        .with_load_mode(LoadMode::Execute);
    let store = CacheStore::new(config);
    let reporter = RecordingReporter::new();

    let renderer = TemplateRenderer::new(temp.path()).with_var("now", "09:00");
    let first = store
        .obtain(&renderer, &reporter, "clock.tpl", Some("1h"), None)
        .unwrap();
    assert_eq!(first, "<p>09:00</p>");
    assert_eq!(
        fs::read_to_string(temp.path().join("clock.html")).unwrap(),
        "<p>${now}</p>"
    );

    let renderer = TemplateRenderer::new(temp.path()).with_var("now", "09:30");
    let second = store
        .obtain(&renderer, &reporter, "clock.tpl", Some("1h"), None)
        .unwrap();
    assert_eq!(second, "<p>09:30</p>");
}

#[test]
fn inspect_does_not_write() {
    let temp = TempDir::new().unwrap();
    let store = CacheStore::new(CacheConfig::default().with_cache_dir(temp.path()));

    let status = store.inspect("page.tpl", Some("1h"), None).unwrap();

    assert!(status.entry.is_none());
    assert!(!status.fresh);
    assert!(!status.serves_cached);
    assert_eq!(status.budget, 3600);
    assert!(!temp.path().join("page.html").exists());
}

#[test]
fn obtain_at_reports_outcome() {
    let temp = TempDir::new().unwrap();
    let store = CacheStore::new(CacheConfig::default().with_cache_dir(temp.path()));
    let renderer = CountingRenderer::new();
    let reporter = RecordingReporter::new();
    let now = chrono::Utc::now();

    let first = store
        .obtain_at(&renderer, &reporter, "page.tpl", Some("1h"), None, now)
        .unwrap();
    assert_eq!(first.outcome, Outcome::Rendered);

    let second = store
        .obtain_at(&renderer, &reporter, "page.tpl", Some("1h"), None, now)
        .unwrap();
    assert_eq!(second.outcome, Outcome::Cached);
    assert_eq!(second.location, first.location);
}
