//! Cache file identity.
//!
//! A render id maps to exactly one cache file. Resolution never touches
//! the filesystem:
//!
//! - without an override, the template's final extension is replaced by
//!   the configured one (`views/report.tpl.php` → `views/report.tpl.html`),
//!   and the configured cache directory, if any, replaces the template's
//!   directory;
//! - an override keeps its own directory and extension. A bare file name
//!   goes to the configured cache directory, else next to the template,
//!   and a missing extension gets the configured one. A bare override is
//!   never resolved against the working directory: `custom` for
//!   `views/a.tpl` is `views/custom.html`, not `./custom.html`.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::CacheConfig;

/// Resolved directory and file name of a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheLocation {
    /// Directory holding the cache file.
    pub dir: PathBuf,
    /// File name including extension.
    pub file_name: String,
}

impl CacheLocation {
    /// Create a location from its parts.
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
        }
    }

    /// Resolve the location for `render_id`, honouring an optional override.
    pub fn resolve(render_id: &str, cache_file: Option<&str>, config: &CacheConfig) -> Self {
        let template = Path::new(render_id);
        let ext = &config.file_extension;

        match cache_file.map(str::trim).filter(|f| !f.is_empty()) {
            Some(cache_file) => {
                let path = Path::new(cache_file);
                let file_name = match path.file_name() {
                    Some(name) => with_default_extension(&name.to_string_lossy(), ext),
                    None => derived_file_name(template, ext),
                };
                let dir = non_empty_parent(path)
                    .or_else(|| config.cache_dir.clone())
                    .or_else(|| non_empty_parent(template))
                    .unwrap_or_else(|| PathBuf::from("."));
                Self { dir, file_name }
            }
            None => {
                let dir = config
                    .cache_dir
                    .clone()
                    .or_else(|| non_empty_parent(template))
                    .unwrap_or_else(|| PathBuf::from("."));
                Self {
                    dir,
                    file_name: derived_file_name(template, ext),
                }
            }
        }
    }

    /// Full path of the cache file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Directory as shown in error context.
    pub fn dir_display(&self) -> String {
        self.dir.display().to_string()
    }
}

impl fmt::Display for CacheLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

/// `report.tpl.php` → `report.tpl.<ext>`
fn derived_file_name(template: &Path, ext: &str) -> String {
    let stem = template
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}.{}", stem, ext)
}

fn with_default_extension(name: &str, ext: &str) -> String {
    if Path::new(name).extension().is_some() {
        name.to_string()
    } else {
        format!("{}.{}", name, ext)
    }
}

fn non_empty_parent(path: &Path) -> Option<PathBuf> {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(render_id: &str, cache_file: Option<&str>) -> CacheLocation {
        CacheLocation::resolve(render_id, cache_file, &CacheConfig::default())
    }

    #[test]
    fn template_extension_is_replaced() {
        let loc = resolve("views/report.tpl.php", None);
        assert_eq!(loc.dir, PathBuf::from("views"));
        assert_eq!(loc.file_name, "report.tpl.html");
    }

    #[test]
    fn template_without_directory_uses_current_dir() {
        let loc = resolve("books.tpl.php", None);
        assert_eq!(loc.dir, PathBuf::from("."));
        assert_eq!(loc.file_name, "books.tpl.html");
        assert_eq!(loc.path(), PathBuf::from("./books.tpl.html"));
    }

    #[test]
    fn template_without_extension_gains_one() {
        let loc = resolve("views/index", None);
        assert_eq!(loc.file_name, "index.html");
    }

    #[test]
    fn configured_cache_dir_replaces_template_dir() {
        let config = CacheConfig::default().with_cache_dir("./cache/");
        let loc = CacheLocation::resolve("views/report.tpl.php", None, &config);
        assert_eq!(loc.dir, PathBuf::from("./cache/"));
        assert_eq!(loc.file_name, "report.tpl.html");
    }

    #[test]
    fn configured_extension_is_used() {
        let config = CacheConfig::default().with_file_extension("cache");
        let loc = CacheLocation::resolve("a/b.tpl", None, &config);
        assert_eq!(loc.file_name, "b.cache");
    }

    #[test]
    fn override_without_extension_gets_default() {
        let loc = resolve("views/report.tpl.php", Some("out/custom"));
        assert_eq!(loc.dir, PathBuf::from("out"));
        assert_eq!(loc.file_name, "custom.html");
    }

    #[test]
    fn override_keeps_its_own_extension() {
        let loc = resolve("views/report.tpl.php", Some("out/custom.txt"));
        assert_eq!(loc.file_name, "custom.txt");
    }

    #[test]
    fn override_directory_wins_over_cache_dir() {
        let config = CacheConfig::default().with_cache_dir("cache");
        let loc = CacheLocation::resolve("views/a.tpl", Some("out/custom"), &config);
        assert_eq!(loc.dir, PathBuf::from("out"));
    }

    #[test]
    fn bare_override_uses_cache_dir() {
        let config = CacheConfig::default().with_cache_dir("cache");
        let loc = CacheLocation::resolve("views/a.tpl", Some("custom"), &config);
        assert_eq!(loc.dir, PathBuf::from("cache"));
        assert_eq!(loc.file_name, "custom.html");
    }

    #[test]
    fn bare_override_without_cache_dir_sits_next_to_template() {
        let loc = resolve("views/a.tpl", Some("custom"));
        assert_eq!(loc.dir, PathBuf::from("views"));
    }

    #[test]
    fn blank_override_is_ignored() {
        assert_eq!(resolve("views/a.tpl", Some("  ")), resolve("views/a.tpl", None));
    }

    #[test]
    fn resolution_is_deterministic() {
        let a = resolve("views/report.tpl.php", Some("out/x"));
        let b = resolve("views/report.tpl.php", Some("out/x"));
        assert_eq!(a, b);
    }

    #[test]
    fn display_shows_full_path() {
        let loc = CacheLocation::new("out", "custom.html");
        assert_eq!(loc.to_string(), PathBuf::from("out/custom.html").display().to_string());
    }
}
