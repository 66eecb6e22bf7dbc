//! Configuration file discovery and loading.
//!
//! A project keeps its settings in `.rendercache.yml` in the working
//! directory. The file is optional; when it is absent the defaults from
//! [`CacheConfig::default`] apply.

use crate::config::schema::CacheConfig;
use crate::error::{CacheError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the project root.
pub const CONFIG_FILE_NAME: &str = ".rendercache.yml";

/// Path of the project config for `project_root`, if it exists.
pub fn find_project_config(project_root: &Path) -> Option<PathBuf> {
    let path = project_root.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file and parse it into a [`CacheConfig`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParse` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<CacheConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CacheError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CacheError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`CacheConfig`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<CacheConfig> {
    if content.trim().is_empty() {
        return Ok(CacheConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| CacheError::ConfigParse {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An explicit `config_override` must exist. Without one, the project
/// file is used when present and defaults otherwise.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<CacheConfig> {
    if let Some(override_path) = config_override {
        return load_config_file(override_path);
    }

    match find_project_config(project_root) {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        None => Ok(CacheConfig::default()),
    }
}
