//! Configuration schema definitions for rendercache.
//!
//! These structs map to the `.rendercache.yml` file format. Every field
//! has a default, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for a [`CacheStore`](crate::cache::CacheStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Expiration expression used when the caller supplies none
    #[serde(default = "default_expiration")]
    pub default_expiration: String,

    /// Directory for cache files (unset = next to the template)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Extension given to cache files that have none
    #[serde(default = "default_file_extension")]
    pub file_extension: String,

    /// How rendered output is written to disk
    pub write_mode: WriteMode,

    /// How a stored entry is turned back into output
    pub load_mode: LoadMode,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_expiration: default_expiration(),
            cache_dir: None,
            file_extension: default_file_extension(),
            write_mode: WriteMode::default(),
            load_mode: LoadMode::default(),
        }
    }
}

impl CacheConfig {
    /// Set the cache directory. An empty path clears it.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.set_cache_dir(dir);
        self
    }

    /// Set the cache directory in place. An empty path clears it.
    pub fn set_cache_dir(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        self.cache_dir = if dir.as_os_str().is_empty() {
            None
        } else {
            Some(dir)
        };
    }

    /// Set the default expiration expression.
    pub fn with_default_expiration(mut self, expression: impl Into<String>) -> Self {
        self.default_expiration = expression.into();
        self
    }

    /// Set the default cache file extension.
    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }

    /// Set the write mode.
    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }

    /// Set the load mode.
    pub fn with_load_mode(mut self, mode: LoadMode) -> Self {
        self.load_mode = mode;
        self
    }
}

/// How the store writes a freshly rendered entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Rewrite the cache file in place once rendering succeeded.
    ///
    /// A failed render leaves the previous entry untouched; a failed write
    /// can leave a partial file behind.
    #[default]
    Truncate,
    /// Write a temporary file in the cache directory and rename it over
    /// the entry once complete.
    Atomic,
}

/// How a stored entry becomes output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// The entry is fully rendered text and is returned unchanged.
    #[default]
    Verbatim,
    /// The entry is a template fragment and runs through
    /// [`Renderer::evaluate`](crate::host::Renderer::evaluate).
    Execute,
}

fn default_expiration() -> String {
    "48h".to_string()
}

fn default_file_extension() -> String {
    "html".to_string()
}
