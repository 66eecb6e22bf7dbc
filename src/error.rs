//! Error types for rendercache operations.
//!
//! This module defines [`CacheError`], the error type returned by every
//! fallible operation in the crate, the [`ErrorReport`] value handed to the
//! host's error channel, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Each cache failure mode has its own variant with a stable code
//!   (see [`CacheError::code`]) and the context keys the host expects
//! - Use `anyhow::Error` (via `CacheError::Other`) for unexpected errors
//! - Errors are values: nothing in the cache path panics

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Malformed expiration expression.
pub const ERR_EXPIRE_BAD_FORMATTING: &str = "ERR_CACHE_EXPIRE_BAD_FORMATTING";
/// Cache file could not be created or opened for writing.
pub const ERR_FILE_NOT_ACCESIBLE: &str = "ERR_CACHE_FILE_NOT_ACCESIBLE";
/// Cache file was opened but the rendered output could not be written.
pub const ERR_FILE_CANNOT_WRITE: &str = "ERR_CACHE_FILE_CANNOT_WRITE";
/// Cache file could not be read back.
pub const ERR_FILE_CANNOT_READ: &str = "ERR_CACHE_FILE_CANNOT_READ";
/// The host renderer failed.
pub const ERR_RENDER_FAILED: &str = "ERR_CACHE_RENDER_FAILED";

/// Core error type for rendercache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// An expiration expression contained an unparseable term.
    #[error("Bad expiration format '{expire_data}': unrecognized term '{bad_tag}'")]
    ExpireFormat { expire_data: String, bad_tag: String },

    /// The cache file could not be created or opened.
    #[error("Cache file {cache_dir}/{cache_file} for '{template}' is not accessible: {source}")]
    FileNotAccessible {
        cache_dir: String,
        cache_file: String,
        template: String,
        source: std::io::Error,
    },

    /// Writing rendered output to the cache file failed.
    #[error("Cannot write cache file {cache_dir}/{cache_file} for '{template}': {source}")]
    CannotWrite {
        cache_dir: String,
        cache_file: String,
        template: String,
        source: std::io::Error,
    },

    /// Reading the cache file back failed.
    #[error("Cannot read cache file {cache_dir}/{cache_file} for '{template}': {source}")]
    CannotRead {
        cache_dir: String,
        cache_file: String,
        template: String,
        source: std::io::Error,
    },

    /// The host renderer could not produce output.
    #[error("Rendering '{template}' failed: {message}")]
    RenderFailed { template: String, message: String },

    /// Configuration file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidation { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CacheError {
    /// Stable symbolic code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ExpireFormat { .. } => ERR_EXPIRE_BAD_FORMATTING,
            Self::FileNotAccessible { .. } => ERR_FILE_NOT_ACCESIBLE,
            Self::CannotWrite { .. } => ERR_FILE_CANNOT_WRITE,
            Self::CannotRead { .. } => ERR_FILE_CANNOT_READ,
            Self::RenderFailed { .. } => ERR_RENDER_FAILED,
            Self::ConfigNotFound { .. } => "ERR_CACHE_CONFIG_NOT_FOUND",
            Self::ConfigParse { .. } => "ERR_CACHE_CONFIG_PARSE",
            Self::ConfigValidation { .. } => "ERR_CACHE_CONFIG_INVALID",
            Self::Io(_) => "ERR_CACHE_IO",
            Self::Other(_) => "ERR_CACHE_OTHER",
        }
    }

    /// Key/value context handed to the host's error channel.
    pub fn context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        let mut put = |key: &str, value: &str| {
            context.insert(key.to_string(), value.to_string());
        };

        match self {
            Self::ExpireFormat {
                expire_data,
                bad_tag,
            } => {
                put("expire_data", expire_data);
                put("bad_tag", bad_tag);
            }
            Self::FileNotAccessible {
                cache_dir,
                cache_file,
                template,
                ..
            }
            | Self::CannotWrite {
                cache_dir,
                cache_file,
                template,
                ..
            }
            | Self::CannotRead {
                cache_dir,
                cache_file,
                template,
                ..
            } => {
                put("cache_dir", cache_dir);
                put("cache_file", cache_file);
                put("template", template);
            }
            Self::RenderFailed { template, message } => {
                put("template", template);
                put("message", message);
            }
            Self::ConfigNotFound { path } => put("path", &path.display().to_string()),
            Self::ConfigParse { path, message } => {
                put("path", &path.display().to_string());
                put("message", message);
            }
            Self::ConfigValidation { message } => put("message", message),
            Self::Io(e) => put("message", &e.to_string()),
            Self::Other(e) => put("message", &format!("{:#}", e)),
        }

        context
    }

    /// Build the structured report for this error.
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code().to_string(),
            context: self.context(),
        }
    }
}

/// Structured error value passed to an [`ErrorReporter`](crate::host::ErrorReporter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Stable symbolic error code.
    pub code: String,
    /// Contextual key/value pairs.
    pub context: BTreeMap<String, String>,
}

impl From<&CacheError> for ErrorReport {
    fn from(err: &CacheError) -> Self {
        err.report()
    }
}

/// Result type alias for rendercache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
