//! Configuration loading, parsing, and validation for rendercache.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use rendercache::config::{load_config, validate, WriteMode};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".rendercache.yml"), "write_mode: atomic").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.write_mode, WriteMode::Atomic);
//! assert_eq!(config.default_expiration, "48h");
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{find_project_config, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::{CacheConfig, LoadMode, WriteMode};
pub use validator::{validate, validate_config, ValidationError};
