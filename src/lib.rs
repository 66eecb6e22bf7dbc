//! rendercache - Disk-backed caching of rendered template output.
//!
//! A rendered page is written to a cache file next to its template (or to
//! a configured cache directory) and served from that file until it is
//! older than a caller-supplied expiration such as `1h` or `2w-2d-15mt`.
//!
//! # Modules
//!
//! - [`cache`] - Cache locations, freshness checks and the fetch-or-render store
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`duration`] - Expiration expression parsing
//! - [`error`] - Error types, error codes and result aliases
//! - [`host`] - Renderer and error reporter interfaces
//! - [`template`] - File-backed `${var}` template renderer
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use rendercache::duration::parse_expiration;
//!
//! assert_eq!(parse_expiration(Some("2w-2d-15mt"), "48h").unwrap(), 1_383_300);
//! assert_eq!(parse_expiration(None, "48h").unwrap(), 172_800);
//! ```
//!
//! For the full render cycle, see [`cache::CacheStore`].

pub mod cache;
pub mod cli;
pub mod config;
pub mod duration;
pub mod error;
pub mod host;
pub mod template;
pub mod ui;

pub use error::{CacheError, ErrorReport, Result};
