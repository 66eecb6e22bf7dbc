//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rendercache - Disk-backed caching of rendered templates.
#[derive(Debug, Parser)]
#[command(name = "rendercache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .rendercache.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for cache files (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Extension for cache files (overrides config)
    #[arg(long, global = true, value_name = "EXT")]
    pub ext: Option<String>,

    /// Expiration used when none is given (overrides config)
    #[arg(long, global = true, value_name = "EXPR")]
    pub default_expiration: Option<String>,

    /// Write cache files atomically via a temporary file
    #[arg(long, global = true)]
    pub atomic: bool,

    /// Evaluate cache files as templates when loading them
    #[arg(long, global = true)]
    pub execute_cache: bool,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a template through the cache
    Render(RenderArgs),

    /// Show the cache entry for a template
    Status(StatusArgs),

    /// Print the cache file path for a template
    Locate(LocateArgs),

    /// Convert an expiration expression to seconds
    Expire(ExpireArgs),
}

/// Arguments for the `render` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RenderArgs {
    /// Template file to render
    pub template: String,

    /// Expiration expression, e.g. 1h or 2w-2d-15mt (omit to force a render)
    #[arg(short, long, value_name = "EXPR")]
    pub expire: Option<String>,

    /// Explicit cache file
    #[arg(long, value_name = "PATH")]
    pub cache_file: Option<String>,

    /// Template variable (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,

    /// Print failures as JSON error reports
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, clap::Args)]
pub struct StatusArgs {
    /// Template file
    pub template: String,

    /// Expiration expression to judge freshness against
    #[arg(short, long, value_name = "EXPR")]
    pub expire: Option<String>,

    /// Explicit cache file
    #[arg(long, value_name = "PATH")]
    pub cache_file: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `locate` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LocateArgs {
    /// Template file
    pub template: String,

    /// Explicit cache file
    #[arg(long, value_name = "PATH")]
    pub cache_file: Option<String>,
}

/// Arguments for the `expire` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ExpireArgs {
    /// Expiration expression (omit for the configured default)
    pub expression: Option<String>,
}

/// Parse `NAME=VALUE`.
fn parse_var(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    if name.trim().is_empty() {
        return Err(format!("missing variable name in '{}'", s));
    }
    Ok((name.trim().to_string(), value.to_string()))
}
