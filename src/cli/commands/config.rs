//! Config Command
//!
//! Inspect and initialize postscribe configuration.
//!
//! Usage:
//!   postscribe config show [-f json]
//!   postscribe config path
//!   postscribe config init [--force]

use crate::cli::Output;
use crate::config::{Config, ConfigLoader};
use crate::types::Result;

/// Show the effective configuration (merged from all sources)
pub fn show(config: &Config, format: &str) -> Result<()> {
    let rendered = ConfigLoader::render_config(config, format == "json")?;
    println!("{}", rendered.trim_end());
    Ok(())
}

/// Show configuration file paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Write a starter `postscribe.toml` into the current directory
pub fn init(force: bool, out: &Output) -> Result<()> {
    let root = std::env::current_dir()?;
    let path = ConfigLoader::init_project_at(&root, force)?;
    out.success("Initialized project configuration");
    out.field("Config", path.display());
    Ok(())
}
