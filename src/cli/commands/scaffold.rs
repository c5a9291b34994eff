//! Scaffold Command
//!
//! Build a Postman collection from an endpoint catalog.
//!
//! Usage:
//!   postscribe scaffold catalog.toml [--output FILE]

use chrono::Local;
use std::path::{Path, PathBuf};

use crate::cli::Output;
use crate::collection::{Catalog, Scaffolder};
use crate::config::Config;
use crate::types::Result;

pub fn run(config: &Config, catalog: &Path, output: Option<PathBuf>, out: &Output) -> Result<()> {
    let catalog = Catalog::load(catalog)?;
    let output_path = output.unwrap_or_else(|| config.scaffold.output.clone());

    let endpoints = Scaffolder::new(Local::now().naive_local()).write(&catalog, &output_path)?;

    out.success(&format!("Collection '{}' generated", catalog.name));
    out.field("Folders", catalog.categories.len());
    out.field("Endpoints", endpoints);
    out.field("Output", output_path.display());
    Ok(())
}
