//! Docs Command
//!
//! Generate the Markdown API reference from a collection.
//!
//! Usage:
//!   postscribe docs [--collection FILE] [--output FILE] [--title TEXT] [--stdout]

use std::path::PathBuf;

use crate::cli::Output;
use crate::collection;
use crate::config::Config;
use crate::docs::DocGenerator;
use crate::types::Result;

pub struct DocsOptions {
    pub collection: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub title: Option<String>,
    pub stdout: bool,
}

pub fn run(config: &Config, options: DocsOptions, out: &Output) -> Result<()> {
    let collection_path = options
        .collection
        .unwrap_or_else(|| config.collection.path.clone());
    let collection = collection::load(&collection_path)?;

    let mut config = config.clone();
    if options.title.is_some() {
        config.docs.title = options.title;
    }
    let generator = DocGenerator::from_config(&config);

    if options.stdout {
        print!("{}", generator.generate(&collection).markdown);
        return Ok(());
    }

    let output_path = options.output.unwrap_or(config.docs.output);
    let report = generator.write(&collection, &output_path)?;

    out.success("Documentation generated");
    out.field("Categories", report.categories);
    out.field("Endpoints", report.endpoints);
    out.field("Output", output_path.display());
    Ok(())
}
