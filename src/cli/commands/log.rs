//! Log Command
//!
//! Generate the verification checklist from a collection.
//!
//! Usage:
//!   postscribe log [--collection FILE] [--output FILE] [--stdout]

use chrono::Local;
use std::path::PathBuf;

use crate::cli::Output;
use crate::collection;
use crate::config::Config;
use crate::types::Result;
use crate::verification::VerificationLogGenerator;

pub fn run(
    config: &Config,
    collection: Option<PathBuf>,
    output: Option<PathBuf>,
    stdout: bool,
    out: &Output,
) -> Result<()> {
    let collection_path = collection.unwrap_or_else(|| config.collection.path.clone());
    let collection = collection::load(&collection_path)?;
    let generator = VerificationLogGenerator::from_config(config);

    if stdout {
        let report = generator.generate(&collection, Local::now().naive_local());
        print!("{}", report.markdown);
        return Ok(());
    }

    let output_path = output.unwrap_or_else(|| config.log.output.clone());
    let report = generator.write(&collection, &output_path)?;

    out.success("Verification log generated");
    out.field("Endpoints", report.endpoints);
    out.field("Output", output_path.display());
    Ok(())
}
