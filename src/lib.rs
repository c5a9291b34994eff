//! postscribe - Markdown artifacts from Postman collections
//!
//! Three independent pipelines share one lenient collection model:
//!
//! - **API reference**: collection → Markdown, synthesizing example
//!   responses for endpoints that have none saved
//! - **Verification log**: collection → per-endpoint review checklist
//! - **Status patcher**: rewrites statuses in an existing log and rebuilds
//!   its Summary
//!
//! A scaffolder goes the other way, building a collection from a
//! declarative endpoint catalog.
//!
//! ## Quick Start
//!
//! ```ignore
//! use postscribe::{DocGenerator, StatusPatcher, Preset, collection};
//!
//! let collection = collection::load(Path::new("postman_collection.json"))?;
//! let report = DocGenerator::default().generate(&collection);
//! StatusPatcher::from_preset(Preset::Auth).patch_file(Path::new("API_VERIFICATION_LOG.md"))?;
//! ```
//!
//! ## Modules
//!
//! - [`collection`]: collection model, loading and scaffolding
//! - [`docs`]: API reference generation
//! - [`verification`]: verification log generation and patching
//! - [`config`]: layered configuration

pub mod cli;
pub mod collection;
pub mod config;
pub mod constants;
pub mod docs;
pub mod types;
pub mod verification;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{Result, ResultExt, ScribeError};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use collection::{Catalog, Collection, Scaffolder};
pub use docs::{DocGenerator, DocReport, SynthesisPolicy, infer_structure};
pub use verification::{
    PatchReport, PatchRule, Preset, StatusMarker, StatusPatcher, VerificationLogGenerator,
};
