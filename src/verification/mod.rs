//! Verification Log
//!
//! - [`log`]: renders the per-endpoint checklist from a collection
//! - [`patcher`]: rewrites statuses of named sections and the Summary
//! - [`status`]: status markers, counting and the shared Summary renderer

pub mod log;
pub mod patcher;
pub mod status;

pub use log::{LogReport, LoggedEndpoint, VerificationLogGenerator, collect_endpoints};
pub use patcher::{PatchReport, PatchRule, Preset, StatusPatcher, load_rules};
pub use status::{StatusCounts, StatusMarker, render_summary};
