//! Patch Command
//!
//! Rewrite endpoint statuses in an existing verification log.
//!
//! Usage:
//!   postscribe patch --preset auth
//!   postscribe patch --rules rules.toml [--log FILE] [--dry-run]
//!   postscribe patch --endpoint "GET /users" --status needs-fix [--note TEXT]

use std::fs;
use std::path::PathBuf;

use crate::cli::Output;
use crate::config::Config;
use crate::types::{Result, ScribeError};
use crate::verification::{PatchReport, PatchRule, Preset, StatusMarker, StatusPatcher, load_rules};

pub struct PatchOptions {
    pub log: Option<PathBuf>,
    pub presets: Vec<Preset>,
    pub rules: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub status: Option<StatusMarker>,
    pub note: Option<String>,
    pub dry_run: bool,
}

/// Presets first, then the rules file, then the ad-hoc rule
fn collect_rules(options: &PatchOptions) -> Result<Vec<PatchRule>> {
    let mut rules: Vec<PatchRule> = options.presets.iter().flat_map(|p| p.rules()).collect();

    if let Some(path) = &options.rules {
        rules.extend(load_rules(path)?);
    }

    match (&options.endpoint, options.status) {
        (Some(endpoint), Some(status)) => {
            let mut rule = PatchRule::new(endpoint.clone(), status);
            rule.note = options.note.clone();
            rules.push(rule);
        }
        (Some(_), None) | (None, Some(_)) => {
            return Err(ScribeError::Patch(
                "--endpoint and --status must be given together".to_string(),
            ));
        }
        (None, None) => {}
    }

    if rules.is_empty() {
        return Err(ScribeError::Patch(
            "No rules given. Use --preset, --rules or --endpoint/--status.".to_string(),
        ));
    }
    Ok(rules)
}

pub fn run(config: &Config, options: PatchOptions, out: &Output) -> Result<()> {
    let rules = collect_rules(&options)?;
    let log_path = options.log.clone().unwrap_or_else(|| config.log.output.clone());
    let patcher = StatusPatcher::new(rules);

    let report = if options.dry_run {
        if !log_path.exists() {
            return Err(ScribeError::LogNotFound { path: log_path });
        }
        let (_, report) = patcher.apply(&fs::read_to_string(&log_path)?);
        report
    } else {
        patcher.patch_file(&log_path)?
    };

    print_report(&report, options.dry_run, out);
    Ok(())
}

fn print_report(report: &PatchReport, dry_run: bool, out: &Output) {
    if dry_run {
        out.info("Dry run, log left unchanged");
    }
    out.success(&format!(
        "{} endpoint(s) patched, {} skipped",
        report.applied.len(),
        report.skipped.len()
    ));
    for endpoint in &report.skipped {
        out.warning(&format!("Not found: {}", endpoint));
    }

    out.header("Summary");
    out.field("Total", report.total);
    for marker in StatusMarker::ALL {
        let count = report.counts.get(marker);
        if count > 0 {
            out.field(&marker.to_string(), count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> PatchOptions {
        PatchOptions {
            log: None,
            presets: Vec::new(),
            rules: None,
            endpoint: None,
            status: None,
            note: None,
            dry_run: false,
        }
    }

    #[test]
    fn test_rules_required() {
        assert!(matches!(collect_rules(&options()), Err(ScribeError::Patch(_))));
    }

    #[test]
    fn test_endpoint_needs_status() {
        let opts = PatchOptions {
            endpoint: Some("GET /x".into()),
            ..options()
        };
        assert!(collect_rules(&opts).is_err());
    }

    #[test]
    fn test_rule_order() {
        let opts = PatchOptions {
            presets: vec![Preset::Webhooks],
            endpoint: Some("GET /x".into()),
            status: Some(StatusMarker::Missing),
            note: Some("not wired".into()),
            ..options()
        };
        let rules = collect_rules(&opts).unwrap();
        assert_eq!(rules.len(), 5);
        assert_eq!(rules[4].replacement(), "**Status:** ➕ Missing (not wired)");
    }
}
