//! Verification Log Status Patcher
//!
//! Rewrites the status line of named endpoint sections in a generated log,
//! then rebuilds the Summary block from the status lines actually present.
//! The log is treated as text: sections are located by their
//! `### <METHOD> <path>` heading, so anything else in the file survives
//! untouched.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use super::status::{StatusCounts, StatusMarker, render_summary, status_lines, summary_span};
use crate::constants::verification::STATUS_PREFIX;
use crate::types::{Result, ResultExt, ScribeError};

static SUMMARY_TOTAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*Total Endpoints:\*\* (\d+)").expect("Invalid summary total regex")
});

// =============================================================================
// Rules
// =============================================================================

/// Replace the status of one endpoint section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatchRule {
    /// `<METHOD> <path>` as it appears in the section heading
    pub endpoint: String,
    pub status: StatusMarker,
    /// Parenthesized after the status label
    #[serde(default)]
    pub note: Option<String>,
    /// Extra lines inserted after the status, each as its own paragraph
    #[serde(default)]
    pub details: Vec<String>,
}

impl PatchRule {
    pub fn new(endpoint: impl Into<String>, status: StatusMarker) -> Self {
        Self {
            endpoint: endpoint.into(),
            status,
            note: None,
            details: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_details<I, S>(mut self, details: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.details = details.into_iter().map(Into::into).collect();
        self
    }

    /// Text that replaces the status line
    pub fn replacement(&self) -> String {
        let mut text = self.status.status_line();
        if let Some(note) = self.note.as_deref().filter(|n| !n.is_empty()) {
            text.push_str(&format!(" ({})", note));
        }
        for detail in &self.details {
            text.push_str("\n\n");
            text.push_str(detail);
        }
        text
    }
}

#[derive(Debug, Default, Deserialize)]
struct RulesFile {
    #[serde(default, rename = "rule")]
    rules: Vec<PatchRule>,
}

/// Load `[[rule]]` entries from a TOML file
pub fn load_rules(path: &Path) -> Result<Vec<PatchRule>> {
    let text = fs::read_to_string(path)
        .with_context_fn(ScribeError::Patch, || {
            format!("Failed to read rules file {}", path.display())
        })?;
    let file: RulesFile = toml::from_str(&text).with_context_fn(ScribeError::Patch, || {
        format!("Failed to parse rules file {}", path.display())
    })?;

    if file.rules.is_empty() {
        return Err(ScribeError::Patch(format!(
            "{} defines no [[rule]] entries",
            path.display()
        )));
    }
    if let Some(rule) = file.rules.iter().find(|r| r.endpoint.trim().is_empty()) {
        return Err(ScribeError::Patch(format!(
            "{}: rule with status '{}' has an empty endpoint",
            path.display(),
            rule.status
        )));
    }

    debug!("Loaded {} patch rules from {}", file.rules.len(), path.display());
    Ok(file.rules)
}

// =============================================================================
// Presets
// =============================================================================

/// Built-in rule sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Authentication flow endpoints implemented in the app
    Auth,
    /// Payment provider webhooks the app never calls
    Webhooks,
}

impl Preset {
    pub fn rules(self) -> Vec<PatchRule> {
        match self {
            Self::Auth => AUTH_ENDPOINTS
                .iter()
                .map(|endpoint| {
                    PatchRule::new(*endpoint, StatusMarker::Verified).with_details([
                        "**Implementation:** `lib/services/auth_service.dart` and `lib/services/api_services/login_password_api_service.dart`",
                        "**Location in App:** `lib/screens/auth/login_screen.dart`, `lib/screens/auth/register_screen.dart`",
                    ])
                })
                .collect(),
            Self::Webhooks => WEBHOOK_ENDPOINTS
                .iter()
                .map(|endpoint| {
                    PatchRule::new(*endpoint, StatusMarker::NotUsed)
                        .with_note("Backend-only endpoint called by Stripe/PayPal servers")
                })
                .collect(),
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auth" => Ok(Self::Auth),
            "webhooks" | "webhook" => Ok(Self::Webhooks),
            _ => Err(format!(
                "Invalid preset '{}'. Valid values: auth, webhooks",
                s
            )),
        }
    }
}

const AUTH_ENDPOINTS: &[&str] = &[
    "POST /auth/register",
    "POST /auth/login",
    "POST /auth/login-password",
    "POST /auth/verify-login-code",
    "POST /auth/check-user-state",
    "POST /auth/resend-verification",
    "POST /auth/resend-verification-existing",
    "POST /auth/send-verification",
    "POST /auth/send-otp",
    "POST /auth/verify-otp",
    "POST /auth/reset-password",
    "POST /auth/change-password",
    "DELETE /auth/delete-account",
    "POST /auth/logout",
];

const WEBHOOK_ENDPOINTS: &[&str] = &[
    "POST /stripe/webhook",
    "POST /stripe/subscription-webhook",
    "POST /superlike-packs/stripe-webhook",
    "POST /paypal/webhook",
];

// =============================================================================
// Patcher
// =============================================================================

/// Result of applying rules to a log
#[derive(Debug, Clone, Default)]
pub struct PatchReport {
    /// Endpoints whose status line was replaced
    pub applied: Vec<String>,
    /// Endpoints whose heading or status line was not found
    pub skipped: Vec<String>,
    /// Status counts written into the Summary
    pub counts: StatusCounts,
    /// Total written into the Summary
    pub total: usize,
}

pub struct StatusPatcher {
    rules: Vec<PatchRule>,
}

impl StatusPatcher {
    pub fn new(rules: Vec<PatchRule>) -> Self {
        Self { rules }
    }

    pub fn from_preset(preset: Preset) -> Self {
        Self::new(preset.rules())
    }

    pub fn rules(&self) -> &[PatchRule] {
        &self.rules
    }

    /// Apply every rule to `log` and rebuild its Summary
    pub fn apply(&self, log: &str) -> (String, PatchReport) {
        let mut content = log.to_string();
        let mut report = PatchReport::default();

        for rule in &self.rules {
            match patch_section(&content, rule) {
                Some(patched) => {
                    content = patched;
                    report.applied.push(rule.endpoint.clone());
                }
                None => {
                    warn!("Section for '{}' not found, rule skipped", rule.endpoint);
                    report.skipped.push(rule.endpoint.clone());
                }
            }
        }

        let (content, counts, total) = rewrite_summary(&content);
        report.counts = counts;
        report.total = total;
        (content, report)
    }

    /// Patch the log file in place
    pub fn patch_file(&self, path: &Path) -> Result<PatchReport> {
        if !path.exists() {
            return Err(ScribeError::LogNotFound {
                path: path.to_path_buf(),
            });
        }

        let log = fs::read_to_string(path)?;
        let (patched, report) = self.apply(&log);
        fs::write(path, patched)?;
        info!(
            "Patched {} ({} applied, {} skipped)",
            path.display(),
            report.applied.len(),
            report.skipped.len()
        );
        Ok(report)
    }
}

/// Offsets of `### <endpoint>` headings that end at a word boundary
fn heading_offsets(content: &str, endpoint: &str) -> Vec<usize> {
    let needle = format!("### {}", endpoint);
    content
        .match_indices(&needle)
        .map(|(idx, _)| idx)
        .filter(|&idx| {
            let rest = &content[idx + needle.len()..];
            rest.is_empty() || rest.starts_with([' ', '\n', '\r'])
        })
        .collect()
}

/// Replace the status line following the first matching heading
fn patch_section(content: &str, rule: &PatchRule) -> Option<String> {
    let headings = heading_offsets(content, &rule.endpoint);
    let section = *headings.first()?;
    if headings.len() > 1 {
        warn!(
            "'{}' has {} duplicate sections, only the first is patched",
            rule.endpoint,
            headings.len() - 1
        );
    }

    let status_start = section + content[section..].find(STATUS_PREFIX)?;
    let status_end = content[status_start..]
        .find('\n')
        .map_or(content.len(), |offset| status_start + offset);

    let mut patched = String::with_capacity(content.len() + 128);
    patched.push_str(&content[..status_start]);
    patched.push_str(&rule.replacement());
    patched.push_str(&content[status_end..]);
    debug!("Patched status of '{}'", rule.endpoint);
    Some(patched)
}

/// Recount statuses and replace the Summary block, appending one if absent
fn rewrite_summary(content: &str) -> (String, StatusCounts, usize) {
    let counts = StatusCounts::tally(content);
    let span = summary_span(content);

    let total = span
        .and_then(|(start, end)| SUMMARY_TOTAL_RE.captures(&content[start..end]))
        .and_then(|caps| caps[1].parse::<usize>().ok())
        .unwrap_or_else(|| {
            let sections = span.map_or(content, |(start, _)| &content[..start]);
            status_lines(sections).count()
        });
    let summary = render_summary(total, &counts);

    let rewritten = match span {
        Some((start, end)) => format!("{}{}{}", &content[..start], summary, &content[end..]),
        None => {
            warn!("Log has no Summary block, appending one");
            let separator = if content.ends_with('\n') { "\n" } else { "\n\n" };
            format!("{}{}{}\n", content, separator, summary)
        }
    };
    (rewritten, counts, total)
}
