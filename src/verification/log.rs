//! Verification Log Generator
//!
//! Flattens a collection into endpoint records and renders the checklist
//! that the status patcher later edits in place.

use chrono::{Local, NaiveDateTime};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::status::{StatusCounts, StatusMarker, render_summary};
use crate::collection::{Collection, Item};
use crate::config::Config;
use crate::constants::{docs, verification::UNKNOWN_CATEGORY};
use crate::types::Result;

/// One endpoint as it appears in the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedEndpoint {
    pub category: String,
    pub method: String,
    pub path: String,
    pub name: String,
    pub description: String,
    pub auth_required: bool,
}

impl LoggedEndpoint {
    /// `### <METHOD> <path> <lock>` heading
    pub fn heading(&self) -> String {
        let lock = if self.auth_required { "🔒" } else { "🔓" };
        format!("### {} {} {}", self.method, self.path, lock)
    }
}

/// Every endpoint of the collection, attributed to its closest enclosing folder
pub fn collect_endpoints(collection: &Collection) -> Vec<LoggedEndpoint> {
    let mut endpoints = Vec::new();
    for item in &collection.item {
        visit(item, "", collection.has_collection_auth(), &mut endpoints);
    }
    endpoints
}

fn visit(item: &Item, category: &str, collection_auth: bool, out: &mut Vec<LoggedEndpoint>) {
    if let Some(children) = item.children() {
        let folder = item.name_or(UNKNOWN_CATEGORY);
        for child in children {
            visit(child, folder, collection_auth, out);
        }
        return;
    }

    let request = &item.request;
    out.push(LoggedEndpoint {
        category: if category.is_empty() {
            UNKNOWN_CATEGORY.to_string()
        } else {
            category.to_string()
        },
        method: request.method().to_string(),
        path: request.log_path(),
        name: item.name_or("Unknown").to_string(),
        description: request.description().to_string(),
        auth_required: request.has_auth_header() || collection_auth,
    });
}

/// Outcome of a log generation run
#[derive(Debug, Clone)]
pub struct LogReport {
    pub markdown: String,
    pub endpoints: usize,
    pub categories: usize,
}

pub struct VerificationLogGenerator {
    base_url: Option<String>,
}

impl VerificationLogGenerator {
    pub fn new(base_url: Option<String>) -> Self {
        Self { base_url }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.collection.base_url.clone())
    }

    /// Render the log with `generated` as its timestamp
    pub fn generate(&self, collection: &Collection, generated: NaiveDateTime) -> LogReport {
        let endpoints = collect_endpoints(collection);
        let base_url = self
            .base_url
            .clone()
            .or_else(|| collection.base_url_variable())
            .unwrap_or_else(|| docs::FALLBACK_BASE_URL.to_string());

        let mut lines: Vec<String> = vec![
            "# API Verification Log".into(),
            String::new(),
            format!("**Generated:** {}", generated.format("%Y-%m-%d %H:%M:%S")),
            format!("**Total Endpoints:** {}", endpoints.len()),
            format!("**Base URL:** `{}`", base_url),
            String::new(),
            "---".into(),
            String::new(),
            "## Status Legend".into(),
            String::new(),
        ];
        lines.extend(StatusMarker::ALL.into_iter().map(StatusMarker::legend));
        lines.extend(["", "---", ""].map(String::from));

        let mut by_category: BTreeMap<&str, Vec<&LoggedEndpoint>> = BTreeMap::new();
        for endpoint in &endpoints {
            by_category
                .entry(endpoint.category.as_str())
                .or_default()
                .push(endpoint);
        }

        let mut counts = StatusCounts::default();
        for (category, members) in by_category.iter_mut() {
            members.sort_by(|a, b| (&a.method, &a.path).cmp(&(&b.method, &b.path)));
            debug!("Logging category '{}' ({} endpoints)", category, members.len());

            lines.push(format!("## {}", category));
            lines.push(String::new());
            lines.push(format!("**Total Endpoints:** {}", members.len()));
            lines.push(String::new());

            for endpoint in members.iter() {
                lines.push(endpoint.heading());
                lines.push(String::new());
                lines.push(format!("**Name:** {}", endpoint.name));
                if !endpoint.description.is_empty() {
                    lines.push(format!("**Description:** {}", endpoint.description));
                }
                lines.push(String::new());
                lines.push(StatusMarker::ReviewNeeded.status_line());
                lines.push(String::new());
                lines.push("**Location in App:** _To be determined_".into());
                lines.push(String::new());
                lines.push("**Notes:**".into());
                lines.push(String::new());
                lines.push("- [ ] Check if endpoint is used in app".into());
                lines.push("- [ ] Verify request body matches API spec".into());
                lines.push("- [ ] Verify response handling matches API spec".into());
                lines.push("- [ ] Test endpoint with actual API".into());
                lines.push(String::new());
                lines.push("---".into());
                lines.push(String::new());
                counts.record(StatusMarker::ReviewNeeded);
            }
        }

        lines.push(String::new());
        lines.push(render_summary(endpoints.len(), &counts));
        lines.push(String::new());

        LogReport {
            markdown: lines.join("\n"),
            endpoints: endpoints.len(),
            categories: by_category.len(),
        }
    }

    /// Generate with the current local time and write to `output`
    pub fn write(&self, collection: &Collection, output: &Path) -> Result<LogReport> {
        let report = self.generate(collection, Local::now().naive_local());
        fs::write(output, &report.markdown)?;
        info!(
            "Wrote verification log to {} ({} endpoints)",
            output.display(),
            report.endpoints
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    fn collection(json: &str) -> Collection {
        Collection::from_json(json).unwrap()
    }

    #[test]
    fn test_single_endpoint_log() {
        let c = collection(r#"{"item": [{"name": "Ping", "request": {"url": {"path": ["ping"]}}}]}"#);
        let report = VerificationLogGenerator::new(None).generate(&c, at());
        let md = &report.markdown;

        assert!(md.starts_with(
            "# API Verification Log\n\n**Generated:** 2026-01-02 03:04:05\n**Total Endpoints:** 1\n**Base URL:** `http://localhost:8000/api`\n\n---\n\n## Status Legend\n\n- ✅ **Verified** - "
        ));
        assert!(md.contains("## Unknown\n\n**Total Endpoints:** 1\n\n### GET /ping 🔓\n\n**Name:** Ping\n\n**Status:** 📝 Review Needed\n"));
        assert!(md.ends_with(
            "---\n\n\n## Summary\n\n- **Total Endpoints:** 1\n- ✅ **Verified:** 0\n- ❌ **Not Used:** 0\n- 🔧 **Needs Fix:** 0\n- ➕ **Missing:** 0\n- 📝 **Review Needed:** 1\n\n**Progress:** 0/1 (0%)\n"
        ));
    }

    #[test]
    fn test_empty_collection() {
        let report = VerificationLogGenerator::new(None).generate(&collection("{}"), at());
        assert_eq!(report.endpoints, 0);
        assert!(report.markdown.contains("**Progress:** 0/0 (0%)"));
    }

    #[test]
    fn test_closest_folder_and_sorting() {
        let c = collection(
            r#"{"item": [
                {"name": "Users", "item": [
                    {"name": "Update", "request": {"method": "PUT", "url": {"path": ["users", "{id}"]}}},
                    {"name": "List", "request": {"method": "GET", "url": {"path": ["users"]}}},
                    {"name": "Admin", "item": [
                        {"name": "Ban", "request": {"method": "POST", "url": {"path": ["admin", "ban"]}}}
                    ]}
                ]},
                {"name": "Auth", "item": [
                    {"name": "Login", "request": {"method": "POST", "url": {"path": ["auth", "login"]}}}
                ]}
            ]}"#,
        );
        let endpoints = collect_endpoints(&c);
        assert_eq!(endpoints[2].category, "Admin");
        assert_eq!(endpoints[0].path, "/users/:id");

        let md = VerificationLogGenerator::new(Some("https://x.test".into()))
            .generate(&c, at())
            .markdown;
        let admin = md.find("## Admin").unwrap();
        let auth = md.find("## Auth").unwrap();
        let users = md.find("## Users").unwrap();
        assert!(admin < auth && auth < users);

        let get = md.find("### GET /users 🔓").unwrap();
        let put = md.find("### PUT /users/:id 🔓").unwrap();
        assert!(get < put);
        assert!(md.contains("**Base URL:** `https://x.test`"));
    }

    #[test]
    fn test_auth_detection() {
        let header = collection(
            r#"{"item": [{"request": {"header": [{"key": "Authorization", "value": "Bearer t"}]}}]}"#,
        );
        assert!(collect_endpoints(&header)[0].auth_required);

        let collection_level = collection(
            r#"{"auth": {"type": "bearer"}, "item": [{"name": "X", "request": {"url": "{{base_url}}/me"}}]}"#,
        );
        let endpoint = &collect_endpoints(&collection_level)[0];
        assert!(endpoint.auth_required);
        assert_eq!(endpoint.heading(), "### GET /me 🔒");
    }

    #[test]
    fn test_description_line() {
        let c = collection(
            r#"{"item": [{"name": "Me", "request": {"description": "Current user", "url": {"path": ["me"]}}}]}"#,
        );
        let md = VerificationLogGenerator::new(None).generate(&c, at()).markdown;
        assert!(md.contains("**Name:** Me\n**Description:** Current user\n\n**Status:**"));
    }
}
