//! API Reference Generator
//!
//! Walks a collection once and assembles a Markdown reference:
//!
//! - [`structure`]: field-path/type inference over JSON bodies
//! - [`synthesis`]: example responses for endpoints without saved ones
//! - [`endpoint`]: the per-endpoint section renderer
//!
//! Output carries no timestamp, so regenerating from the same collection is
//! byte-identical.

pub mod endpoint;
pub mod structure;
pub mod synthesis;

pub use endpoint::{EndpointRenderer, ResponseClass};
pub use structure::{FieldType, InferredStructure, infer_structure};
pub use synthesis::{ExampleResponse, SynthesisPolicy, SynthesisRule, UrlPattern};

use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::collection::{Collection, Item};
use crate::config::Config;
use crate::constants::docs;
use crate::types::Result;

/// Outcome of a generation run
#[derive(Debug, Clone)]
pub struct DocReport {
    pub markdown: String,
    pub categories: usize,
    pub endpoints: usize,
}

pub struct DocGenerator {
    title: Option<String>,
    base_url: Option<String>,
    max_raw_body_chars: usize,
    policy: SynthesisPolicy,
}

impl Default for DocGenerator {
    fn default() -> Self {
        Self {
            title: None,
            base_url: None,
            max_raw_body_chars: docs::MAX_RAW_BODY_CHARS,
            policy: SynthesisPolicy::default(),
        }
    }
}

impl DocGenerator {
    pub fn from_config(config: &Config) -> Self {
        Self {
            title: config.docs.title.clone(),
            base_url: config.collection.base_url.clone(),
            max_raw_body_chars: config.docs.max_raw_body_chars,
            policy: SynthesisPolicy::default(),
        }
    }

    /// Replace the response synthesis table
    pub fn with_policy(mut self, policy: SynthesisPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn generate(&self, collection: &Collection) -> DocReport {
        let title = self
            .title
            .clone()
            .or_else(|| collection.info.name.clone().filter(|n| !n.is_empty()))
            .unwrap_or_else(|| docs::FALLBACK_TITLE.to_string());
        let base_url = self
            .base_url
            .clone()
            .or_else(|| collection.base_url_variable())
            .unwrap_or_else(|| docs::FALLBACK_BASE_URL.to_string());
        let categories = collection.item.len();
        let renderer = EndpointRenderer::new(&self.policy, self.max_raw_body_chars);

        let mut output = String::new();
        output.push_str(&format!("# {} - Complete Methods Documentation\n\n", title));
        output.push_str("**Generated from:** Postman Collection\n");
        output.push_str(&format!("**Base URL:** `{}`\n", base_url));
        output.push_str(&format!("**Total Categories:** {}\n\n", categories));
        output.push_str("---\n\n");

        let mut total_endpoints = 0;
        for category in &collection.item {
            // The count heads the section, so the body is buffered first
            let mut body = String::new();
            let count = match category.children() {
                Some(children) => render_children(children, &renderer, &mut body),
                None => {
                    render_entry(category, &renderer, &mut body);
                    1
                }
            };
            total_endpoints += count;
            debug!(
                "Documented category '{}' ({} endpoints)",
                category.name_or("Unknown Category"),
                count
            );

            output.push_str(&format!("## {}\n\n", category.name_or("Unknown Category")));
            output.push_str(&format!("**Total Endpoints:** {}\n\n", count));
            output.push_str(&body);
            output.push_str("\n---\n\n");
        }

        output.push_str("\n## Summary\n\n");
        output.push_str(&format!("- **Total Categories:** {}\n", categories));
        output.push_str(&format!("- **Total Endpoints:** {}\n", total_endpoints));
        let generated = output.chars().count();
        output.push_str(&format!(
            "- **Documentation Generated:** {} characters\n",
            generated
        ));

        DocReport {
            markdown: output,
            categories,
            endpoints: total_endpoints,
        }
    }

    /// Generate and write the reference to `output`
    pub fn write(&self, collection: &Collection, output: &Path) -> Result<DocReport> {
        let report = self.generate(collection);
        fs::write(output, &report.markdown)?;
        info!(
            "Wrote API reference to {} ({} endpoints)",
            output.display(),
            report.endpoints
        );
        Ok(report)
    }
}

/// Render a category's children; returns the number of endpoints rendered
fn render_children(children: &[Item], renderer: &EndpointRenderer<'_>, out: &mut String) -> usize {
    let mut count = 0;
    for child in children {
        if child.is_folder() {
            out.push_str(&format!("### {}\n\n", child.name_or("Subfolder")));
            let mut leaves = Vec::new();
            collect_endpoints(child, &mut leaves);
            for leaf in leaves {
                render_entry(leaf, renderer, out);
                count += 1;
            }
        } else {
            render_entry(child, renderer, out);
            count += 1;
        }
    }
    count
}

/// Checklist line followed by the endpoint section
fn render_entry(item: &Item, renderer: &EndpointRenderer<'_>, out: &mut String) {
    out.push_str(&format!(
        "- [ ] {} - `{}` `{}`\n",
        item.name_or("Unknown"),
        item.request.method(),
        item.request.display_url()
    ));
    renderer.render(item, out);
}

/// Depth-first endpoints under a folder
fn collect_endpoints<'a>(folder: &'a Item, leaves: &mut Vec<&'a Item>) {
    for child in folder.children().unwrap_or_default() {
        if child.is_folder() {
            collect_endpoints(child, leaves);
        } else {
            leaves.push(child);
        }
    }
}
