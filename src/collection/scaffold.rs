//! Collection Scaffolder
//!
//! Builds a Postman v2.1 collection from a declarative endpoint catalog
//! (TOML or YAML). Each catalog endpoint becomes one request item with
//! JSON headers, an optional bearer header and an optional raw JSON body.

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::constants::{docs, postman};
use crate::types::{Result, ScribeError, pretty_json};

const BODY_METHODS: [&str; 3] = ["POST", "PUT", "PATCH"];
const KNOWN_METHODS: [&str; 7] = ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

// =============================================================================
// Catalog
// =============================================================================

/// Declarative list of endpoints grouped by category
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default, rename = "category")]
    pub categories: Vec<CatalogCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogCategory {
    pub name: String,
    #[serde(default, rename = "endpoint")]
    pub endpoints: Vec<CatalogEndpoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEndpoint {
    pub name: String,
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub description: String,
    /// Adds the bearer `Authorization` header
    #[serde(default = "default_true")]
    pub auth: bool,
    /// Example request body, written only for POST/PUT/PATCH
    #[serde(default)]
    pub body: Option<Value>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_true() -> bool {
    true
}

impl Catalog {
    /// Load a catalog, choosing YAML for `.yaml`/`.yml` files and TOML otherwise
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ScribeError::catalog(path, "file not found"));
        }

        let text = fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let catalog: Catalog = if is_yaml {
            serde_yaml::from_str(&text)?
        } else {
            toml::from_str(&text)?
        };

        catalog
            .validate()
            .map_err(|message| ScribeError::catalog(path, message))?;
        debug!(
            "Loaded catalog {} ({} endpoints)",
            path.display(),
            catalog.endpoint_count()
        );

        Ok(catalog)
    }

    pub fn endpoint_count(&self) -> usize {
        self.categories.iter().map(|c| c.endpoints.len()).sum()
    }

    fn validate(&self) -> std::result::Result<(), String> {
        for category in &self.categories {
            for endpoint in &category.endpoints {
                let method = endpoint.method.to_uppercase();
                if !KNOWN_METHODS.contains(&method.as_str()) {
                    return Err(format!(
                        "endpoint '{}' in '{}' has unknown method '{}'",
                        endpoint.name, category.name, endpoint.method
                    ));
                }
                if endpoint.path.trim().is_empty() {
                    return Err(format!(
                        "endpoint '{}' in '{}' has an empty path",
                        endpoint.name, category.name
                    ));
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// Scaffolder
// =============================================================================

/// Converts a [`Catalog`] into collection JSON
pub struct Scaffolder {
    generated_at: NaiveDateTime,
}

impl Scaffolder {
    pub fn new(generated_at: NaiveDateTime) -> Self {
        Self { generated_at }
    }

    /// Build the full collection document
    pub fn build(&self, catalog: &Catalog) -> Value {
        let base_description = if catalog.description.is_empty() {
            format!("Complete API collection for {}.", catalog.name)
        } else {
            catalog.description.clone()
        };
        let description = format!(
            "{} Generated on {}. Contains all {} endpoints organized by category.",
            base_description,
            self.generated_at.format("%Y-%m-%d %H:%M:%S"),
            catalog.endpoint_count()
        );

        let folders: Vec<Value> = catalog
            .categories
            .iter()
            .map(|category| {
                json!({
                    "name": category.name,
                    "item": category.endpoints.iter().map(endpoint_item).collect::<Vec<_>>(),
                })
            })
            .collect();

        json!({
            "info": {
                "_postman_id": uuid::Uuid::new_v4().to_string(),
                "name": catalog.name,
                "description": description,
                "schema": postman::SCHEMA_URL,
                "version": catalog.version,
            },
            "auth": {
                "type": "bearer",
                "bearer": [
                    {"key": "token", "value": "{{auth_token}}", "type": "string"}
                ]
            },
            "variable": [
                {
                    "key": postman::BASE_URL_KEY,
                    "value": catalog.base_url.as_deref().unwrap_or(docs::FALLBACK_BASE_URL),
                    "type": "string"
                },
                {"key": "auth_token", "value": "", "type": "string"}
            ],
            "item": folders,
        })
    }

    /// Build and write the collection, returning the number of endpoints written
    pub fn write(&self, catalog: &Catalog, output: &Path) -> Result<usize> {
        let collection = self.build(catalog);

        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, pretty_json(&collection))?;
        info!("Wrote collection to {}", output.display());

        Ok(catalog.endpoint_count())
    }
}

/// Build one request item.
///
/// `{param}` segments become `:param`; a `segment?key=value` segment keeps
/// `segment` in the path and adds a query entry.
pub fn endpoint_item(endpoint: &CatalogEndpoint) -> Value {
    let method = endpoint.method.to_uppercase();
    let trimmed = endpoint.path.trim_matches('/');

    let mut segments: Vec<String> = Vec::new();
    let mut query: Vec<Value> = Vec::new();
    for part in trimmed.split('/') {
        if part.contains('{') {
            segments.push(format!(":{}", part.replace(['{', '}'], "")));
        } else if let Some((segment, query_string)) = part.split_once('?') {
            segments.push(segment.to_string());
            if let Some((key, value)) = query_string.split_once('=') {
                query.push(json!({"key": key, "value": value}));
            }
        } else {
            segments.push(part.to_string());
        }
    }

    let mut headers = vec![
        json!({"key": "Accept", "value": "application/json"}),
        json!({"key": "Content-Type", "value": "application/json"}),
    ];
    if endpoint.auth {
        headers.push(json!({
            "key": postman::AUTH_HEADER,
            "value": postman::BEARER_TOKEN_VALUE,
        }));
    }

    let mut url = json!({
        "raw": format!("{}/{}", postman::BASE_URL_VARIABLE, trimmed),
        "host": [postman::BASE_URL_VARIABLE],
        "path": segments,
    });
    if !query.is_empty() {
        url["query"] = Value::Array(query);
    }

    let mut request = json!({
        "method": method,
        "header": headers,
        "url": url,
        "description": endpoint.description,
    });
    if let Some(body) = &endpoint.body
        && BODY_METHODS.contains(&method.as_str())
    {
        request["body"] = json!({
            "mode": "raw",
            "raw": pretty_json(body),
            "options": {"raw": {"language": "json"}},
        });
    }

    json!({
        "name": endpoint.name,
        "request": request,
        "response": [],
    })
}
