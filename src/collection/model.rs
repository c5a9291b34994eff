//! Postman Collection Model
//!
//! Lenient serde model of a Postman v2.x collection. Every attribute has a
//! default so partial exports load; only the top-level document must be
//! valid JSON.

use regex::{Captures, Regex};
use serde::Deserialize;
use std::sync::LazyLock;

use crate::constants::{docs, postman};
use crate::types::{json_str_items, json_string};

/// `{{var}}` template variables are left alone, `{name}` placeholders become `:name`
static PATH_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{[^{}]*\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("Invalid path param regex")
});

/// Root of a collection file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Collection {
    pub info: CollectionInfo,
    /// Collection-level auth; its presence marks every endpoint as authenticated
    pub auth: Option<serde_json::Value>,
    pub variable: Vec<serde_json::Value>,
    pub item: Vec<Item>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CollectionInfo {
    pub name: Option<String>,
    pub description: Option<Description>,
    pub schema: Option<String>,
    pub version: Option<String>,
}

/// A node of the item tree: a folder when it carries `item`, an endpoint otherwise
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Item {
    pub name: Option<String>,
    pub item: Option<Vec<Item>>,
    pub request: Request,
    pub response: Vec<Response>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Request {
    pub method: Option<String>,
    pub url: Option<RequestUrl>,
    pub header: Vec<serde_json::Value>,
    pub body: Option<RequestBody>,
    pub description: Option<Description>,
}

/// Postman accepts either a bare URL string or a decomposed object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RequestUrl {
    Raw(String),
    Parts(UrlParts),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UrlParts {
    pub raw: Option<String>,
    /// Usually an array of segments, occasionally a plain string
    pub path: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestBody {
    pub mode: Option<String>,
    pub raw: Option<String>,
}

/// Descriptions are plain strings in most exports and `{content, type}` in some
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Rich {
        #[serde(default)]
        content: String,
    },
}

impl Description {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Rich { content } => content,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Response {
    pub name: Option<String>,
    pub status: Option<String>,
    pub code: i64,
    pub body: Option<String>,
}

// =============================================================================
// Accessors
// =============================================================================

impl Collection {
    /// Parse a collection from JSON text
    pub fn from_json(text: &str) -> crate::types::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Value of the `base_url` collection variable, if any
    pub fn base_url_variable(&self) -> Option<String> {
        self.variable
            .iter()
            .find(|v| json_string(v, "key").as_deref() == Some(postman::BASE_URL_KEY))
            .and_then(|v| json_string(v, "value"))
            .filter(|value| !value.is_empty())
    }

    pub fn has_collection_auth(&self) -> bool {
        self.auth.is_some()
    }
}

impl Item {
    pub fn name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(default)
    }

    /// Folder children, or `None` for an endpoint
    pub fn children(&self) -> Option<&[Item]> {
        self.item.as_deref()
    }

    pub fn is_folder(&self) -> bool {
        self.item.is_some()
    }
}

impl Request {
    pub fn method(&self) -> &str {
        self.method.as_deref().unwrap_or("GET")
    }

    pub fn description(&self) -> &str {
        self.description.as_ref().map_or("", Description::as_str)
    }

    /// True iff some header's key is exactly `Authorization`
    pub fn has_auth_header(&self) -> bool {
        self.header
            .iter()
            .any(|h| json_string(h, "key").as_deref() == Some(postman::AUTH_HEADER))
    }

    /// Trimmed raw body text, when the body is in raw mode and non-empty
    pub fn raw_body(&self) -> Option<&str> {
        let body = self.body.as_ref()?;
        if body.mode.as_deref() != Some("raw") {
            return None;
        }
        body.raw
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
    }

    /// URL as shown in the API reference.
    ///
    /// Prefers the raw URL with `{{base_url}}` replaced by `BASE_URL`, falls
    /// back to the joined path segments, and is empty when neither exists.
    pub fn display_url(&self) -> String {
        match &self.url {
            None => String::new(),
            Some(RequestUrl::Raw(raw)) => {
                raw.replace(postman::BASE_URL_VARIABLE, docs::BASE_URL_TOKEN)
            }
            Some(RequestUrl::Parts(parts)) => match parts.raw.as_deref() {
                Some(raw) if !raw.is_empty() => {
                    raw.replace(postman::BASE_URL_VARIABLE, docs::BASE_URL_TOKEN)
                }
                _ => parts
                    .path
                    .as_ref()
                    .and_then(json_str_items)
                    .filter(|segments| !segments.is_empty())
                    .map(|segments| format!("/{}", segments.join("/")))
                    .unwrap_or_default(),
            },
        }
    }

    /// Path as shown in the verification log.
    ///
    /// Joins the segment list (a missing list is the root path); a `path`
    /// that is not a list falls back to the raw URL. The `{{base_url}}`
    /// variable is dropped and `{param}` placeholders become `:param`.
    pub fn log_path(&self) -> String {
        let path = match &self.url {
            None => "/".to_string(),
            Some(RequestUrl::Raw(raw)) => raw.clone(),
            Some(RequestUrl::Parts(parts)) => match &parts.path {
                None => "/".to_string(),
                Some(path) => match json_str_items(path) {
                    Some(segments) => format!("/{}", segments.join("/")),
                    None => parts.raw.clone().unwrap_or_default(),
                },
            },
        };
        normalize_path_params(&path.replace(postman::BASE_URL_VARIABLE, ""))
    }
}

/// Rewrite `{name}` placeholders as `:name`, leaving `{{var}}` untouched
pub fn normalize_path_params(path: &str) -> String {
    PATH_PARAM_RE
        .replace_all(path, |caps: &Captures<'_>| match caps.get(1) {
            Some(name) => format!(":{}", name.as_str()),
            None => caps[0].to_string(),
        })
        .into_owned()
}

impl Response {
    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}
