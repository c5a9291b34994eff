//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Every field can be set from the global file, the project file, or
//! `POSTSCRIBE_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{docs, paths};
use crate::types::{Result, ScribeError};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Input collection settings
    pub collection: CollectionConfig,

    /// API reference output settings
    pub docs: DocsConfig,

    /// Verification log settings
    pub log: LogConfig,

    /// Collection scaffolding settings
    pub scaffold: ScaffoldConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            collection: CollectionConfig::default(),
            docs: DocsConfig::default(),
            log: LogConfig::default(),
            scaffold: ScaffoldConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `ScribeError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.docs.max_raw_body_chars == 0 {
            return Err(ScribeError::Config(
                "docs.max_raw_body_chars must be greater than 0".to_string(),
            ));
        }

        if let Some(base_url) = &self.collection.base_url {
            url::Url::parse(base_url).map_err(|e| {
                ScribeError::Config(format!(
                    "collection.base_url '{}' is not a valid URL: {}",
                    base_url, e
                ))
            })?;
        }

        Ok(())
    }
}

// =============================================================================
// Collection Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Postman collection to read
    pub path: PathBuf,

    /// Base URL override (defaults to the collection's `base_url` variable)
    pub base_url: Option<String>,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(paths::DEFAULT_COLLECTION),
            base_url: None,
        }
    }
}

// =============================================================================
// Docs Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Markdown file to write
    pub output: PathBuf,

    /// Document title (defaults to the collection name)
    pub title: Option<String>,

    /// Characters of an unparseable response body to show before truncating
    pub max_raw_body_chars: usize,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(paths::DEFAULT_DOCS_OUTPUT),
            title: None,
            max_raw_body_chars: docs::MAX_RAW_BODY_CHARS,
        }
    }
}

// =============================================================================
// Verification Log Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Verification log file (written by `log`, patched by `patch`)
    pub output: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(paths::DEFAULT_LOG_OUTPUT),
        }
    }
}

// =============================================================================
// Scaffold Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Collection file written by `scaffold`
    pub output: PathBuf,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(paths::DEFAULT_COLLECTION),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.docs.max_raw_body_chars, 500);
        assert_eq!(config.log.output, PathBuf::from("API_VERIFICATION_LOG.md"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_truncation() {
        let mut config = Config::default();
        config.docs.max_raw_body_chars = 0;
        assert!(matches!(config.validate(), Err(ScribeError::Config(_))));
    }

    #[test]
    fn test_validate_base_url() {
        let mut config = Config::default();
        config.collection.base_url = Some("not a url".to_string());
        assert!(config.validate().is_err());

        config.collection.base_url = Some("https://api.example.com/v1".to_string());
        assert!(config.validate().is_ok());
    }
}
