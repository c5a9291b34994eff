//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Recovery Policy
//!
//! - Missing input files are detected before parsing and reported as
//!   dedicated variants so the CLI can print a precise message.
//! - Malformed collection JSON is fatal (`Json`).
//! - Malformed request/response bodies never surface here: renderers fall
//!   back to raw text instead.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ScribeError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Postman collection not found at {}", path.display())]
    CollectionNotFound { path: PathBuf },

    #[error("Verification log not found at {}", path.display())]
    LogNotFound { path: PathBuf },

    #[error("Invalid catalog {}: {message}", path.display())]
    Catalog { path: PathBuf, message: String },

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Patch error: {0}")]
    Patch(String),
}

pub type Result<T> = std::result::Result<T, ScribeError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl ScribeError {
    /// Create a catalog error for the given file
    pub fn catalog(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Catalog {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this error means an input file was absent
    pub fn is_missing_input(&self) -> bool {
        matches!(
            self,
            Self::CollectionNotFound { .. } | Self::LogNotFound { .. }
        )
    }
}

/// Context extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Wrap the error in `kind` (e.g. `ScribeError::Patch`), prefixed with
    /// context from a closure (lazy evaluation)
    fn with_context_fn<F, C>(self, kind: fn(String) -> ScribeError, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn with_context_fn<F, C>(self, kind: fn(String) -> ScribeError, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| kind(format!("{}: {}", f().into(), e)))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_collection_message() {
        let err = ScribeError::CollectionNotFound {
            path: PathBuf::from("collection.json"),
        };
        assert_eq!(
            err.to_string(),
            "Postman collection not found at collection.json"
        );
        assert!(err.is_missing_input());
    }

    #[test]
    fn test_catalog_error_display() {
        let err = ScribeError::catalog("api.toml", "missing method");
        assert_eq!(err.to_string(), "Invalid catalog api.toml: missing method");
        assert!(!err.is_missing_input());
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: ScribeError = parse.unwrap_err().into();
        assert!(matches!(err, ScribeError::Json(_)));
    }

    #[test]
    fn test_with_context_fn() {
        let res: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("denied"));
        let err = res
            .with_context_fn(ScribeError::Patch, || "reading rules")
            .unwrap_err();
        assert_eq!(err.to_string(), "Patch error: reading rules: denied");
    }
}
