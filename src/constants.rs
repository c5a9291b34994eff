//! Global Constants
//!
//! Centralized constants for file locations and rendering defaults.
//! All magic numbers and literal tokens should be defined here.

/// Default file locations (relative to the working directory)
pub mod paths {
    /// Postman collection read by `docs` and `log`, written by `scaffold`
    pub const DEFAULT_COLLECTION: &str = "postman_collection.json";

    /// API reference written by `docs`
    pub const DEFAULT_DOCS_OUTPUT: &str = "API_DOCUMENTATION.md";

    /// Verification checklist written by `log` and patched by `patch`
    pub const DEFAULT_LOG_OUTPUT: &str = "API_VERIFICATION_LOG.md";

    /// Project-level configuration file
    pub const PROJECT_CONFIG: &str = "postscribe.toml";
}

/// Postman collection format constants
pub mod postman {
    /// Template variable holding the API base URL
    pub const BASE_URL_VARIABLE: &str = "{{base_url}}";

    /// Variable name of the base URL in the collection `variable` list
    pub const BASE_URL_KEY: &str = "base_url";

    /// Header whose presence marks an endpoint as authenticated
    pub const AUTH_HEADER: &str = "Authorization";

    /// Collection format schema written by the scaffolder
    pub const SCHEMA_URL: &str =
        "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

    /// Bearer token header value written by the scaffolder
    pub const BEARER_TOKEN_VALUE: &str = "Bearer {{auth_token}}";
}

/// Documentation rendering constants
pub mod docs {
    /// Literal token that replaces `{{base_url}}` in rendered endpoint URLs
    pub const BASE_URL_TOKEN: &str = "BASE_URL";

    /// Base URL shown when neither config nor collection provides one
    pub const FALLBACK_BASE_URL: &str = "http://localhost:8000/api";

    /// Title used when neither config nor collection provides a name
    pub const FALLBACK_TITLE: &str = "API";

    /// Maximum characters of an unparseable response body to render
    pub const MAX_RAW_BODY_CHARS: usize = 500;

    /// Marker appended after a truncated raw body
    pub const TRUNCATION_MARKER: &str = "... (truncated)";
}

/// Verification log constants
pub mod verification {
    /// Category label for endpoints outside any folder
    pub const UNKNOWN_CATEGORY: &str = "Unknown";

    /// Prefix of every endpoint status line
    pub const STATUS_PREFIX: &str = "**Status:**";

    /// Heading that opens the summary block
    pub const SUMMARY_HEADING: &str = "## Summary";

    /// Label of the last line of the summary block
    pub const PROGRESS_PREFIX: &str = "**Progress:**";
}
