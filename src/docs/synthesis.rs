//! Example Response Synthesis
//!
//! When a collection carries no saved responses, plausible examples are
//! synthesized from the HTTP method and URL. The policy is an ordered list
//! of rules evaluated first-match-wins; the matched rule contributes its
//! examples, then the 401/404/500 trailers are appended.

/// One synthesized example response
#[derive(Debug, Clone, Copy)]
pub struct ExampleResponse {
    /// Full heading text, e.g. `Success Response (200)`
    pub heading: &'static str,
    /// Pretty JSON body, newline terminated
    pub body: &'static str,
    /// `(path, type, description)` rows for the fields list; empty omits the list
    pub fields: &'static [(&'static str, &'static str, &'static str)],
}

impl ExampleResponse {
    /// Render as a Markdown `####` section
    pub fn render(&self, out: &mut String) {
        out.push_str(&format!("#### {}\n\n", self.heading));
        out.push_str("```json\n");
        out.push_str(self.body);
        out.push_str("```\n\n");
        if !self.fields.is_empty() {
            out.push_str("**Response Fields:**\n\n");
            for (path, ty, description) in self.fields {
                out.push_str(&format!("- `{}` ({}) - {}\n", path, ty, description));
            }
            out.push('\n');
        }
    }
}

/// Which lowercased-URL substrings a rule requires
#[derive(Debug, Clone, Copy)]
pub enum UrlPattern {
    Any,
    /// At least one substring occurs
    ContainsAny(&'static [&'static str]),
    /// Every substring occurs
    ContainsAll(&'static [&'static str]),
}

impl UrlPattern {
    pub fn matches(&self, url_lower: &str) -> bool {
        match self {
            Self::Any => true,
            Self::ContainsAny(needles) => needles.iter().any(|n| url_lower.contains(n)),
            Self::ContainsAll(needles) => needles.iter().all(|n| url_lower.contains(n)),
        }
    }
}

/// A `(methods, url pattern) → examples` entry
#[derive(Debug, Clone)]
pub struct SynthesisRule {
    /// Exact, case-sensitive method names
    pub methods: &'static [&'static str],
    pub pattern: UrlPattern,
    pub examples: Vec<ExampleResponse>,
}

impl SynthesisRule {
    pub fn matches(&self, method: &str, url_lower: &str) -> bool {
        self.methods.contains(&method) && self.pattern.matches(url_lower)
    }
}

/// Ordered synthesis rules plus the error trailers every endpoint gets
#[derive(Debug, Clone)]
pub struct SynthesisPolicy {
    pub rules: Vec<SynthesisRule>,
    pub unauthorized: ExampleResponse,
    pub not_found: ExampleResponse,
    pub server_error: ExampleResponse,
}

impl SynthesisPolicy {
    /// Examples for an endpoint, in render order
    pub fn examples_for(&self, method: &str, url: &str, auth_required: bool) -> Vec<ExampleResponse> {
        let url_lower = url.to_lowercase();
        let mut examples: Vec<ExampleResponse> = self
            .rules
            .iter()
            .find(|rule| rule.matches(method, &url_lower))
            .map(|rule| rule.examples.clone())
            .unwrap_or_default();

        if auth_required {
            examples.push(self.unauthorized);
        }
        examples.push(self.not_found);
        examples.push(self.server_error);
        examples
    }

    /// Render the synthesized examples for an endpoint
    pub fn render(&self, method: &str, url: &str, auth_required: bool, out: &mut String) {
        for example in self.examples_for(method, url, auth_required) {
            example.render(out);
        }
    }
}

impl Default for SynthesisPolicy {
    fn default() -> Self {
        Self {
            rules: vec![
                SynthesisRule {
                    methods: &["GET"],
                    pattern: UrlPattern::ContainsAny(&["list", "history", "matches"]),
                    examples: vec![GET_LIST],
                },
                SynthesisRule {
                    methods: &["GET"],
                    pattern: UrlPattern::Any,
                    examples: vec![GET_OBJECT],
                },
                SynthesisRule {
                    methods: &["POST"],
                    pattern: UrlPattern::ContainsAny(&["register"]),
                    examples: vec![POST_REGISTER, VALIDATION_DETAILED],
                },
                SynthesisRule {
                    methods: &["POST"],
                    pattern: UrlPattern::ContainsAny(&["login"]),
                    examples: vec![POST_LOGIN, VALIDATION_DETAILED],
                },
                SynthesisRule {
                    methods: &["POST"],
                    pattern: UrlPattern::ContainsAny(&["like", "superlike"]),
                    examples: vec![POST_LIKE, POST_LIKE_MATCH, VALIDATION_DETAILED],
                },
                SynthesisRule {
                    methods: &["POST"],
                    pattern: UrlPattern::ContainsAll(&["send", "message"]),
                    examples: vec![POST_MESSAGE, VALIDATION_DETAILED],
                },
                SynthesisRule {
                    methods: &["POST"],
                    pattern: UrlPattern::Any,
                    examples: vec![POST_GENERIC, VALIDATION_DETAILED],
                },
                SynthesisRule {
                    methods: &["PUT", "PATCH"],
                    pattern: UrlPattern::Any,
                    examples: vec![UPDATED, VALIDATION_SHORT],
                },
                SynthesisRule {
                    methods: &["DELETE"],
                    pattern: UrlPattern::Any,
                    examples: vec![DELETED],
                },
            ],
            unauthorized: UNAUTHORIZED,
            not_found: NOT_FOUND,
            server_error: SERVER_ERROR,
        }
    }
}

// =============================================================================
// Built-in examples
// =============================================================================

const STATUS_FIELD: (&str, &str, &str) = ("status", "boolean", "Operation status");
const SUCCESS_MESSAGE_FIELD: (&str, &str, &str) = ("message", "string", "Success message");
const ERROR_STATUS_FIELD: (&str, &str, &str) = ("status", "boolean", "Always false for errors");
const ERROR_MESSAGE_FIELD: (&str, &str, &str) = ("message", "string", "Error message");

const GET_LIST: ExampleResponse = ExampleResponse {
    heading: "Success Response (200)",
    body: "{\n  \"status\": true,\n  \"message\": \"Data retrieved successfully\",\n  \"data\": {\n    \"items\": [],\n    \"current_page\": 1,\n    \"per_page\": 15,\n    \"total\": 0,\n    \"last_page\": 1\n  }\n}\n",
    fields: &[
        STATUS_FIELD,
        ("message", "string", "Response message"),
        ("data.items", "array", "List of items"),
        ("data.current_page", "integer", "Current page number"),
        ("data.per_page", "integer", "Items per page"),
        ("data.total", "integer", "Total number of items"),
        ("data.last_page", "integer", "Last page number"),
    ],
};

const GET_OBJECT: ExampleResponse = ExampleResponse {
    heading: "Success Response (200)",
    body: "{\n  \"status\": true,\n  \"message\": \"Data retrieved successfully\",\n  \"data\": {}\n}\n",
    fields: &[
        STATUS_FIELD,
        ("message", "string", "Response message"),
        ("data", "object", "Response data object"),
    ],
};

const POST_REGISTER: ExampleResponse = ExampleResponse {
    heading: "Success Response (200)",
    body: "{\n  \"status\": true,\n  \"message\": \"Registration successful! Please check your email for verification code.\",\n  \"data\": {\n    \"user_id\": 1,\n    \"email\": \"user@example.com\",\n    \"email_sent\": true,\n    \"resend_available_at\": \"2024-01-01 12:02:00\",\n    \"hourly_attempts_remaining\": 2\n  }\n}\n",
    fields: &[
        STATUS_FIELD,
        SUCCESS_MESSAGE_FIELD,
        ("data.user_id", "integer", "Created user ID"),
        ("data.email", "string", "User email address"),
        ("data.email_sent", "boolean", "Whether email was sent"),
        ("data.resend_available_at", "string", "When resend is available"),
        ("data.hourly_attempts_remaining", "integer", "Remaining attempts"),
    ],
};

const POST_LOGIN: ExampleResponse = ExampleResponse {
    heading: "Success Response (200)",
    body: "{\n  \"status\": true,\n  \"message\": \"Login successful\",\n  \"data\": {\n    \"user\": {},\n    \"token\": \"auth_token_here\",\n    \"token_type\": \"Bearer\",\n    \"profile_completed\": true,\n    \"needs_profile_completion\": false,\n    \"user_state\": \"ready_for_app\"\n  }\n}\n",
    fields: &[
        STATUS_FIELD,
        SUCCESS_MESSAGE_FIELD,
        ("data.user", "object", "User object"),
        ("data.token", "string", "Authentication token"),
        ("data.token_type", "string", "Token type (Bearer)"),
        ("data.profile_completed", "boolean", "Profile completion status"),
        (
            "data.needs_profile_completion",
            "boolean",
            "Whether profile completion is needed",
        ),
        ("data.user_state", "string", "Current user state"),
    ],
};

const POST_LIKE: ExampleResponse = ExampleResponse {
    heading: "Success Response (200)",
    body: "{\n  \"status\": true,\n  \"message\": \"User liked successfully\",\n  \"data\": {\n    \"like_id\": 1,\n    \"target_user_id\": 2,\n    \"status\": \"pending\",\n    \"is_match\": false,\n    \"created_at\": \"2024-01-01T12:00:00Z\"\n  }\n}\n",
    fields: &[
        STATUS_FIELD,
        SUCCESS_MESSAGE_FIELD,
        ("data.like_id", "integer", "Like record ID"),
        ("data.target_user_id", "integer", "Liked user ID"),
        ("data.status", "string", "Like status (pending/accepted/rejected)"),
        ("data.is_match", "boolean", "Whether it's a match"),
        ("data.created_at", "string", "Creation timestamp"),
    ],
};

const POST_LIKE_MATCH: ExampleResponse = ExampleResponse {
    heading: "Match Response (200) - When Mutual Like Occurs",
    body: "{\n  \"status\": true,\n  \"message\": \"It's a match!\",\n  \"data\": {\n    \"is_match\": true,\n    \"match_id\": 1,\n    \"users\": [\n      {\"id\": 1, \"name\": \"User 1\"},\n      {\"id\": 2, \"name\": \"User 2\"}\n    ],\n    \"created_at\": \"2024-01-01T12:00:00Z\"\n  }\n}\n",
    fields: &[],
};

const POST_MESSAGE: ExampleResponse = ExampleResponse {
    heading: "Success Response (200)",
    body: "{\n  \"status\": true,\n  \"message\": \"Message sent successfully\",\n  \"data\": {\n    \"message\": {\n      \"id\": 1,\n      \"chat_id\": 1,\n      \"sender_id\": 1,\n      \"receiver_id\": 2,\n      \"content\": \"Hello!\",\n      \"type\": \"text\",\n      \"created_at\": \"2024-01-01T12:00:00Z\",\n      \"read_at\": null\n    }\n  }\n}\n",
    fields: &[
        STATUS_FIELD,
        SUCCESS_MESSAGE_FIELD,
        ("data.message.id", "integer", "Message ID"),
        ("data.message.chat_id", "integer", "Chat ID"),
        ("data.message.sender_id", "integer", "Sender user ID"),
        ("data.message.receiver_id", "integer", "Receiver user ID"),
        ("data.message.content", "string", "Message content"),
        ("data.message.type", "string", "Message type (text/image/video)"),
        ("data.message.created_at", "string", "Creation timestamp"),
        ("data.message.read_at", "string|null", "Read timestamp"),
    ],
};

const POST_GENERIC: ExampleResponse = ExampleResponse {
    heading: "Success Response (200)",
    body: "{\n  \"status\": true,\n  \"message\": \"Operation successful\",\n  \"data\": {}\n}\n",
    fields: &[
        STATUS_FIELD,
        SUCCESS_MESSAGE_FIELD,
        ("data", "object", "Response data object"),
    ],
};

const VALIDATION_DETAILED: ExampleResponse = ExampleResponse {
    heading: "Validation Error Response (422)",
    body: "{\n  \"status\": false,\n  \"message\": \"Validation error\",\n  \"errors\": {\n    \"field_name\": [\"The field name is required.\", \"The field name must be at least 3 characters.\"]\n  }\n}\n",
    fields: &[
        ERROR_STATUS_FIELD,
        ERROR_MESSAGE_FIELD,
        (
            "errors",
            "object",
            "Validation errors object with field names as keys and array of error messages as values",
        ),
    ],
};

const UPDATED: ExampleResponse = ExampleResponse {
    heading: "Success Response (200)",
    body: "{\n  \"status\": true,\n  \"message\": \"Updated successfully\",\n  \"data\": {}\n}\n",
    fields: &[
        STATUS_FIELD,
        SUCCESS_MESSAGE_FIELD,
        ("data", "object", "Updated data object"),
    ],
};

const VALIDATION_SHORT: ExampleResponse = ExampleResponse {
    heading: "Validation Error Response (422)",
    body: "{\n  \"status\": false,\n  \"message\": \"Validation error\",\n  \"errors\": {\n    \"field_name\": [\"Error message\"]\n  }\n}\n",
    fields: &[],
};

const DELETED: ExampleResponse = ExampleResponse {
    heading: "Success Response (200)",
    body: "{\n  \"status\": true,\n  \"message\": \"Deleted successfully\"\n}\n",
    fields: &[STATUS_FIELD, SUCCESS_MESSAGE_FIELD],
};

const UNAUTHORIZED: ExampleResponse = ExampleResponse {
    heading: "Unauthorized Response (401)",
    body: "{\n  \"message\": \"Unauthenticated\"\n}\n",
    fields: &[(
        "message",
        "string",
        "Error message indicating authentication is required",
    )],
};

const NOT_FOUND: ExampleResponse = ExampleResponse {
    heading: "Not Found Response (404)",
    body: "{\n  \"status\": false,\n  \"message\": \"Resource not found\"\n}\n",
    fields: &[ERROR_STATUS_FIELD, ERROR_MESSAGE_FIELD],
};

const SERVER_ERROR: ExampleResponse = ExampleResponse {
    heading: "Server Error Response (500)",
    body: "{\n  \"status\": false,\n  \"message\": \"Internal server error\",\n  \"error\": \"Detailed error message\"\n}\n",
    fields: &[
        ERROR_STATUS_FIELD,
        ERROR_MESSAGE_FIELD,
        ("error", "string", "Detailed error information"),
    ],
};
