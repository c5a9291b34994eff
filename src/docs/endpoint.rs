//! Per-endpoint Markdown sections of the API reference.

use serde_json::Value;

use super::structure::infer_structure;
use super::synthesis::SynthesisPolicy;
use crate::collection::{Item, Response};
use crate::constants::docs;
use crate::types::{pretty_json, truncate_chars};

/// Classification of a saved response, used in its heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    Success,
    Created,
    ValidationError,
    AuthenticationError,
    NotFound,
    ServerError,
    Error,
}

impl ResponseClass {
    /// First matching rule wins; a name mentioning "success" beats the code
    pub fn classify(code: i64, name: &str) -> Self {
        if code == 200 || name.to_lowercase().contains("success") {
            return Self::Success;
        }
        match code {
            201 => Self::Created,
            422 => Self::ValidationError,
            401 | 403 => Self::AuthenticationError,
            404 => Self::NotFound,
            c if c >= 500 => Self::ServerError,
            _ => Self::Error,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Created => "Created",
            Self::ValidationError => "Validation Error",
            Self::AuthenticationError => "Authentication Error",
            Self::NotFound => "Not Found",
            Self::ServerError => "Server Error",
            Self::Error => "Error",
        }
    }
}

/// Renders one endpoint section
#[derive(Debug, Clone, Copy)]
pub struct EndpointRenderer<'a> {
    policy: &'a SynthesisPolicy,
    max_raw_body_chars: usize,
}

impl<'a> EndpointRenderer<'a> {
    pub fn new(policy: &'a SynthesisPolicy, max_raw_body_chars: usize) -> Self {
        Self {
            policy,
            max_raw_body_chars,
        }
    }

    /// Append the section for `item` to `out`
    pub fn render(&self, item: &Item, out: &mut String) {
        let request = &item.request;
        let method = request.method();
        let url = request.display_url();

        out.push_str(&format!("\n### {}\n\n", item.name_or("Unknown")));
        out.push_str(&format!("**Method:** `{}`\n\n", method));
        out.push_str(&format!("**Endpoint:** `{}`\n\n", url));

        let description = request.description();
        if !description.is_empty() {
            out.push_str(&format!("**Description:** {}\n\n", description));
        }

        if let Some(body) = request.raw_body() {
            out.push_str("**Request Body:**\n\n```json\n");
            match serde_json::from_str::<Value>(body) {
                Ok(json) => out.push_str(&pretty_json(&json)),
                Err(_) => out.push_str(body),
            }
            out.push_str("\n```\n\n");
        }

        let auth_required = request.has_auth_header();
        if auth_required {
            out.push_str("**Authentication:** Required (Bearer Token)\n\n");
        }

        out.push_str("**Responses:**\n\n");
        if item.response.is_empty() {
            self.policy.render(method, &url, auth_required, out);
        } else {
            for response in &item.response {
                self.render_response(response, out);
            }
        }
    }

    fn render_response(&self, response: &Response, out: &mut String) {
        let class = ResponseClass::classify(response.code, response.name());
        out.push_str(&format!(
            "#### {} Response ({})\n\n",
            class.label(),
            response.code
        ));

        let body = response.body();
        if body.is_empty() {
            return;
        }

        match serde_json::from_str::<Value>(body) {
            Ok(json) => {
                out.push_str("**Response Structure:**\n\n```json\n");
                out.push_str(&pretty_json(&json));
                out.push_str("\n```\n\n");

                let structure = infer_structure(&json);
                if !structure.is_empty() {
                    out.push_str("**Response Fields:**\n\n");
                    for (path, ty) in structure.documented_fields() {
                        out.push_str(&format!("- `{}` ({})\n", path, ty));
                    }
                    out.push('\n');
                }
            }
            Err(_) => {
                let (head, truncated) = truncate_chars(body, self.max_raw_body_chars);
                out.push_str("```\n");
                out.push_str(head);
                if truncated {
                    out.push('\n');
                    out.push_str(docs::TRUNCATION_MARKER);
                }
                out.push_str("\n```\n\n");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(item_json: &str) -> String {
        let item: Item = serde_json::from_str(item_json).unwrap();
        let policy = SynthesisPolicy::default();
        let mut out = String::new();
        EndpointRenderer::new(&policy, docs::MAX_RAW_BODY_CHARS).render(&item, &mut out);
        out
    }

    #[test]
    fn test_classification_order() {
        assert_eq!(ResponseClass::classify(200, ""), ResponseClass::Success);
        assert_eq!(ResponseClass::classify(422, "Login SUCCESS"), ResponseClass::Success);
        assert_eq!(ResponseClass::classify(201, ""), ResponseClass::Created);
        assert_eq!(
            ResponseClass::classify(422, "Invalid email"),
            ResponseClass::ValidationError
        );
        assert_eq!(
            ResponseClass::classify(401, "Unauthenticated"),
            ResponseClass::AuthenticationError
        );
        assert_eq!(ResponseClass::classify(404, ""), ResponseClass::NotFound);
        assert_eq!(ResponseClass::classify(403, ""), ResponseClass::AuthenticationError);
        assert_eq!(ResponseClass::classify(503, ""), ResponseClass::ServerError);
        assert_eq!(ResponseClass::classify(0, ""), ResponseClass::Error);
        assert_eq!(ResponseClass::classify(302, "Redirect"), ResponseClass::Error);
    }

    #[test]
    fn test_header_and_body() {
        let out = render(
            r#"{
                "name": "Register",
                "request": {
                    "method": "POST",
                    "url": {"raw": "{{base_url}}/auth/register"},
                    "description": "Create an account",
                    "body": {"mode": "raw", "raw": "{\"email\":\"a@b.c\",\"age\":30}"}
                },
                "response": [{"name": "OK", "code": 200, "body": ""}]
            }"#,
        );
        assert!(out.starts_with(
            "\n### Register\n\n**Method:** `POST`\n\n**Endpoint:** `BASE_URL/auth/register`\n\n**Description:** Create an account\n\n"
        ));
        assert!(out.contains(
            "**Request Body:**\n\n```json\n{\n  \"email\": \"a@b.c\",\n  \"age\": 30\n}\n```\n\n"
        ));
        assert!(!out.contains("**Authentication:**"));
        assert!(out.ends_with("**Responses:**\n\n#### Success Response (200)\n\n"));
    }

    #[test]
    fn test_non_json_request_body_verbatim() {
        let out = render(r#"{"request": {"body": {"mode": "raw", "raw": "a=1&b=2"}}}"#);
        assert!(out.contains("```json\na=1&b=2\n```"));
    }

    #[test]
    fn test_saved_response_fields() {
        let out = render(
            r#"{
                "name": "Profile",
                "request": {"header": [{"key": "Authorization", "value": "Bearer t"}]},
                "response": [{"code": 200, "body": "{\"type\":\"user\",\"data\":{\"tags\":[\"a\"]}}"}]
            }"#,
        );
        assert!(out.contains("**Authentication:** Required (Bearer Token)\n\n"));
        assert!(out.contains(
            "**Response Fields:**\n\n- `data` (object)\n- `data.tags` (array)\n\n"
        ));
        assert!(!out.contains("(array_item)"));
        assert!(!out.contains("- `type`"));
        // saved responses suppress synthesis
        assert!(!out.contains("Not Found Response (404)"));
    }

    #[test]
    fn test_unparseable_body_truncated() {
        let long = "x".repeat(600);
        let out = render(&format!(
            r#"{{"response": [{{"code": 500, "body": "{}"}}]}}"#,
            long
        ));
        let expected = format!("```\n{}\n... (truncated)\n```\n\n", "x".repeat(500));
        assert!(out.ends_with(&expected));

        let short = render(r#"{"response": [{"code": 404, "body": "<html>"}]}"#);
        assert!(short.ends_with("#### Not Found Response (404)\n\n```\n<html>\n```\n\n"));
    }

    #[test]
    fn test_synthesized_trailers() {
        let anonymous = render(r#"{"name": "Ping", "request": {"url": "{{base_url}}/ping"}}"#);
        assert!(anonymous.contains("#### Not Found Response (404)"));
        assert!(anonymous.contains("#### Server Error Response (500)"));
        assert!(!anonymous.contains("(401)"));

        let authed = render(
            r#"{"request": {"method": "DELETE", "header": [{"key": "Authorization"}]}}"#,
        );
        assert!(authed.contains("#### Unauthorized Response (401)"));
    }
}
