//! End-to-end runs of the three pipelines on a fixture collection.

use std::fs;

use postscribe::collection::{self, Catalog, Scaffolder};
use postscribe::verification::{Preset, StatusPatcher, VerificationLogGenerator};
use postscribe::{DocGenerator, ScribeError};
use tempfile::TempDir;

const COLLECTION: &str = r#"{
  "info": {"name": "Fixture API", "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"},
  "variable": [{"key": "base_url", "value": "http://localhost:9000/api"}],
  "item": [
    {
      "name": "Authentication",
      "item": [
        {
          "name": "Register",
          "request": {
            "method": "POST",
            "header": [{"key": "Accept", "value": "application/json"}],
            "url": {"raw": "{{base_url}}/auth/register", "path": ["auth", "register"]},
            "body": {"mode": "raw", "raw": "{\"email\": \"user@example.com\"}"}
          }
        },
        {
          "name": "Logout",
          "request": {
            "method": "POST",
            "header": [{"key": "Authorization", "value": "Bearer {{auth_token}}"}],
            "url": {"raw": "{{base_url}}/auth/logout", "path": ["auth", "logout"]}
          },
          "response": [
            {"name": "Logged out", "code": 200, "body": "{\"status\": true, \"message\": \"Bye\"}"}
          ]
        }
      ]
    },
    {
      "name": "Payments",
      "item": [
        {
          "name": "Stripe Webhook",
          "request": {
            "method": "POST",
            "url": {"raw": "{{base_url}}/stripe/webhook", "path": ["stripe", "webhook"]}
          }
        }
      ]
    }
  ]
}"#;

fn write_fixture(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("collection.json");
    fs::write(&path, COLLECTION).unwrap();
    path
}

#[test]
fn docs_pipeline_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let collection = collection::load(&write_fixture(&dir)).unwrap();
    let generator = DocGenerator::default();

    let first = dir.path().join("first.md");
    let second = dir.path().join("second.md");
    let report = generator.write(&collection, &first).unwrap();
    generator.write(&collection, &second).unwrap();

    assert_eq!(report.endpoints, 3);
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());

    let md = fs::read_to_string(&first).unwrap();
    assert!(md.starts_with("# Fixture API - Complete Methods Documentation"));
    assert!(md.contains("**Base URL:** `http://localhost:9000/api`"));
    // saved response for Logout, synthesized ones for the rest
    assert!(md.contains("#### Success Response (200)\n\n**Response Structure:**"));
    assert_eq!(md.matches("#### Not Found Response (404)").count(), 2);
    assert_eq!(md.matches("#### Server Error Response (500)").count(), 2);
    assert!(!md.contains("Unauthorized Response (401)"));
}

#[test]
fn log_then_patch() {
    let dir = TempDir::new().unwrap();
    let collection = collection::load(&write_fixture(&dir)).unwrap();
    let log_path = dir.path().join("log.md");

    let report = VerificationLogGenerator::new(None)
        .write(&collection, &log_path)
        .unwrap();
    assert_eq!(report.endpoints, 3);

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("### POST /auth/register 🔓\n"));
    assert!(log.contains("### POST /auth/logout 🔒\n"));
    assert!(log.contains("- **Total Endpoints:** 3\n"));

    let auth = StatusPatcher::from_preset(Preset::Auth)
        .patch_file(&log_path)
        .unwrap();
    assert_eq!(auth.applied, vec!["POST /auth/register", "POST /auth/logout"]);

    let webhooks = StatusPatcher::from_preset(Preset::Webhooks)
        .patch_file(&log_path)
        .unwrap();
    assert_eq!(webhooks.applied, vec!["POST /stripe/webhook"]);
    assert_eq!(webhooks.counts.verified, 2);
    assert_eq!(webhooks.counts.not_used, 1);

    let patched = fs::read_to_string(&log_path).unwrap();
    let register = patched.find("### POST /auth/register").unwrap();
    assert!(patched[register..].contains("**Status:** ✅ Verified\n\n**Implementation:**"));
    assert!(patched.contains("- ✅ **Verified:** 2\n- ❌ **Not Used:** 1\n"));
    assert!(patched.contains("- 📝 **Review Needed:** 0\n"));
    assert!(patched.ends_with("**Progress:** 2/3 (66%)\n"));
}

#[test]
fn single_ping_endpoint_log() {
    let collection = collection::Collection::from_json(
        r#"{"item": [{"name": "Health", "item": [
            {"name": "Ping", "request": {"method": "GET", "url": {"raw": "{{base_url}}/ping", "path": ["ping"]}}}
        ]}]}"#,
    )
    .unwrap();
    let md = VerificationLogGenerator::new(None)
        .generate(&collection, chrono::Local::now().naive_local())
        .markdown;

    assert_eq!(md.matches("### GET /ping 🔓").count(), 1);
    let summary = &md[md.find("## Summary").unwrap()..];
    assert!(summary.contains("**Total Endpoints:** 1"));
}

#[test]
fn missing_inputs_are_reported() {
    let dir = TempDir::new().unwrap();
    let err = collection::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ScribeError::CollectionNotFound { .. }));

    let err = StatusPatcher::from_preset(Preset::Webhooks)
        .patch_file(&dir.path().join("absent.md"))
        .unwrap_err();
    assert!(err.is_missing_input());
}

#[test]
fn scaffolded_collection_feeds_generators() {
    let dir = TempDir::new().unwrap();
    let catalog_path = dir.path().join("catalog.toml");
    fs::write(
        &catalog_path,
        r#"
name = "Scaffolded"
description = "Generated fixture"
base_url = "https://api.example.test"

[[category]]
name = "Users"

[[category.endpoint]]
name = "Show User"
method = "GET"
path = "/users/{id}"

[[category.endpoint]]
name = "Public Feed"
method = "GET"
path = "/feed?page=1"
auth = false
"#,
    )
    .unwrap();

    let catalog = Catalog::load(&catalog_path).unwrap();
    let output = dir.path().join("out/collection.json");
    let written = Scaffolder::new(chrono::Local::now().naive_local())
        .write(&catalog, &output)
        .unwrap();
    assert_eq!(written, 2);

    let collection = collection::load(&output).unwrap();
    let log = VerificationLogGenerator::new(None)
        .generate(&collection, chrono::Local::now().naive_local())
        .markdown;
    // collection-level bearer auth marks every endpoint as authenticated
    assert!(log.contains("### GET /users/:id 🔒"));
    assert!(log.contains("### GET /feed 🔒"));

    let docs = DocGenerator::default().generate(&collection).markdown;
    assert!(docs.contains("**Endpoint:** `BASE_URL/users/{id}`"));
    assert!(docs.contains("#### Unauthorized Response (401)"));
}
