//! # Integration Tests for acr-api
//!
//! Drives the assembled router over an in-memory SQLite pool: schema
//! registration and lookup, pagination semantics, credential-definition
//! referential integrity, bulk clear atomic behavior, and the health probes.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use acr_api::state::{AppConfig, AppState};

/// Helper: build app state over a fresh in-memory database.
///
/// A single connection keeps the in-memory database alive and shared for the
/// lifetime of the test.
async fn test_state() -> AppState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    let config = AppConfig {
        port: 0,
        database_url: "sqlite::memory:".to_string(),
    };
    AppState::new(config, pool)
}

async fn test_app() -> axum::Router {
    acr_api::app(test_state().await)
}

/// Helper: send a request and parse the JSON response body.
async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            builder.body(Body::from(value.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn schema_input(name: &str) -> Value {
    json!({
        "name": name,
        "version": "1.0",
        "attrNames": ["name", "age"],
        "issuerId": "did:example:123",
    })
}

async fn register_schema(app: &axum::Router, name: &str) -> Value {
    let (status, body) = send(app, "POST", "/schemas", Some(schema_input(name))).await;
    assert_eq!(status, StatusCode::OK, "schema registration failed: {body}");
    body
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let app = test_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health/liveness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_probe() {
    let app = test_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health/readiness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// -- Schema Registration ------------------------------------------------------

#[tokio::test]
async fn test_register_schema_returns_urn_record() {
    let app = test_app().await;
    let body = register_schema(&app, "personal-info").await;

    let id = body["id"].as_str().unwrap();
    assert!(id.starts_with("urn:"), "id should be urn-shaped: {id}");
    assert_eq!(body["name"], "personal-info");
    assert_eq!(body["version"], "1.0");
    assert_eq!(body["attributes"], json!(["name", "age"]));
    assert_eq!(body["issuerId"], "did:example:123");
    assert!(body["createdAt"].is_string());
    assert_eq!(body["createdAt"], body["updatedAt"]);
}

#[tokio::test]
async fn test_schema_roundtrip_field_for_field() {
    let app = test_app().await;
    let created = register_schema(&app, "roundtrip").await;

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/schemas/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_unknown_schema_returns_null() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/schemas/urn:does-not-exist", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_reregistering_identical_content_creates_new_record() {
    let app = test_app().await;
    let first = register_schema(&app, "repeat").await;
    // Identifier derivation is millisecond-resolution; step past the tick.
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = register_schema(&app, "repeat").await;
    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn test_schema_validation_failures() {
    let app = test_app().await;
    let cases = vec![
        json!({"name": "", "version": "1.0", "attrNames": ["a"], "issuerId": "did:example:123"}),
        json!({"name": "x", "version": "  ", "attrNames": ["a"], "issuerId": "did:example:123"}),
        json!({"name": "x", "version": "1.0", "attrNames": [], "issuerId": "did:example:123"}),
        json!({"name": "x", "version": "1.0", "attrNames": ["a", ""], "issuerId": "did:example:123"}),
        json!({"name": "x", "version": "1.0", "attrNames": ["a", "a"], "issuerId": "did:example:123"}),
        json!({"name": "x", "version": "1.0", "attrNames": ["a"], "issuerId": ""}),
    ];
    for input in cases {
        let (status, body) = send(&app, "POST", "/schemas", Some(input.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "should reject {input}");
        assert!(body["error"].is_string(), "error body expected: {body}");
    }
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let app = test_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/schemas")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// -- Schema Listing -----------------------------------------------------------

#[tokio::test]
async fn test_list_defaults_to_ten_in_insertion_order() {
    let app = test_app().await;
    for i in 0..15 {
        register_schema(&app, &format!("schema-{i:02}")).await;
    }

    let (status, body) = send(&app, "GET", "/schemas", None).await;
    assert_eq!(status, StatusCode::OK);
    let page = body.as_array().unwrap();
    assert_eq!(page.len(), 10);
    for (i, record) in page.iter().enumerate() {
        assert_eq!(record["name"], format!("schema-{i:02}"));
    }
}

#[tokio::test]
async fn test_list_pages_are_disjoint_and_complete() {
    let app = test_app().await;
    for i in 0..15 {
        register_schema(&app, &format!("schema-{i:02}")).await;
    }

    let (_, first) = send(&app, "GET", "/schemas?page=0&take=10", None).await;
    let (_, second) = send(&app, "GET", "/schemas?page=1&take=10", None).await;
    let first = first.as_array().unwrap();
    let second = second.as_array().unwrap();
    assert_eq!(first.len(), 10);
    assert_eq!(second.len(), 5);

    let mut ids: Vec<&str> = first
        .iter()
        .chain(second.iter())
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total, "pages must be disjoint");
}

#[tokio::test]
async fn test_list_skip_is_page_times_take() {
    let app = test_app().await;
    for i in 0..12 {
        register_schema(&app, &format!("schema-{i:02}")).await;
    }

    let (status, body) = send(&app, "GET", "/schemas?page=2&take=5", None).await;
    assert_eq!(status, StatusCode::OK);
    let page = body.as_array().unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0]["name"], "schema-10");
    assert_eq!(page[1]["name"], "schema-11");
}

#[tokio::test]
async fn test_extreme_pagination_returns_empty_page() {
    let app = test_app().await;
    register_schema(&app, "only-one").await;

    // page * take exceeds i64; the offset saturates and the page is empty.
    let (status, body) = send(
        &app,
        "GET",
        "/schemas?page=4294967295&take=4294967295",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_non_numeric_pagination_rejected() {
    let app = test_app().await;
    for uri in ["/schemas?page=abc", "/schemas?take=NaN", "/schemas?page=-1"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "should reject {uri}");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_same_millisecond_duplicate_is_validation_error() {
    use acr_api::error::AppError;
    use acr_core::NewSchema;

    let state = test_state().await;
    let record = NewSchema {
        name: "collision".to_string(),
        version: "1.0".to_string(),
        attr_names: vec!["a".to_string()],
        issuer_id: "did:example:123".to_string(),
    }
    .into_record(acr_core::registration_instant())
    .unwrap();

    acr_api::db::schemas::insert(&state.pool, &record).await.unwrap();

    // Same record, same derived id: the primary-key uniqueness violation
    // surfaces as a validation failure, never an overwrite.
    let err = acr_api::db::schemas::insert(&state.pool, &record)
        .await
        .unwrap_err();
    match AppError::from(err) {
        AppError::Validation(msg) => assert!(msg.contains("collision"), "got: {msg}"),
        other => panic!("expected validation error, got {other}"),
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM anoncreds_schemas")
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_eq!(count, 1, "the original record must survive untouched");
}

// -- Credential Definitions ---------------------------------------------------

fn cred_def_input(schema_id: &str) -> Value {
    json!({
        "schemaId": schema_id,
        "tag": "test",
        "issuerId": "did:example:123",
        "type": "CL",
        "value": {"primary": {"n": "0x1", "s": "0x2"}},
    })
}

#[tokio::test]
async fn test_register_credential_definition_embeds_schema() {
    let app = test_app().await;
    let schema = register_schema(&app, "personal-info").await;
    let schema_id = schema["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/credentialDefinition",
        Some(cred_def_input(schema_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration failed: {body}");
    assert!(body["id"].as_str().unwrap().starts_with("urn:"));
    assert_eq!(body["schema"], schema);
    assert_eq!(body["tag"], "test");
    assert_eq!(body["type"], "CL");
    // Key material is returned verbatim.
    assert_eq!(body["value"], json!({"primary": {"n": "0x1", "s": "0x2"}}));
}

#[tokio::test]
async fn test_credential_definition_roundtrip() {
    let app = test_app().await;
    let schema = register_schema(&app, "roundtrip").await;
    let (_, created) = send(
        &app,
        "POST",
        "/credentialDefinition",
        Some(cred_def_input(schema["id"].as_str().unwrap())),
    )
    .await;

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/credentialDefinition/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_unknown_credential_definition_returns_null() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/credentialDefinition/urn:missing", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_unknown_schema_rejected_and_persists_nothing() {
    let state = test_state().await;
    let pool = state.pool.clone();
    let app = acr_api::app(state);

    let (status, body) = send(
        &app,
        "POST",
        "/credentialDefinition",
        Some(cred_def_input("urn:does-not-exist")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Schema not found"}));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM anoncreds_credential_definitions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0, "failed registration must persist nothing");
}

#[tokio::test]
async fn test_credential_definition_validation_failures() {
    let app = test_app().await;
    let schema = register_schema(&app, "validation").await;
    let schema_id = schema["id"].as_str().unwrap();

    let mut empty_tag = cred_def_input(schema_id);
    empty_tag["tag"] = json!("");
    let mut empty_type = cred_def_input(schema_id);
    empty_type["type"] = json!("  ");
    // A schemaId without the urn scheme marker is rejected at deserialization.
    let mut bare_id = cred_def_input(schema_id);
    bare_id["schemaId"] = json!("not-a-urn");

    for input in [empty_tag, empty_type, bare_id] {
        let (status, body) = send(&app, "POST", "/credentialDefinition", Some(input)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "got: {body}");
    }
}

// -- Bulk Clear ---------------------------------------------------------------

#[tokio::test]
async fn test_clear_removes_both_stores() {
    let app = test_app().await;
    let schema = register_schema(&app, "to-clear").await;
    let schema_id = schema["id"].as_str().unwrap().to_string();
    let (_, cred_def) = send(
        &app,
        "POST",
        "/credentialDefinition",
        Some(cred_def_input(&schema_id)),
    )
    .await;
    let cred_def_id = cred_def["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "DELETE", "/all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (_, schema_after) = send(&app, "GET", &format!("/schemas/{schema_id}"), None).await;
    assert_eq!(schema_after, Value::Null);
    let (_, cred_def_after) = send(
        &app,
        "GET",
        &format!("/credentialDefinition/{cred_def_id}"),
        None,
    )
    .await;
    assert_eq!(cred_def_after, Value::Null);

    let (_, listing) = send(&app, "GET", "/schemas", None).await;
    assert_eq!(listing, json!([]));
}

#[tokio::test]
async fn test_clear_on_empty_registry_succeeds() {
    let app = test_app().await;
    let (status, body) = send(&app, "DELETE", "/all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));
}

// -- Full Scenario ------------------------------------------------------------

#[tokio::test]
async fn test_issuer_registration_scenario() {
    let app = test_app().await;

    // Register the schema the issuer commits to.
    let (status, schema) = send(
        &app,
        "POST",
        "/schemas",
        Some(json!({
            "name": "personal-info",
            "version": "1.0",
            "attrNames": ["name", "age"],
            "issuerId": "did:example:123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(schema["id"].as_str().unwrap().starts_with("urn:"));
    assert_eq!(schema["attributes"], json!(["name", "age"]));
    assert_eq!(schema["issuerId"], "did:example:123");

    // Bind key material to it.
    let (status, cred_def) = send(
        &app,
        "POST",
        "/credentialDefinition",
        Some(json!({
            "schemaId": schema["id"],
            "tag": "test",
            "issuerId": "did:example:123",
            "type": "CL",
            "value": {"primary": {}, "revocation": null},
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(cred_def["id"].as_str().unwrap().starts_with("urn:"));
    assert_eq!(cred_def["schema"]["id"], schema["id"]);

    // Registration against a never-registered schema fails with the
    // structured error, as the resolver contract requires.
    let (status, body) = send(
        &app,
        "POST",
        "/credentialDefinition",
        Some(json!({
            "schemaId": "urn:does-not-exist",
            "tag": "test",
            "issuerId": "did:example:123",
            "type": "CL",
            "value": {},
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Schema not found"}));
}

// -- OpenAPI ------------------------------------------------------------------

#[tokio::test]
async fn test_openapi_spec_served() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/schemas"].is_object());
    assert!(body["paths"]["/credentialDefinition/{id}"].is_object());
}
