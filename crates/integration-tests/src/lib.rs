//! Integration test harness for Stride.
//!
//! Spins up two in-process servers per test:
//!
//! 1. A mock of the CMS object store, serving a fixture catalog with
//!    the same query semantics the real API has (JSON predicates over
//!    `type`, `slug`, and `metadata.*` paths, select-dropdowns matched
//!    by key, and a 404 when nothing matches - which the storefront
//!    must normalize to an empty result).
//! 2. The real storefront router, configured to point at the mock.
//!
//! Tests then drive the storefront over HTTP with a cookie-carrying
//! `reqwest` client, exactly as a browser would.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use reqwest::Client;
use secrecy::SecretString;
use serde_json::{Value, json};

use stride_storefront::config::{CosmicConfig, StorefrontConfig};
use stride_storefront::state::AppState;

pub mod fixtures;

/// One storefront instance wired to a mock CMS, plus a browser-like
/// HTTP client.
pub struct TestContext {
    pub base_url: String,
    pub client: Client,
}

impl TestContext {
    /// Start a storefront backed by the standard fixture catalog.
    pub async fn new() -> Self {
        Self::with_catalog(fixtures::catalog()).await
    }

    /// Start a storefront backed by a custom catalog.
    pub async fn with_catalog(objects: Vec<Value>) -> Self {
        let cms_url = spawn_mock_cms(objects).await;
        Self::against_cms(&cms_url).await
    }

    /// Start a storefront whose CMS fails every request with a 500.
    pub async fn with_failing_cms() -> Self {
        let cms_url = spawn_failing_cms().await;
        Self::against_cms(&cms_url).await
    }

    async fn against_cms(cms_url: &str) -> Self {
        let state = AppState::new(test_config(cms_url));
        let base_url = spawn(stride_storefront::app(state)).await;

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }

    /// Absolute URL for a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Storefront configuration pointing at a mock CMS.
#[must_use]
pub fn test_config(cms_url: &str) -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().expect("host"),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        cosmic: CosmicConfig {
            api_url: cms_url.trim_end_matches('/').to_string(),
            bucket_slug: "stride-test".to_string(),
            read_key: SecretString::from("k3J9xQ2mP8vL5nR7tB4wZ6cD1fH0sA9e"),
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Serve a router on an ephemeral port, returning its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server error");
    });

    format!("http://{addr}")
}

// =============================================================================
// Mock CMS
// =============================================================================

/// Start a mock CMS serving the given objects.
pub async fn spawn_mock_cms(objects: Vec<Value>) -> String {
    let app = Router::new()
        .route("/buckets/{bucket}/objects", get(list_objects))
        .with_state(Arc::new(objects));
    spawn(app).await
}

/// Start a mock CMS that fails every request.
pub async fn spawn_failing_cms() -> String {
    let app = Router::new().route(
        "/buckets/{bucket}/objects",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "upstream unavailable" })),
            )
        }),
    );
    spawn(app).await
}

async fn list_objects(
    State(objects): State<Arc<Vec<Value>>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let predicate: Value = params
        .get("query")
        .and_then(|q| serde_json::from_str(q).ok())
        .unwrap_or_else(|| json!({}));

    let matched: Vec<Value> = objects
        .iter()
        .filter(|object| matches_predicate(object, &predicate))
        .cloned()
        .collect();

    // The real API answers an empty result set with a 404.
    if matched.is_empty() {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No objects found" })),
        )
            .into_response();
    }

    Json(json!({ "objects": matched, "total": matched.len() })).into_response()
}

/// Match an object against a JSON query predicate.
///
/// Keys are dot-paths into the object; select-dropdown values compare
/// against their `key` field, mirroring the real query semantics.
fn matches_predicate(object: &Value, predicate: &Value) -> bool {
    let Some(conditions) = predicate.as_object() else {
        return true;
    };

    conditions.iter().all(|(path, expected)| {
        match lookup_path(object, path) {
            Some(actual) if actual == expected => true,
            Some(actual) => actual.get("key").is_some_and(|key| key == expected),
            None => false,
        }
    })
}

fn lookup_path<'a>(object: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = object;
    for part in path.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}
