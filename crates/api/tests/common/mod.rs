//! Shared helpers for the HTTP integration tests.
//!
//! The app is built with the production router over a `MemoryStore`, so these
//! tests exercise the full middleware stack without a database.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::Algorithm;
use serde_json::{json, Value};
use tower::ServiceExt;

use voltguard_api::auth::jwt::JwtConfig;
use voltguard_api::config::ServerConfig;
use voltguard_api::router::build_app_router;
use voltguard_api::state::AppState;
use voltguard_db::store::MemoryStore;

pub const CORS_ORIGIN: &str = "http://localhost:3000";
pub const PASSWORD: &str = "secret123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![CORS_ORIGIN.to_string()],
        request_timeout_secs: 30,
        database_url: "postgres://unused".to_string(),
        database_max_connections: 1,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            algorithm: Algorithm::HS256,
            expiration_hours: 24,
        },
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// The store handle is returned so tests can seed rows or simulate outages.
pub fn build_test_app() -> (Router, Arc<MemoryStore>) {
    let config = test_config();
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), config.clone());
    let app = build_app_router(state, &config).expect("test config must be valid");
    (app, store)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn put_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Domain helpers
// ---------------------------------------------------------------------------

/// A signed-up account: its token and id.
pub struct Account {
    pub token: String,
    pub id: i64,
}

/// Sign up through the API and return the issued token and user id.
pub async fn signup(app: &Router, email: &str, role: &str) -> Account {
    let body = json!({
        "email": email,
        "password": PASSWORD,
        "full_name": format!("Test {role}"),
        "role": role,
    });
    let response = post_json(app, "/api/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    Account {
        token: json["access_token"].as_str().unwrap().to_string(),
        id: json["user"]["id"].as_i64().unwrap(),
    }
}

/// Report a fault as `consumer` and return its id.
pub async fn create_fault_request(app: &Router, consumer: &Account, title: &str) -> i64 {
    let body = json!({
        "title": title,
        "description": "The street transformer is sparking loudly",
        "location": "Block 4",
    });
    let response =
        post_json_auth(app, "/api/consumer/fault-request/create", &consumer.token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
