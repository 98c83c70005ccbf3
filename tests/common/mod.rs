//! Shared helpers for HTTP integration tests.
//!
//! [`build_test_app`] wires the production router over in-memory adapters
//! so tests exercise the same middleware stack the server uses.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use http_body_util::BodyExt;
use mockable::DefaultClock;
use reviewhub::api::{AppConfig, AppState, build_router};
use reviewhub::identity::adapters::{LocalIdentityProvider, TokenSettings};
use reviewhub::media::adapters::InMemoryObjectStore;
use reviewhub::media::services::UrlSigner;
use reviewhub::storage::adapters::memory::InMemoryKeyValueStore;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Base URL embedded in signed links.
pub const BASE_URL: &str = "http://localhost:8000";

/// Multipart boundary used by [`upload_request`].
const BOUNDARY: &str = "reviewhub-test-boundary";

/// Builds a configuration with test secrets and defaults elsewhere.
pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|name| match name {
        "JWT_SECRET" => Some("test-jwt-secret".to_owned()),
        "PUBLIC_BASE_URL" => Some(BASE_URL.to_owned()),
        "MAX_UPLOAD_BYTES" => Some("1024".to_owned()),
        _ => None,
    })
    .expect("test config is valid")
}

/// Builds the full router over fresh in-memory adapters.
pub fn build_test_app() -> Router {
    let config = test_config();
    let clock = Arc::new(DefaultClock);
    let identity = Arc::new(LocalIdentityProvider::new(
        TokenSettings::new(config.jwt_secret.clone(), config.jwt_expiry),
        clock,
    ));
    let signer = UrlSigner::new(
        config.media_signing_secret.as_bytes(),
        config.public_base_url.clone(),
        config.media_url_ttl,
    )
    .expect("signer builds");
    let state = AppState::new(
        Arc::new(InMemoryKeyValueStore::new()),
        Arc::new(InMemoryObjectStore::new()),
        identity,
        signer,
        config.limits,
    );
    build_router(state, &config)
}

/// Sends one request through a clone of `app`.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("router is infallible")
}

/// Builds a GET request, optionally authenticated.
pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request builds")
}

/// Builds a JSON POST request, optionally authenticated.
pub fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

/// Builds a multipart upload with an optional `type` field.
pub fn upload_request(
    token: &str,
    file: Option<(&str, &[u8])>,
    category: Option<&str>,
) -> Request<Body> {
    let mut body = Vec::new();
    if let Some(value) = category {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"type\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/upload")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .expect("request builds")
}

/// Reads a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes()
        .to_vec()
}

/// Reads a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("body is JSON")
}

/// Returns the string at `field` in a JSON object.
pub fn str_field<'a>(value: &'a Value, field: &str) -> &'a str {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("missing string field {field} in {value}"))
}

/// Registers an account, signs in, and returns `(access token, user id)`.
pub async fn sign_up_and_in(app: &Router, email: &str, name: &str) -> (String, String) {
    let signup = send(
        app,
        post_json(
            "/signup",
            None,
            &json!({ "email": email, "password": "correct-horse", "name": name }),
        ),
    )
    .await;
    assert_eq!(signup.status(), StatusCode::OK);

    let signin = send(
        app,
        post_json(
            "/signin",
            None,
            &json!({ "email": email, "password": "correct-horse" }),
        ),
    )
    .await;
    assert_eq!(signin.status(), StatusCode::OK);
    let body = body_json(signin).await;
    let token = str_field(&body, "accessToken").to_owned();
    let user_id = body
        .get("user")
        .map(|user| str_field(user, "id").to_owned())
        .expect("user in sign-in response");
    (token, user_id)
}

/// Seeds the sample postings.
pub async fn seed(app: &Router) {
    let response = send(app, post_json("/initialize", None, &json!({}))).await;
    assert_eq!(response.status(), StatusCode::OK);
}
