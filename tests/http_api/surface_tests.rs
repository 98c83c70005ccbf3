//! Cross-cutting behaviour of the router: health, fallback, and middleware.

use crate::common::{body_json, build_test_app, get, send, str_field};
use axum::body::Body;
use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};
use axum::http::{Method, Request, StatusCode};

#[tokio::test(flavor = "multi_thread")]
async fn health_reports_ok() {
    let app = build_test_app();

    let response = send(&app, get("/health", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(str_field(&body, "status"), "ok");
    assert!(!str_field(&body, "timestamp").is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_route_is_a_json_not_found() {
    let app = build_test_app();

    let response = send(&app, get("/nowhere", None)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(str_field(&body, "error"), "Endpoint not found");
    assert_eq!(str_field(&body, "code"), "NOT_FOUND");
}

#[tokio::test(flavor = "multi_thread")]
async fn responses_carry_a_request_id() {
    let app = build_test_app();

    let generated = send(&app, get("/health", None)).await;
    let echoed = send(
        &app,
        Request::builder()
            .uri("/health")
            .header("x-request-id", "req-42")
            .body(Body::empty())
            .expect("request builds"),
    )
    .await;

    assert!(generated.headers().contains_key("x-request-id"));
    assert_eq!(
        echoed.headers().get("x-request-id").and_then(|value| value.to_str().ok()),
        Some("req-42")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn preflight_allows_any_origin_by_default() {
    let app = build_test_app();

    let response = send(
        &app,
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/reviews")
            .header(ORIGIN, "https://app.example.com")
            .header("access-control-request-method", "GET")
            .body(Body::empty())
            .expect("request builds"),
    )
    .await;

    assert!(response.status().is_success(), "{}", response.status());
    assert_eq!(
        response
            .headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}
