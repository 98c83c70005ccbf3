//! Sign-up, sign-in, and bearer authentication over HTTP.

use crate::common::{body_json, build_test_app, get, post_json, send, sign_up_and_in, str_field};
use axum::http::StatusCode;
use rstest::rstest;
use serde_json::json;

#[tokio::test(flavor = "multi_thread")]
async fn signup_returns_the_created_user() {
    let app = build_test_app();

    let response = send(
        &app,
        post_json(
            "/signup",
            None,
            &json!({ "email": "Kim@Example.com", "password": "correct-horse", "name": "Kim" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let user = body.get("user").expect("user object");
    assert_eq!(str_field(user, "email"), "kim@example.com");
    assert_eq!(str_field(user, "name"), "Kim");
    assert!(!str_field(user, "id").is_empty());
}

#[rstest]
#[case(json!({ "email": "not-an-email", "password": "correct-horse", "name": "Kim" }))]
#[case(json!({ "email": "kim@example.com", "password": "short", "name": "Kim" }))]
#[case(json!({ "email": "kim@example.com", "password": "correct-horse", "name": "  " }))]
#[case(json!({ "email": "kim@example.com" }))]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_signup_is_a_validation_error(#[case] body: serde_json::Value) {
    let app = build_test_app();

    let response = send(&app, post_json("/signup", None, &body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(str_field(&error, "code"), "VALIDATION_ERROR");
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_is_rejected() {
    let app = build_test_app();
    sign_up_and_in(&app, "kim@example.com", "Kim").await;

    let response = send(
        &app,
        post_json(
            "/signup",
            None,
            &json!({ "email": "kim@example.com", "password": "another-one", "name": "Kim 2" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn wrong_password_is_unauthorized() {
    let app = build_test_app();
    sign_up_and_in(&app, "kim@example.com", "Kim").await;

    let response = send(
        &app,
        post_json(
            "/signin",
            None,
            &json!({ "email": "kim@example.com", "password": "wrong-horse" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case(None)]
#[case(Some("garbage"))]
#[case(Some(""))]
#[tokio::test(flavor = "multi_thread")]
async fn protected_routes_fail_closed(#[case] token: Option<&str>) {
    let app = build_test_app();

    let response = send(&app, get("/my-tasks", token)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(str_field(&body, "error"), "Unauthorized");
}

#[tokio::test(flavor = "multi_thread")]
async fn issued_token_authenticates_requests() {
    let app = build_test_app();
    let (token, _) = sign_up_and_in(&app, "kim@example.com", "Kim").await;

    let response = send(&app, get("/my-tasks", Some(&token))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}
