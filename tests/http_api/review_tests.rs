//! Catalog listing, filtering, and seeding over HTTP.

use crate::common::{body_json, build_test_app, get, post_json, seed, send, str_field};
use axum::http::StatusCode;
use rstest::rstest;
use serde_json::{Value, json};

fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|review| str_field(review, "id").to_owned())
        .collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_catalog_lists_nothing() {
    let app = build_test_app();

    let response = send(&app, get("/reviews", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn initialize_seeds_once() {
    let app = build_test_app();

    let first = send(&app, post_json("/initialize", None, &json!({}))).await;
    let second = send(&app, post_json("/initialize", None, &json!({}))).await;

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(
        str_field(&body_json(first).await, "message"),
        "Database initialized with sample data"
    );
    assert_eq!(second.status(), StatusCode::OK);

    let listing = body_json(send(&app, get("/reviews", None)).await).await;
    assert_eq!(ids(&listing), ["review-1", "review-2", "review-3"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn listed_reviews_use_camel_case_fields() {
    let app = build_test_app();
    seed(&app).await;

    let listing = body_json(send(&app, get("/reviews", None)).await).await;
    let first = listing
        .as_array()
        .and_then(|reviews| reviews.first())
        .expect("one review");

    for field in ["businessName", "fullDescription", "registeredDate", "verificationMethod"] {
        assert!(first.get(field).is_some(), "missing {field}");
    }
    assert_eq!(str_field(first, "status"), "available");
}

#[rstest]
#[case("/reviews?sort=reward", &["review-2", "review-3", "review-1"])]
#[case("/reviews?category=premium", &["review-2"])]
#[case("/reviews?category=all&sort=reward", &["review-2", "review-3", "review-1"])]
#[tokio::test(flavor = "multi_thread")]
async fn listing_honours_query_parameters(#[case] uri: &str, #[case] expected: &[&str]) {
    let app = build_test_app();
    seed(&app).await;

    let response = send(&app, get(uri, None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&body_json(response).await), expected);
}

#[rstest]
#[case("/reviews?category=gold")]
#[case("/reviews?sort=oldest")]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_query_values_are_rejected(#[case] uri: &str) {
    let app = build_test_app();

    let response = send(&app, get(uri, None)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
