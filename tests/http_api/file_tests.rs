//! Uploads and signed downloads over HTTP.

use crate::common::{
    BASE_URL, body_bytes, body_json, build_test_app, get, send, sign_up_and_in, str_field,
    upload_request,
};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use rstest::rstest;

/// Strips the public base URL so the link can be replayed against the router.
fn local_path(url: &str) -> &str {
    url.strip_prefix(BASE_URL).expect("link uses the public base URL")
}

#[tokio::test(flavor = "multi_thread")]
async fn uploaded_file_is_served_through_its_signed_link() {
    let app = build_test_app();
    let (token, user_id) = sign_up_and_in(&app, "worker9@example.com", "Worker Nine").await;

    let response = send(
        &app,
        upload_request(&token, Some(("receipt.png", b"png-bytes")), Some("screenshot")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let stored = body_json(response).await;
    let path = str_field(&stored, "path");
    assert!(path.starts_with(&format!("{user_id}/")), "{path}");
    assert!(path.ends_with("-receipt.png"), "{path}");
    let url = str_field(&stored, "url");
    assert!(url.starts_with(&format!("{BASE_URL}/files/screenshots/")), "{url}");

    let download = send(&app, get(local_path(url), None)).await;

    assert_eq!(download.status(), StatusCode::OK);
    assert_eq!(
        download.headers().get(CONTENT_TYPE).and_then(|value| value.to_str().ok()),
        Some("image/png")
    );
    assert_eq!(body_bytes(download).await, b"png-bytes");
}

#[tokio::test(flavor = "multi_thread")]
async fn upload_defaults_to_the_image_bucket() {
    let app = build_test_app();
    let (token, _) = sign_up_and_in(&app, "worker9@example.com", "Worker Nine").await;

    let response = send(&app, upload_request(&token, Some(("a.jpg", b"jpg")), None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let stored = body_json(response).await;
    assert!(str_field(&stored, "url").starts_with(&format!("{BASE_URL}/files/images/")));
}

#[tokio::test(flavor = "multi_thread")]
async fn tampered_link_is_forbidden() {
    let app = build_test_app();
    let (token, _) = sign_up_and_in(&app, "worker9@example.com", "Worker Nine").await;
    let stored = body_json(
        send(&app, upload_request(&token, Some(("a.png", b"png")), None)).await,
    )
    .await;
    let url = local_path(str_field(&stored, "url"));
    let (resource, _) = url.split_once("&signature=").expect("signed link");

    let forged = send(&app, get(&format!("{resource}&signature=AAAA"), None)).await;
    let unsigned = send(
        &app,
        get(url.split_once('?').map_or(url, |(path, _)| path), None),
    )
    .await;

    assert_eq!(forged.status(), StatusCode::FORBIDDEN);
    assert_eq!(unsigned.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[case(None, Some("image"))]
#[case(Some(("a.png", &b"png"[..])), Some("video"))]
#[case(Some(("empty.png", &b""[..])), None)]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_uploads_are_rejected(
    #[case] file: Option<(&str, &[u8])>,
    #[case] category: Option<&str>,
) {
    let app = build_test_app();
    let (token, _) = sign_up_and_in(&app, "worker9@example.com", "Worker Nine").await;

    let response = send(&app, upload_request(&token, file, category)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn oversized_upload_is_rejected() {
    let app = build_test_app();
    let (token, _) = sign_up_and_in(&app, "worker9@example.com", "Worker Nine").await;
    let large = vec![7_u8; 4096];

    let response = send(&app, upload_request(&token, Some(("big.png", &large)), None)).await;

    assert!(response.status().is_client_error(), "{}", response.status());
}

#[tokio::test(flavor = "multi_thread")]
async fn upload_requires_authentication() {
    let app = build_test_app();

    let response = send(&app, upload_request("garbage", Some(("a.png", b"png")), None)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
