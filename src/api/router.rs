//! Route table and middleware stack.
//!
//! [`build_router`] is shared by the server binary and the HTTP tests so
//! both exercise the same layers.

use super::config::{AppConfig, CorsOrigins};
use super::error::AppError;
use super::handlers::{accounts, files, health, not_found, reviews, tasks};
use super::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Builds the application router with every middleware layer.
///
/// Layers, outermost first: CORS, request id assignment, request tracing,
/// request id propagation, timeout, panic recovery.
pub fn build_router(state: AppState, config: &AppConfig) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/health", get(health::health))
        .route("/reviews", get(reviews::list_reviews))
        .route("/initialize", post(reviews::initialize))
        .route("/accept-work", post(tasks::accept_work))
        .route("/my-tasks", get(tasks::my_tasks))
        .route("/my-summary", get(tasks::my_summary))
        .route("/submit-task", post(tasks::submit_task))
        .route(
            "/upload",
            post(files::upload).layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
        .route("/files/{bucket}/{*path}", get(files::download))
        .route("/signup", post(accounts::signup))
        .route("/signin", post(accounts::signin))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(
            |payload: Box<dyn Any + Send + 'static>| {
                let detail = payload
                    .downcast_ref::<String>()
                    .map(String::as_str)
                    .or_else(|| payload.downcast_ref::<&str>().copied())
                    .unwrap_or("unknown panic");
                AppError::Upstream(format!("handler panicked: {detail}")).into_response()
            },
        ))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(build_cors_layer(&config.cors_origins))
        .with_state(state)
}

/// Builds the CORS layer for the configured origins.
#[must_use]
pub fn build_cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);
    match origins {
        CorsOrigins::Any => layer.allow_origin(AnyOrigin),
        CorsOrigins::List(list) => layer.allow_origin(list.clone()),
    }
}
