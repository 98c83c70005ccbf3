//! Claiming, listing, and submitting tasks.

use crate::api::error::{AppError, AppResult};
use crate::api::extract::{AppJson, AuthenticatedUser};
use crate::api::state::AppState;
use crate::catalog::domain::ReviewId;
use crate::task::domain::{EarningsSummary, Submission, Task, TaskId};
use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

/// Body of `POST /accept-work`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptWorkRequest {
    /// Posting to claim.
    pub review_id: String,
}

/// Success body of `POST /accept-work`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptWorkResponse {
    /// Always `true`.
    pub success: bool,
    /// Identifier of the created task.
    pub task_id: TaskId,
}

/// `POST /accept-work`
pub async fn accept_work(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    AppJson(body): AppJson<AcceptWorkRequest>,
) -> AppResult<Json<AcceptWorkResponse>> {
    // A malformed id cannot name a stored posting.
    let review_id = ReviewId::new(body.review_id)
        .map_err(|_| AppError::NotFound("Review not found".to_owned()))?;
    let task = state.ledger.claim(&review_id, &caller.id).await?;
    Ok(Json(AcceptWorkResponse {
        success: true,
        task_id: task.id().clone(),
    }))
}

/// `GET /my-tasks`
pub async fn my_tasks(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
) -> AppResult<Json<Vec<Task>>> {
    Ok(Json(state.ledger.list_for_worker(&caller.id).await?))
}

/// `GET /my-summary`
pub async fn my_summary(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
) -> AppResult<Json<EarningsSummary>> {
    Ok(Json(state.ledger.earnings(&caller.id).await?))
}

/// Body of `POST /submit-task`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTaskRequest {
    /// Task being handed in.
    pub task_id: String,
    /// Review body.
    pub review_text: String,
    /// Links to venue photos.
    pub image_urls: Vec<String>,
    /// Links to screenshots of the published review.
    #[serde(default)]
    pub screenshot_urls: Vec<String>,
}

/// Success body of `POST /submit-task`.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    /// Always `true`.
    pub success: bool,
}

/// `POST /submit-task`
pub async fn submit_task(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    AppJson(body): AppJson<SubmitTaskRequest>,
) -> AppResult<Json<SuccessResponse>> {
    state
        .limits
        .check(&body.review_text, &body.image_urls, &body.screenshot_urls)
        .map_err(AppError::Validation)?;
    let task_id =
        TaskId::new(body.task_id).map_err(|_| AppError::NotFound("Task not found".to_owned()))?;
    let submission =
        Submission::new(body.review_text, body.image_urls).with_screenshot_urls(body.screenshot_urls);
    state.ledger.submit(&task_id, &caller.id, submission).await?;
    Ok(Json(SuccessResponse { success: true }))
}
