//! Multipart uploads and signed downloads.

use crate::api::error::{AppError, AppResult};
use crate::api::extract::AuthenticatedUser;
use crate::api::state::AppState;
use crate::media::domain::UploadCategory;
use crate::media::services::StoredObject;
use axum::Json;
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use serde::Deserialize;

const FILE_FIELD: &str = "file";
const TYPE_FIELD: &str = "type";

fn malformed(err: &MultipartError) -> AppError {
    AppError::Validation(err.body_text())
}

/// `POST /upload` (multipart: `file`, optional `type`)
pub async fn upload(
    State(state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    form: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<StoredObject>> {
    let mut multipart =
        form.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let mut file = None;
    let mut category_field = None;
    while let Some(field) = multipart.next_field().await.map_err(|err| malformed(&err))? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field.bytes().await.map_err(|err| malformed(&err))?;
                file = Some((file_name, bytes));
            }
            Some(TYPE_FIELD) => {
                category_field = Some(field.text().await.map_err(|err| malformed(&err))?);
            }
            _ => {}
        }
    }

    let (file_name, bytes) =
        file.ok_or_else(|| AppError::Validation("No file provided".to_owned()))?;
    let category = category_field
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(UploadCategory::try_from)
        .transpose()
        .map_err(|err| AppError::Validation(err.to_string()))?
        .unwrap_or_default();

    let stored = state
        .media
        .upload(category, &caller.id, &file_name, bytes.to_vec())
        .await?;
    Ok(Json(stored))
}

/// Query string of a signed download link.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadParams {
    /// Expiry as Unix seconds.
    pub expires: i64,
    /// Link signature.
    pub signature: String,
}

/// `GET /files/{bucket}/{*path}`
pub async fn download(
    State(state): State<AppState>,
    Path((bucket, path)): Path<(String, String)>,
    query: Result<Query<DownloadParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) =
        query.map_err(|_| AppError::Forbidden("download link is not signed".to_owned()))?;
    let bytes = state
        .media
        .open(&bucket, &path, params.expires, &params.signature)
        .await?;
    Ok(([(CONTENT_TYPE, content_type_for(&path))], bytes))
}

fn content_type_for(path: &str) -> &'static str {
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
