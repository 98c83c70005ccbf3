//! Translation of service failures into HTTP responses.

use crate::catalog::services::CatalogError;
use crate::identity::ports::IdentityError;
use crate::media::services::MediaError;
use crate::storage::ports::KeyValueError;
use crate::task::{domain::TaskDomainError, services::TaskLedgerError};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Every failure the HTTP surface can report.
///
/// Each variant renders as `{ "error": <message>, "code": <code> }` with
/// the status listed on the variant.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid credential (401). The message never says which.
    #[error("unauthorized")]
    Unauthorized,

    /// Authenticated but not entitled (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Referenced resource absent (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The review was claimed by someone else (400).
    #[error("already assigned: {0}")]
    AlreadyAssigned(String),

    /// The resource is not in a state that permits the operation (409).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Malformed or missing request fields (400).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A collaborator failed (500). Detail is logged, never returned.
    #[error("upstream failure: {0}")]
    Upstream(String),
}

/// Result type for handlers.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Builds an upstream error from any displayable failure.
    pub fn upstream(err: impl std::fmt::Display) -> Self {
        Self::Upstream(err.to_string())
    }

    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyAssigned(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidState(_) => StatusCode::CONFLICT,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyAssigned(_) => "ALREADY_ASSIGNED",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Upstream(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = match self {
            Self::Unauthorized => UNAUTHORIZED_MESSAGE.to_owned(),
            Self::Upstream(detail) => {
                tracing::error!(error = %detail, "request failed upstream");
                INTERNAL_MESSAGE.to_owned()
            }
            Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::AlreadyAssigned(message)
            | Self::InvalidState(message)
            | Self::Validation(message) => message,
        };
        (status, Json(json!({ "error": message, "code": code }))).into_response()
    }
}

impl From<KeyValueError> for AppError {
    fn from(err: KeyValueError) -> Self {
        Self::upstream(err)
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => Self::NotFound(format!("review {id} not found")),
            CatalogError::AlreadyAssigned(id) => {
                Self::AlreadyAssigned(format!("review {id} is already assigned"))
            }
            CatalogError::Contention(_) => Self::InvalidState(err.to_string()),
            CatalogError::Domain(domain) => Self::Validation(domain.to_string()),
            CatalogError::Store(store) => store.into(),
        }
    }
}

impl From<TaskLedgerError> for AppError {
    fn from(err: TaskLedgerError) -> Self {
        match err {
            TaskLedgerError::ReviewNotFound(id) => Self::NotFound(format!("review {id} not found")),
            TaskLedgerError::AlreadyAssigned(id) => {
                Self::AlreadyAssigned(format!("review {id} is already assigned"))
            }
            TaskLedgerError::TaskNotFound(id) => Self::NotFound(format!("task {id} not found")),
            TaskLedgerError::Forbidden { task_id, .. } => {
                Self::Forbidden(format!("task {task_id} belongs to another worker"))
            }
            TaskLedgerError::Contention(_) => Self::InvalidState(err.to_string()),
            TaskLedgerError::Domain(domain) => match domain {
                TaskDomainError::InvalidTaskId(_) => Self::Validation(domain.to_string()),
                TaskDomainError::InvalidStateTransition { .. }
                | TaskDomainError::SubmissionRequired(_) => Self::InvalidState(domain.to_string()),
            },
            TaskLedgerError::Catalog(catalog) => catalog.into(),
            TaskLedgerError::Store(store) => store.into(),
        }
    }
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidToken | IdentityError::InvalidCredentials => Self::Unauthorized,
            IdentityError::EmailTaken(_) | IdentityError::Validation(_) => {
                Self::Validation(err.to_string())
            }
            IdentityError::Unavailable(_) => Self::upstream(err),
        }
    }
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::EmptyUpload | MediaError::Domain(_) => Self::Validation(err.to_string()),
            MediaError::NotFound => Self::NotFound(err.to_string()),
            MediaError::LinkExpired | MediaError::InvalidSignature => {
                Self::Forbidden(err.to_string())
            }
            MediaError::SigningKey | MediaError::Store(_) => Self::upstream(err),
        }
    }
}
