//! Request extractors shared by the handlers.

use super::error::AppError;
use super::state::AppState;
use crate::identity::domain::{AccessToken, Identity};
use crate::identity::ports::IdentityError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

/// Caller identity resolved from the `Authorization: Bearer` header.
///
/// Any failure (missing header, wrong scheme, rejected token) is reported
/// as [`AppError::Unauthorized`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AppError::Unauthorized)?;

        let identity = state
            .identity
            .verify(&AccessToken::new(token))
            .await
            .map_err(|err| match err {
                IdentityError::Unavailable(_) => AppError::upstream(err),
                _ => AppError::Unauthorized,
            })?;
        Ok(Self(identity))
    }
}

/// JSON body extractor whose rejections become [`AppError::Validation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        axum::Json::<T>::from_request(req, state)
            .await
            .map(|axum::Json(value)| Self(value))
            .map_err(|rejection: JsonRejection| AppError::Validation(rejection.body_text()))
    }
}
