//! Sign-up and sign-in.

use crate::api::error::{AppError, AppResult};
use crate::api::extract::AppJson;
use crate::api::state::AppState;
use crate::identity::domain::{Credentials, Identity, Registration};
use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

/// Body of `POST /signup`.
#[derive(Clone, Deserialize)]
pub struct SignupRequest {
    /// Account email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Display name.
    pub name: String,
}

/// Success body of `POST /signup`.
#[derive(Debug, Clone, Serialize)]
pub struct SignupResponse {
    /// Created account.
    pub user: Identity,
}

/// `POST /signup`
pub async fn signup(
    State(state): State<AppState>,
    AppJson(body): AppJson<SignupRequest>,
) -> AppResult<Json<SignupResponse>> {
    let registration = Registration::new(body.email, body.password, body.name)
        .map_err(|err| AppError::Validation(err.to_string()))?;
    let identity = state.identity.register(registration).await?;
    state.profiles.record(&identity).await?;
    Ok(Json(SignupResponse { user: identity }))
}

/// Body of `POST /signin`.
#[derive(Clone, Deserialize)]
pub struct SigninRequest {
    /// Account email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Success body of `POST /signin`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    /// Bearer token for later requests.
    pub access_token: String,
    /// Signed-in account.
    pub user: Identity,
}

/// `POST /signin`
pub async fn signin(
    State(state): State<AppState>,
    AppJson(body): AppJson<SigninRequest>,
) -> AppResult<Json<SigninResponse>> {
    let credentials =
        Credentials::new(body.email, body.password).map_err(|_| AppError::Unauthorized)?;
    let session = state.identity.sign_in(credentials).await?;
    Ok(Json(SigninResponse {
        access_token: session.access_token.as_str().to_owned(),
        user: session.identity,
    }))
}
