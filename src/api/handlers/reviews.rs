//! Catalog listing and sample seeding.

use crate::api::error::{AppError, AppResult};
use crate::api::state::AppState;
use crate::catalog::domain::{Review, ReviewCategory, ReviewQuery, ReviewSort};
use crate::catalog::services::SeedOutcome;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

/// Optional filters on `GET /reviews`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewListParams {
    /// `general`, `premium`, or `all`.
    pub category: Option<String>,
    /// Region substring.
    pub region: Option<String>,
    /// `latest` or `reward`.
    pub sort: Option<String>,
}

impl ReviewListParams {
    const fn is_empty(&self) -> bool {
        self.category.is_none() && self.region.is_none() && self.sort.is_none()
    }

    fn into_query(self) -> AppResult<ReviewQuery> {
        let mut query = ReviewQuery::new();
        if let Some(raw) = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty() && !raw.eq_ignore_ascii_case("all"))
        {
            let category = ReviewCategory::try_from(raw)
                .map_err(|err| AppError::Validation(err.to_string()))?;
            query = query.with_category(category);
        }
        if let Some(region) = self.region {
            query = query.with_region(region);
        }
        if let Some(raw) = self.sort.as_deref().map(str::trim).filter(|raw| !raw.is_empty()) {
            let sort =
                ReviewSort::try_from(raw).map_err(|err| AppError::Validation(err.to_string()))?;
            query = query.with_sort(sort);
        }
        Ok(query)
    }
}

/// `GET /reviews`
///
/// Without parameters, every available posting is returned in catalog
/// order.
pub async fn list_reviews(
    State(state): State<AppState>,
    query: Result<Query<ReviewListParams>, QueryRejection>,
) -> AppResult<Json<Vec<Review>>> {
    let Query(params) = query.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let reviews = if params.is_empty() {
        state.catalog.list_available().await?
    } else {
        state.catalog.search(&params.into_query()?).await?
    };
    Ok(Json(reviews))
}

/// Body of `POST /initialize`.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Outcome description.
    pub message: String,
}

/// `POST /initialize`
pub async fn initialize(State(state): State<AppState>) -> AppResult<Json<MessageResponse>> {
    let message = match state.catalog.seed_samples().await? {
        SeedOutcome::Seeded(_) => "Database initialized with sample data",
        SeedOutcome::AlreadySeeded => "Sample data already present",
    };
    Ok(Json(MessageResponse {
        message: message.to_owned(),
    }))
}
