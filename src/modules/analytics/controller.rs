use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{FinancialSummary, GenderDistribution};
use super::service::AnalyticsService;

/// Gender distribution for one class
#[utoipa::path(
    get,
    path = "/api/analytics/classes/{id}/genders",
    params(("id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Gender distribution", body = GenderDistribution),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Analytics"
)]
#[instrument(skip(state))]
pub async fn get_gender_distribution(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GenderDistribution>, AppError> {
    let distribution = AnalyticsService::gender_distribution(&state.db, id).await?;
    Ok(Json(distribution))
}

/// School-wide financial summary
#[utoipa::path(
    get,
    path = "/api/analytics/financial-summary",
    responses(
        (status = 200, description = "Financial summary", body = FinancialSummary),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Analytics"
)]
#[instrument(skip(state))]
pub async fn get_financial_summary(
    State(state): State<AppState>,
) -> Result<Json<FinancialSummary>, AppError> {
    let summary = AnalyticsService::financial_summary(&state.db).await?;
    Ok(Json(summary))
}
