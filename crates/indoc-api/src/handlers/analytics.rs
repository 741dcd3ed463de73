use crate::auth::TenantContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::DbState;
use axum::{extract::State, Json};
use indoc_core::models::{AnalyticsSummary, ProcessingSummary};

#[utoipa::path(
    get,
    path = "/analytics/summary",
    tag = "analytics",
    responses(
        (status = 200, description = "Document and storage totals for the tenant", body = AnalyticsSummary),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn get_summary(
    State(db): State<DbState>,
    tenant_ctx: TenantContext,
) -> Result<Json<AnalyticsSummary>, HttpAppError> {
    let summary = db
        .analytics_repository
        .get_summary(tenant_ctx.tenant_id)
        .await?;

    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/analytics/processing",
    tag = "analytics",
    responses(
        (status = 200, description = "Per-status document counts for the tenant", body = ProcessingSummary),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn get_processing(
    State(db): State<DbState>,
    tenant_ctx: TenantContext,
) -> Result<Json<ProcessingSummary>, HttpAppError> {
    let summary = db
        .analytics_repository
        .get_processing_summary(tenant_ctx.tenant_id)
        .await?;

    Ok(Json(summary))
}
