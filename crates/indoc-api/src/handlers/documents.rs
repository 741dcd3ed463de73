use crate::auth::TenantContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::DbState;
use axum::{
    extract::{Path, State},
    Json,
};
use indoc_core::models::DocumentResponse;
use indoc_core::AppError;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentResponse>,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    /// Number of documents soft-deleted, including descendants.
    pub deleted: u64,
}

#[utoipa::path(
    get,
    path = "/files",
    tag = "files",
    responses(
        (status = 200, description = "Tenant documents, newest first", body = DocumentListResponse),
        (status = 401, description = "Missing or invalid API key", body = ErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn list_files(
    State(db): State<DbState>,
    tenant_ctx: TenantContext,
) -> Result<Json<DocumentListResponse>, HttpAppError> {
    let documents = db
        .document_repository
        .list_documents(tenant_ctx.tenant_id)
        .await?;

    let documents: Vec<DocumentResponse> =
        documents.into_iter().map(DocumentResponse::from).collect();
    let total = documents.len();

    Ok(Json(DocumentListResponse { documents, total }))
}

#[utoipa::path(
    get,
    path = "/files/{id}",
    tag = "files",
    params(("id" = Uuid, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document found", body = DocumentResponse),
        (status = 404, description = "No such document in this tenant", body = ErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn get_file(
    State(db): State<DbState>,
    tenant_ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentResponse>, HttpAppError> {
    let document = db
        .document_repository
        .get_document(tenant_ctx.tenant_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Document {} not found", id)))?;

    Ok(Json(DocumentResponse::from(document)))
}

#[utoipa::path(
    delete,
    path = "/files/{id}",
    tag = "files",
    params(("id" = Uuid, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document and descendants soft-deleted", body = DeleteResponse),
        (status = 404, description = "No such document in this tenant", body = ErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn delete_file(
    State(db): State<DbState>,
    tenant_ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, HttpAppError> {
    let deleted = db
        .document_repository
        .delete_document(tenant_ctx.tenant_id, id)
        .await?;

    if deleted == 0 {
        return Err(AppError::NotFound(format!("Document {} not found", id)).into());
    }

    tracing::info!(document_id = %id, deleted = deleted, "Documents soft-deleted");

    Ok(Json(DeleteResponse {
        success: true,
        deleted,
    }))
}
