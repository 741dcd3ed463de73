use crate::auth::TenantContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::ingest::{IngestOutcome, IngestService, TaskQueueDispatcher, UploadRequest};
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;
use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use indoc_core::models::{
    Classification, DocumentResponse, ExistingDocument, UploadResponse,
};
use indoc_core::AppError;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    /// Sensitivity label; defaults to `internal`.
    pub classification: Option<String>,
    pub document_set: Option<String>,
    pub folder_path: Option<String>,
    pub parent_id: Option<Uuid>,
}

#[utoipa::path(
    post,
    path = "/files/upload",
    tag = "files",
    params(
        ("classification" = Option<String>, Query, description = "Sensitivity label: public, internal (default), restricted, confidential"),
        ("document_set" = Option<String>, Query, description = "Optional grouping key"),
        ("folder_path" = Option<String>, Query, description = "Logical folder path"),
        ("parent_id" = Option<Uuid>, Query, description = "Parent document (same tenant)")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload outcome: created, duplicate, or rejected", body = UploadResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 503, description = "Processing queue unavailable", body = ErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    tenant_ctx: TenantContext,
    Query(query): Query<UploadQuery>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let classification = match query.classification.as_deref() {
        Some(value) => value
            .parse::<Classification>()
            .map_err(|e| AppError::InvalidInput(e.to_string()))?,
        None => Classification::default(),
    };

    let (data, filename, content_type) = extract_multipart_file(multipart).await?;

    let service = IngestService::new(
        state.db.document_repository.clone(),
        Arc::new(TaskQueueDispatcher::new(state.tasks.task_queue.clone())),
        state.ingest.clone(),
    );

    let outcome = service
        .ingest(
            &tenant_ctx,
            UploadRequest {
                data,
                filename,
                content_type,
                classification,
                folder_path: query.folder_path,
                parent_id: query.parent_id,
                document_set: query.document_set,
            },
        )
        .await?;

    // Structured outcomes always render as 200; the error field carries the
    // rejection or duplicate signal.
    let response = match outcome {
        IngestOutcome::Created(document) => {
            UploadResponse::created(DocumentResponse::from(document))
        }
        IngestOutcome::Duplicate { existing } => {
            UploadResponse::duplicate(ExistingDocument::from(&existing))
        }
        IngestOutcome::Rejected(reason) => UploadResponse::rejected(reason.message()),
    };

    Ok(Json(response))
}
