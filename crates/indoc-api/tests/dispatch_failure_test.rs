//! Dispatch failure contract: queue unavailability is the one fatal
//! ingestion error, and the created document must stay in `uploaded`
//! status so it can be re-dispatched later.

mod helpers;

use async_trait::async_trait;
use helpers::{seed_tenant, setup_test_app};
use indoc_api::auth::TenantContext;
use indoc_api::services::ingest::{IngestService, ProcessingDispatcher, UploadRequest};
use indoc_core::models::Classification;
use indoc_core::{AppError, ErrorMetadata};
use indoc_db::{DocumentRepository, TenantRepository};
use std::sync::Arc;
use uuid::Uuid;

struct UnavailableQueue;

#[async_trait]
impl ProcessingDispatcher for UnavailableQueue {
    async fn dispatch(&self, _tenant_id: Uuid, _document_id: Uuid) -> Result<Uuid, AppError> {
        Err(AppError::Dispatch("queue connection refused".to_string()))
    }
}

fn pdf_upload(data: Vec<u8>) -> UploadRequest {
    UploadRequest {
        data,
        filename: "report.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        classification: Classification::Internal,
        folder_path: None,
        parent_id: None,
        document_set: None,
    }
}

#[tokio::test]
async fn dispatch_failure_propagates_and_leaves_document_uploaded() {
    let app = setup_test_app().await;
    let (tenant_id, api_key) = seed_tenant(app.pool(), "dispatch-down").await;

    let tenant = TenantRepository::new(app.pool.clone())
        .get_by_api_key(&api_key)
        .await
        .expect("Failed to look up tenant")
        .expect("Tenant exists");
    let tenant_ctx = TenantContext {
        tenant_id,
        uploader_id: Uuid::new_v4(),
        tenant,
    };

    let service = IngestService::new(
        DocumentRepository::new(app.pool.clone()),
        Arc::new(UnavailableQueue),
        app.state.ingest.clone(),
    );

    let err = service
        .ingest(&tenant_ctx, pdf_upload(b"%PDF-1.7 queue down".to_vec()))
        .await
        .expect_err("Dispatch failure must be fatal");

    assert!(matches!(err, AppError::Dispatch(_)));
    assert_eq!(err.http_status_code(), 503);
    assert_eq!(err.error_code(), "QUEUE_UNAVAILABLE");

    // The record exists but was never advanced past `uploaded`.
    let status: String =
        sqlx::query_scalar("SELECT status::text FROM documents WHERE tenant_id = $1")
            .bind(tenant_id)
            .fetch_one(app.pool())
            .await
            .expect("Document row exists");
    assert_eq!(status, "uploaded");
}
