use std::sync::Arc;

use indoc_core::models::DocumentStatus;
use indoc_core::{content_fingerprint, AppError};
use indoc_db::{DocumentInsert, DocumentRepository, NewDocument};

use crate::auth::TenantContext;
use crate::state::IngestConfig;
use crate::utils::upload::{is_allowed_extension, sanitize_filename, validate_file_size};

use super::traits::ProcessingDispatcher;
use super::types::{IngestOutcome, RejectReason, UploadRequest};

/// The ingestion pipeline: validate, fingerprint, constrained insert,
/// dispatch.
#[derive(Clone)]
pub struct IngestService {
    documents: DocumentRepository,
    dispatcher: Arc<dyn ProcessingDispatcher>,
    config: IngestConfig,
}

impl IngestService {
    pub fn new(
        documents: DocumentRepository,
        dispatcher: Arc<dyn ProcessingDispatcher>,
        config: IngestConfig,
    ) -> Self {
        Self {
            documents,
            dispatcher,
            config,
        }
    }

    /// Run one upload through the pipeline.
    ///
    /// Validation failures surface as [`IngestOutcome::Rejected`] and a
    /// fingerprint collision as [`IngestOutcome::Duplicate`]; neither creates
    /// a record or reaches the queue. Database faults and dispatch failures
    /// are the only errors; after a dispatch failure the created document
    /// stays in `uploaded` status so it can be re-dispatched.
    #[tracing::instrument(skip(self, upload), fields(tenant_id = %tenant_ctx.tenant_id, filename = %upload.filename))]
    pub async fn ingest(
        &self,
        tenant_ctx: &TenantContext,
        upload: UploadRequest,
    ) -> Result<IngestOutcome, AppError> {
        if upload.data.is_empty() {
            tracing::debug!("Rejected empty upload");
            return Ok(IngestOutcome::Rejected(RejectReason::EmptyFile));
        }

        let filename = sanitize_filename(&upload.filename)?;

        if !is_allowed_extension(&filename, &self.config.allowed_extensions) {
            tracing::debug!(filename = %filename, "Rejected unsupported file format");
            return Ok(IngestOutcome::Rejected(RejectReason::UnsupportedFormat));
        }

        validate_file_size(upload.data.len(), self.config.max_document_size)?;

        // SHA-256 over the full payload is CPU-bound; keep it off the async
        // request path.
        let data = upload.data;
        let file_size = data.len() as i64;
        let fingerprint = tokio::task::spawn_blocking(move || content_fingerprint(&data))
            .await
            .map_err(|e| AppError::Internal(format!("Fingerprint task failed: {}", e)))?;

        let insert = self
            .documents
            .create_document(NewDocument {
                tenant_id: tenant_ctx.tenant_id,
                uploader_id: tenant_ctx.uploader_id,
                original_filename: filename,
                content_type: upload.content_type,
                file_size,
                content_fingerprint: fingerprint,
                classification: upload.classification,
                folder_path: upload.folder_path,
                parent_id: upload.parent_id,
                document_set: upload.document_set,
            })
            .await?;

        let document = match insert {
            DocumentInsert::Duplicate(existing) => {
                tracing::info!(
                    existing_id = %existing.id,
                    "Upload matched existing document fingerprint"
                );
                return Ok(IngestOutcome::Duplicate { existing });
            }
            DocumentInsert::Created(document) => document,
        };

        let task_id = self
            .dispatcher
            .dispatch(tenant_ctx.tenant_id, document.id)
            .await?;

        // Only a successful dispatch moves the document forward; the status
        // update failing would leave it in `uploaded`, which the worker
        // tolerates.
        let document = self
            .documents
            .update_status(tenant_ctx.tenant_id, document.id, DocumentStatus::Processing)
            .await?
            .unwrap_or(document);

        tracing::info!(
            document_id = %document.id,
            task_id = %task_id,
            "Document ingested and dispatched for processing"
        );

        Ok(IngestOutcome::Created(document))
    }
}
