use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use indoc_core::models::{DocumentStatus, ProcessDocumentPayload, Task};

use super::TaskHandler;
use crate::state::AppState;

/// Handles `process_document` tasks: load the document, run the processing
/// step, and record the terminal status.
pub struct ProcessDocumentHandler;

impl ProcessDocumentHandler {
    async fn run(&self, task: &Task, state: &Arc<AppState>) -> Result<()> {
        let payload: ProcessDocumentPayload = serde_json::from_value(task.payload.clone())
            .context("Failed to parse process_document payload")?;

        tracing::Span::current().record("document.id", payload.document_id.to_string());

        let document = state
            .db
            .document_repository
            .get_document(task.tenant_id, payload.document_id)
            .await?
            .ok_or_else(|| {
                anyhow::anyhow!("Document {} not found for processing", payload.document_id)
            })?;

        tracing::info!(
            document_id = %document.id,
            filename = %document.original_filename,
            file_size = document.file_size,
            "Processing document"
        );

        // Content extraction and indexing hang off this seam; today the
        // processing step is the status transition itself.

        state
            .db
            .document_repository
            .update_status(task.tenant_id, document.id, DocumentStatus::Ready)
            .await?
            .ok_or_else(|| {
                anyhow::anyhow!("Document {} disappeared before completion", document.id)
            })?;

        tracing::info!(document_id = %document.id, "Document ready");
        Ok(())
    }
}

#[async_trait]
impl TaskHandler for ProcessDocumentHandler {
    #[tracing::instrument(skip(self, task, state), fields(task.id = %task.id, document.id = tracing::field::Empty))]
    async fn process(&self, task: &Task, state: Arc<AppState>) -> Result<()> {
        let result = self.run(task, &state).await;

        if let Err(ref e) = result {
            tracing::error!(error = %e, "Document processing failed");

            // Mark the document failed so its terminal state is visible even
            // when the task has retries left; a later successful attempt
            // moves it to ready.
            if let Ok(payload) =
                serde_json::from_value::<ProcessDocumentPayload>(task.payload.clone())
            {
                if let Err(update_err) = state
                    .db
                    .document_repository
                    .update_status(task.tenant_id, payload.document_id, DocumentStatus::Failed)
                    .await
                {
                    tracing::error!(
                        error = %update_err,
                        document_id = %payload.document_id,
                        "Failed to mark document as failed"
                    );
                }
            }
        }

        result
    }
}
