use async_trait::async_trait;
use indoc_core::AppError;
use uuid::Uuid;

/// Capability to hand a freshly created document to asynchronous processing.
///
/// The pipeline treats dispatch as fire-and-forget with at-least-once
/// delivery; a failure here is the one fatal ingestion error and must leave
/// the document in `uploaded` status for re-dispatch.
#[async_trait]
pub trait ProcessingDispatcher: Send + Sync {
    /// Enqueue processing for a document, returning the task id.
    async fn dispatch(&self, tenant_id: Uuid, document_id: Uuid) -> Result<Uuid, AppError>;
}
