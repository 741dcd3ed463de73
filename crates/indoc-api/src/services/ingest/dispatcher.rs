use async_trait::async_trait;
use indoc_core::models::{Priority, ProcessDocumentPayload, TaskType};
use indoc_core::AppError;
use indoc_worker::TaskQueue;
use uuid::Uuid;

use super::traits::ProcessingDispatcher;

/// Dispatches processing through the database-backed task queue.
#[derive(Clone)]
pub struct TaskQueueDispatcher {
    task_queue: TaskQueue,
}

impl TaskQueueDispatcher {
    pub fn new(task_queue: TaskQueue) -> Self {
        Self { task_queue }
    }
}

#[async_trait]
impl ProcessingDispatcher for TaskQueueDispatcher {
    async fn dispatch(&self, tenant_id: Uuid, document_id: Uuid) -> Result<Uuid, AppError> {
        let payload = serde_json::to_value(ProcessDocumentPayload { document_id })?;

        self.task_queue
            .submit_task(tenant_id, TaskType::ProcessDocument, payload, Priority::Normal)
            .await
            .map_err(|e| AppError::Dispatch(e.to_string()))
    }
}
