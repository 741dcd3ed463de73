//! TaskHandlerContext implementation for AppState.
//!
//! Dispatches tasks to the appropriate handler based on task type.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use indoc_core::models::{Task, TaskType};
use indoc_worker::TaskHandlerContext;

use crate::state::AppState;
use crate::task_handlers::{ProcessDocumentHandler, TaskHandler};

#[async_trait]
impl TaskHandlerContext for AppState {
    async fn dispatch_task(self: Arc<Self>, task: &Task) -> Result<()> {
        match task.task_type {
            TaskType::ProcessDocument => {
                let handler = ProcessDocumentHandler;
                handler.process(task, self).await
            }
        }
    }
}
