//! Task handlers invoked by the worker through the dispatch context.

mod process_document;

pub use process_document::ProcessDocumentHandler;

use crate::state::AppState;
use anyhow::Result;
use async_trait::async_trait;
use indoc_core::models::Task;
use std::sync::Arc;

/// A handler for one task type.
#[async_trait]
pub trait TaskHandler: Send + Sync {
    async fn process(&self, task: &Task, state: Arc<AppState>) -> Result<()>;
}
