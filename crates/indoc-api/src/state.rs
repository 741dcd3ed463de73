//! Application state and sub-state extractors.
//!
//! AppState is split into domain sub-states so handlers can extract only what
//! they need via Axum's `FromRef`, instead of one god object.

use indoc_core::Config;
use indoc_db::{AnalyticsRepository, DocumentRepository, TaskRepository, TenantRepository};
use indoc_worker::TaskQueue;
use sqlx::PgPool;
use std::sync::Arc;

// ----- Sub-state types -----

/// Database pool and repositories.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub document_repository: DocumentRepository,
    pub tenant_repository: TenantRepository,
    pub task_repository: TaskRepository,
    pub analytics_repository: AnalyticsRepository,
}

/// Limits and allowlists for the ingestion pipeline.
#[derive(Clone, Debug)]
pub struct IngestConfig {
    pub max_document_size: usize,
    pub allowed_extensions: Vec<String>,
}

/// Task queue and its repository.
#[derive(Clone)]
pub struct TaskState {
    pub task_queue: TaskQueue,
    pub task_repository: TaskRepository,
}

// ----- AppState -----

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub ingest: IngestConfig,
    pub tasks: TaskState,
    pub config: Config,
    pub is_production: bool,
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for IngestConfig {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.ingest.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for TaskState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.tasks.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
