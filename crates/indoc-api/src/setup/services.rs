//! Repository, task queue, and application state setup

use anyhow::Result;
use indoc_core::Config;
use indoc_db::{AnalyticsRepository, DocumentRepository, TaskRepository, TenantRepository};
use indoc_worker::{TaskHandlerContext, TaskQueue, TaskQueueConfig};
use sqlx::PgPool;
use std::sync::{Arc, Weak};

use crate::state::{AppState, DbState, IngestConfig, TaskState};

/// Initialize repositories and the task queue, returning the application
/// state.
///
/// The state implements [`TaskHandlerContext`] and the queue holds a weak
/// reference to it, so the two are created together with `Arc::new_cyclic`.
pub fn initialize_services(config: &Config, pool: PgPool) -> Result<Arc<AppState>> {
    let document_db = DocumentRepository::new(pool.clone());
    let tenant_db = TenantRepository::new(pool.clone());
    let task_db = TaskRepository::new(pool.clone());
    let analytics_db = AnalyticsRepository::new(pool.clone());

    let is_production = config.is_production();
    tracing::info!(
        environment = %config.environment,
        is_production = is_production,
        "Environment configuration loaded"
    );

    let task_queue_config = TaskQueueConfig {
        max_workers: config.task_queue_max_workers,
        poll_interval_ms: config.task_queue_poll_interval_ms,
        default_timeout_seconds: config.task_queue_default_timeout_seconds,
        max_retries: config.task_queue_max_retries,
    };

    let ingest_config = IngestConfig {
        max_document_size: config.max_document_size_bytes,
        allowed_extensions: config.document_allowed_extensions.clone(),
    };

    let state = Arc::new_cyclic(|state_weak: &Weak<AppState>| {
        let task_queue = TaskQueue::new(
            task_db.clone(),
            task_queue_config,
            state_weak.clone() as Weak<dyn TaskHandlerContext>,
        );

        AppState {
            db: DbState {
                pool,
                document_repository: document_db,
                tenant_repository: tenant_db,
                task_repository: task_db.clone(),
                analytics_repository: analytics_db,
            },
            ingest: ingest_config,
            tasks: TaskState {
                task_queue,
                task_repository: task_db,
            },
            config: config.clone(),
            is_production,
        }
    });

    tracing::info!(
        max_workers = config.task_queue_max_workers,
        poll_interval_ms = config.task_queue_poll_interval_ms,
        "Task queue system initialized successfully"
    );

    Ok(state)
}
