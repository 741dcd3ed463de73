use chrono::{DateTime, Utc};
use indoc_core::models::{Task, TaskStatus, TaskType};
use indoc_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for the background task queue.
#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Enqueue a new task in pending status.
    #[tracing::instrument(skip(self, payload), fields(db.table = "tasks", db.operation = "insert", tenant_id = %tenant_id))]
    pub async fn create_task(
        &self,
        tenant_id: Uuid,
        task_type: TaskType,
        payload: serde_json::Value,
        priority: i32,
        max_retries: i32,
        timeout_seconds: i32,
    ) -> Result<Task, AppError> {
        let task = sqlx::query_as::<Postgres, Task>(
            r#"
            INSERT INTO tasks (tenant_id, task_type, payload, priority, max_retries, timeout_seconds)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(task_type)
        .bind(&payload)
        .bind(priority)
        .bind(max_retries)
        .bind(timeout_seconds)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    /// Claim the next runnable pending task, marking it running.
    ///
    /// The inner select uses FOR UPDATE SKIP LOCKED so concurrent workers
    /// never claim the same row; tasks whose retry backoff has not elapsed
    /// (scheduled_at in the future) are skipped.
    #[tracing::instrument(skip(self), fields(db.table = "tasks", db.operation = "update"))]
    pub async fn claim_next_pending(&self) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<Postgres, Task>(
            r#"
            UPDATE tasks
            SET status = 'running', started_at = now(), updated_at = now()
            WHERE id = (
                SELECT id FROM tasks
                WHERE status = 'pending'
                  AND (scheduled_at IS NULL OR scheduled_at <= now())
                ORDER BY priority DESC, created_at ASC
                LIMIT 1
                FOR UPDATE SKIP LOCKED
            )
            RETURNING *
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    /// Mark a running task completed.
    #[tracing::instrument(skip(self), fields(db.table = "tasks", db.operation = "update", db.record_id = %id))]
    pub async fn complete_task(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE tasks SET status = 'completed', finished_at = now(), updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Reschedule a failed attempt for retry after a backoff.
    #[tracing::instrument(skip(self, error), fields(db.table = "tasks", db.operation = "update", db.record_id = %id))]
    pub async fn retry_task(
        &self,
        id: Uuid,
        error: &str,
        scheduled_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE tasks
            SET status = 'pending', retry_count = retry_count + 1,
                last_error = $2, scheduled_at = $3, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(error)
        .bind(scheduled_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Mark a task permanently failed (retries exhausted).
    #[tracing::instrument(skip(self, error), fields(db.table = "tasks", db.operation = "update", db.record_id = %id))]
    pub async fn fail_task(&self, id: Uuid, error: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE tasks
            SET status = 'failed', last_error = $2, finished_at = now(), updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(error)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a task by ID.
    #[tracing::instrument(skip(self), fields(db.table = "tasks", db.operation = "select", db.record_id = %id))]
    pub async fn get_task(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<Postgres, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(task)
    }

    /// Count tasks for a tenant in a given status. Used by tests.
    #[tracing::instrument(skip(self), fields(db.table = "tasks", db.operation = "select"))]
    pub async fn count_by_status(
        &self,
        tenant_id: Uuid,
        status: TaskStatus,
    ) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<Postgres, i64>(
            "SELECT COUNT(*) FROM tasks WHERE tenant_id = $1 AND status = $2",
        )
        .bind(tenant_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
