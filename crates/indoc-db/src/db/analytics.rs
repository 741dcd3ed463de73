use indoc_core::models::{AnalyticsSummary, AnalyticsTotals, ProcessingSummary};
use indoc_core::AppError;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use uuid::Uuid;

/// Aggregate queries over the documents table for the analytics endpoints.
/// Read-only; always tenant-scoped.
#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Totals for `GET /analytics/summary`.
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select", tenant_id = %tenant_id))]
    pub async fn get_summary(&self, tenant_id: Uuid) -> Result<AnalyticsSummary, AppError> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) AS documents,
                COALESCE(SUM(file_size), 0)::BIGINT AS storage_bytes,
                COUNT(*) FILTER (WHERE status = 'ready') AS ready
            FROM documents
            WHERE tenant_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(AnalyticsSummary {
            totals: AnalyticsTotals {
                documents: row.try_get::<i64, _>("documents")?,
                storage_bytes: row.try_get::<i64, _>("storage_bytes")?,
                ready: row.try_get::<i64, _>("ready")?,
            },
        })
    }

    /// Per-status counts for `GET /analytics/processing`.
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select", tenant_id = %tenant_id))]
    pub async fn get_processing_summary(
        &self,
        tenant_id: Uuid,
    ) -> Result<ProcessingSummary, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT status::TEXT AS status, COUNT(*) AS count
            FROM documents
            WHERE tenant_id = $1 AND deleted_at IS NULL
            GROUP BY status
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        let mut status_counts = HashMap::new();
        for row in rows {
            let status: String = row.try_get("status")?;
            let count: i64 = row.try_get("count")?;
            status_counts.insert(status, count);
        }

        let processed_total = status_counts.get("ready").copied().unwrap_or(0);

        Ok(ProcessingSummary {
            status_counts,
            processed_total,
        })
    }
}