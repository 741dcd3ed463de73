use chrono::Utc;
use indoc_core::models::{Classification, Document, DocumentStatus};
use indoc_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Fields of a document record to be created by the ingestion pipeline.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub tenant_id: Uuid,
    pub uploader_id: Uuid,
    pub original_filename: String,
    pub content_type: String,
    pub file_size: i64,
    pub content_fingerprint: String,
    pub classification: Classification,
    pub folder_path: Option<String>,
    pub parent_id: Option<Uuid>,
    pub document_set: Option<String>,
}

/// Outcome of the constrained insert: either this call created the record or
/// a non-deleted record with the same (tenant, fingerprint) already existed.
#[derive(Debug, Clone)]
pub enum DocumentInsert {
    Created(Document),
    Duplicate(Document),
}

/// Repository for document records and the per-tenant duplicate index.
#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a document, treating a fingerprint conflict as the duplicate
    /// outcome.
    ///
    /// The insert relies on the partial unique index
    /// `uq_documents_tenant_fingerprint`; `ON CONFLICT DO NOTHING` makes the
    /// lookup-and-insert atomic under concurrent identical uploads. When the
    /// insert returns no row, the winning record is re-fetched and returned
    /// to the loser's caller. The re-fetch can race a concurrent hard purge
    /// of the winner, so the sequence is retried once before giving up.
    #[tracing::instrument(skip(self, new), fields(db.table = "documents", db.operation = "insert", tenant_id = %new.tenant_id))]
    pub async fn create_document(&self, new: NewDocument) -> Result<DocumentInsert, AppError> {
        if let Some(parent_id) = new.parent_id {
            let parent_exists = sqlx::query_scalar::<Postgres, bool>(
                "SELECT EXISTS(SELECT 1 FROM documents WHERE id = $1 AND tenant_id = $2 AND deleted_at IS NULL)",
            )
            .bind(parent_id)
            .bind(new.tenant_id)
            .fetch_one(&self.pool)
            .await?;

            if !parent_exists {
                return Err(AppError::InvalidInput(
                    "Parent document not found".to_string(),
                ));
            }
        }

        for _ in 0..2 {
            let id = Uuid::new_v4();
            let now = Utc::now();

            let inserted = sqlx::query_as::<Postgres, Document>(
                r#"
                INSERT INTO documents (
                    id, tenant_id, uploader_id, original_filename, content_type,
                    file_size, content_fingerprint, classification, status,
                    folder_path, parent_id, document_set, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'uploaded', $9, $10, $11, $12, $12)
                ON CONFLICT (tenant_id, content_fingerprint) WHERE deleted_at IS NULL
                DO NOTHING
                RETURNING *
                "#,
            )
            .bind(id)
            .bind(new.tenant_id)
            .bind(new.uploader_id)
            .bind(&new.original_filename)
            .bind(&new.content_type)
            .bind(new.file_size)
            .bind(&new.content_fingerprint)
            .bind(new.classification)
            .bind(&new.folder_path)
            .bind(new.parent_id)
            .bind(&new.document_set)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;

            if let Some(document) = inserted {
                return Ok(DocumentInsert::Created(document));
            }

            // Conflict: another upload won the insert. Return its record.
            if let Some(existing) = self
                .find_by_fingerprint(new.tenant_id, &new.content_fingerprint)
                .await?
            {
                return Ok(DocumentInsert::Duplicate(existing));
            }
            // The winner vanished between conflict and re-fetch; retry the insert.
        }

        Err(AppError::Internal(
            "Document insert conflicted but no winning record was found".to_string(),
        ))
    }

    /// Duplicate index lookup: non-deleted record for (tenant, fingerprint).
    #[tracing::instrument(skip(self, fingerprint), fields(db.table = "documents", db.operation = "select"))]
    pub async fn find_by_fingerprint(
        &self,
        tenant_id: Uuid,
        fingerprint: &str,
    ) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<Postgres, Document>(
            "SELECT * FROM documents WHERE tenant_id = $1 AND content_fingerprint = $2 AND deleted_at IS NULL",
        )
        .bind(tenant_id)
        .bind(fingerprint)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    /// Get a document by ID (tenant-scoped, non-deleted).
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select", db.record_id = %id))]
    pub async fn get_document(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<Postgres, Document>(
            "SELECT * FROM documents WHERE tenant_id = $1 AND id = $2 AND deleted_at IS NULL",
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    /// List non-deleted documents for a tenant, newest first.
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select"))]
    pub async fn list_documents(&self, tenant_id: Uuid) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<Postgres, Document>(
            "SELECT * FROM documents WHERE tenant_id = $1 AND deleted_at IS NULL ORDER BY created_at DESC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    /// Transition a document's status, refreshing updated_at.
    ///
    /// Returns the updated document, or None when no non-deleted document
    /// with that ID exists within the tenant.
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "update", db.record_id = %id))]
    pub async fn update_status(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        status: DocumentStatus,
    ) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<Postgres, Document>(
            r#"
            UPDATE documents
            SET status = $3, updated_at = now()
            WHERE tenant_id = $1 AND id = $2 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    /// Soft delete a document and its descendants.
    ///
    /// The tree cascade mirrors the FK `ON DELETE CASCADE` used for hard
    /// purges: children of a deleted parent are soft-deleted in the same
    /// statement via a recursive CTE. Returns the number of rows affected.
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "update", db.record_id = %id))]
    pub async fn delete_document(&self, tenant_id: Uuid, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            WITH RECURSIVE subtree AS (
                SELECT id FROM documents
                WHERE tenant_id = $1 AND id = $2 AND deleted_at IS NULL
                UNION ALL
                SELECT d.id FROM documents d
                JOIN subtree s ON d.parent_id = s.id
                WHERE d.tenant_id = $1 AND d.deleted_at IS NULL
            )
            UPDATE documents
            SET deleted_at = now(), updated_at = now()
            WHERE id IN (SELECT id FROM subtree)
            "#,
        )
        .bind(tenant_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Count non-deleted documents for a tenant. Used by tests and analytics.
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select"))]
    pub async fn count_documents(&self, tenant_id: Uuid) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<Postgres, i64>(
            "SELECT COUNT(*) FROM documents WHERE tenant_id = $1 AND deleted_at IS NULL",
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
