use indoc_core::models::Tenant;
use indoc_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for tenant records. The api_key lookup is how requests are
/// scoped to a tenant; it is not an authorization system.
#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, name, api_key), fields(db.table = "tenants", db.operation = "insert"))]
    pub async fn create_tenant(
        &self,
        name: String,
        api_key: String,
        owner_id: Uuid,
    ) -> Result<Tenant, AppError> {
        let tenant = sqlx::query_as::<Postgres, Tenant>(
            r#"
            INSERT INTO tenants (name, api_key, owner_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&name)
        .bind(&api_key)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(tenant)
    }

    /// Resolve an API key to its active tenant.
    #[tracing::instrument(skip(self, api_key), fields(db.table = "tenants", db.operation = "select"))]
    pub async fn get_by_api_key(&self, api_key: &str) -> Result<Option<Tenant>, AppError> {
        let tenant = sqlx::query_as::<Postgres, Tenant>(
            "SELECT * FROM tenants WHERE api_key = $1 AND status = 'active'",
        )
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tenant)
    }

    #[tracing::instrument(skip(self), fields(db.table = "tenants", db.operation = "select", db.record_id = %id))]
    pub async fn get_tenant(&self, id: Uuid) -> Result<Option<Tenant>, AppError> {
        let tenant = sqlx::query_as::<Postgres, Tenant>("SELECT * FROM tenants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(tenant)
    }
}
