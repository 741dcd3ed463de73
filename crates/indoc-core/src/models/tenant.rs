use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "tenant_status", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    Active,
    Suspended,
    Deleted,
}

/// Isolation boundary for all document data. The api_key is how requests are
/// scoped to a tenant; owner_id is the identity recorded as uploader.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub owner_id: Uuid,
    pub status: TenantStatus,
    pub created_at: DateTime<Utc>,
}
