//! Database repositories for the data access layer
//!
//! Each repository is a `Clone` struct over a `PgPool` and is responsible for
//! one domain entity. Every query on tenant-owned data carries a `tenant_id`
//! filter; tenant isolation is an invariant of this layer, not of callers.

pub mod db;

pub use db::{
    AnalyticsRepository, DocumentInsert, DocumentRepository, NewDocument, TaskRepository,
    TenantRepository,
};
