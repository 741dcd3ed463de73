pub mod analytics;
pub mod documents;
pub mod tasks;
pub mod tenants;

pub use analytics::AnalyticsRepository;
pub use documents::{DocumentInsert, DocumentRepository, NewDocument};
pub use tasks::TaskRepository;
pub use tenants::TenantRepository;
