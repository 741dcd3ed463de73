pub mod analytics;
pub mod document;
pub mod task;
pub mod tenant;

pub use analytics::{AnalyticsSummary, AnalyticsTotals, ProcessingSummary};
pub use document::{
    Classification, Document, DocumentResponse, DocumentStatus, ExistingDocument, UploadResponse,
};
pub use task::{Priority, ProcessDocumentPayload, Task, TaskStatus, TaskType};
pub use tenant::{Tenant, TenantStatus};
