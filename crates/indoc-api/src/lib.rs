//! inDoc API Library
//!
//! HTTP handlers, ingestion service, task handlers, and application setup.

// Module declarations
mod api_doc;
mod handlers;
mod task_dispatch;
mod task_handlers;
mod utils;

// Public modules
pub mod auth;
pub mod error;
pub mod services;
pub mod setup;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
pub use indoc_worker::{TaskQueue, TaskQueueConfig};
pub use services::ingest::{IngestOutcome, IngestService, TaskQueueDispatcher};
pub use task_handlers::{ProcessDocumentHandler, TaskHandler};
