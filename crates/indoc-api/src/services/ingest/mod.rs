//! Document ingestion pipeline.
//!
//! Validate, fingerprint, insert-with-dedup, dispatch. Rejections and
//! duplicates are outcomes, not errors; only infrastructure faults (database,
//! queue) propagate as `AppError`.

mod dispatcher;
mod service;
mod traits;
mod types;

pub use dispatcher::TaskQueueDispatcher;
pub use service::IngestService;
pub use traits::ProcessingDispatcher;
pub use types::{IngestOutcome, RejectReason, UploadRequest};
