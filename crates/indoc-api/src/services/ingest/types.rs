use indoc_core::models::{Classification, Document};
use uuid::Uuid;

/// A fully extracted upload: bytes plus client-supplied metadata.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub data: Vec<u8>,
    pub filename: String,
    pub content_type: String,
    pub classification: Classification,
    pub folder_path: Option<String>,
    pub parent_id: Option<Uuid>,
    pub document_set: Option<String>,
}

/// Why an upload was rejected without creating a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyFile,
    UnsupportedFormat,
}

impl RejectReason {
    /// Exact client-facing error string for the upload response body.
    pub fn message(&self) -> &'static str {
        match self {
            RejectReason::EmptyFile => "Empty file",
            RejectReason::UnsupportedFormat => "Unsupported file format",
        }
    }
}

/// Result of running an upload through the ingestion pipeline.
#[derive(Debug)]
pub enum IngestOutcome {
    /// A new document was created and dispatched for processing.
    Created(Document),
    /// Identical content already exists for this tenant; nothing was written.
    Duplicate { existing: Document },
    /// Validation rejected the upload before any storage access.
    Rejected(RejectReason),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_reason_messages_are_stable() {
        assert_eq!(RejectReason::EmptyFile.message(), "Empty file");
        assert_eq!(
            RejectReason::UnsupportedFormat.message(),
            "Unsupported file format"
        );
    }
}
