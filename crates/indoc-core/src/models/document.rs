use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Sensitivity label on a document. Defaults to `Internal` when the uploader
/// does not specify one; the column is NOT NULL so a document always carries
/// a defined classification.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "document_classification", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Public,
    #[default]
    Internal,
    Restricted,
    Confidential,
}

impl Display for Classification {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Classification::Public => write!(f, "public"),
            Classification::Internal => write!(f, "internal"),
            Classification::Restricted => write!(f, "restricted"),
            Classification::Confidential => write!(f, "confidential"),
        }
    }
}

impl FromStr for Classification {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Classification::Public),
            "internal" => Ok(Classification::Internal),
            "restricted" => Ok(Classification::Restricted),
            "confidential" => Ok(Classification::Confidential),
            _ => Err(anyhow::anyhow!("Invalid classification: {}", s)),
        }
    }
}

/// Processing lifecycle of a document.
///
/// Transitions: `Uploaded -> Processing -> {Ready | Failed}`. The ingestion
/// pipeline moves a document to `Processing` only after dispatch succeeds;
/// a dispatch failure leaves it in `Uploaded` for re-dispatch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "document_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Uploaded,
    Processing,
    Ready,
    Failed,
}

impl Display for DocumentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DocumentStatus::Uploaded => write!(f, "uploaded"),
            DocumentStatus::Processing => write!(f, "processing"),
            DocumentStatus::Ready => write!(f, "ready"),
            DocumentStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for DocumentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uploaded" => Ok(DocumentStatus::Uploaded),
            "processing" => Ok(DocumentStatus::Processing),
            "ready" => Ok(DocumentStatus::Ready),
            "failed" => Ok(DocumentStatus::Failed),
            _ => Err(anyhow::anyhow!("Invalid document status: {}", s)),
        }
    }
}

/// One uploaded file. `content_fingerprint` is unique per tenant among
/// non-deleted rows; `parent_id` forms a self-referential tree with cascade
/// delete on the parent row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Document {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub uploader_id: Uuid,
    pub original_filename: String,
    pub content_type: String,
    pub file_size: i64,
    pub content_fingerprint: String,
    pub classification: Classification,
    pub status: DocumentStatus,
    pub folder_path: Option<String>,
    pub parent_id: Option<Uuid>,
    pub document_set: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Document summary returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub file_size: i64,
    pub classification: Classification,
    pub status: DocumentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_set: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        DocumentResponse {
            id: doc.id,
            filename: doc.original_filename,
            content_type: doc.content_type,
            file_size: doc.file_size,
            classification: doc.classification,
            status: doc.status,
            folder_path: doc.folder_path,
            parent_id: doc.parent_id,
            document_set: doc.document_set,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Echo of the winning record in a duplicate-upload response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExistingDocument {
    pub id: Uuid,
    pub filename: String,
}

impl From<&Document> for ExistingDocument {
    fn from(doc: &Document) -> Self {
        ExistingDocument {
            id: doc.id,
            filename: doc.original_filename.clone(),
        }
    }
}

/// Body of `POST /files/upload`. Always rendered with HTTP 200 for the
/// structured outcomes; rejections and duplicates are reported through the
/// `error` field instead of a non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_document: Option<ExistingDocument>,
}

impl UploadResponse {
    pub fn created(document: DocumentResponse) -> Self {
        UploadResponse {
            success: true,
            document: Some(document),
            error: None,
            existing_document: None,
        }
    }

    pub fn duplicate(existing: ExistingDocument) -> Self {
        UploadResponse {
            success: false,
            document: None,
            error: Some("Duplicate file".to_string()),
            existing_document: Some(existing),
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        UploadResponse {
            success: false,
            document: None,
            error: Some(error.into()),
            existing_document: None,
        }
    }
}
