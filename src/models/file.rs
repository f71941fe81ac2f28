use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// File record: one row per uploaded file. The display name is the
/// user-supplied original; `filename` is the unique server-generated name
/// the bytes are stored under.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FileRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub filename: String,
    pub size: i64,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(rename = "folderId")]
    pub folder_id: Option<String>,
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: String,
    pub path: String,
}

/// File list response
#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub files: Vec<FileRecord>,
}

/// File list query parameters
#[derive(Debug, Deserialize)]
pub struct FileQuery {
    #[serde(rename = "folderId")]
    pub folder_id: Option<String>,
}

/// Delete files request. A missing list is treated the same as an empty one
/// so the handler can answer 400 instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct DeleteFilesRequest {
    #[serde(rename = "fileIds", default)]
    pub file_ids: Vec<String>,
}

/// Delete files response
#[derive(Debug, Serialize)]
pub struct DeleteFilesResponse {
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
    #[serde(rename = "deletedFiles")]
    pub deleted_files: Vec<String>,
    #[serde(rename = "failedDeletions", skip_serializing_if = "Option::is_none")]
    pub failed_deletions: Option<Vec<String>>,
}
