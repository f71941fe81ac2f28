use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Folder record. Folders are flat: files reference a folder id or none.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FolderRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Folder list response
#[derive(Debug, Serialize)]
pub struct FolderListResponse {
    pub folders: Vec<FolderRecord>,
}

/// Create folder request. A missing name fails validation like a blank one.
#[derive(Debug, Deserialize)]
pub struct CreateFolderRequest {
    #[serde(default)]
    pub name: String,
}

/// Create folder response
#[derive(Debug, Serialize)]
pub struct CreateFolderResponse {
    pub folder: FolderRecord,
}

/// Delete folder request. A missing id is treated the same as a malformed
/// one so the handler can answer 400 instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct DeleteFolderRequest {
    #[serde(rename = "folderId", default)]
    pub folder_id: Option<String>,
}

/// Delete folder response
#[derive(Debug, Serialize)]
pub struct DeleteFolderResponse {
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
    #[serde(rename = "filesDeleted")]
    pub files_deleted: u64,
    #[serde(rename = "deletedFiles")]
    pub deleted_files: Vec<String>,
    #[serde(rename = "failedDeletions", skip_serializing_if = "Option::is_none")]
    pub failed_deletions: Option<Vec<String>>,
    #[serde(rename = "folderName")]
    pub folder_name: String,
}
