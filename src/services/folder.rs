use chrono::Utc;
use uuid::Uuid;

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{DeleteFolderResponse, FileRecord, FolderRecord};
use crate::services::sweep_blobs;
use crate::storage::BlobStore;

/// Folder service
pub struct FolderService;

impl FolderService {
    /// List all folders, newest first.
    pub async fn list_folders(db: &Database) -> Result<Vec<FolderRecord>> {
        let folders: Vec<FolderRecord> =
            sqlx::query_as("SELECT * FROM folders ORDER BY created_at DESC")
                .fetch_all(db.pool())
                .await?;

        Ok(folders)
    }

    /// Create a folder. The name is trimmed and must be non-empty.
    pub async fn create_folder(db: &Database, name: &str) -> Result<FolderRecord> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("Folder name is required".to_string()));
        }

        let folder = FolderRecord {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };

        sqlx::query("INSERT INTO folders (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&folder.id)
            .bind(&folder.name)
            .bind(&folder.created_at)
            .execute(db.pool())
            .await?;

        Ok(folder)
    }

    /// Delete a folder and everything in it: sweep the blobs of every file
    /// referencing the folder, delete all those file rows unconditionally,
    /// then delete the folder row itself.
    pub async fn delete_folder(
        db: &Database,
        blobs: &BlobStore,
        folder_id: &str,
    ) -> Result<DeleteFolderResponse> {
        if Uuid::parse_str(folder_id).is_err() {
            return Err(AppError::BadRequest(format!(
                "Invalid folder ID: {}",
                folder_id
            )));
        }

        let folder: FolderRecord = sqlx::query_as("SELECT * FROM folders WHERE id = ?")
            .bind(folder_id)
            .fetch_optional(db.pool())
            .await?
            .ok_or_else(|| AppError::NotFound("Folder not found".to_string()))?;

        let files: Vec<FileRecord> = sqlx::query_as("SELECT * FROM files WHERE folder_id = ?")
            .bind(folder_id)
            .fetch_all(db.pool())
            .await?;
        tracing::info!(
            "Found {} files in folder \"{}\" to delete",
            files.len(),
            folder.name
        );

        let report = sweep_blobs(blobs, &files).await;

        // Unlike the file batch delete, the cascade removes file metadata
        // regardless of how the blob sweep went.
        let files_result = sqlx::query("DELETE FROM files WHERE folder_id = ?")
            .bind(folder_id)
            .execute(db.pool())
            .await?;
        tracing::info!("Deleted {} file records", files_result.rows_affected());

        let folder_result = sqlx::query("DELETE FROM folders WHERE id = ?")
            .bind(folder_id)
            .execute(db.pool())
            .await?;

        if folder_result.rows_affected() == 0 {
            return Err(AppError::Internal(
                "Failed to delete folder from database".to_string(),
            ));
        }
        tracing::info!("Deleted folder: {}", folder.name);

        let (deleted_files, failed_deletions) = report.into_parts();
        Ok(DeleteFolderResponse {
            deleted_count: folder_result.rows_affected(),
            files_deleted: files_result.rows_affected(),
            deleted_files,
            failed_deletions,
            folder_name: folder.name,
        })
    }
}
