use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{DeleteFilesResponse, FileRecord};
use crate::services::sweep_blobs;
use crate::storage::{format_size, BlobStore};

/// One file from an upload request, fully buffered.
#[derive(Debug)]
pub struct IncomingFile {
    /// Original filename as supplied by the client.
    pub name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// File service
pub struct FileService;

impl FileService {
    /// List file records, optionally scoped to one folder, newest first.
    pub async fn list_files(db: &Database, folder_id: Option<String>) -> Result<Vec<FileRecord>> {
        let files: Vec<FileRecord> = match folder_id {
            Some(fid) => {
                sqlx::query_as(
                    "SELECT * FROM files WHERE folder_id = ? ORDER BY uploaded_at DESC",
                )
                .bind(fid)
                .fetch_all(db.pool())
                .await?
            }
            None => {
                sqlx::query_as("SELECT * FROM files ORDER BY uploaded_at DESC")
                    .fetch_all(db.pool())
                    .await?
            }
        };

        Ok(files)
    }

    /// Store a batch of uploads: write each blob, then insert its metadata
    /// row. Zero-byte files are skipped; a failed blob write skips that file
    /// but leaves earlier files in the batch committed.
    pub async fn upload_files(
        db: &Database,
        blobs: &BlobStore,
        incoming: Vec<IncomingFile>,
        folder_id: Option<String>,
    ) -> Result<Vec<FileRecord>> {
        let mut uploaded = Vec::new();

        for file in incoming {
            if file.data.is_empty() {
                continue;
            }

            let filename = BlobStore::unique_name(&file.name);
            let size = file.data.len() as i64;

            if let Err(e) = blobs.save(&filename, file.data).await {
                tracing::warn!("Failed to store blob for {}: {}", file.name, e);
                continue;
            }

            let record = FileRecord {
                id: Uuid::new_v4().to_string(),
                name: file.name,
                filename: filename.clone(),
                size,
                mime_type: file
                    .content_type
                    .unwrap_or_else(|| "application/octet-stream".to_string()),
                folder_id: folder_id.clone(),
                uploaded_at: Utc::now().to_rfc3339(),
                path: BlobStore::public_path(&filename),
            };

            sqlx::query(
                r#"
                INSERT INTO files (id, name, filename, size, mime_type, folder_id, uploaded_at, path)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&record.id)
            .bind(&record.name)
            .bind(&record.filename)
            .bind(record.size)
            .bind(&record.mime_type)
            .bind(&record.folder_id)
            .bind(&record.uploaded_at)
            .bind(&record.path)
            .execute(db.pool())
            .await?;

            tracing::debug!("Stored {} ({})", filename, format_size(size as u64));
            uploaded.push(record);
        }

        Ok(uploaded)
    }

    /// Delete a batch of files: blobs first, then metadata.
    ///
    /// If no blob could be removed the call fails and every metadata row is
    /// left intact. Once at least one blob went, metadata is deleted for all
    /// requested ids, including those whose blob removal failed.
    pub async fn delete_files(
        db: &Database,
        blobs: &BlobStore,
        file_ids: &[String],
    ) -> Result<DeleteFilesResponse> {
        if file_ids.is_empty() {
            return Err(AppError::BadRequest("No file IDs provided".to_string()));
        }

        for id in file_ids {
            if Uuid::parse_str(id).is_err() {
                return Err(AppError::BadRequest(format!("Invalid file ID: {}", id)));
            }
        }

        let files = Self::fetch_by_ids(db, file_ids).await?;
        tracing::info!("Found {} files to delete", files.len());

        if files.is_empty() {
            return Err(AppError::NotFound(
                "No files found with provided IDs".to_string(),
            ));
        }

        let report = sweep_blobs(blobs, &files).await;

        if !report.any_deleted() {
            return Err(AppError::BlobSweepFailed {
                failed: report.failed,
            });
        }

        let sql = format!(
            "DELETE FROM files WHERE id IN ({})",
            placeholders(file_ids.len())
        );
        let mut query = sqlx::query(&sql);
        for id in file_ids {
            query = query.bind(id);
        }
        let result = query.execute(db.pool()).await?;
        tracing::info!("Deleted {} file records", result.rows_affected());

        let (deleted_files, failed_deletions) = report.into_parts();
        Ok(DeleteFilesResponse {
            deleted_count: result.rows_affected(),
            deleted_files,
            failed_deletions,
        })
    }

    async fn fetch_by_ids(db: &Database, file_ids: &[String]) -> Result<Vec<FileRecord>> {
        let sql = format!(
            "SELECT * FROM files WHERE id IN ({})",
            placeholders(file_ids.len())
        );
        let mut query = sqlx::query_as::<_, FileRecord>(&sql);
        for id in file_ids {
            query = query.bind(id);
        }

        Ok(query.fetch_all(db.pool()).await?)
    }
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_joins_question_marks() {
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(3), "?, ?, ?");
    }
}
