use axum::{
    body::Body,
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};

use crate::error::{AppError, Result};
use crate::models::{DeleteFilesRequest, DeleteFilesResponse, FileListResponse, FileQuery};
use crate::services::file::IncomingFile;
use crate::services::FileService;
use crate::AppState;

/// List files, optionally scoped to a folder
/// GET /api/files?folderId=xxx
pub async fn list_files(
    State(state): State<AppState>,
    Query(query): Query<FileQuery>,
) -> Result<Json<FileListResponse>> {
    // An empty folderId means no filter, same as omitting it
    let folder_id = query.folder_id.filter(|id| !id.is_empty());
    let files = FileService::list_files(&state.db, folder_id).await?;
    Ok(Json(FileListResponse { files }))
}

/// Upload one or more files
/// POST /api/files (multipart: repeated `files` field + optional `folderId`)
pub async fn upload_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<FileListResponse>> {
    let mut incoming = Vec::new();
    let mut folder_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to process multipart: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "files" => {
                let original = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "file".to_string());
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;

                incoming.push(IncomingFile {
                    name: original,
                    content_type,
                    data,
                });
            }
            "folderId" => {
                let text = field.text().await.unwrap_or_default();
                if !text.is_empty() {
                    folder_id = Some(text);
                }
            }
            _ => {}
        }
    }

    if incoming.is_empty() {
        return Err(AppError::BadRequest("No files provided".to_string()));
    }

    let files = FileService::upload_files(&state.db, &state.blobs, incoming, folder_id).await?;
    Ok(Json(FileListResponse { files }))
}

/// Delete a batch of files
/// DELETE /api/files
pub async fn delete_files(
    State(state): State<AppState>,
    Json(req): Json<DeleteFilesRequest>,
) -> Result<Json<DeleteFilesResponse>> {
    let report = FileService::delete_files(&state.db, &state.blobs, &req.file_ids).await?;
    Ok(Json(report))
}

/// Serve stored bytes back under their public path
/// GET /uploads/:filename
pub async fn serve_upload(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    // Path captures never span segments, but keep the blob root airtight.
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return Err(AppError::BadRequest("Invalid filename".to_string()));
    }

    let data = state.blobs.read(&filename).await?;
    let mime = mime_guess::from_path(&filename).first_or_octet_stream();

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
