use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::{
    CreateFolderRequest, CreateFolderResponse, DeleteFolderRequest, DeleteFolderResponse,
    FolderListResponse,
};
use crate::services::FolderService;
use crate::AppState;

/// List all folders
/// GET /api/folders
pub async fn list_folders(State(state): State<AppState>) -> Result<Json<FolderListResponse>> {
    let folders = FolderService::list_folders(&state.db).await?;
    Ok(Json(FolderListResponse { folders }))
}

/// Create a folder
/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<CreateFolderResponse>> {
    let folder = FolderService::create_folder(&state.db, &req.name).await?;
    Ok(Json(CreateFolderResponse { folder }))
}

/// Delete a folder and all files in it
/// DELETE /api/folders
pub async fn delete_folder(
    State(state): State<AppState>,
    Json(req): Json<DeleteFolderRequest>,
) -> Result<Json<DeleteFolderResponse>> {
    let folder_id = req.folder_id.unwrap_or_default();
    let report = FolderService::delete_folder(&state.db, &state.blobs, &folder_id).await?;
    Ok(Json(report))
}
