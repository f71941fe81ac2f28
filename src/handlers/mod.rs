pub mod file;
pub mod folder;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Settings the frontend needs before it can submit anything.
#[derive(Debug, Serialize)]
pub struct ClientConfig {
    #[serde(rename = "maxUploadSize")]
    pub max_upload_size: u64,
}

/// GET /api/config
pub async fn client_config(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(ClientConfig {
        max_upload_size: state.config.storage.max_upload_size,
    })
}
