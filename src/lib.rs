pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod static_files;
pub mod storage;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Database;
use crate::storage::BlobStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<Config>,
    pub blobs: Arc<BlobStore>,
}

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/files",
            get(handlers::file::list_files)
                .post(handlers::file::upload_files)
                .delete(handlers::file::delete_files),
        )
        .route(
            "/folders",
            get(handlers::folder::list_folders)
                .post(handlers::folder::create_folder)
                .delete(handlers::folder::delete_folder),
        )
        .route("/config", get(handlers::client_config));

    Router::new()
        .nest("/api", api)
        .route("/uploads/:filename", get(handlers::file::serve_upload))
        .route("/", get(static_files::index_handler))
        .route("/*path", get(static_files::spa_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
