//! Shared test fixtures: a TestServer over the real router, backed by an
//! in-memory database and a temporary blob root.

use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::Value;
use tempfile::TempDir;

use fileharbor::config::Config;
use fileharbor::db::Database;
use fileharbor::storage::BlobStore;
use fileharbor::{create_router, AppState};

/// Create a test server. The returned TempDir is the blob root and must stay
/// alive for the duration of the test.
pub async fn create_test_server() -> (TestServer, TempDir) {
    let uploads = TempDir::new().expect("Failed to create temp upload dir");

    let mut config = Config::default();
    config.storage.upload_dir = uploads.path().to_string_lossy().into_owned();

    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    db.run_migrations().await.expect("Failed to run migrations");

    let state = AppState {
        db,
        config: Arc::new(config),
        blobs: Arc::new(BlobStore::new(uploads.path())),
    };

    let server = TestServer::new(create_router(state)).expect("Failed to create test server");

    (server, uploads)
}

/// A text/plain multipart file part.
pub fn file_part(name: &str, content: &[u8]) -> Part {
    Part::bytes(content.to_vec())
        .file_name(name.to_string())
        .mime_type("text/plain")
}

/// Upload files, optionally into a folder, and return the response body.
pub async fn upload(server: &TestServer, parts: Vec<Part>, folder_id: Option<&str>) -> Value {
    let mut form = MultipartForm::new();
    for part in parts {
        form = form.add_part("files", part);
    }
    if let Some(id) = folder_id {
        form = form.add_text("folderId", id.to_string());
    }

    let response = server.post("/api/files").multipart(form).await;
    response.assert_status_ok();
    response.json::<Value>()
}

/// Create a folder and return its id.
pub async fn create_folder(server: &TestServer, name: &str) -> String {
    let response = server
        .post("/api/folders")
        .json(&serde_json::json!({ "name": name }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["folder"]["_id"]
        .as_str()
        .expect("folder id")
        .to_string()
}

/// Stored filenames from an upload response, in order.
pub fn stored_filenames(body: &Value) -> Vec<String> {
    body["files"]
        .as_array()
        .expect("files array")
        .iter()
        .map(|f| f["filename"].as_str().expect("filename").to_string())
        .collect()
}
