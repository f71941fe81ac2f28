//! Web API File Tests
//!
//! Integration tests for the /api/files endpoints: listing, multipart
//! upload, and the two-phase batch delete with partial-failure reporting.

use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use serde_json::{json, Value};
use uuid::Uuid;

mod common;
use common::{create_folder, create_test_server, file_part, stored_filenames, upload};

// ============================================================================
// List Tests
// ============================================================================

#[tokio::test]
async fn test_list_files_empty() {
    let (server, _uploads) = create_test_server().await;

    let response = server.get("/api/files").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["files"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_files_newest_first() {
    let (server, _uploads) = create_test_server().await;

    upload(&server, vec![file_part("first.txt", b"one")], None).await;
    upload(&server, vec![file_part("second.txt", b"two")], None).await;

    let response = server.get("/api/files").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["name"], "second.txt");
    assert_eq!(files[1]["name"], "first.txt");
}

#[tokio::test]
async fn test_list_files_filtered_by_folder() {
    let (server, _uploads) = create_test_server().await;

    let folder_id = create_folder(&server, "Invoices").await;
    upload(&server, vec![file_part("in-folder.txt", b"a")], Some(&folder_id)).await;
    upload(&server, vec![file_part("at-root.txt", b"b")], None).await;

    // Scoped to the folder
    let response = server
        .get("/api/files")
        .add_query_param("folderId", &folder_id)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], "in-folder.txt");
    assert_eq!(files[0]["folderId"], json!(folder_id));

    // Unscoped returns everything
    let response = server.get("/api/files").await;
    let body: Value = response.json();
    assert_eq!(body["files"].as_array().unwrap().len(), 2);

    // A different folder id matches nothing
    let response = server
        .get("/api/files")
        .add_query_param("folderId", Uuid::new_v4().to_string())
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["files"].as_array().unwrap().len(), 0);
}

// ============================================================================
// Upload Tests
// ============================================================================

#[tokio::test]
async fn test_upload_creates_records_and_blobs() {
    let (server, uploads) = create_test_server().await;

    let body = upload(
        &server,
        vec![
            file_part("report.txt", b"hello world"),
            file_part("report.txt", b"hello again!"),
        ],
        None,
    )
    .await;

    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);

    for file in files {
        assert_eq!(file["type"], "text/plain");
        assert_eq!(file["folderId"], Value::Null);
        assert!(file["_id"].as_str().is_some());
        let filename = file["filename"].as_str().unwrap();
        assert_eq!(file["path"], json!(format!("/uploads/{}", filename)));
        assert!(uploads.path().join(filename).is_file());
    }

    // Same display name, distinct stored names
    let names = stored_filenames(&body);
    assert_ne!(names[0], names[1]);
    assert_eq!(files[0]["name"], files[1]["name"]);
    assert_eq!(files[0]["size"], 11);
    assert_eq!(files[1]["size"], 12);
}

#[tokio::test]
async fn test_upload_zero_byte_file_skipped() {
    let (server, _uploads) = create_test_server().await;

    let body = upload(
        &server,
        vec![file_part("empty.txt", b""), file_part("real.txt", b"data")],
        None,
    )
    .await;

    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], "real.txt");
}

#[tokio::test]
async fn test_upload_without_files_is_rejected() {
    let (server, _uploads) = create_test_server().await;

    let form = MultipartForm::new().add_text("folderId", "whatever");
    let response = server.post("/api/files").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "No files provided");
}

#[tokio::test]
async fn test_uploaded_file_is_served_back() {
    let (server, _uploads) = create_test_server().await;

    let body = upload(&server, vec![file_part("notes.txt", b"remember")], None).await;
    let path = body["files"][0]["path"].as_str().unwrap().to_string();

    let response = server.get(&path).await;
    response.assert_status_ok();
    assert_eq!(response.text(), "remember");
}

#[tokio::test]
async fn test_serving_unknown_upload_is_not_found() {
    let (server, _uploads) = create_test_server().await;

    let response = server.get("/uploads/nope.txt").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

// ============================================================================
// Delete Tests
// ============================================================================

#[tokio::test]
async fn test_delete_files_removes_blobs_and_metadata() {
    let (server, uploads) = create_test_server().await;

    let body = upload(
        &server,
        vec![file_part("a.txt", b"aaa"), file_part("b.txt", b"bbb")],
        None,
    )
    .await;
    let ids: Vec<String> = body["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["_id"].as_str().unwrap().to_string())
        .collect();
    let names = stored_filenames(&body);

    let response = server
        .delete("/api/files")
        .json(&json!({ "fileIds": ids }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["deletedCount"], 2);
    let deleted: Vec<&str> = body["deletedFiles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert!(deleted.contains(&names[0].as_str()));
    assert!(deleted.contains(&names[1].as_str()));
    assert!(body.get("failedDeletions").is_none());

    for name in &names {
        assert!(!uploads.path().join(name).exists());
    }

    let response = server.get("/api/files").await;
    let body: Value = response.json();
    assert_eq!(body["files"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_delete_files_empty_list_is_rejected() {
    let (server, _uploads) = create_test_server().await;

    let response = server
        .delete("/api/files")
        .json(&json!({ "fileIds": [] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Missing field behaves the same
    let response = server.delete("/api/files").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_files_malformed_id_deletes_nothing() {
    let (server, _uploads) = create_test_server().await;

    let body = upload(&server, vec![file_part("keep.txt", b"keep")], None).await;
    let good_id = body["files"][0]["_id"].as_str().unwrap();

    let response = server
        .delete("/api/files")
        .json(&json!({ "fileIds": [good_id, "not-a-uuid"] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    // The well-formed id was not processed either
    let response = server.get("/api/files").await;
    let body: Value = response.json();
    assert_eq!(body["files"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_files_unknown_ids_not_found() {
    let (server, _uploads) = create_test_server().await;

    let response = server
        .delete("/api/files")
        .json(&json!({ "fileIds": [Uuid::new_v4().to_string()] }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_files_all_blobs_missing_is_total_failure() {
    let (server, uploads) = create_test_server().await;

    let body = upload(
        &server,
        vec![file_part("a.txt", b"aaa"), file_part("b.txt", b"bbb")],
        None,
    )
    .await;
    let ids: Vec<String> = body["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["_id"].as_str().unwrap().to_string())
        .collect();

    // Pull both blobs out from under the service
    for name in stored_filenames(&body) {
        std::fs::remove_file(uploads.path().join(name)).unwrap();
    }

    let response = server
        .delete("/api/files")
        .json(&json!({ "fileIds": ids }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["failedDeletions"].as_array().unwrap().len(), 2);

    // Metadata untouched
    let response = server.get("/api/files").await;
    let body: Value = response.json();
    assert_eq!(body["files"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_files_partial_blob_failure_still_clears_metadata() {
    let (server, uploads) = create_test_server().await;

    let body = upload(
        &server,
        vec![file_part("a.txt", b"aaa"), file_part("b.txt", b"bbb")],
        None,
    )
    .await;
    let ids: Vec<String> = body["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["_id"].as_str().unwrap().to_string())
        .collect();
    let names = stored_filenames(&body);

    // One blob disappears out of band
    std::fs::remove_file(uploads.path().join(&names[0])).unwrap();

    let response = server
        .delete("/api/files")
        .json(&json!({ "fileIds": ids }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    // Metadata for every requested id is removed, failed blob included
    assert_eq!(body["deletedCount"], 2);
    assert_eq!(body["deletedFiles"], json!([names[1]]));
    assert_eq!(body["failedDeletions"], json!([names[0]]));

    let response = server.get("/api/files").await;
    let body: Value = response.json();
    assert_eq!(body["files"].as_array().unwrap().len(), 0);
}
