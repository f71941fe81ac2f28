use axum::{
    body::Body,
    extract::Path,
    http::{header, HeaderValue, Response, StatusCode},
};
use include_dir::{include_dir, Dir};
use mime_guess::MimeGuess;

static STATIC_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/static");

fn cache_control_for(path: &str) -> HeaderValue {
    if path == "index.html" {
        HeaderValue::from_static("no-store")
    } else {
        HeaderValue::from_static("public, max-age=3600")
    }
}

fn build_response(path: &str, bytes: &[u8]) -> Response<Body> {
    let mime = MimeGuess::from_path(path).first_or_octet_stream();
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CACHE_CONTROL, cache_control_for(path))
        .body(Body::from(bytes.to_vec()))
        .unwrap()
}

fn not_found() -> Response<Body> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(Body::empty())
        .unwrap()
}

fn serve(path: &str) -> Response<Body> {
    match STATIC_DIR.get_file(path) {
        Some(file) => build_response(path, file.contents()),
        None => not_found(),
    }
}

/// GET /
pub async fn index_handler() -> Response<Body> {
    serve("index.html")
}

/// Catch-all for everything outside /api and /uploads: serve the asset if it
/// exists, otherwise fall back to the page shell.
pub async fn spa_handler(Path(path): Path<String>) -> Response<Body> {
    let req_path = path.trim_start_matches('/').to_string();
    let req_path = if req_path.is_empty() {
        "index.html".to_string()
    } else {
        req_path
    };

    if let Some(file) = STATIC_DIR.get_file(&req_path) {
        return build_response(&req_path, file.contents());
    }

    if req_path.contains('.') {
        return not_found();
    }

    serve("index.html")
}
