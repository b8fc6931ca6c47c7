//! Static file serving for the browser front end.
//!
//! Resolves request paths under the public root, picks a content type from
//! the file extension and answers missing files with a small HTML page.

use std::path::{Component, Path, PathBuf};

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use tokio::fs;
use tracing::{debug, warn};

const INDEX_FILE: &str = "index.html";
const NOT_FOUND_PAGE: &str = "<h1>404 Not Found</h1>";

/// Content type for a file extension. Unknown or missing extensions are
/// served as plain text.
pub fn content_type(extension: Option<&str>) -> &'static str {
    let ext = extension.map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "text/plain",
    }
}

/// Map a request path to a file under `root`.
///
/// `None` when the path tries to leave the root (`..`, absolute components).
pub fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    if request_path == "/" || request_path == "/index.html" {
        return Some(root.join(INDEX_FILE));
    }

    let relative = Path::new(request_path.trim_start_matches('/'));
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return None;
    }
    Some(root.join(relative))
}

pub async fn serve(root: &Path, request_path: &str) -> Response {
    let Some(file_path) = resolve(root, request_path) else {
        warn!(path = %request_path, "path traversal attempt blocked");
        return not_found();
    };

    match fs::read(&file_path).await {
        Ok(content) => {
            let content_type = content_type(file_path.extension().and_then(|e| e.to_str()));
            debug!(file = %file_path.display(), bytes = content.len(), content_type, "static file");
            ([(header::CONTENT_TYPE, content_type)], content).into_response()
        }
        // missing files are routine, directories land here too
        Err(e) => {
            debug!(file = %file_path.display(), error = %e, "static file not found");
            not_found()
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
}
