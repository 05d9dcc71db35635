//! Static file serving module
//!
//! Resolves request paths below the public root, loads files and builds responses.

use std::path::{Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::config::AppState;
use crate::error::StaticFileError;
use crate::http::{self, mime};
use crate::logger;

/// Serve a GET request from the public root
pub async fn serve(path: &str, state: &AppState) -> Response<Full<Bytes>> {
    match load_file(&state.public_root, path, &state.config.static_files.index_file).await {
        Ok((content, content_type)) => http::build_file_response(content, content_type),
        Err(e) => {
            if let StaticFileError::Io(_) = e {
                logger::log_error(&format!("Failed to serve '{path}': {e}"));
            }
            http::build_text_response(e.status(), e.public_message())
        }
    }
}

/// Load a file for `request_path` from `root`
///
/// `root` must already be canonical. `/` and paths that normalize to nothing resolve to
/// `index_file`. A trailing separator is kept, so `/index.html/` fails like any read of a
/// file as a directory.
pub async fn load_file(
    root: &Path,
    request_path: &str,
    index_file: &str,
) -> Result<(Vec<u8>, &'static str), StaticFileError> {
    let requested = sanitize_path(request_path).ok_or(StaticFileError::NotFound)?;

    let file_path = if requested.as_os_str().is_empty() {
        root.join(sanitize_path(index_file).ok_or(StaticFileError::NotFound)?)
    } else {
        let mut path = root.join(&requested);
        if request_path.ends_with(['/', '\\']) {
            path.push("");
        }
        path
    };

    // File not found is common (404), no need to log
    let canonical = fs::canonicalize(&file_path)
        .await
        .map_err(StaticFileError::from_io)?;
    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            canonical.display()
        ));
        return Err(StaticFileError::NotFound);
    }

    let content = fs::read(&canonical)
        .await
        .map_err(StaticFileError::from_io)?;

    Ok((content, mime::content_type_for(&file_path)))
}

/// Turn a request path into a path relative to the public root
///
/// Percent-escapes are decoded first, then `/` and `\` both split segments. Empty and `.`
/// segments are dropped, `..` removes the previous segment and is discarded when there is
/// nothing left to remove, so the result never climbs above the root. Returns `None` for
/// paths that do not decode to UTF-8 or contain NUL.
pub fn sanitize_path(request_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(request_path).ok()?;
    if decoded.contains('\0') {
        return None;
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    Some(segments.iter().collect())
}
