use std::path::{Component, Path as FsPath, PathBuf};

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use http_range_header::parse_range_header;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

use crate::http::state::AppState;

/// Every local asset is served with this content type.
pub const VIDEO_CONTENT_TYPE: &str = "video/mp4";

const GALLERY_SCRIPT: &str = include_str!("../../static/gallery.js");

/// A resolved local video file.
#[derive(Debug, Clone)]
struct LocalAsset {
    path: PathBuf,
    size: u64,
}

/// Accept only a single plain filename: no separators, no `.`/`..`.
fn is_plain_filename(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\']) {
        return false;
    }
    let mut components = FsPath::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Resolve `filename` (already percent-decoded by the router) under the
/// videos directory. Returns None for unsafe names or missing files.
async fn lookup_asset(state: &AppState, filename: &str) -> Option<LocalAsset> {
    if !is_plain_filename(filename) {
        tracing::warn!("Rejected asset path {:?}", filename);
        return None;
    }
    let path = state.videos_dir.join(filename);
    let meta = tokio::fs::metadata(&path).await.ok()?;
    if !meta.is_file() {
        return None;
    }
    Some(LocalAsset { path, size: meta.len() })
}

/// Headers present on every asset response (GET + HEAD).
fn asset_headers(asset: &LocalAsset) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(VIDEO_CONTENT_TYPE));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(asset.size));
    headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    headers
}

fn unsatisfiable(size: u64) -> Response {
    (
        StatusCode::RANGE_NOT_SATISFIABLE,
        [(header::CONTENT_RANGE, format!("bytes */{}", size))],
    )
        .into_response()
}

/// HEAD /videos/{filename}: headers only; the file is not opened.
pub async fn serve_video_head(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Response {
    match lookup_asset(&state, &filename).await {
        Some(asset) => (StatusCode::OK, asset_headers(&asset)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// GET /videos/{filename}: full file, or a single byte range per RFC 7233.
pub async fn serve_video_get(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    req_headers: HeaderMap,
) -> Response {
    let Some(asset) = lookup_asset(&state, &filename).await else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let headers = asset_headers(&asset);

    if let Some(range_val) = req_headers.get(header::RANGE) {
        return match range_val.to_str() {
            Ok(range_str) => range_response(&asset, range_str, headers).await,
            Err(_) => unsatisfiable(asset.size),
        };
    }

    let file = match tokio::fs::File::open(&asset.path).await {
        Ok(f) => f,
        Err(e) => {
            tracing::error!("Failed to open {}: {}", asset.path.display(), e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    let body = Body::from_stream(ReaderStream::new(file));
    (StatusCode::OK, headers, body).into_response()
}

/// 206 for the first satisfiable range, 416 otherwise. Multi-range requests
/// are answered with their first range only.
async fn range_response(asset: &LocalAsset, range_str: &str, mut headers: HeaderMap) -> Response {
    let Ok(parsed) = parse_range_header(range_str) else {
        return unsatisfiable(asset.size);
    };
    let Ok(ranges) = parsed.validate(asset.size) else {
        return unsatisfiable(asset.size);
    };
    let Some(first) = ranges.into_iter().next() else {
        return unsatisfiable(asset.size);
    };

    let start = *first.start();
    let end = *first.end(); // inclusive
    let length = end - start + 1;

    let mut file = match tokio::fs::File::open(&asset.path).await {
        Ok(f) => f,
        Err(e) => {
            tracing::error!("Range response: failed to open {}: {}", asset.path.display(), e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    if let Err(e) = file.seek(std::io::SeekFrom::Start(start)).await {
        tracing::error!("Range response: failed to seek in {}: {}", asset.path.display(), e);
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let content_range = format!("bytes {}-{}/{}", start, end, asset.size);
    match HeaderValue::from_str(&content_range) {
        Ok(v) => {
            headers.insert(header::CONTENT_RANGE, v);
        }
        Err(e) => {
            tracing::error!("Invalid Content-Range {:?}: {}", content_range, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));

    let body = Body::from_stream(ReaderStream::new(file.take(length)));
    (StatusCode::PARTIAL_CONTENT, headers, body).into_response()
}

/// GET /static/gallery.js
pub async fn serve_script() -> Response {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        GALLERY_SCRIPT,
    )
        .into_response()
}
