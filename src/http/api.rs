use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::record::VideoRecord;
use crate::gallery::card::detail_href;
use crate::http::state::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    #[serde(default)]
    pub offset: usize,
    /// 0 means "everything from offset on".
    #[serde(default)]
    pub limit: usize,
}

/// A catalog record plus the URLs a client needs to render it.
#[derive(Debug, Serialize)]
pub struct VideoEntry {
    #[serde(flatten)]
    pub record: VideoRecord,
    /// Resolved playback URL.
    pub src: String,
    /// Detail page route.
    pub href: String,
}

impl From<&VideoRecord> for VideoEntry {
    fn from(record: &VideoRecord) -> Self {
        Self {
            src: record.video_url(),
            href: detail_href(&record.id),
            record: record.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VideoPage {
    pub total: usize,
    pub offset: usize,
    pub items: Vec<VideoEntry>,
    /// Offset of the next page, absent once the catalog is exhausted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<usize>,
}

/// GET /api/videos?offset=&limit=
pub async fn list_videos(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Json<VideoPage> {
    let total = state.catalog.len();
    let items: Vec<VideoEntry> = state
        .catalog
        .page(query.offset, query.limit)
        .iter()
        .map(VideoEntry::from)
        .collect();
    let end = query.offset.min(total) + items.len();
    Json(VideoPage {
        total,
        offset: query.offset,
        next_offset: (end < total).then_some(end),
        items,
    })
}

/// GET /api/videos/{id}
pub async fn get_video(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.catalog.find(&id) {
        Some(record) => Json(VideoEntry::from(record)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "not found", "id": id })),
        )
            .into_response(),
    }
}
