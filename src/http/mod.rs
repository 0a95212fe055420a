pub mod api;
pub mod assets;
pub mod markup;
pub mod pages;
pub mod state;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use crate::http::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(pages::home))
        .route("/video/{id}", get(pages::detail))
        .route("/fragments/cards", get(pages::card_fragment))
        // Local video assets, range-capable
        .route("/videos/{filename}", get(assets::serve_video_get).head(assets::serve_video_head))
        .route("/static/gallery.js", get(assets::serve_script))
        // JSON catalog
        .route("/api/videos", get(api::list_videos))
        .route("/api/videos/{id}", get(api::get_video))
        .fallback(pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
