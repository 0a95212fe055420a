use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::gallery::card::VideoCard;
use crate::gallery::grid::{RevealConfig, RevealGrid};
use crate::http::markup;
use crate::http::state::AppState;
use crate::player::controller::PlayerState;

#[derive(Debug, Deserialize, Default)]
pub struct HomeQuery {
    /// Number of cards already revealed (no-script "Load more" fallback).
    pub shown: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct FragmentQuery {
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_batch")]
    pub limit: usize,
}

fn default_batch() -> usize {
    RevealConfig::default().batch
}

fn render_cards(state: &AppState, offset: usize, limit: usize) -> String {
    state
        .catalog
        .page(offset, limit)
        .iter()
        .map(|record| markup::card(&VideoCard::mount(record, state.style), &state.style))
        .collect()
}

/// GET /: the grid, first batch plus the end-of-list sentinel.
pub async fn home(State(state): State<AppState>, Query(query): Query<HomeQuery>) -> Html<String> {
    let grid = RevealGrid::resume(
        state.catalog.len(),
        query.shown.unwrap_or(0),
        RevealConfig::default(),
    );
    let body = format!(
        r#"<div class="{class}" id="video-grid">{cards}{sentinel}</div>"#,
        class = state.style.grid_class(),
        cards = render_cards(&state, 0, grid.visible()),
        sentinel = markup::sentinel(&grid),
    );
    Html(markup::layout(&state.title, None, &state.hints.hinted(), &body))
}

/// GET /fragments/cards?offset=&limit=: card markup for one reveal batch.
pub async fn card_fragment(
    State(state): State<AppState>,
    Query(query): Query<FragmentQuery>,
) -> Html<String> {
    Html(render_cards(&state, query.offset, query.limit))
}

/// GET /video/{id}: detail page with the player. Unknown ids are a 404.
pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(record) = state.catalog.find(&id) else {
        tracing::debug!("No video with id {:?}", id);
        return not_found_page(&state);
    };

    let body = format!(
        r#"<article class="detail"><h1>{title}</h1><p class="description">{description}</p>{player}</article>"#,
        title = markup::escape(&record.title),
        description = markup::escape(&record.description),
        player = markup::player(&record.video_url(), &PlayerState::default()),
    );
    Html(markup::layout(
        &state.title,
        Some(&record.title),
        &state.hints.hinted(),
        &body,
    ))
    .into_response()
}

/// Fallback for unmatched routes.
pub async fn not_found(State(state): State<AppState>) -> Response {
    not_found_page(&state)
}

fn not_found_page(state: &AppState) -> Response {
    let body = r#"<section class="not-found"><h2>404</h2><p>This video could not be found.</p><a href="/">Back to all videos</a></section>"#;
    (
        StatusCode::NOT_FOUND,
        Html(markup::layout(&state.title, Some("Not Found"), &[], body)),
    )
        .into_response()
}
