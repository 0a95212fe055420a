use std::path::PathBuf;
use std::sync::Arc;

use crate::catalog::library::Catalog;
use crate::gallery::style::CardStyle;
use crate::preload::HintRegistry;

/// Shared application state injected into all route handlers via axum::extract::State.
/// The catalog is immutable; the hint registry is appended to by the preload worker.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub title: String,
    /// Directory the `/videos/{filename}` route serves from.
    pub videos_dir: PathBuf,
    pub style: CardStyle,
    pub hints: Arc<HintRegistry>,
}
