//! Video Showcase, a small video gallery: a list page, a detail page with a
//! custom player, and range-capable serving of the bundled videos.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod gallery;
pub mod http;
pub mod player;
pub mod preload;
