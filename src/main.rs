use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use clap::Parser;

use showcase::catalog::library::Catalog;
use showcase::preload::{HintRegistry, PreloadQueue};
use showcase::{cli, config, http};

/// Set to true once the first Ctrl+C is received. Second Ctrl+C force-exits.
static SHUTTING_DOWN: AtomicBool = AtomicBool::new(false);

/// Wait for the first Ctrl+C (graceful shutdown).
/// On a second Ctrl+C during the shutdown wait, exit immediately.
async fn wait_for_shutdown() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    if SHUTTING_DOWN.swap(true, Ordering::SeqCst) {
        eprintln!("\nshowcase: forced exit");
        std::process::exit(1);
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .init();

    let args = cli::Args::parse();

    let file_config = config::find_config_file(args.config.as_deref())
        .and_then(|path| {
            match config::load_config(&path) {
                Ok(cfg) => {
                    tracing::debug!("Loaded config from {}", path.display());
                    Some(cfg)
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config file: {}", e);
                    None
                }
            }
        });

    let config = config::Config::resolve(file_config, &args);

    // Hosted videos still play without local assets, so a missing directory is not fatal.
    if !config.videos_dir.is_dir() {
        tracing::warn!(
            "Videos directory {} not found; local videos will fail to load",
            config.videos_dir.display()
        );
    }

    let catalog = Arc::new(Catalog::builtin().clone());
    let hints = Arc::new(HintRegistry::new());

    if config.preload {
        let queue = PreloadQueue::new(hints.clone());
        let queued = queue.preload_all(&catalog);
        tracing::debug!("Queued {} hosted videos for preloading", queued);
    }

    let state = http::state::AppState {
        catalog: Arc::clone(&catalog),
        title: config.title.clone(),
        videos_dir: config.videos_dir.clone(),
        style: config.style,
        hints,
    };
    let app = http::build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("error: failed to bind {}: {}", addr, e);
            std::process::exit(1);
        });

    tracing::info!(
        "\"{}\" serving {} videos on http://{}{}",
        config.title,
        catalog.len(),
        addr,
        if config.localhost { " (localhost only)" } else { "" }
    );

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
    {
        tracing::error!("HTTP server error: {}", e);
    }

    tracing::info!("Goodbye.");
}
