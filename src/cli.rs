use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "showcase",
    about = "Video Showcase: a small video gallery with a custom player",
    long_about = None,
    version,
)]
pub struct Args {
    /// Directory holding the locally bundled videos [default: public/videos]
    #[arg(value_name = "VIDEOS_DIR")]
    pub videos_dir: Option<PathBuf>,

    /// HTTP port to listen on [default: 3000]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Site title shown in the header and page titles [default: Video Showcase]
    #[arg(short, long)]
    pub title: Option<String>,

    /// Path to TOML config file (overrides default search: ./showcase.toml, ~/.config/showcase/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Bind to localhost only (127.0.0.1) instead of all interfaces (0.0.0.0)
    #[arg(long)]
    pub localhost: bool,

    /// Do not queue hosted videos for preloading at startup
    #[arg(long)]
    pub no_preload: bool,
}
