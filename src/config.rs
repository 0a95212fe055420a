use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::gallery::style::{AnimationIntensity, CardStyle, Density};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TITLE: &str = "Video Showcase";
const DEFAULT_VIDEOS_DIR: &str = "public/videos";

/// Keys accepted in `showcase.toml`. Unknown keys are ignored.
#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    pub port: Option<u16>,
    pub localhost: Option<bool>,
    pub title: Option<String>,
    pub videos_dir: Option<PathBuf>,
    pub preload: Option<bool>,
    pub density: Option<Density>,
    pub animation: Option<AnimationIntensity>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub localhost: bool,
    pub title: String,
    pub videos_dir: PathBuf,
    pub preload: bool,
    pub style: CardStyle,
}

impl Config {
    /// Merge CLI over file over defaults.
    pub fn resolve(file: Option<FileConfig>, args: &crate::cli::Args) -> Self {
        let file = file.unwrap_or_default();
        Config {
            port: args.port.or(file.port).unwrap_or(DEFAULT_PORT),
            localhost: args.localhost || file.localhost.unwrap_or(false),
            title: args
                .title
                .clone()
                .or(file.title)
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            videos_dir: args
                .videos_dir
                .clone()
                .or(file.videos_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_VIDEOS_DIR)),
            preload: !args.no_preload && file.preload.unwrap_or(true),
            style: CardStyle {
                density: file.density.unwrap_or_default(),
                animation: file.animation.unwrap_or_default(),
            },
        }
    }

    pub fn bind_addr(&self) -> String {
        let host = if self.localhost { "127.0.0.1" } else { "0.0.0.0" };
        format!("{}:{}", host, self.port)
    }
}

pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_owned());
    }
    let cwd_config = PathBuf::from("showcase.toml");
    if cwd_config.exists() {
        return Some(cwd_config);
    }
    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join("showcase").join("config.toml");
        if user_config.exists() {
            return Some(user_config);
        }
    }
    None
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&content)?;
    Ok(config)
}
