use std::path::PathBuf;
use showcase::cli::Args;
use showcase::config::{Config, FileConfig};
use showcase::gallery::style::{AnimationIntensity, Density};

fn make_args(port: Option<u16>, title: Option<String>) -> Args {
    Args {
        videos_dir: None,
        port,
        title,
        config: None,
        localhost: false,
        no_preload: false,
    }
}

#[test]
fn test_defaults_when_nothing_set() {
    let config = Config::resolve(None, &make_args(None, None));
    assert_eq!(config.port, 3000);
    assert_eq!(config.title, "Video Showcase");
    assert_eq!(config.videos_dir, PathBuf::from("public/videos"));
    assert!(config.preload);
    assert!(!config.localhost);
    assert_eq!(config.bind_addr(), "0.0.0.0:3000");
}

#[test]
fn test_toml_overrides_default() {
    let file = FileConfig { port: Some(7777), ..FileConfig::default() };
    let config = Config::resolve(Some(file), &make_args(None, None));
    assert_eq!(config.port, 7777);
}

#[test]
fn test_cli_overrides_toml() {
    let file = FileConfig {
        port: Some(7777),
        title: Some("From File".into()),
        ..FileConfig::default()
    };
    let config = Config::resolve(Some(file), &make_args(Some(9000), Some("From CLI".into())));
    assert_eq!(config.port, 9000);
    assert_eq!(config.title, "From CLI");
}

#[test]
fn test_no_preload_flag_wins_over_file() {
    let file = FileConfig { preload: Some(true), ..FileConfig::default() };
    let mut args = make_args(None, None);
    args.no_preload = true;
    assert!(!Config::resolve(Some(file), &args).preload);
}

#[test]
fn test_localhost_binds_loopback() {
    let file = FileConfig { localhost: Some(true), ..FileConfig::default() };
    let config = Config::resolve(Some(file), &make_args(Some(8080), None));
    assert_eq!(config.bind_addr(), "127.0.0.1:8080");
}

#[test]
fn test_toml_parse_with_style() {
    let toml_str = r#"
port = 9000
title = "Living Room"
videos_dir = "/srv/videos"
density = "compact"
animation = "lively"
"#;
    let parsed: FileConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(parsed.port, Some(9000));
    assert_eq!(parsed.title.as_deref(), Some("Living Room"));
    let config = Config::resolve(Some(parsed), &make_args(None, None));
    assert_eq!(config.videos_dir, PathBuf::from("/srv/videos"));
    assert_eq!(config.style.density, Density::Compact);
    assert_eq!(config.style.animation, AnimationIntensity::Lively);
    assert_eq!(config.style.columns(), 5);
}

#[test]
fn test_toml_unknown_fields_ignored() {
    let toml_str = "port = 9000\nunknown_future_key = true\n";
    let parsed: Result<FileConfig, _> = toml::from_str(toml_str);
    assert!(parsed.is_ok());
}

#[test]
fn test_toml_bad_density_is_error() {
    let parsed: Result<FileConfig, _> = toml::from_str("density = \"dense\"\n");
    assert!(parsed.is_err());
}

#[test]
fn test_load_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("showcase.toml");
    std::fs::write(&path, "port = 4100\npreload = false\n").unwrap();
    let parsed = showcase::config::load_config(&path).unwrap();
    assert_eq!(parsed.port, Some(4100));
    assert_eq!(parsed.preload, Some(false));
    assert!(showcase::config::load_config(&dir.path().join("missing.toml")).is_err());
}
