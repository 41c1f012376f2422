use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use orbit_core::item::{self, MenuItem};
use orbit_core::launch::DEFAULT_OPENER;
use orbit_core::{Presentation, RingLayout};
use serde::Deserialize;
use thiserror::Error;

/// Leaf target that opens this very configuration file.
pub const SETTINGS_TARGET: &str = "orbit:settings";

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub hub_radius: f64,
    pub ring1: RingLayout,
    pub ring2: RingLayout,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            hub_radius: 40.0,
            ring1: RingLayout::new(52.0, 132.0, 2.0),
            ring2: RingLayout::new(140.0, 210.0, 1.5),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_opener")]
    pub opener: String,
    #[serde(default)]
    pub presentation: Presentation,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

fn default_opener() -> String {
    DEFAULT_OPENER.to_string()
}

impl Config {
    fn normalized(mut self) -> Self {
        self.items = item::normalize(self.items);
        self
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "orbit", "orbit").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("ORBIT"))
        .build()?;

    Ok(s.try_deserialize::<Config>()?.normalized())
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize::<Config>()?.normalized())
}

pub fn default_config() -> Config {
    match parse_config(DEFAULT_CONFIG) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Built-in config is invalid: {}", e);
            Config {
                opener: default_opener(),
                presentation: Presentation::default(),
                layout: LayoutConfig::default(),
                items: Vec::new(),
            }
        }
    }
}

/// The user's config, or the built-in one when there is none or it is broken.
pub fn load_or_default() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        log::info!("No config at {}, using defaults", path.display());
        return default_config();
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            default_config()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(|p| p.to_path_buf()) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let touches_config = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| p == &config_path);

                if touches_config && tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
