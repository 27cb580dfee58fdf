use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

const APP_DIR_NAME: &str = "habit-hero";
const CONFIG_FILE_NAME: &str = "app_config.json";

/// Log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 1,
    Warn = 2,
    #[default]
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            4 => LogLevel::Debug,
            5 => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Persistent configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AppConfig {
    #[serde(default)]
    log_level: LogLevel,
}

/// Local settings kept next to the stored session token
pub struct ConfigService {
    log_level: Arc<AtomicU8>,
    config_dir: PathBuf,
    config_path: PathBuf,
}

impl ConfigService {
    /// `<platform config dir>/habit-hero`
    pub fn default_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .context("Failed to resolve the user config directory")
    }

    pub fn new(config_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(config_dir).with_context(|| {
            format!("Failed to create config directory {}", config_dir.display())
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str::<AppConfig>(&content).unwrap_or_else(|e| {
                warn!("[config] ignoring unreadable {:?}: {}", config_path, e);
                AppConfig::default()
            })
        } else {
            AppConfig::default()
        };

        info!(
            "[config] loaded from {:?}, log level {}",
            config_path,
            config.log_level.as_str()
        );

        Ok(Self {
            log_level: Arc::new(AtomicU8::new(config.log_level as u8)),
            config_dir: config_dir.to_path_buf(),
            config_path,
        })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn log_dir(&self) -> PathBuf {
        self.config_dir.join("logs")
    }

    pub fn get_log_level(&self) -> LogLevel {
        LogLevel::from_u8(self.log_level.load(Ordering::Relaxed))
    }

    /// Set log level and persist to disk. Takes effect on the next run.
    pub fn set_log_level(&self, level: LogLevel) -> Result<()> {
        self.log_level.store(level as u8, Ordering::Relaxed);

        let config = AppConfig { log_level: level };
        let content = serde_json::to_string_pretty(&config)?;
        std::fs::write(&self.config_path, content)?;

        info!(
            "[config] log level {} saved to {:?}",
            level.as_str(),
            self.config_path
        );
        Ok(())
    }
}
