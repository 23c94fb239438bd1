use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::downloader::MediaFormat;
use crate::file_utils::FileManager;
use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Working directory holding the downloader binary and downloaded files
    #[serde(default = "default_workdir")]
    pub workdir: PathBuf,

    /// Cookies file forwarded to the downloader when set
    #[serde(default)]
    pub cookies: Option<PathBuf>,

    /// Subtitle language requested when an operation does not name one
    #[serde(default = "default_subtitle_language")]
    pub subtitle_language: String,

    /// Downloader process settings
    #[serde(default)]
    pub downloader: DownloaderConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for the external downloader process
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DownloaderConfig {
    /// Process timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Format selector used when a download does not specify one
    #[serde(default)]
    pub format: MediaFormat,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            format: MediaFormat::default(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Map to the log crate's level filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_workdir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("ytgrab"))
        .unwrap_or_else(|| PathBuf::from(".ytgrab"))
}

fn default_subtitle_language() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    600
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = FileManager::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration")?;
        FileManager::write_to_file(path, &content)
    }

    /// Validate field values
    pub fn validate(&self) -> Result<()> {
        if self.workdir.as_os_str().is_empty() {
            return Err(anyhow!("Working directory must not be empty"));
        }

        if self.downloader.timeout_secs == 0 {
            return Err(anyhow!("Downloader timeout must be greater than zero"));
        }

        language_utils::validate_language_code(&self.subtitle_language)
            .with_context(|| {
                format!(
                    "Invalid default subtitle language: {}",
                    self.subtitle_language
                )
            })?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            workdir: default_workdir(),
            cookies: None,
            subtitle_language: default_subtitle_language(),
            downloader: DownloaderConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
