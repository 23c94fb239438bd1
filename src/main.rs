// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::app_controller::Controller;
use crate::downloader::{DownloadOptions, MediaFormat};
use crate::file_utils::FileManager;

mod app_config;
mod app_controller;
mod binary_manager;
mod downloader;
mod errors;
mod file_utils;
mod language_utils;
mod media_info;
mod output_parser;
mod subtitle_extractor;

/// CLI Wrapper for MediaFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliMediaFormat {
    /// Best single combined stream
    Best,
    /// Best audio-only stream
    Audio,
}

impl From<CliMediaFormat> for MediaFormat {
    fn from(cli_format: CliMediaFormat) -> Self {
        match cli_format {
            CliMediaFormat::Best => MediaFormat::Best,
            CliMediaFormat::Audio => MediaFormat::BestAudio,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print media metadata as JSON
    Info {
        /// Media URL
        url: String,
    },

    /// Download the media file into the working directory
    Download {
        /// Media URL
        url: String,

        /// Format selector
        #[arg(short, long, value_enum)]
        format: Option<CliMediaFormat>,
    },

    /// Download the best audio-only stream
    Audio {
        /// Media URL
        url: String,
    },

    /// Download a subtitle file
    Subtitle {
        /// Media URL
        url: String,

        /// Subtitle language code (e.g. 'en', 'fr')
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Print the flattened subtitle transcript
    Text {
        /// Media URL, or path of a local subtitle file
        source: String,

        /// Subtitle language code (e.g. 'en', 'fr')
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Generate shell completions for ytgrab
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// ytgrab - media download and subtitle text extraction
///
/// Wraps the yt-dlp downloader: fetches the binary when missing, downloads
/// media, audio and subtitle files, and flattens subtitles to plain text.
#[derive(Parser, Debug)]
#[command(name = "ytgrab")]
#[command(version = "0.1.0")]
#[command(about = "Media download and subtitle text extraction")]
#[command(long_about = "ytgrab wraps the yt-dlp downloader: it fetches the binary when missing,
downloads media, audio and subtitle files, and flattens subtitles to plain text.

EXAMPLES:
    ytgrab info https://youtu.be/xyz               # Print metadata JSON
    ytgrab download https://youtu.be/xyz           # Download the media file
    ytgrab audio https://youtu.be/xyz              # Download audio only
    ytgrab subtitle -l en https://youtu.be/xyz     # Download English subtitles
    ytgrab text -l en https://youtu.be/xyz         # Print the transcript
    ytgrab text captions.srt                       # Flatten a local subtitle file
    ytgrab completions bash > ytgrab.bash          # Generate bash completions

CONFIGURATION:
    Configuration is stored in ytgrab.json by default. You can specify a
    different config file with --config. If the config file doesn't exist,
    built-in defaults are used.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "ytgrab.json")]
    config_path: String,

    /// Working directory override
    #[arg(short, long)]
    workdir: Option<PathBuf>,

    /// Cookies file forwarded to the downloader
    #[arg(long)]
    cookies: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Load the configuration file when present, otherwise fall back to defaults
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = if FileManager::file_exists(&cli.config_path) {
        Config::from_file(&cli.config_path)?
    } else {
        debug!("Config file {} not found, using defaults", cli.config_path);
        Config::default()
    };

    if let Some(workdir) = &cli.workdir {
        config.workdir = workdir.clone();
    }
    if let Some(cookies) = &cli.cookies {
        config.cookies = Some(cookies.clone());
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // The level is updated after loading the config
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "ytgrab", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Info { url } => {
            let info = controller.media_info(&url).await?;
            let json = serde_json::to_string_pretty(&info)
                .context("Failed to serialize media metadata")?;
            println!("{json}");
        }

        Commands::Download { url, format } => {
            let options = DownloadOptions {
                format: format
                    .map(MediaFormat::from)
                    .or(Some(controller.config().downloader.format)),
                ..Default::default()
            };
            let downloaded = controller.download(url.into(), options).await?;
            println!("{}", downloaded.media_path.display());
        }

        Commands::Audio { url } => {
            let downloaded = controller.download_audio(url.into()).await?;
            println!("{}", downloaded.media_path.display());
        }

        Commands::Subtitle { url, language } => {
            let downloaded = controller
                .download_subtitle(url.into(), language.as_deref())
                .await?;
            println!("{}", downloaded.subtitle_path.display());
        }

        Commands::Text { source, language } => {
            // A local subtitle file skips the download entirely
            if Path::new(&source).is_file() {
                let text = subtitle_extractor::extract_text_from_path(&source)?;
                println!("{text}");
            } else {
                let transcript = controller
                    .subtitle_text(source.into(), language.as_deref())
                    .await?;
                println!("{}", transcript.text);
            }
        }

        Commands::Completions { .. } => unreachable!("handled before config loading"),
    }

    Ok(())
}
