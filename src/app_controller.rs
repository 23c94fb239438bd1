use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Duration;

use crate::app_config::Config;
use crate::binary_manager::{self, BinaryManager};
use crate::downloader::{self, DownloadOptions, MediaFormat, SubtitleSelection};
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::media_info::MediaInfo;
use crate::output_parser::{self, ProcessOutput};
use crate::subtitle_extractor;

// @module: Application controller for download and extraction flows

/// Input accepted by download operations: a URL still to be resolved into
/// metadata, or metadata retrieved earlier and passed back in
#[derive(Debug, Clone)]
pub enum MediaSource {
    /// Media URL, resolved through a metadata invocation first
    Url(String),
    /// Already-resolved metadata, used as-is
    Info(Box<MediaInfo>),
}

impl From<&str> for MediaSource {
    fn from(url: &str) -> Self {
        MediaSource::Url(url.to_string())
    }
}

impl From<String> for MediaSource {
    fn from(url: String) -> Self {
        MediaSource::Url(url)
    }
}

impl From<MediaInfo> for MediaSource {
    fn from(info: MediaInfo) -> Self {
        MediaSource::Info(Box::new(info))
    }
}

/// Outcome of a media download
#[derive(Debug)]
pub struct DownloadedMedia {
    /// Path of the produced media file
    pub media_path: PathBuf,

    /// Metadata of the downloaded item
    pub info: MediaInfo,
}

/// Outcome of a subtitle download
#[derive(Debug)]
pub struct DownloadedSubtitle {
    /// Path of the produced subtitle file
    pub subtitle_path: PathBuf,

    /// Metadata of the item the subtitle belongs to
    pub info: MediaInfo,
}

/// Outcome of a subtitle download plus text extraction
#[derive(Debug)]
pub struct SubtitleTranscript {
    /// Flattened transcript text
    pub text: String,

    /// Path of the subtitle file the text came from
    pub subtitle_path: PathBuf,

    /// Metadata of the item the subtitle belongs to
    pub info: MediaInfo,
}

/// Main application controller for download and extraction flows
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Downloader binary management
    binaries: BinaryManager,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        FileManager::ensure_dir(&config.workdir)?;
        let binaries = BinaryManager::new(&config.workdir);

        Ok(Controller { config, binaries })
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch the downloader binary when it is not present yet
    pub async fn ensure_downloader(&self) -> Result<PathBuf> {
        self.binaries.ensure_binary().await
    }

    /// One downloader invocation with the configured cookies and timeout
    async fn exec(&self, url: &str, mut options: DownloadOptions) -> Result<ProcessOutput> {
        if options.cookies.is_none() {
            options.cookies = self.config.cookies.clone();
        }

        let binary = self.ensure_downloader().await?;
        downloader::run(&binary, url, &options, self.config.downloader.timeout_secs).await
    }

    /// Retrieve media metadata without downloading anything
    pub async fn media_info(&self, url: &str) -> Result<MediaInfo> {
        url::Url::parse(url).with_context(|| format!("Invalid media URL: {url}"))?;

        let options = DownloadOptions {
            dump_json: true,
            ..Default::default()
        };
        let output = self.exec(url, options).await?;

        let info: MediaInfo = serde_json::from_str(&output.stdout)
            .context("Failed to parse media metadata JSON")?;
        debug!("Resolved metadata for '{}' ({})", info.title, info.id);
        Ok(info)
    }

    /// Resolve a source into metadata, invoking the downloader for URLs
    async fn resolve_source(&self, source: MediaSource) -> Result<MediaInfo> {
        match source {
            MediaSource::Url(url) => self.media_info(&url).await,
            MediaSource::Info(info) => Ok(*info),
        }
    }

    /// Download the media file of a single item into the working directory
    pub async fn download(
        &self,
        source: MediaSource,
        options: DownloadOptions,
    ) -> Result<DownloadedMedia> {
        let info = self.resolve_source(source).await?;

        if info.is_playlist_entry() {
            return Err(anyhow!("This is a playlist, not a single video: {}", info.title));
        }

        let pattern = self.config.workdir.join("%(title)s.%(ext)s");
        let options = DownloadOptions {
            output_pattern: Some(pattern.display().to_string()),
            ..options
        };

        let spinner = start_spinner(&format!("Downloading {}", info.title));
        let result = self.exec(&info.original_url, options).await;
        spinner.finish_and_clear();
        let output = result?;

        // The downloader can exit zero while still reporting extractor errors
        if output.stderr.contains("ERROR") {
            return Err(anyhow!("Downloader reported an error: {}", output.stderr));
        }

        let media_path = output_parser::parse_first_produced_path(&output)?;
        info!("Downloaded {}", media_path.display());
        Ok(DownloadedMedia { media_path, info })
    }

    /// Download the best audio-only stream of a single item
    pub async fn download_audio(&self, source: MediaSource) -> Result<DownloadedMedia> {
        let options = DownloadOptions {
            format: Some(MediaFormat::BestAudio),
            ..Default::default()
        };
        self.download(source, options).await
    }

    /// Download the subtitle file of a single item.
    ///
    /// Preference order: a directly-fetchable json3 variant of an uploaded
    /// track, an uploaded track converted to SRT by the downloader, and
    /// auto-generated captions when no uploaded track is listed at all.
    pub async fn download_subtitle(
        &self,
        source: MediaSource,
        lang: Option<&str>,
    ) -> Result<DownloadedSubtitle> {
        let lang = lang.unwrap_or(&self.config.subtitle_language);
        if let Err(e) = language_utils::validate_language_code(lang) {
            warn!("Language code issue: {}", e);
        }

        let info = self.resolve_source(source).await?;

        if !info.has_subtitles() {
            debug!("No uploaded subtitles listed, requesting auto-generated captions");
            let subtitle_path = self.fetch_subtitle_via_downloader(&info, lang, true).await?;
            return Ok(DownloadedSubtitle { subtitle_path, info });
        }

        let key = info
            .find_subtitle_key(lang)
            .ok_or_else(|| SubtitleError::LanguageNotAvailable(lang.to_string()))?
            .to_string();

        if let Some(variant) = info.find_variant(&key, "json3") {
            let target = self
                .config
                .workdir
                .join(format!("{}.{}", info.id, variant.ext));

            if FileManager::file_exists(&target) {
                debug!("Reusing existing subtitle file {}", target.display());
                return Ok(DownloadedSubtitle { subtitle_path: target, info });
            }

            let variant_url = variant.url.clone();
            binary_manager::download_file(self.binaries.client(), &variant_url, &target).await?;
            info!("Fetched {} subtitle to {}", key, target.display());
            return Ok(DownloadedSubtitle { subtitle_path: target, info });
        }

        let subtitle_path = self.fetch_subtitle_via_downloader(&info, lang, false).await?;
        Ok(DownloadedSubtitle { subtitle_path, info })
    }

    /// Download a subtitle file and flatten it to plain text
    pub async fn subtitle_text(
        &self,
        source: MediaSource,
        lang: Option<&str>,
    ) -> Result<SubtitleTranscript> {
        let downloaded = self.download_subtitle(source, lang).await?;
        let text = subtitle_extractor::extract_text_from_path(&downloaded.subtitle_path)?;

        Ok(SubtitleTranscript {
            text,
            subtitle_path: downloaded.subtitle_path,
            info: downloaded.info,
        })
    }

    /// Run the downloader in subtitle mode and return the produced file path
    async fn fetch_subtitle_via_downloader(
        &self,
        info: &MediaInfo,
        lang: &str,
        auto: bool,
    ) -> Result<PathBuf> {
        let options = DownloadOptions {
            output_pattern: Some(self.config.workdir.join(&info.id).display().to_string()),
            subtitle: Some(SubtitleSelection {
                lang: lang.to_string(),
                auto,
            }),
            ..Default::default()
        };

        let spinner = start_spinner(&format!("Fetching {} subtitles", lang));
        let result = self.exec(&info.original_url, options).await;
        spinner.finish_and_clear();
        let output = result?;

        let reported = output_parser::parse_first_produced_path(&output)?;
        Ok(converted_subtitle_path(reported))
    }
}

/// The downloader reports the fetched file, but SRT conversion runs
/// afterwards; the file left on disk carries the .srt extension.
fn converted_subtitle_path(path: PathBuf) -> PathBuf {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("vtt") => path.with_extension("srt"),
        _ => path,
    }
}

/// Spinner shown while a downloader invocation is in flight
fn start_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
