use anyhow::Result;
use log::{debug, error};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::errors::DownloadError;
use crate::output_parser::ProcessOutput;

// @module: Downloader argument composition and invocation

/// Format selector passed to the downloader
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaFormat {
    /// Best single combined audio+video stream
    #[default]
    #[serde(rename = "b")]
    Best,

    /// Best audio-only stream
    #[serde(rename = "ba")]
    BestAudio,
}

impl MediaFormat {
    /// Selector code understood by the downloader
    pub fn code(&self) -> &'static str {
        match self {
            MediaFormat::Best => "b",
            MediaFormat::BestAudio => "ba",
        }
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for MediaFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "b" => Ok(MediaFormat::Best),
            "ba" => Ok(MediaFormat::BestAudio),
            _ => Err(anyhow::anyhow!("Invalid format selector: {}", s)),
        }
    }
}

/// Subtitle extraction request for one invocation
#[derive(Debug, Clone)]
pub struct SubtitleSelection {
    /// Requested subtitle language code
    pub lang: String,

    /// Request auto-generated captions instead of uploaded subtitles
    pub auto: bool,
}

/// Optional parts of one downloader invocation
#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    /// Output filename pattern handed to the downloader
    pub output_pattern: Option<String>,

    /// Cookies file forwarded to the downloader
    pub cookies: Option<PathBuf>,

    /// Dump metadata JSON instead of downloading
    pub dump_json: bool,

    /// Format selector, defaults to the best combined stream
    pub format: Option<MediaFormat>,

    /// Subtitle extraction mode
    pub subtitle: Option<SubtitleSelection>,
}

/// Compose the argument list for one invocation.
///
/// Pure function over the options so the exact flag sequence stays testable
/// without spawning anything.
pub fn build_args(url: &str, options: &DownloadOptions) -> Vec<String> {
    let mut args = vec![url.to_string()];

    if let Some(pattern) = &options.output_pattern {
        args.push("--output".to_string());
        args.push(pattern.clone());
    }

    if let Some(cookies) = &options.cookies {
        args.push("--cookies".to_string());
        args.push(cookies.display().to_string());
    }

    if options.dump_json {
        args.push("--dump-json".to_string());
    }

    args.push("--format".to_string());
    args.push(options.format.unwrap_or_default().code().to_string());

    if let Some(subtitle) = &options.subtitle {
        args.push(
            if subtitle.auto {
                "--write-auto-sub"
            } else {
                "--write-sub"
            }
            .to_string(),
        );
        args.push("--sub-lang".to_string());
        args.push(subtitle.lang.clone());
        args.push("--skip-download".to_string());
        args.push("--convert-subs".to_string());
        args.push("srt".to_string());
    }

    args
}

/// Run one downloader invocation and capture its output.
///
/// The invocation is raced against a timeout so a hung extractor cannot block
/// the application forever. A non-zero exit surfaces the filtered stderr.
pub async fn run<P: AsRef<Path>>(
    binary: P,
    url: &str,
    options: &DownloadOptions,
    timeout_secs: u64,
) -> Result<ProcessOutput> {
    let binary = binary.as_ref();
    let args = build_args(url, options);
    debug!("Invoking {} {}", binary.display(), args.join(" "));

    let invocation = Command::new(binary).args(&args).output();
    let timeout = std::time::Duration::from_secs(timeout_secs);

    let output = tokio::select! {
        result = invocation => {
            result.map_err(|e| DownloadError::Spawn(e.to_string()))?
        },
        _ = tokio::time::sleep(timeout) => {
            return Err(DownloadError::Timeout(timeout_secs).into());
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        let filtered = filter_downloader_stderr(&stderr);
        error!("Downloader invocation failed: {}", filtered);
        return Err(DownloadError::ProcessFailed(filtered).into());
    }

    Ok(ProcessOutput::new(stdout, stderr))
}

/// Filter downloader stderr to only show meaningful error lines, stripping
/// progress chatter, debug output, and warning noise.
pub fn filter_downloader_stderr(stderr: &str) -> String {
    let noise_prefixes = [
        "[debug]",
        "[download]",
        "[info]",
        "WARNING:",
        "Deleting original file",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !noise_prefixes.iter().any(|p| trimmed.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown downloader error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
