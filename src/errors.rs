/*!
 * Error types for the ytgrab application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when acquiring or running the external downloader
#[derive(Error, Debug)]
pub enum DownloadError {
    /// No produced file path could be recovered from the downloader output
    #[error("Failed to parse produced file path from downloader output:\n{output}")]
    PathParse {
        /// Raw captured output, kept for diagnosis
        output: String,
    },

    /// The downloader process exited with a failure status
    #[error("Downloader exited with an error: {0}")]
    ProcessFailed(String),

    /// The downloader process could not be spawned
    #[error("Failed to spawn downloader process: {0}")]
    Spawn(String),

    /// The downloader process exceeded the configured timeout
    #[error("Downloader timed out after {0} seconds")]
    Timeout(u64),

    /// The release feed had no binary asset for this platform
    #[error("Release feed did not contain a '{0}' asset")]
    MissingReleaseAsset(String),

    /// A network fetch failed
    #[error("Failed to fetch {url}: {reason}")]
    Fetch {
        /// URL that was requested
        url: String,
        /// Failure description
        reason: String,
    },
}

/// Errors that can occur during subtitle processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The file extension matches none of the known subtitle formats
    #[error("Unsupported subtitle format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The media has no subtitle track for the requested language
    #[error("No subtitles found for language: {0}")]
    LanguageNotAvailable(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the downloader
    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
