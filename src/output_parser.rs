use std::path::PathBuf;
use once_cell::sync::Lazy;
use regex::Regex;
use crate::errors::DownloadError;

// @module: Downloader output parsing

// @const: "[download] <file> has already been downloaded" line, anchored on the
// progress prefix so the phrase appearing mid-text does not match
static ALREADY_DOWNLOADED_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[download\]\s+(\S+).* has already been downloaded").unwrap()
});

// @const: "Destination: <file>" line, path is the remainder after the marker
static DESTINATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Destination:\s*(.+)$").unwrap()
});

/// Captured output of one downloader invocation
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,
}

impl ProcessOutput {
    pub fn new(stdout: String, stderr: String) -> Self {
        ProcessOutput { stdout, stderr }
    }
}

/// Extract every file path the downloader reported as produced.
///
/// A batch invocation can report many files, through two kinds of lines:
/// files skipped because they were already present, and freshly written
/// destination files. Matches are collected per kind, already-downloaded
/// first, each kind in order of appearance in stdout.
///
/// An invocation that reported no path at all is indistinguishable from one
/// whose output format changed, so zero matches is an error carrying the raw
/// output for diagnosis.
pub fn parse_produced_paths(output: &ProcessOutput) -> Result<Vec<PathBuf>, DownloadError> {
    let mut paths: Vec<PathBuf> = output
        .stdout
        .lines()
        .filter_map(|line| ALREADY_DOWNLOADED_REGEX.captures(line))
        .map(|caps| PathBuf::from(&caps[1]))
        .collect();

    for line in output.stdout.lines() {
        if let Some(caps) = DESTINATION_REGEX.captures(line) {
            let path = caps[1].trim();
            // A bare "Destination:" marker with nothing after it is not a match
            if !path.is_empty() {
                paths.push(PathBuf::from(path));
            }
        }
    }

    if paths.is_empty() {
        return Err(DownloadError::PathParse {
            output: output.stdout.clone(),
        });
    }

    Ok(paths)
}

/// Extract the single produced path of a one-target invocation.
pub fn parse_first_produced_path(output: &ProcessOutput) -> Result<PathBuf, DownloadError> {
    let mut paths = parse_produced_paths(output)?;
    Ok(paths.remove(0))
}
