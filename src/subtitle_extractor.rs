use std::fmt;
use std::path::Path;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::errors::SubtitleError;
use crate::file_utils::FileManager;

// @module: Subtitle text extraction

// @const: Run of line breaks, collapsed to a single space in flattened text
static LINE_BREAK_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n]+").unwrap());

// @const: Run of whitespace inside an SRT line
static WHITESPACE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Recognized subtitle container formats.
///
/// The format is always chosen from the file extension by the caller;
/// extraction never sniffs content to guess a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    /// Structured-event JSON captions
    Json3,
    /// WebVTT
    Vtt,
    /// SubRip
    Srt,
}

impl SubtitleFormat {
    /// Resolve the format from a file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SubtitleError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json3") => Ok(SubtitleFormat::Json3),
            Some(ext) if ext.eq_ignore_ascii_case("vtt") => Ok(SubtitleFormat::Vtt),
            Some(ext) if ext.eq_ignore_ascii_case("srt") => Ok(SubtitleFormat::Srt),
            _ => Err(SubtitleError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            SubtitleFormat::Json3 => "json3",
            SubtitleFormat::Vtt => "vtt",
            SubtitleFormat::Srt => "srt",
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// One text fragment of a json3 caption event
#[derive(Debug, Clone, Deserialize)]
pub struct Json3Segment {
    /// Fragment text
    pub utf8: String,
}

/// One timed caption event holding its text segments
#[derive(Debug, Clone, Deserialize)]
pub struct Json3Event {
    /// Text segments in display order
    pub segs: Vec<Json3Segment>,
}

/// Top-level json3 caption document.
///
/// Field names follow the downloader's json3 wire format. A document missing
/// the expected fields fails deserialization; that failure propagates as-is,
/// there is no partial recovery.
#[derive(Debug, Clone, Deserialize)]
pub struct Json3Track {
    /// Caption events in time order
    pub events: Vec<Json3Event>,
}

/// A subtitle document tagged with its container format
#[derive(Debug, Clone)]
pub enum SubtitleDocument {
    /// Parsed json3 caption track
    Json3(Json3Track),
    /// Raw WebVTT lines
    Vtt {
        /// File content split on line feeds
        lines: Vec<String>,
    },
    /// Raw SubRip lines
    Srt {
        /// File content split on line feeds
        lines: Vec<String>,
    },
}

impl SubtitleDocument {
    /// Build a document for an already-identified format
    pub fn from_content(format: SubtitleFormat, content: &str) -> Result<Self> {
        match format {
            SubtitleFormat::Json3 => {
                let track: Json3Track = serde_json::from_str(content)
                    .context("Failed to parse json3 subtitle data")?;
                Ok(SubtitleDocument::Json3(track))
            }
            SubtitleFormat::Vtt => Ok(SubtitleDocument::Vtt {
                lines: split_lines(content),
            }),
            SubtitleFormat::Srt => Ok(SubtitleDocument::Srt {
                lines: split_lines(content),
            }),
        }
    }

    /// Flatten the document to a single plain-text transcript.
    ///
    /// Timing, cue indices and speaker structure do not survive; the result
    /// never contains carriage returns or line feeds.
    pub fn normalize(&self) -> String {
        match self {
            SubtitleDocument::Json3(track) => normalize_json3(track),
            SubtitleDocument::Vtt { lines } => normalize_vtt(lines),
            SubtitleDocument::Srt { lines } => normalize_srt(lines),
        }
    }
}

/// Read a subtitle file and flatten it to plain text, dispatching on the
/// file extension alone.
pub fn extract_text_from_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let format = SubtitleFormat::from_path(path)?;
    let content = FileManager::read_to_string(path)?;
    let document = SubtitleDocument::from_content(format, &content)?;
    Ok(document.normalize())
}

fn split_lines(content: &str) -> Vec<String> {
    content.split('\n').map(str::to_string).collect()
}

/// Join every segment of every event with single spaces, in event order then
/// segment order, then collapse embedded line breaks.
fn normalize_json3(track: &Json3Track) -> String {
    let joined = track
        .events
        .iter()
        .flat_map(|event| event.segs.iter().map(|segment| segment.utf8.as_str()))
        .collect::<Vec<_>>()
        .join(" ");

    LINE_BREAK_RUN_REGEX.replace_all(&joined, " ").into_owned()
}

/// Drop header and comment lines, keep everything else.
///
/// Cue timing and index lines are left in on purpose; this is a shallow
/// normalization and residual timing artifacts are accepted.
fn normalize_vtt(lines: &[String]) -> String {
    let joined = lines
        .iter()
        .filter(|line| !line.starts_with("WEBVTT") && !line.starts_with("NOTE"))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    LINE_BREAK_RUN_REGEX.replace_all(&joined, " ").into_owned()
}

/// Clean each SRT line, dropping cue indices and timestamps, then join the
/// survivors while suppressing immediate duplicates.
///
/// The fold carries `(kept_lines, last_emitted)` so duplicate suppression
/// stays local to this function: `last_emitted` is replaced only when a new
/// non-empty line is appended, so non-adjacent repeats are all retained.
fn normalize_srt(lines: &[String]) -> String {
    let (kept, _) = lines.iter().fold(
        (Vec::new(), String::new()),
        |(mut kept, last_emitted), line| {
            let cleaned = clean_srt_line(line);
            if !cleaned.is_empty() && cleaned != last_emitted {
                kept.push(cleaned.clone());
                (kept, cleaned)
            } else {
                (kept, last_emitted)
            }
        },
    );

    kept.join(" ").trim().to_string()
}

/// Cleanup rules for one SRT line: trim, drop digit-leading lines, turn
/// dashes into spaces, collapse whitespace runs, trim again.
///
/// Cue indices and timestamp lines both lead with a digit, so one rule
/// removes both.
fn clean_srt_line(line: &str) -> String {
    let trimmed = line.trim();
    if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        return String::new();
    }

    let dashless = trimmed.replace('-', " ");
    let collapsed = WHITESPACE_RUN_REGEX.replace_all(&dashless, " ");
    collapsed.trim().to_string()
}
