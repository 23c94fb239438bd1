use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use crate::language_utils;

/// Media metadata module
/// This module models the subset of the downloader's `--dump-json` document
/// that the application consumes. Unknown fields are ignored on purpose; the
/// full document is large and version-dependent.
/// One downloadable rendition of a subtitle track
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubtitleVariant {
    /// Container format of this rendition (e.g. "json3", "vtt", "srv1")
    pub ext: String,

    /// Direct fetch URL
    pub url: String,

    /// Human-readable track name
    #[serde(default)]
    pub name: Option<String>,

    /// Transfer protocol when not plain https
    #[serde(default)]
    pub protocol: Option<String>,
}

/// Metadata for a single media item
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MediaInfo {
    /// Stable media identifier
    pub id: String,

    /// Media title
    pub title: String,

    /// Canonical URL the metadata was resolved from
    #[serde(default)]
    pub original_url: String,

    /// Web page URL
    #[serde(default)]
    pub webpage_url: String,

    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,

    /// Container extension of the selected format
    #[serde(default)]
    pub ext: Option<String>,

    /// Playlist title when this item came from a playlist listing
    #[serde(default)]
    pub playlist: Option<String>,

    /// Position within a playlist listing
    #[serde(default)]
    pub playlist_index: Option<u64>,

    /// Uploader display name
    #[serde(default)]
    pub uploader: Option<String>,

    /// Channel display name
    #[serde(default)]
    pub channel: Option<String>,

    /// Uploaded subtitle tracks, keyed by language tag
    #[serde(default)]
    pub subtitles: BTreeMap<String, Vec<SubtitleVariant>>,

    /// Auto-generated caption tracks, keyed by language tag
    #[serde(default)]
    pub automatic_captions: BTreeMap<String, Vec<SubtitleVariant>>,
}

impl MediaInfo {
    /// Whether this metadata describes a playlist entry rather than a single
    /// directly-downloadable item
    pub fn is_playlist_entry(&self) -> bool {
        self.playlist_index.is_some()
    }

    /// Whether any uploaded subtitle track is listed
    pub fn has_subtitles(&self) -> bool {
        !self.subtitles.is_empty()
    }

    /// First subtitle-track key advertising the requested language.
    ///
    /// Keys are language tags such as "en", "en-US" or "en-orig"; matching is
    /// by containment so a bare code finds its regional variants. Keys are
    /// visited in sorted order, which keeps the choice deterministic.
    pub fn find_subtitle_key(&self, lang: &str) -> Option<&str> {
        self.subtitles
            .keys()
            .find(|key| language_utils::key_matches_language(key, lang))
            .map(String::as_str)
    }

    /// The variant of a subtitle track with the given container format
    pub fn find_variant(&self, key: &str, ext: &str) -> Option<&SubtitleVariant> {
        self.subtitles
            .get(key)
            .and_then(|variants| variants.iter().find(|variant| variant.ext == ext))
    }
}

impl fmt::Display for MediaInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Media: {}", self.title)?;
        writeln!(f, "Id: {}", self.id)?;
        if let Some(duration) = self.duration {
            writeln!(f, "Duration: {duration}s")?;
        }
        writeln!(f, "Subtitle languages: {}", self.subtitles.len())?;
        Ok(())
    }
}
