use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// This module provides functions for validating subtitle language codes
/// (ISO 639-1 2-letter and ISO 639-3 3-letter) and for matching them against
/// the language-tag keys of a subtitle track table.
/// Validate that a code is a recognized ISO 639-1 or ISO 639-3 language code
pub fn validate_language_code(code: &str) -> Result<()> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 && Language::from_639_1(&normalized_code).is_some() {
        return Ok(());
    }

    if normalized_code.len() == 3 && Language::from_639_3(&normalized_code).is_some() {
        return Ok(());
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// English name for a language code, for log and error messages
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    let language = match normalized_code.len() {
        2 => Language::from_639_1(&normalized_code),
        3 => Language::from_639_3(&normalized_code),
        _ => None,
    };

    language
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Whether a subtitle-track key advertises the requested language.
///
/// Track keys are tags like "en", "en-US" or "en-orig"; a bare code matches
/// any of its regional or qualified variants. Matching is case-insensitive
/// containment of the requested code in the key.
pub fn key_matches_language(key: &str, lang: &str) -> bool {
    if lang.is_empty() {
        return false;
    }
    key.to_lowercase().contains(&lang.trim().to_lowercase())
}
