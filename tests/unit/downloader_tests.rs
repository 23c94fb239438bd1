/*!
 * Tests for downloader argument composition and stderr filtering
 */

use std::path::PathBuf;
use ytgrab::downloader::{DownloadOptions, MediaFormat, SubtitleSelection, build_args, filter_downloader_stderr};

#[test]
fn test_build_args_withUrlOnly_shouldDefaultToBestFormat() {
    let args = build_args("https://example.com/v", &DownloadOptions::default());

    assert_eq!(args, vec!["https://example.com/v", "--format", "b"]);
}

#[test]
fn test_build_args_withAudioFormat_shouldUseAudioSelector() {
    let options = DownloadOptions {
        format: Some(MediaFormat::BestAudio),
        ..Default::default()
    };

    let args = build_args("https://example.com/v", &options);

    assert_eq!(args, vec!["https://example.com/v", "--format", "ba"]);
}

#[test]
fn test_build_args_withAllOptionals_shouldKeepFlagOrder() {
    let options = DownloadOptions {
        output_pattern: Some("/work/%(title)s.%(ext)s".to_string()),
        cookies: Some(PathBuf::from("/home/u/cookies.txt")),
        dump_json: true,
        format: Some(MediaFormat::Best),
        subtitle: None,
    };

    let args = build_args("https://example.com/v", &options);

    assert_eq!(
        args,
        vec![
            "https://example.com/v",
            "--output",
            "/work/%(title)s.%(ext)s",
            "--cookies",
            "/home/u/cookies.txt",
            "--dump-json",
            "--format",
            "b",
        ]
    );
}

#[test]
fn test_build_args_withUploadedSubtitles_shouldAppendSubtitleFlags() {
    let options = DownloadOptions {
        subtitle: Some(SubtitleSelection {
            lang: "en".to_string(),
            auto: false,
        }),
        ..Default::default()
    };

    let args = build_args("https://example.com/v", &options);

    assert_eq!(
        args,
        vec![
            "https://example.com/v",
            "--format",
            "b",
            "--write-sub",
            "--sub-lang",
            "en",
            "--skip-download",
            "--convert-subs",
            "srt",
        ]
    );
}

#[test]
fn test_build_args_withAutoCaptions_shouldRequestAutoSub() {
    let options = DownloadOptions {
        subtitle: Some(SubtitleSelection {
            lang: "fr".to_string(),
            auto: true,
        }),
        ..Default::default()
    };

    let args = build_args("https://example.com/v", &options);

    assert!(args.contains(&"--write-auto-sub".to_string()));
    assert!(!args.contains(&"--write-sub".to_string()));
}

#[test]
fn test_media_format_parsing_withKnownCodes_shouldRoundTrip() {
    assert_eq!("b".parse::<MediaFormat>().unwrap(), MediaFormat::Best);
    assert_eq!("ba".parse::<MediaFormat>().unwrap(), MediaFormat::BestAudio);
    assert_eq!(MediaFormat::Best.to_string(), "b");
    assert_eq!(MediaFormat::BestAudio.to_string(), "ba");
    assert!("bv".parse::<MediaFormat>().is_err());
}

#[test]
fn test_filter_downloader_stderr_withNoise_shouldKeepErrorLinesOnly() {
    let stderr = "\
WARNING: unable to obtain file audio codec with ffprobe
[debug] Command-line config: ['https://example.com/v']
ERROR: [youtube] xyz: Video unavailable
[download] Got server HTTP error";

    let filtered = filter_downloader_stderr(stderr);

    assert_eq!(filtered, "ERROR: [youtube] xyz: Video unavailable");
}

#[test]
fn test_filter_downloader_stderr_withOnlyNoise_shouldReportUnknownError() {
    let filtered = filter_downloader_stderr("WARNING: something minor\n\n[debug] chatter");

    assert!(filtered.contains("unknown downloader error"));
}
