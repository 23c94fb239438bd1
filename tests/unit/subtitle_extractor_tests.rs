/*!
 * Tests for subtitle text extraction
 */

use std::path::Path;
use ytgrab::errors::SubtitleError;
use ytgrab::subtitle_extractor::{SubtitleDocument, SubtitleFormat};

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|line| line.to_string()).collect()
}

fn json3_doc(json: &str) -> SubtitleDocument {
    SubtitleDocument::from_content(SubtitleFormat::Json3, json).unwrap()
}

#[test]
fn test_format_from_path_withKnownExtensions_shouldResolve() {
    assert_eq!(SubtitleFormat::from_path("a.json3").unwrap(), SubtitleFormat::Json3);
    assert_eq!(SubtitleFormat::from_path("a.vtt").unwrap(), SubtitleFormat::Vtt);
    assert_eq!(SubtitleFormat::from_path("a.srt").unwrap(), SubtitleFormat::Srt);
}

#[test]
fn test_format_from_path_withUppercaseExtension_shouldResolve() {
    assert_eq!(SubtitleFormat::from_path("a.SRT").unwrap(), SubtitleFormat::Srt);
}

#[test]
fn test_format_from_path_withUnknownExtension_shouldFailNamingPath() {
    let result = SubtitleFormat::from_path(Path::new("captions.ttml"));

    match result {
        Err(SubtitleError::UnsupportedFormat(path)) => {
            assert_eq!(path, Path::new("captions.ttml"));
        }
        other => panic!("Expected UnsupportedFormat error, got {:?}", other),
    }
}

#[test]
fn test_format_from_path_withNoExtension_shouldFail() {
    assert!(SubtitleFormat::from_path("captions").is_err());
}

#[test]
fn test_normalize_json3_withTwoSegments_shouldJoinWithSpace() {
    let doc = json3_doc(r#"{"events":[{"segs":[{"utf8":"Example"},{"utf8":"subtitle."}]}]}"#);

    assert_eq!(doc.normalize(), "Example subtitle.");
}

#[test]
fn test_normalize_json3_withEmbeddedLineBreaks_shouldCollapseToSpaces() {
    let doc = json3_doc(r#"{"events":[{"segs":[{"utf8":"line one\nline two"}]},{"segs":[{"utf8":"line\r\nthree"}]}]}"#);

    let text = doc.normalize();

    assert_eq!(text, "line one line two line three");
    assert!(!text.contains('\n'));
    assert!(!text.contains('\r'));
}

#[test]
fn test_normalize_json3_withEmptyEvents_shouldReturnEmptyString() {
    let doc = json3_doc(r#"{"events":[]}"#);

    assert_eq!(doc.normalize(), "");
}

#[test]
fn test_json3_from_content_withMissingSegs_shouldFail() {
    // Structural faults propagate; there is no partial recovery
    let result = SubtitleDocument::from_content(
        SubtitleFormat::Json3,
        r#"{"events":[{"tStartMs":0}]}"#,
    );

    assert!(result.is_err());
}

#[test]
fn test_json3_from_content_withNonJsonContent_shouldFail() {
    assert!(SubtitleDocument::from_content(SubtitleFormat::Json3, "WEBVTT").is_err());
}

#[test]
fn test_normalize_vtt_withHeaderAndCue_shouldStripHeaderOnly() {
    let doc = SubtitleDocument::Vtt {
        lines: lines(&["WEBVTT", "", "00:00:00.000 --> 00:00:02.000", "Hello world"]),
    };

    // The empty line still contributes a joint, so the result keeps its
    // leading space; timing lines survive this shallow normalization
    assert_eq!(doc.normalize(), " 00:00:00.000 --> 00:00:02.000 Hello world");
}

#[test]
fn test_normalize_vtt_withNoteLines_shouldDropThem() {
    let doc = SubtitleDocument::Vtt {
        lines: lines(&["WEBVTT", "NOTE this is a comment", "Hello"]),
    };

    assert_eq!(doc.normalize(), "Hello");
}

#[test]
fn test_normalize_vtt_withCarriageReturns_shouldFollowCollapseRule() {
    // CRLF input leaves a \r at the end of each split line; the collapse
    // turns it into a space next to the join space
    let doc = SubtitleDocument::from_content(SubtitleFormat::Vtt, "WEBVTT\r\nHello\r\nworld").unwrap();

    assert_eq!(doc.normalize(), "Hello  world");
}

#[test]
fn test_normalize_srt_withIndexAndTimestamp_shouldKeepTextOnly() {
    let doc = SubtitleDocument::Srt {
        lines: lines(&["1", "00:00:00,000 --> 00:00:02,000", "Example subtitle text."]),
    };

    assert_eq!(doc.normalize(), "Example subtitle text.");
}

#[test]
fn test_normalize_srt_withDialogueDashes_shouldTurnDashesIntoSpaces() {
    let doc = SubtitleDocument::Srt {
        lines: lines(&["- Who's there?", "- Nobody - at all."]),
    };

    assert_eq!(doc.normalize(), "Who's there? Nobody at all.");
}

#[test]
fn test_normalize_srt_withAdjacentDuplicates_shouldKeepOneOccurrence() {
    let doc = SubtitleDocument::Srt {
        lines: lines(&["Hello", "Hello", "World"]),
    };

    assert_eq!(doc.normalize(), "Hello World");
}

#[test]
fn test_normalize_srt_withNonAdjacentRepeats_shouldKeepBoth() {
    let doc = SubtitleDocument::Srt {
        lines: lines(&["Hello", "World", "Hello"]),
    };

    assert_eq!(doc.normalize(), "Hello World Hello");
}

#[test]
fn test_normalize_srt_withEmptyLineBetweenDuplicates_shouldStillSuppress() {
    // The previous-line slot is replaced only by a new non-empty line, so a
    // blank line between repeats does not reset suppression
    let doc = SubtitleDocument::Srt {
        lines: lines(&["Hello", "", "Hello"]),
    };

    assert_eq!(doc.normalize(), "Hello");
}

#[test]
fn test_normalize_srt_withInternalWhitespaceRuns_shouldCollapse() {
    let doc = SubtitleDocument::Srt {
        lines: lines(&["  Too   many\tspaces  "]),
    };

    assert_eq!(doc.normalize(), "Too many spaces");
}

#[test]
fn test_normalize_srt_withFullCueBlocks_shouldFlattenTranscript() {
    let doc = SubtitleDocument::Srt {
        lines: lines(&[
            "1",
            "00:00:01,000 --> 00:00:04,000",
            "This is a test subtitle.",
            "",
            "2",
            "00:00:05,000 --> 00:00:09,000",
            "It contains multiple entries.",
        ]),
    };

    assert_eq!(doc.normalize(), "This is a test subtitle. It contains multiple entries.");
}

#[test]
fn test_normalize_srt_withOnlyDigitLeadingLines_shouldReturnEmptyString() {
    let doc = SubtitleDocument::Srt {
        lines: lines(&["1", "00:00:01,000 --> 00:00:04,000", "2"]),
    };

    assert_eq!(doc.normalize(), "");
}

#[test]
fn test_normalize_withAnyVariant_shouldNeverEmitLineBreaks() {
    let docs = vec![
        json3_doc(r#"{"events":[{"segs":[{"utf8":"a\nb\r\nc"}]}]}"#),
        SubtitleDocument::from_content(SubtitleFormat::Vtt, "WEBVTT\nx\r\ny\nz").unwrap(),
        SubtitleDocument::from_content(SubtitleFormat::Srt, "x\r\ny\nz").unwrap(),
    ];

    for doc in docs {
        let text = doc.normalize();
        assert!(!text.contains('\n'), "unexpected line feed in {:?}", text);
        assert!(!text.contains('\r'), "unexpected carriage return in {:?}", text);
    }
}
