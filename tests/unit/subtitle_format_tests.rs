/*!
 * Tests for subtitle serialization and the timestamp codec
 */

use yacex::subtitle_format::{self, ExportFormat, PREVIEW_LIMIT, build_preview, format_timestamp, render};
use yacex::transcript::CaptionFragment;
use crate::common;

/// Test basic timestamp formatting with both separators
#[test]
fn test_formatTimestamp_withWholeComponents_shouldZeroPad() {
    assert_eq!(format_timestamp(0.0, ','), "00:00:00,000");
    assert_eq!(format_timestamp(2.5, ','), "00:00:02,500");
    assert_eq!(format_timestamp(2.5, '.'), "00:00:02.500");
    assert_eq!(format_timestamp(3661.042, ','), "01:01:01,042");
}

/// Milliseconds that round to 1000 carry into the seconds field
#[test]
fn test_formatTimestamp_withRoundedMillis_shouldCarryIntoSeconds() {
    assert_eq!(format_timestamp(0.9996, ','), "00:00:01,000");
}

/// The carry stops at the seconds field; no cascade into minutes
#[test]
fn test_formatTimestamp_withCarryAtMinuteBoundary_shouldNotCascade() {
    assert_eq!(format_timestamp(59.9996, ','), "00:00:60,000");
}

/// Round-trip: parse an SRT timestamp back into seconds within 1ms
#[test]
fn test_formatTimestamp_withParseBack_shouldRoundTripWithinOneMilli() {
    fn parse_back(stamp: &str) -> f64 {
        let parts: Vec<u64> = stamp
            .split([':', ','])
            .map(|p| p.parse().unwrap())
            .collect();
        (parts[0] * 3600 + parts[1] * 60 + parts[2]) as f64 + parts[3] as f64 / 1000.0
    }

    for &seconds in &[0.0, 0.25, 2.5, 59.5, 61.75, 3599.999, 7201.5] {
        let parsed = parse_back(&format_timestamp(seconds, ','));
        assert!(
            (parsed - seconds).abs() <= 0.001,
            "{} round-tripped as {}",
            seconds,
            parsed
        );
    }
}

/// Test the exact SRT block layout for a single fragment
#[test]
fn test_render_withSrtFormat_shouldEmitIndexedBlocks() {
    let fragments = vec![CaptionFragment::new(0.0, 2.5, "Hello")];
    let rendered = render(&fragments, ExportFormat::Srt);

    assert_eq!(rendered.content, "1\n00:00:00,000 --> 00:00:02,500\nHello\n\n");
    assert_eq!(rendered.mime_type, "application/x-subrip");
    assert_eq!(rendered.extension, ".srt");
}

/// Test the exact VTT header and cue layout
#[test]
fn test_render_withVttFormat_shouldEmitHeaderAndCues() {
    let fragments = vec![CaptionFragment::new(0.0, 2.5, "Hello")];
    let rendered = render(&fragments, ExportFormat::Vtt);

    assert!(rendered.content.starts_with("WEBVTT\n\n00:00:00.000 --> 00:00:02.500\nHello\n\n"));
    assert_eq!(rendered.mime_type, "text/vtt");
    assert_eq!(rendered.extension, ".vtt");
}

/// VTT carries no cue index numbers
#[test]
fn test_render_withVttFormat_shouldNotNumberCues() {
    let rendered = render(&common::sample_fragments(), ExportFormat::Vtt);
    assert!(!rendered.content.lines().any(|line| line == "1"));
}

/// Plain text is one fragment per line with no timestamps or separators
#[test]
fn test_render_withPlainTextFormat_shouldEmitBareLines() {
    let fragments = vec![
        CaptionFragment::new(0.0, 1.0, "First"),
        CaptionFragment::new(1.0, 1.0, "Second"),
    ];
    let rendered = render(&fragments, ExportFormat::PlainText);

    assert_eq!(rendered.content, "First\nSecond\n");
    assert_eq!(rendered.mime_type, "text/plain");
    assert_eq!(rendered.extension, ".txt");
}

/// Each end time is start + duration, never clamped to the next start
#[test]
fn test_render_withOverlappingFragments_shouldNotClampEndTimes() {
    let fragments = vec![
        CaptionFragment::new(0.0, 5.0, "Overlaps the next"),
        CaptionFragment::new(2.0, 1.0, "Second"),
    ];
    let rendered = render(&fragments, ExportFormat::Srt);

    assert!(rendered.content.contains("00:00:00,000 --> 00:00:05,000"));
    assert!(rendered.content.contains("00:00:02,000 --> 00:00:03,000"));
}

/// Fragment text with embedded newlines renders as multiple text lines
#[test]
fn test_render_withMultilineText_shouldPreserveEmbeddedNewlines() {
    let rendered = render(&common::sample_fragments(), ExportFormat::Srt);
    assert!(rendered.content.contains("Two\nlines\n\n"));
}

/// Rendering the same input twice is byte-identical
#[test]
fn test_render_withRepeatedCalls_shouldBeIdempotent() {
    let fragments = common::sample_fragments();
    for format in [ExportFormat::Srt, ExportFormat::Vtt, ExportFormat::PlainText] {
        let first = render(&fragments, format);
        let second = render(&fragments, format);
        assert_eq!(first.content.as_bytes(), second.content.as_bytes());
    }
}

/// Rendering an empty sequence yields only the format's fixed prologue
#[test]
fn test_render_withNoFragments_shouldEmitOnlyPrologue() {
    assert_eq!(render(&[], ExportFormat::Srt).content, "");
    assert_eq!(render(&[], ExportFormat::Vtt).content, "WEBVTT\n\n");
    assert_eq!(render(&[], ExportFormat::PlainText).content, "");
}

/// Absent format parameter means SRT
#[test]
fn test_fromParam_withNone_shouldDefaultToSrt() {
    assert_eq!(ExportFormat::from_param(None), ExportFormat::Srt);
}

/// Known format parameters resolve to their formats
#[test]
fn test_fromParam_withKnownValues_shouldResolve() {
    assert_eq!(ExportFormat::from_param(Some("srt")), ExportFormat::Srt);
    assert_eq!(ExportFormat::from_param(Some("vtt")), ExportFormat::Vtt);
    assert_eq!(ExportFormat::from_param(Some("txt")), ExportFormat::PlainText);
}

/// Unrecognized format values fall back to plain text, not an error
#[test]
fn test_fromParam_withUnrecognizedValue_shouldFallBackToPlainText() {
    for value in ["ass", "SRT", "", "subrip"] {
        assert_eq!(ExportFormat::from_param(Some(value)), ExportFormat::PlainText);
    }
}

/// Preview is bounded to the first ten fragments in original order
#[test]
fn test_buildPreview_withFifteenFragments_shouldReturnFirstTen() {
    let fragments = common::numbered_fragments(15);
    let preview = build_preview(&fragments);

    assert_eq!(preview.len(), PREVIEW_LIMIT);
    for (i, entry) in preview.iter().enumerate() {
        assert_eq!(entry.text, format!("Fragment {}", i + 1));
    }
}

/// Shorter sequences preview in full
#[test]
fn test_buildPreview_withThreeFragments_shouldReturnAll() {
    let preview = build_preview(&common::sample_fragments());
    assert_eq!(preview.len(), 3);
}

/// Preview timestamps always use the SRT comma codec
#[test]
fn test_buildPreview_withAnyFragments_shouldUseCommaTimestamps() {
    let preview = build_preview(&common::sample_fragments());
    assert_eq!(preview[0].time, "00:00:00,000");
    assert_eq!(preview[2].time, "00:00:06,250");
    assert!(preview.iter().all(|entry| entry.time.contains(',')));
}

/// Preview of an empty sequence is empty
#[test]
fn test_buildPreview_withNoFragments_shouldReturnEmpty() {
    assert!(subtitle_format::build_preview(&[]).is_empty());
}
