use std::fmt::Write;

use serde::Serialize;

use crate::transcript::CaptionFragment;

// @module: Subtitle serialization (SRT, VTT, plain text) and preview

/// Target subtitle serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// SubRip blocks with comma-separated millisecond timestamps
    #[default]
    Srt,
    /// WebVTT with a `WEBVTT` header and dot-separated timestamps
    Vtt,
    /// Bare text, one fragment per line, no timestamps
    PlainText,
}

impl ExportFormat {
    /// Resolve a request parameter into a format.
    ///
    /// An absent parameter means SRT (the download default). Any value other
    /// than `srt` or `vtt` is treated as plain text, never an error;
    /// downstream consumers depend on that fallback.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None => ExportFormat::Srt,
            Some("srt") => ExportFormat::Srt,
            Some("vtt") => ExportFormat::Vtt,
            Some(_) => ExportFormat::PlainText,
        }
    }

    /// MIME type for HTTP-style delivery
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Srt => "application/x-subrip",
            ExportFormat::Vtt => "text/vtt",
            ExportFormat::PlainText => "text/plain",
        }
    }

    /// Suggested file extension, with leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Srt => ".srt",
            ExportFormat::Vtt => ".vtt",
            ExportFormat::PlainText => ".txt",
        }
    }
}

/// A fully serialized subtitle document plus its delivery metadata
#[derive(Debug, Clone)]
pub struct RenderedSubtitle {
    /// Serialized document body
    pub content: String,
    /// MIME type matching the format
    pub mime_type: &'static str,
    /// Suggested file extension, with leading dot
    pub extension: &'static str,
}

/// A reduced projection of a fragment for preview listings
#[derive(Debug, Clone, Serialize)]
pub struct PreviewEntry {
    /// Formatted start timestamp, always SRT-style (comma separator)
    pub time: String,
    /// Fragment text
    pub text: String,
}

/// Maximum number of fragments included in a preview
pub const PREVIEW_LIMIT: usize = 10;

/// Format a second offset as `HH:MM:SS<sep>mmm`.
///
/// Carry rule: when milliseconds round up to 1000 they reset to 0 and the
/// seconds field is incremented, with no further carry into minutes or
/// hours. A fragment at 59.9996s therefore renders a seconds field of 60.
/// This matches the historical output byte-for-byte and must not be
/// "corrected".
pub fn format_timestamp(seconds: f64, sep: char) -> String {
    let h = (seconds / 3600.0).floor() as u64;
    let m = ((seconds % 3600.0) / 60.0).floor() as u64;
    let mut s = (seconds % 60.0).floor() as u64;
    let mut ms = ((seconds % 1.0) * 1000.0).round() as u64;
    if ms == 1000 {
        s += 1;
        ms = 0;
    }
    format!("{:02}:{:02}:{:02}{}{:03}", h, m, s, sep, ms)
}

/// Serialize a fragment sequence in the requested format.
///
/// Each fragment's end time is computed independently as start + duration;
/// nothing is clamped against the next fragment's start.
pub fn render(fragments: &[CaptionFragment], format: ExportFormat) -> RenderedSubtitle {
    let content = match format {
        ExportFormat::Srt => render_srt(fragments),
        ExportFormat::Vtt => render_vtt(fragments),
        ExportFormat::PlainText => render_plain_text(fragments),
    };

    RenderedSubtitle {
        content,
        mime_type: format.mime_type(),
        extension: format.extension(),
    }
}

fn render_srt(fragments: &[CaptionFragment]) -> String {
    let mut out = String::new();
    for (i, fragment) in fragments.iter().enumerate() {
        let start = format_timestamp(fragment.start_seconds, ',');
        let end = format_timestamp(fragment.end_seconds(), ',');
        let _ = write!(out, "{}\n{} --> {}\n{}\n\n", i + 1, start, end, fragment.text);
    }
    out
}

fn render_vtt(fragments: &[CaptionFragment]) -> String {
    let mut out = String::from("WEBVTT\n\n");
    for fragment in fragments {
        let start = format_timestamp(fragment.start_seconds, '.');
        let end = format_timestamp(fragment.end_seconds(), '.');
        let _ = write!(out, "{} --> {}\n{}\n\n", start, end, fragment.text);
    }
    out
}

fn render_plain_text(fragments: &[CaptionFragment]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        let _ = writeln!(out, "{}", fragment.text);
    }
    out
}

/// Project the first [`PREVIEW_LIMIT`] fragments into preview entries.
///
/// Preview timestamps always use the SRT codec, whatever format the caller
/// later exports.
pub fn build_preview(fragments: &[CaptionFragment]) -> Vec<PreviewEntry> {
    fragments
        .iter()
        .take(PREVIEW_LIMIT)
        .map(|fragment| PreviewEntry {
            time: format_timestamp(fragment.start_seconds, ','),
            text: fragment.text.clone(),
        })
        .collect()
}
