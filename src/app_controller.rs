use std::sync::Arc;

use futures::join;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::app_config::Config;
use crate::errors::ServiceError;
use crate::providers::innertube::InnertubeProvider;
use crate::providers::{TitleResolver, TranscriptProvider};
use crate::subtitle_format::{self, ExportFormat, PreviewEntry};
use crate::title::PageTitleResolver;
use crate::transcript::{CaptionTrack, TrackCatalog};
use crate::video_id::VideoId;

// @module: Caption service core (the single interface behind all transports)

// @const: characters stripped from titles when building a filename
static FILENAME_STRIP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w \-.]").unwrap());

/// One caption track as reported to API consumers
#[derive(Debug, Clone, Serialize)]
pub struct TrackInfo {
    /// BCP-47-like language tag
    #[serde(rename = "languageCode")]
    pub language_code: String,
    /// Human-readable language name
    pub name: String,
    /// `"asr"` for auto-generated tracks, empty otherwise
    pub kind: String,
}

impl From<&CaptionTrack> for TrackInfo {
    fn from(track: &CaptionTrack) -> Self {
        TrackInfo {
            language_code: track.language_code.clone(),
            name: track.name.clone(),
            kind: track.kind().to_string(),
        }
    }
}

/// Caption metadata for a video
#[derive(Debug, Serialize)]
pub struct CaptionInfo {
    /// Video title, or the lookup placeholder
    pub title: String,
    /// Every available caption track, in upstream order
    pub available_captions: Vec<TrackInfo>,
}

/// A rendered subtitle document ready for delivery
#[derive(Debug)]
pub struct CaptionDownload {
    /// Serialized subtitle bytes
    pub content: Vec<u8>,
    /// MIME type matching the export format
    pub mime_type: &'static str,
    /// Suggested filename, sanitized from the video title
    pub filename: String,
}

/// Bounded caption preview for a video and language
#[derive(Debug, Serialize)]
pub struct CaptionPreview {
    /// Video title, or the lookup placeholder
    pub video_title: String,
    /// Display name of the selected track's language
    pub language: String,
    /// At most the first ten fragments, in order
    pub preview: Vec<PreviewEntry>,
}

/// The caption service core.
///
/// Holds the upstream collaborators and exposes the three operations every
/// transport binding adapts to: caption_info, download, preview. All state
/// is request-scoped; the controller itself owns nothing mutable.
pub struct Controller {
    transcripts: Arc<dyn TranscriptProvider>,
    titles: Arc<dyn TitleResolver>,
}

impl Controller {
    /// Create a controller backed by the real watch-page collaborators
    pub fn with_config(config: &Config) -> Self {
        Self::with_providers(
            Arc::new(InnertubeProvider::new(&config.provider)),
            Arc::new(PageTitleResolver::new(&config.title)),
        )
    }

    /// Create a controller with explicit collaborators (tests, embedding)
    pub fn with_providers(
        transcripts: Arc<dyn TranscriptProvider>,
        titles: Arc<dyn TitleResolver>,
    ) -> Self {
        Controller { transcripts, titles }
    }

    /// Caption metadata for the video behind `url`.
    ///
    /// Title lookup and track listing run concurrently; they share no state
    /// and title lookup cannot fail.
    pub async fn caption_info(&self, url: &str) -> Result<CaptionInfo, ServiceError> {
        let id = VideoId::resolve(url)?;

        let (title, listing) = join!(self.titles.resolve(&id), self.transcripts.list_tracks(&id));
        let catalog = TrackCatalog::new(listing?)?;

        Ok(CaptionInfo {
            title,
            available_captions: catalog.tracks().iter().map(TrackInfo::from).collect(),
        })
    }

    /// Full subtitle export for one language, in the requested format.
    ///
    /// `format` defaults to SRT when absent. A missing or empty language
    /// code is a client error raised before any upstream call is made.
    pub async fn download(
        &self,
        url: &str,
        language_code: Option<&str>,
        format: Option<&str>,
    ) -> Result<CaptionDownload, ServiceError> {
        let id = VideoId::resolve(url)?;
        let language = required_language(language_code)?;
        let format = ExportFormat::from_param(format);

        let (title, listing) = join!(self.titles.resolve(&id), self.transcripts.list_tracks(&id));
        let catalog = TrackCatalog::new(listing?)?;
        let track = catalog.find(language)?;
        debug!(
            "Selected {} track '{}' for video {}",
            if track.is_auto_generated { "auto-generated" } else { "manual" },
            track.language_code,
            id
        );

        let fragments = self.transcripts.fetch_fragments(&id, track).await?;
        let rendered = subtitle_format::render(&fragments, format);

        Ok(CaptionDownload {
            content: rendered.content.into_bytes(),
            mime_type: rendered.mime_type,
            filename: build_filename(&title, language, rendered.extension),
        })
    }

    /// Bounded preview of the caption content for one language.
    pub async fn preview(
        &self,
        url: &str,
        language_code: Option<&str>,
    ) -> Result<CaptionPreview, ServiceError> {
        let id = VideoId::resolve(url)?;
        let language = required_language(language_code)?;

        let (title, listing) = join!(self.titles.resolve(&id), self.transcripts.list_tracks(&id));
        let catalog = TrackCatalog::new(listing?)?;
        let track = catalog.find(language)?;

        let fragments = self.transcripts.fetch_fragments(&id, track).await?;

        Ok(CaptionPreview {
            video_title: title,
            language: track.name.clone(),
            preview: subtitle_format::build_preview(&fragments),
        })
    }
}

/// Reject absent or empty language codes before any upstream work
fn required_language(language_code: Option<&str>) -> Result<&str, ServiceError> {
    match language_code {
        Some(code) if !code.is_empty() => Ok(code),
        _ => Err(ServiceError::MissingLanguage),
    }
}

/// Build a download filename from the video title.
///
/// Characters outside word/space/hyphen/dot are stripped, spaces become
/// underscores, then `_<language><extension>` is appended.
pub fn build_filename(title: &str, language_code: &str, extension: &str) -> String {
    let stripped = FILENAME_STRIP_REGEX.replace_all(title, "");
    let safe_title = stripped.replace(' ', "_");
    format!("{}_{}{}", safe_title, language_code, extension)
}
