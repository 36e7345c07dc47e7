use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

// @module: Caption track catalog and timed fragment model

// @struct: One available caption stream for a video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionTrack {
    // @field: BCP-47-like language tag ("en", "ko", "pt-BR")
    pub language_code: String,

    // @field: Human-readable language name as published upstream
    pub name: String,

    // @field: Whether the track is auto-generated (speech recognition)
    pub is_auto_generated: bool,

    // @field: Provider-internal fetch endpoint for this track's fragments.
    // Never exposed in API responses.
    #[serde(default, skip_serializing)]
    pub base_url: String,
}

impl CaptionTrack {
    /// The `kind` string reported to API consumers: `"asr"` for
    /// auto-generated tracks, empty otherwise.
    pub fn kind(&self) -> &'static str {
        if self.is_auto_generated { "asr" } else { "" }
    }
}

/// One timed unit of spoken or displayed text.
///
/// The end time is derived from start and duration and never stored
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionFragment {
    /// Start offset from the beginning of the video, in seconds
    pub start_seconds: f64,

    /// Display duration in seconds
    pub duration_seconds: f64,

    /// Fragment text; may contain embedded newlines
    pub text: String,
}

impl CaptionFragment {
    pub fn new(start_seconds: f64, duration_seconds: f64, text: impl Into<String>) -> Self {
        CaptionFragment {
            start_seconds,
            duration_seconds,
            text: text.into(),
        }
    }

    /// Derived end offset in seconds
    pub fn end_seconds(&self) -> f64 {
        self.start_seconds + self.duration_seconds
    }
}

/// The full set of caption tracks available for one video.
///
/// Derived fresh from the upstream provider on every request; never cached.
/// Track order is whatever the provider returned.
#[derive(Debug, Clone)]
pub struct TrackCatalog {
    tracks: Vec<CaptionTrack>,
}

impl TrackCatalog {
    /// Wrap a provider listing. An empty listing surfaces as an upstream
    /// failure, never as an empty catalog.
    pub fn new(tracks: Vec<CaptionTrack>) -> Result<Self, ServiceError> {
        if tracks.is_empty() {
            return Err(ServiceError::Upstream(
                crate::errors::ProviderError::NoCaptions(
                    "provider returned an empty track listing".to_string(),
                ),
            ));
        }
        Ok(TrackCatalog { tracks })
    }

    /// All tracks, in provider order
    pub fn tracks(&self) -> &[CaptionTrack] {
        &self.tracks
    }

    /// Select a track for the preferred language.
    ///
    /// Primary lookup mirrors the upstream convention: an exact
    /// `language_code` match among manually authored tracks first, then
    /// among auto-generated ones. If that finds nothing, fall back to a
    /// linear scan of the catalog in provider order, any kind, first exact
    /// match. An empty preferred language fails with
    /// [`ServiceError::MissingLanguage`] before any lookup.
    pub fn find(&self, preferred_language: &str) -> Result<&CaptionTrack, ServiceError> {
        if preferred_language.is_empty() {
            return Err(ServiceError::MissingLanguage);
        }

        let manual_match = self
            .tracks
            .iter()
            .filter(|t| !t.is_auto_generated)
            .find(|t| t.language_code == preferred_language);
        if let Some(track) = manual_match {
            return Ok(track);
        }

        let generated_match = self
            .tracks
            .iter()
            .filter(|t| t.is_auto_generated)
            .find(|t| t.language_code == preferred_language);
        if let Some(track) = generated_match {
            return Ok(track);
        }

        // Fallback: plain scan in catalog order, manual or auto
        self.tracks
            .iter()
            .find(|t| t.language_code == preferred_language)
            .ok_or_else(|| ServiceError::TrackNotFound(preferred_language.to_string()))
    }
}
