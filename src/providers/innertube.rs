use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;

use super::TranscriptProvider;
use crate::app_config::ProviderConfig;
use crate::errors::ProviderError;
use crate::language_utils;
use crate::transcript::{CaptionFragment, CaptionTrack};
use crate::video_id::VideoId;

// @module: Watch-page caption provider (player response + json3 transcripts)

// @const: embedded player response object in the watch page HTML
static PLAYER_RESPONSE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"var ytInitialPlayerResponse\s*=\s*(\{.+?\});").unwrap()
});

/// Caption provider backed by the public watch page.
///
/// The watch page embeds a player response object whose caption section
/// lists every available track together with a per-track transcript URL;
/// requesting that URL with `fmt=json3` yields the timed fragments as JSON.
/// The provider is handed an ordered list of watch-page base endpoints and
/// tries them in order until one serves a usable page; only when all of
/// them fail does the call fail, carrying the last failure reason.
#[derive(Debug)]
pub struct InnertubeProvider {
    /// HTTP client with the configured timeout baked in
    client: Client,
    /// Ordered watch-page base endpoints, tried first to last
    endpoints: Vec<String>,
}

/// Top-level slice of the embedded player response
#[derive(Debug, Deserialize)]
struct PlayerResponse {
    captions: Option<CaptionsSection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionsSection {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrackRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrackRenderer {
    base_url: String,
    language_code: String,
    /// `"asr"` marks an auto-generated track
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    name: Option<TrackName>,
}

/// Track display name; upstream serializes either shape
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackName {
    #[serde(default)]
    simple_text: Option<String>,
    #[serde(default)]
    runs: Option<Vec<TextRun>>,
}

#[derive(Debug, Deserialize)]
struct TextRun {
    text: String,
}

/// json3 transcript payload
#[derive(Debug, Deserialize)]
struct Json3Transcript {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
struct Json3Event {
    #[serde(rename = "tStartMs")]
    t_start_ms: Option<u64>,
    #[serde(rename = "dDurationMs")]
    d_duration_ms: Option<u64>,
    /// Absent on window-styling events, which carry no text
    segs: Option<Vec<Json3Segment>>,
}

#[derive(Debug, Deserialize)]
struct Json3Segment {
    #[serde(default)]
    utf8: String,
}

impl InnertubeProvider {
    /// Create a provider from the configured endpoints, timeout, and user agent
    pub fn new(config: &ProviderConfig) -> Self {
        InnertubeProvider {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .user_agent(config.user_agent.clone())
                .build()
                .unwrap_or_default(),
            endpoints: config.player_endpoints.clone(),
        }
    }

    /// Fetch the watch page, walking the endpoint list in order
    async fn fetch_watch_page(&self, id: &VideoId) -> Result<String, ProviderError> {
        let mut last_error = ProviderError::RequestFailed("no watch endpoints configured".to_string());

        for endpoint in &self.endpoints {
            let page_url = format!("{}/watch?v={}", endpoint.trim_end_matches('/'), id);
            debug!("Fetching watch page: {}", page_url);

            match self.get_text(&page_url).await {
                Ok(html) => return Ok(html),
                Err(e) => {
                    warn!("Watch endpoint {} failed: {}", endpoint, e);
                    last_error = e;
                }
            }
        }

        Err(ProviderError::RequestFailed(format!(
            "all {} watch endpoints failed; last error: {}",
            self.endpoints.len(),
            last_error
        )))
    }

    async fn get_text(&self, request_url: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(request_url)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: format!("GET {} returned {}", request_url, status),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))
    }

    /// Extract and deserialize the embedded player response object
    fn parse_player_response(html: &str) -> Result<PlayerResponse, ProviderError> {
        let raw = PLAYER_RESPONSE_REGEX
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| {
                ProviderError::ParseError("player response object not found in watch page".to_string())
            })?;

        serde_json::from_str(raw)
            .map_err(|e| ProviderError::ParseError(format!("player response: {}", e)))
    }

    /// Convert json3 events to fragments, dropping textless events
    fn events_to_fragments(transcript: Json3Transcript) -> Vec<CaptionFragment> {
        let mut fragments = Vec::with_capacity(transcript.events.len());

        for event in transcript.events {
            let (Some(start_ms), Some(segs)) = (event.t_start_ms, event.segs) else {
                continue;
            };

            let raw_text: String = segs.iter().map(|seg| seg.utf8.as_str()).collect();
            let text = html_escape::decode_html_entities(&raw_text).to_string();
            if text.trim().is_empty() {
                continue;
            }

            let duration_ms = event.d_duration_ms.unwrap_or(0);
            fragments.push(CaptionFragment {
                start_seconds: start_ms as f64 / 1000.0,
                duration_seconds: duration_ms as f64 / 1000.0,
                text,
            });
        }

        fragments
    }
}

impl CaptionTrackRenderer {
    /// Map the upstream renderer into the service-level track model
    fn into_track(self) -> CaptionTrack {
        let display_name = self
            .name
            .and_then(|name| {
                name.simple_text.or_else(|| {
                    name.runs
                        .map(|runs| runs.into_iter().map(|run| run.text).collect::<String>())
                })
            })
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| language_utils::display_name_or_tag(&self.language_code));

        CaptionTrack {
            is_auto_generated: self.kind.as_deref() == Some("asr"),
            language_code: self.language_code,
            name: display_name,
            base_url: self.base_url,
        }
    }
}

#[async_trait]
impl TranscriptProvider for InnertubeProvider {
    async fn list_tracks(&self, id: &VideoId) -> Result<Vec<CaptionTrack>, ProviderError> {
        let html = self.fetch_watch_page(id).await?;
        let player_response = Self::parse_player_response(&html)?;

        let tracks: Vec<CaptionTrack> = player_response
            .captions
            .and_then(|captions| captions.player_captions_tracklist_renderer)
            .map(|renderer| renderer.caption_tracks)
            .unwrap_or_default()
            .into_iter()
            .map(CaptionTrackRenderer::into_track)
            .collect();

        if tracks.is_empty() {
            return Err(ProviderError::NoCaptions(format!(
                "video {} publishes no caption tracks (captions may be disabled)",
                id
            )));
        }

        debug!("Video {} exposes {} caption track(s)", id, tracks.len());
        Ok(tracks)
    }

    async fn fetch_fragments(
        &self,
        id: &VideoId,
        track: &CaptionTrack,
    ) -> Result<Vec<CaptionFragment>, ProviderError> {
        if track.base_url.is_empty() {
            return Err(ProviderError::ParseError(format!(
                "track {} for video {} carries no transcript URL",
                track.language_code, id
            )));
        }

        let transcript_url = format!("{}&fmt=json3", track.base_url);
        let body = self.get_text(&transcript_url).await?;

        let transcript: Json3Transcript = serde_json::from_str(&body)
            .map_err(|e| ProviderError::ParseError(format!("json3 transcript: {}", e)))?;

        Ok(Self::events_to_fragments(transcript))
    }
}
