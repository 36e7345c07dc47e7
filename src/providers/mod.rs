/*!
 * Provider implementations for upstream caption sources.
 *
 * This module defines the collaborator traits the caption service core
 * depends on, plus the concrete clients:
 * - innertube: the real watch-page/player-response provider
 * - mock: a deterministic in-memory provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;
use crate::transcript::{CaptionFragment, CaptionTrack};
use crate::video_id::VideoId;

/// Source of caption track catalogs and timed fragment sequences
///
/// Implementations own all network interaction with the captioning source
/// and all parsing of its wire format. Every call is fresh; nothing is
/// cached between requests.
#[async_trait]
pub trait TranscriptProvider: Send + Sync + Debug {
    /// Enumerate every caption track the video exposes, manually authored
    /// and auto-generated, across all languages, in upstream order.
    ///
    /// # Returns
    /// * `Result<Vec<CaptionTrack>, ProviderError>` - the catalog, or why it
    ///   could not be produced. A failure is always reported, never an
    ///   empty listing.
    async fn list_tracks(&self, id: &VideoId) -> Result<Vec<CaptionTrack>, ProviderError>;

    /// Fetch the ordered fragment sequence for a previously listed track.
    ///
    /// # Returns
    /// * `Result<Vec<CaptionFragment>, ProviderError>` - fragments in
    ///   chronological order as delivered upstream
    async fn fetch_fragments(
        &self,
        id: &VideoId,
        track: &CaptionTrack,
    ) -> Result<Vec<CaptionFragment>, ProviderError>;
}

/// Best-effort source of human-readable video titles
///
/// Title lookup never fails the request: any network, parse, or timeout
/// problem yields the deterministic placeholder `Video_<id>` instead of an
/// error.
#[async_trait]
pub trait TitleResolver: Send + Sync + Debug {
    /// Resolve a display title, or the placeholder on any failure
    async fn resolve(&self, id: &VideoId) -> String;
}

/// The placeholder title used when lookup fails
pub fn placeholder_title(id: &VideoId) -> String {
    format!("Video_{}", id)
}

pub mod innertube;
pub mod mock;
