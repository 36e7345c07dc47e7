/*!
 * Mock provider implementations for testing
 *
 * This module provides deterministic in-memory implementations of the
 * provider traits so the service core can be exercised without any network
 * access. Each mock records the calls made against it and can be primed to
 * fail, letting tests assert both the happy path and upstream-failure
 * propagation.
 */

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{TitleResolver, TranscriptProvider, placeholder_title};
use crate::errors::ProviderError;
use crate::transcript::{CaptionFragment, CaptionTrack};
use crate::video_id::VideoId;

/// Tracks provider calls to ensure no unexpected upstream traffic
#[derive(Debug, Default)]
pub struct CallTracker {
    /// Count of list_tracks calls made
    pub list_calls: usize,
    /// Count of fetch_fragments calls made
    pub fetch_calls: usize,
    /// Should the next call fail
    pub should_fail: bool,
    /// Should the next fetch_fragments call fail (listing unaffected)
    pub should_fail_fetch: bool,
    /// Error to return if failing
    pub error_type: MockErrorType,
}

impl CallTracker {
    /// Total provider calls of any kind
    pub fn total_calls(&self) -> usize {
        self.list_calls + self.fetch_calls
    }
}

/// Type of error to simulate
#[derive(Debug, Clone, Copy, Default)]
pub enum MockErrorType {
    /// Network/connection failure
    #[default]
    Request,
    /// Unparseable upstream payload
    Parse,
    /// Upstream HTTP error status
    Api,
    /// Video without caption tracks
    NoCaptions,
}

fn simulated_error(error_type: MockErrorType) -> ProviderError {
    match error_type {
        MockErrorType::Request => ProviderError::RequestFailed("simulated connection failure".into()),
        MockErrorType::Parse => ProviderError::ParseError("simulated malformed payload".into()),
        MockErrorType::Api => ProviderError::ApiError {
            status_code: 503,
            message: "simulated upstream outage".into(),
        },
        MockErrorType::NoCaptions => ProviderError::NoCaptions("simulated captionless video".into()),
    }
}

/// Mock transcript provider serving a fixed catalog and fragment sequence
#[derive(Debug)]
pub struct MockTranscriptProvider {
    tracks: Vec<CaptionTrack>,
    fragments: Vec<CaptionFragment>,
    tracker: Arc<Mutex<CallTracker>>,
}

impl MockTranscriptProvider {
    /// Create a mock serving the given catalog and fragments
    pub fn new(tracks: Vec<CaptionTrack>, fragments: Vec<CaptionFragment>) -> Self {
        MockTranscriptProvider {
            tracks,
            fragments,
            tracker: Arc::new(Mutex::new(CallTracker::default())),
        }
    }

    /// Get the call tracker
    pub fn tracker(&self) -> Arc<Mutex<CallTracker>> {
        self.tracker.clone()
    }

    /// Configure the mock to fail on the next call
    pub fn fail_next_call(&self, error_type: MockErrorType) {
        let mut tracker = self.tracker.lock().unwrap();
        tracker.should_fail = true;
        tracker.error_type = error_type;
    }

    /// Configure the mock to fail only the next fragment fetch, leaving
    /// catalog listing untouched
    pub fn fail_next_fetch(&self, error_type: MockErrorType) {
        let mut tracker = self.tracker.lock().unwrap();
        tracker.should_fail_fetch = true;
        tracker.error_type = error_type;
    }

    fn take_failure(tracker: &mut CallTracker) -> Option<ProviderError> {
        if tracker.should_fail {
            tracker.should_fail = false;
            Some(simulated_error(tracker.error_type))
        } else {
            None
        }
    }
}

#[async_trait]
impl TranscriptProvider for MockTranscriptProvider {
    async fn list_tracks(&self, _id: &VideoId) -> Result<Vec<CaptionTrack>, ProviderError> {
        let mut tracker = self.tracker.lock().unwrap();
        tracker.list_calls += 1;

        if let Some(error) = Self::take_failure(&mut tracker) {
            return Err(error);
        }

        Ok(self.tracks.clone())
    }

    async fn fetch_fragments(
        &self,
        _id: &VideoId,
        _track: &CaptionTrack,
    ) -> Result<Vec<CaptionFragment>, ProviderError> {
        let mut tracker = self.tracker.lock().unwrap();
        tracker.fetch_calls += 1;

        if tracker.should_fail_fetch {
            tracker.should_fail_fetch = false;
            return Err(simulated_error(tracker.error_type));
        }
        if let Some(error) = Self::take_failure(&mut tracker) {
            return Err(error);
        }

        Ok(self.fragments.clone())
    }
}

/// Mock title resolver returning a fixed title, or the placeholder when
/// primed to simulate lookup failure
#[derive(Debug)]
pub struct MockTitleResolver {
    title: Option<String>,
}

impl MockTitleResolver {
    /// Resolver that always finds the given title
    pub fn with_title(title: impl Into<String>) -> Self {
        MockTitleResolver {
            title: Some(title.into()),
        }
    }

    /// Resolver simulating a failed lookup
    pub fn failing() -> Self {
        MockTitleResolver { title: None }
    }
}

#[async_trait]
impl TitleResolver for MockTitleResolver {
    async fn resolve(&self, id: &VideoId) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => placeholder_title(id),
        }
    }
}
