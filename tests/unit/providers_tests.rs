/*!
 * Tests for provider trait implementations
 */

use yacex::errors::ProviderError;
use yacex::providers::TranscriptProvider;
use yacex::providers::mock::{MockErrorType, MockTranscriptProvider};
use yacex::providers::placeholder_title;
use yacex::video_id::VideoId;

use crate::common;

fn sample_id() -> VideoId {
    VideoId::new("dQw4w9WgXcQ").unwrap()
}

/// The mock serves its configured catalog and counts the call
#[test]
fn test_mockProvider_withConfiguredTracks_shouldServeThem() {
    let provider = MockTranscriptProvider::new(common::sample_tracks(), common::sample_fragments());

    let tracks = tokio_test::block_on(provider.list_tracks(&sample_id())).unwrap();
    assert_eq!(tracks.len(), 3);
    assert_eq!(provider.tracker().lock().unwrap().list_calls, 1);
}

/// A primed failure fires once, then the mock recovers
#[test]
fn test_mockProvider_withPrimedFailure_shouldFailOnceThenRecover() {
    let provider = MockTranscriptProvider::new(common::sample_tracks(), common::sample_fragments());
    provider.fail_next_call(MockErrorType::NoCaptions);

    let first = tokio_test::block_on(provider.list_tracks(&sample_id()));
    assert!(matches!(first, Err(ProviderError::NoCaptions(_))));

    let second = tokio_test::block_on(provider.list_tracks(&sample_id()));
    assert!(second.is_ok());
}

/// Fetch-only failure priming leaves the listing untouched
#[test]
fn test_mockProvider_withFetchFailurePrimed_shouldStillList() {
    let provider = MockTranscriptProvider::new(common::sample_tracks(), common::sample_fragments());
    provider.fail_next_fetch(MockErrorType::Api);

    let id = sample_id();
    let tracks = tokio_test::block_on(provider.list_tracks(&id)).unwrap();
    let fetched = tokio_test::block_on(provider.fetch_fragments(&id, &tracks[0]));
    assert!(matches!(fetched, Err(ProviderError::ApiError { .. })));
}

/// The placeholder title is deterministic per identifier
#[test]
fn test_placeholderTitle_withId_shouldBeDeterministic() {
    let id = sample_id();
    assert_eq!(placeholder_title(&id), "Video_dQw4w9WgXcQ");
    assert_eq!(placeholder_title(&id), placeholder_title(&id));
}
