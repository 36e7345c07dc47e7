/*!
 * Tests for error types and status classification
 */

use yacex::errors::{ErrorClass, ProviderError, ServiceError};

#[test]
fn test_serviceError_invalidUrl_shouldDisplayCorrectly() {
    let error = ServiceError::InvalidUrl("ftp://nope".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Not a recognized video URL"));
    assert!(display.contains("ftp://nope"));
}

#[test]
fn test_serviceError_missingLanguage_shouldDisplayCorrectly() {
    let display = format!("{}", ServiceError::MissingLanguage);
    assert!(display.contains("language code is required"));
}

#[test]
fn test_serviceError_trackNotFound_shouldDisplayLanguage() {
    let display = format!("{}", ServiceError::TrackNotFound("fr".to_string()));
    assert!(display.contains("No caption track found"));
    assert!(display.contains("fr"));
}

#[test]
fn test_serviceError_fromProviderError_shouldWrapAsUpstream() {
    let provider_error = ProviderError::RequestFailed("connection reset".to_string());
    let service_error: ServiceError = provider_error.into();
    assert!(matches!(service_error, ServiceError::Upstream(_)));
    let display = format!("{}", service_error);
    assert!(display.contains("Caption source unavailable"));
    assert!(display.contains("connection reset"));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "slow down".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("slow down"));
}

#[test]
fn test_providerError_noCaptions_shouldDisplayCorrectly() {
    let error = ProviderError::NoCaptions("captions disabled".to_string());
    let display = format!("{}", error);
    assert!(display.contains("No caption tracks available"));
    assert!(display.contains("captions disabled"));
}

/// Client faults classify as BadRequest
#[test]
fn test_classification_withClientFaults_shouldBeBadRequest() {
    assert_eq!(
        ServiceError::InvalidUrl("x".to_string()).classification(),
        ErrorClass::BadRequest
    );
    assert_eq!(ServiceError::MissingLanguage.classification(), ErrorClass::BadRequest);
}

/// Missing tracks classify as NotFound
#[test]
fn test_classification_withTrackNotFound_shouldBeNotFound() {
    assert_eq!(
        ServiceError::TrackNotFound("en".to_string()).classification(),
        ErrorClass::NotFound
    );
}

/// Every provider failure classifies as Unavailable
#[test]
fn test_classification_withUpstreamFailures_shouldBeUnavailable() {
    let failures = vec![
        ProviderError::RequestFailed("timeout".to_string()),
        ProviderError::ParseError("bad json".to_string()),
        ProviderError::ApiError {
            status_code: 500,
            message: "oops".to_string(),
        },
        ProviderError::NoCaptions("none".to_string()),
    ];

    for failure in failures {
        let error: ServiceError = failure.into();
        assert_eq!(error.classification(), ErrorClass::Unavailable);
    }
}

#[test]
fn test_serviceError_intoAnyhow_shouldPreserveMessage() {
    let error: anyhow::Error = ServiceError::MissingLanguage.into();
    assert!(format!("{}", error).contains("language code is required"));
}

#[test]
fn test_serviceError_debug_shouldBeImplemented() {
    let debug = format!("{:?}", ServiceError::MissingLanguage);
    assert!(debug.contains("MissingLanguage"));
}
