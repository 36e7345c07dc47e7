/*!
 * Error types for the yacex application.
 *
 * This module contains custom error types for the caption service and its
 * upstream providers, using the thiserror crate for ergonomic error
 * definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the transcript provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an upstream request fails (network, timeout)
    #[error("Upstream request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an upstream response fails
    #[error("Failed to parse upstream response: {0}")]
    ParseError(String),

    /// Error returned by the upstream service itself
    #[error("Upstream responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the upstream service
        message: String,
    },

    /// The video exposes no caption tracks (none published, or captions disabled)
    #[error("No caption tracks available: {0}")]
    NoCaptions(String),
}

/// Transport-level classification of a service error
///
/// A boundary layer (HTTP handler, CLI exit code mapping) translates this
/// into its native status vocabulary; the core only decides the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller sent something unusable (bad URL, missing parameter)
    BadRequest,
    /// The requested caption track does not exist
    NotFound,
    /// An upstream dependency failed or timed out
    Unavailable,
}

/// Errors produced by the caption service core
///
/// The core never recovers from any of these locally; each is reported to
/// the caller verbatim as a message plus its [`ErrorClass`]. None are
/// retried.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The input string is not a recognized video URL
    #[error("Not a recognized video URL: {0}")]
    InvalidUrl(String),

    /// A language code is required but was absent or empty
    #[error("A language code is required for this operation")]
    MissingLanguage,

    /// No caption track matches the requested language
    #[error("No caption track found for language: {0}")]
    TrackNotFound(String),

    /// The transcript or catalog fetch failed upstream
    #[error("Caption source unavailable: {0}")]
    Upstream(#[from] ProviderError),
}

impl ServiceError {
    /// Status classification for the boundary layer
    pub fn classification(&self) -> ErrorClass {
        match self {
            Self::InvalidUrl(_) | Self::MissingLanguage => ErrorClass::BadRequest,
            Self::TrackNotFound(_) => ErrorClass::NotFound,
            Self::Upstream(_) => ErrorClass::Unavailable,
        }
    }
}
