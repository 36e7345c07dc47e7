use std::fmt;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ServiceError;

// @module: Video identifier extraction from share URLs

// @const: marker + 11 identifier characters, first match wins
static VIDEO_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:v=|/|be/|embed/)([A-Za-z0-9_-]{11})").unwrap()
});

/// An opaque 11-character video identifier.
///
/// Invariant: exactly 11 characters from `[A-Za-z0-9_-]`. The identifier is
/// syntactic only; nothing here checks that a video with this id exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoId(String);

impl VideoId {
    /// Construct from a raw token, enforcing the length/charset invariant
    pub fn new(token: impl Into<String>) -> Result<Self, ServiceError> {
        let token = token.into();
        let valid = token.len() == 11
            && token.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if !valid {
            return Err(ServiceError::InvalidUrl(token));
        }
        Ok(VideoId(token))
    }

    /// Extract the video identifier from a share URL.
    ///
    /// Scans for one of the accepted marker substrings (`v=`, a path
    /// separator, `be/`, `embed/`) immediately followed by exactly 11
    /// identifier characters and returns the first such match. Any input
    /// without that pattern fails with [`ServiceError::InvalidUrl`].
    pub fn resolve(raw_url: &str) -> Result<Self, ServiceError> {
        VIDEO_ID_REGEX
            .captures(raw_url)
            .and_then(|caps| caps.get(1))
            .map(|m| VideoId(m.as_str().to_string()))
            .ok_or_else(|| ServiceError::InvalidUrl(raw_url.to_string()))
    }

    /// The raw 11-character token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
