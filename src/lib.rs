/*!
 * # yacex - Yet Another Caption EXporter
 *
 * A Rust library for fetching and exporting video captions from share URLs.
 *
 * ## Features
 *
 * - Resolve the 11-character video identifier from heterogeneous URL shapes
 * - Catalog every caption track a video publishes (manual and auto-generated,
 *   all languages) and select one by language code
 * - Export the timed caption fragments as SRT, WebVTT, or plain text with
 *   exact timestamp encoding
 * - Produce a bounded ten-entry preview of the caption content
 * - Best-effort video title lookup with a deterministic placeholder
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `video_id`: Video identifier extraction and validation
 * - `transcript`: Caption track catalog, selection policy, fragment model
 * - `subtitle_format`: SRT/VTT/plain-text serialization and preview building
 * - `app_controller`: The service core every transport binding adapts to
 * - `providers`: Upstream collaborators:
 *   - `providers::innertube`: Watch-page caption provider
 *   - `providers::mock`: Deterministic provider for tests
 * - `title`: Best-effort watch-page title resolver
 * - `language_utils`: BCP-47-like tag display names
 * - `app_config`: Configuration management
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod subtitle_format;
pub mod title;
pub mod transcript;
pub mod video_id;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{CaptionDownload, CaptionInfo, CaptionPreview, Controller};
pub use errors::{ErrorClass, ProviderError, ServiceError};
pub use subtitle_format::{ExportFormat, PreviewEntry, RenderedSubtitle};
pub use transcript::{CaptionFragment, CaptionTrack, TrackCatalog};
pub use video_id::VideoId;
