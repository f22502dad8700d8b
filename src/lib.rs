//! # Bindery
//!
//! Binds a configured list of RSS/Atom feeds into a single EPUB optimized
//! for small e-reader screens.
//!
//! ## Architecture
//!
//! One run is a sequential pipeline:
//!
//! ```text
//! Fetcher → Normalizer → Sanitizer → Localizer → Assembler → EPUB
//! ```
//!
//! - [`fetcher`]: HTTP retrieval of feeds and images with a browser identity
//! - [`normalizer`]: converts RSS/Atom payloads to unified domain models
//! - [`sanitizer`]: strips script/style markup from article HTML
//! - [`localizer`]: downloads, shrinks, and bundles embedded images
//! - [`assembler`]: builds the document tree (cover, contents, sections,
//!   chapters) and the reading order
//! - [`book`]: the output document model and EPUB container serialization
//!
//! Failures are isolated per unit: a dead feed, a broken entry, or an
//! unfetchable image degrades to a skip, never an abort. Only a run in
//! which no feed yields any entries fails as a whole.
//!
//! ## Quick Start
//!
//! ```bash
//! # List the configured feeds
//! bindery sources
//!
//! # Fetch everything and write RSSFeeds_YYYYMMDD.epub
//! bindery build
//!
//! # Explicit feed list and output directory
//! bindery build --feeds feeds.txt --output books/
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires together the pipeline components:
/// fetcher, normalizer, localizer.
pub mod app;

/// Document assembly.
///
/// Builds the hierarchical document tree from fetched feeds and wires the
/// reading order: cover, table of contents, then per-feed sections with
/// their chapters.
pub mod assembler;

/// Output document model and EPUB serialization.
///
/// - [`OutputDocument`](book::OutputDocument): pages + assets with enforced
///   id/path uniqueness
/// - [`book::epub`]: zip container with package document and navigation
pub mod book;

/// Command-line interface using clap.
///
/// - `build` - Fetch all feeds and bind them into an EPUB
/// - `sources` - List the configured feed sources
pub mod cli;

/// Configuration management.
///
/// TOML settings from `~/.config/bindery/config.toml` plus the plain-text
/// feed list (one URL per line).
pub mod config;

/// Placeholder cover generation: a random identicon with horizontal mirror
/// symmetry, sized for e-reader screens.
pub mod cover;

/// Core domain models.
///
/// - [`Feed`](domain::Feed): one fetch attempt's outcome and entries
/// - [`Entry`](domain::Entry): one article with its content fallback chain
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait for feed and image retrieval
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based
///   implementation with browser-identifying headers
pub mod fetcher;

/// Downloaded-image transcoding: decode, shrink to 30%, re-encode.
pub mod imaging;

/// Image localization: rewrites article HTML to reference bundled copies
/// of its remote images.
pub mod localizer;

/// Shared HTML tree-walk serialization helpers.
pub mod markup;

/// Feed parsing and normalization.
///
/// Converts RSS 0.9x/1.0/2.0, Atom 0.3/1.0, and JSON Feed 1.0 payloads
/// into unified [`Feed`](domain::Feed) structs.
pub mod normalizer;

/// Article HTML cleanup: drops script and style subtrees.
pub mod sanitizer;

#[cfg(test)]
pub(crate) mod test_helpers;
