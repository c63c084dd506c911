//! Error types for CatMusic
//!
//! This module defines error types using thiserror for ergonomic error
//! handling. The pipeline's outward contract deliberately collapses failures
//! to `None`/`false` at its boundaries; the typed variants here exist so the
//! internal layers and the tests can still tell failure causes apart. See
//! the implementation notes at the bottom of this file.

use thiserror::Error;

/// Result type alias using our CatMusicError type
pub type Result<T> = std::result::Result<T, CatMusicError>;

/// Main error type for CatMusic
///
/// Variants are grouped by the failure class they represent: transport,
/// protocol mismatch, malformed response, filesystem, and settings storage.
#[derive(Error, Debug)]
pub enum CatMusicError {
    // ===== Transport Errors =====

    /// HTTP client error from reqwest (connection refused, DNS failure,
    /// timeout, TLS error, unparseable URL)
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport failure reported by a non-reqwest backend
    ///
    /// reqwest's error type cannot be constructed by hand, so other
    /// [`HttpBackend`](crate::http::HttpBackend) implementations report
    /// transport failures through this variant instead.
    #[error("Transport error: {0}")]
    Transport(String),

    // ===== Protocol Errors =====

    /// Server answered with a status other than 200
    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus {
        status: u16,
        /// Request URL, for log context
        url: String,
    },

    /// Resource resolved to a web page instead of a media file
    #[error("Got text/html content from {url}")]
    HtmlContent { url: String },

    // ===== Response Parsing Errors =====

    /// Response body was not valid JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON was well-formed but the envelope had the wrong shape
    #[error("Malformed search response: {0}")]
    MalformedResponse(String),

    // ===== Filesystem Errors =====

    /// I/O failure creating the target directory or writing the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ===== Settings Errors =====

    /// Settings database error from sqlx
    #[error("Settings database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Caller-supplied value was unusable (empty keyword, bad selection)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// Helper methods for creating common errors
impl CatMusicError {
    /// Create an UnexpectedStatus error
    pub fn unexpected_status<S: Into<String>>(status: u16, url: S) -> Self {
        CatMusicError::UnexpectedStatus {
            status,
            url: url.into(),
        }
    }

    /// Create an HtmlContent error
    pub fn html_content<S: Into<String>>(url: S) -> Self {
        CatMusicError::HtmlContent { url: url.into() }
    }

    /// Create a MalformedResponse error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        CatMusicError::MalformedResponse(message.into())
    }

    /// Create an InvalidInput error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        CatMusicError::InvalidInput(message.into())
    }

    /// Check if error came from the transport layer (connection, DNS,
    /// timeout, TLS)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CatMusicError::Http(_) | CatMusicError::Transport(_)
        )
    }

    /// Check if error is a protocol mismatch (non-200 status, or HTML where
    /// audio was expected)
    pub fn is_protocol_mismatch(&self) -> bool {
        matches!(
            self,
            CatMusicError::UnexpectedStatus { .. } | CatMusicError::HtmlContent { .. }
        )
    }

    /// Check if error came from parsing the search response
    pub fn is_malformed_response(&self) -> bool {
        matches!(
            self,
            CatMusicError::Json(_) | CatMusicError::MalformedResponse(_)
        )
    }

    /// Check if error is a local filesystem failure
    pub fn is_filesystem(&self) -> bool {
        matches!(self, CatMusicError::Io(_))
    }
}

// ===== IMPLEMENTATION NOTES =====
//
// ## Boundary collapse
//
// The pipeline's outward contract is: a failed search is `None`, a rejected
// candidate is `None`, a failed download is `false`. Internally every
// component returns `Result` so callers and tests can tell failure causes
// apart:
//
// | typed operation               | collapsing wrapper            | collapsed value |
// |-------------------------------|-------------------------------|-----------------|
// | SearchService::try_search     | SearchService::search         | None            |
// | LinkValidator::probe          | LinkValidator::validate       | None            |
// | DownloadService::try_download | DownloadService::download_one | false           |
//
// The collapsing wrappers log the error (warn for search and download, debug
// for per-candidate rejections) and do nothing else with it. SettingsStore
// does not collapse; persistence errors stay `Result` all the way to the
// embedder.
//
// ## Categories
//
// - Transport: `Http`, `Transport`. Covers connection refused, DNS failure,
//   timeouts, TLS errors, and URLs reqwest rejects at send time.
// - Protocol mismatch: `UnexpectedStatus`, `HtmlContent`. Soft rejections,
//   not exceptional conditions.
// - Malformed response: `Json`, `MalformedResponse`. Only the search
//   endpoint parses JSON, so these always fail the whole search.
// - Filesystem: `Io`. Directory creation and file writes.
// - Settings: `Database`, plus `InvalidInput` for caller mistakes caught
//   before any work happens.
