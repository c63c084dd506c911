// CatMusic - music search and download for the desktop
// Copyright (C) 2025 CatMusic contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Candidate link validation
//!
//! Probes each candidate URL with a short HEAD request before it is shown
//! to the user. Landing pages served as HTML and non-200 answers are
//! rejected the same way dead links are.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{CatMusicError, Result};
use crate::http::HttpBackend;
use crate::search::parser::Track;
use crate::search::query;

/// HEAD probe deadline; slow mirrors are treated as dead
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Validates candidate download links with lightweight HEAD probes
pub struct LinkValidator<B: HttpBackend> {
    backend: Arc<B>,
}

impl<B: HttpBackend> LinkValidator<B> {
    pub fn with_backend(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Validate one candidate, returning it unchanged if its link is live
    ///
    /// A candidate with an empty URL is rejected immediately, without any
    /// network traffic. All probe failures collapse to `None` here; callers
    /// that need the failure class use [`probe`](Self::probe) directly.
    pub async fn validate(&self, track: Track) -> Option<Track> {
        if track.url.is_empty() {
            tracing::debug!(title = %track.title, "candidate has no url, dropping");
            return None;
        }
        match self.probe(&track.url).await {
            Ok(()) => Some(track),
            Err(e) => {
                tracing::debug!(title = %track.title, url = %track.url, error = %e, "probe failed, dropping candidate");
                None
            }
        }
    }

    /// Probe a URL and classify the answer
    ///
    /// # Returns
    /// `Ok(())` for a 200 answer with a non-HTML content type. HTML bodies
    /// mean the link resolved to an error page rather than media.
    pub async fn probe(&self, url: &str) -> Result<()> {
        let response = self
            .backend
            .head(url, query::search_headers(), PROBE_TIMEOUT)
            .await?;

        if response.is_html() {
            return Err(CatMusicError::html_content(url));
        }
        if !response.is_success() {
            return Err(CatMusicError::unexpected_status(response.status, url));
        }
        Ok(())
    }
}

// ===== TESTS =====
