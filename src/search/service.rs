// CatMusic - music search and download for the desktop
// Copyright (C) 2025 CatMusic contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Search orchestration
//!
//! Runs the full search flow: POST the keyword to the upstream, parse the
//! candidate rows, then probe every candidate link concurrently and keep the
//! live ones. Result order always follows the upstream's ranking no matter
//! how the probes interleave.

use std::sync::Arc;

use futures_util::future::join_all;

use crate::error::{CatMusicError, Result};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::search::parser::{self, Track};
use crate::search::query::{self, SearchQuery};
use crate::search::validator::LinkValidator;

/// End-to-end music search: query, parse, validate
pub struct SearchService<B: HttpBackend> {
    backend: Arc<B>,
    validator: LinkValidator<B>,
}

impl SearchService<ReqwestBackend> {
    /// Create a service backed by a real HTTP client
    pub fn new() -> Result<Self> {
        Ok(Self::with_backend(Arc::new(ReqwestBackend::new()?)))
    }
}

impl<B: HttpBackend> SearchService<B> {
    pub fn with_backend(backend: Arc<B>) -> Self {
        let validator = LinkValidator::with_backend(Arc::clone(&backend));
        Self { backend, validator }
    }

    /// Search for tracks matching a keyword
    ///
    /// Returns only candidates whose download link answered a HEAD probe.
    /// Any failure along the way collapses to `None`; an upstream that
    /// answers cleanly but finds nothing yields `Some` of an empty list.
    pub async fn search(&self, query: &SearchQuery) -> Option<Vec<Track>> {
        match self.try_search(query).await {
            Ok(tracks) => Some(tracks),
            Err(e) => {
                tracing::warn!(keyword = %query.keyword(), error = %e, "search failed");
                None
            }
        }
    }

    /// Search with the failure class preserved
    ///
    /// # Returns
    /// Validated tracks in upstream ranking order. Errors cover transport
    /// failures, non-200 answers, and unparseable envelopes; individual
    /// dead candidate links are filtered out, not reported.
    pub async fn try_search(&self, query: &SearchQuery) -> Result<Vec<Track>> {
        let response = self
            .backend
            .post_form(query::SEARCH_ENDPOINT, query::search_headers(), &query.form_params())
            .await?;

        if !response.is_success() {
            return Err(CatMusicError::unexpected_status(
                response.status,
                query::SEARCH_ENDPOINT,
            ));
        }

        let candidates = parser::parse_candidates(&response.body)?;
        tracing::debug!(keyword = %query.keyword(), candidates = candidates.len(), "parsed search response");

        // Probe every link at once; join_all keeps issue order, so the
        // upstream ranking survives whatever order the probes finish in.
        let probes = candidates.into_iter().map(|track| self.validator.validate(track));
        let tracks = join_all(probes).await.into_iter().flatten().collect();

        Ok(tracks)
    }
}

// ===== TESTS =====
