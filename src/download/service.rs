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


//! Single-file download
//!
//! Fetches one media URL into its target file. The body is buffered and
//! written to a `.part` neighbor first, then renamed into place, so a
//! half-written file never sits at the final path. Expired links that
//! answer with an HTML error page are detected by content type and treated
//! as failures even when the status is 200.

use std::sync::Arc;

use crate::download::task::{part_path, DownloadTask};
use crate::error::{CatMusicError, Result};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::search::query;

/// Fetches single tracks to disk
pub struct DownloadService<B: HttpBackend> {
    backend: Arc<B>,
}

impl DownloadService<ReqwestBackend> {
    /// Create a service backed by a real HTTP client
    pub fn new() -> Result<Self> {
        Ok(Self::with_backend(Arc::new(ReqwestBackend::new()?)))
    }
}

impl<B: HttpBackend> DownloadService<B> {
    pub fn with_backend(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Download one task, reporting only success or failure
    ///
    /// This is the boundary the batch runner and the GUI consume; every
    /// failure class collapses to `false` after being logged.
    pub async fn download_one(&self, task: &DownloadTask) -> bool {
        match self.try_download(task).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(filename = %task.filename, url = %task.url, error = %e, "download failed");
                false
            }
        }
    }

    /// Download one task with the failure class preserved
    ///
    /// Creates the target directory if needed, fetches the URL with the
    /// browser header set, rejects HTML answers and non-200 statuses, and
    /// finishes with a write-then-rename so the final path only ever holds
    /// a complete file.
    pub async fn try_download(&self, task: &DownloadTask) -> Result<()> {
        tokio::fs::create_dir_all(&task.target_directory).await?;

        let response = self.backend.get(&task.url, query::download_headers()).await?;
        if response.is_html() {
            return Err(CatMusicError::html_content(&task.url));
        }
        if !response.is_success() {
            return Err(CatMusicError::unexpected_status(response.status, &task.url));
        }

        let final_path = task.target_path();
        let staging_path = part_path(&final_path);
        tokio::fs::write(&staging_path, &response.body).await?;
        tokio::fs::rename(&staging_path, &final_path).await?;

        tracing::debug!(path = %final_path.display(), bytes = response.body.len(), "download complete");
        Ok(())
    }
}

// ===== TESTS =====
