// CatMusic - music search and download for the desktop
// Copyright (C) 2025 CatMusic contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Batch download runner
//!
//! Runs tasks one at a time in submission order and reports whole-batch
//! percentage progress after each task. A failed task never stops the
//! batch; the tally at the end accounts for every submitted task.

use crate::download::service::DownloadService;
use crate::download::task::{BatchResult, DownloadTask};
use crate::http::HttpBackend;

/// Sequential batch runner over a [`DownloadService`]
pub struct BatchDownloadCoordinator<B: HttpBackend> {
    service: DownloadService<B>,
}

impl<B: HttpBackend> BatchDownloadCoordinator<B> {
    pub fn new(service: DownloadService<B>) -> Self {
        Self { service }
    }

    /// Run every task to completion, in order
    ///
    /// `on_progress` fires exactly once per task, after it finishes, with
    /// the floored whole-batch percentage; the final call always reports
    /// 100. An empty batch returns immediately without firing it at all.
    ///
    /// # Returns
    /// Tally with `success_count + failure_count == tasks.len()`.
    pub async fn run_batch<F>(&self, tasks: &[DownloadTask], mut on_progress: F) -> BatchResult
    where
        F: FnMut(u8),
    {
        let total = tasks.len();
        let mut result = BatchResult::default();

        tracing::info!(total, "starting batch download");
        for (index, task) in tasks.iter().enumerate() {
            if self.service.download_one(task).await {
                result.success_count += 1;
            } else {
                result.failure_count += 1;
            }
            // integer division floors: task 1 of 3 reports 33, not 34
            on_progress(((index + 1) * 100 / total) as u8);
        }
        tracing::info!(
            succeeded = result.success_count,
            failed = result.failure_count,
            "batch complete"
        );

        result
    }
}

// ===== TESTS =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use std::sync::Arc;

    fn coordinator(backend: FakeBackend) -> BatchDownloadCoordinator<FakeBackend> {
        BatchDownloadCoordinator::new(DownloadService::with_backend(Arc::new(backend)))
    }

    fn tasks_in(dir: &std::path::Path, names: &[&str]) -> Vec<DownloadTask> {
        names
            .iter()
            .map(|n| DownloadTask::new(format!("http://x/{n}.mp3"), format!("{n}.mp3"), dir))
            .collect()
    }

    #[tokio::test]
    async fn empty_batch_finishes_without_progress() {
        let c = coordinator(FakeBackend::new());
        let mut seen = Vec::new();

        let result = c.run_batch(&[], |p| seen.push(p)).await;

        assert_eq!(result, BatchResult::default());
        assert!(seen.is_empty());
    }

    #[tokio::test]
    async fn failed_task_is_counted_and_the_batch_continues() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = FakeBackend::new()
            .with_response("/b.mp3", CannedResponse::status(404))
            .with_default(CannedResponse::ok_audio(b"x"));
        let c = coordinator(backend.clone());
        let tasks = tasks_in(tmp.path(), &["a", "b", "c"]);

        let mut seen = Vec::new();
        let result = c.run_batch(&tasks, |p| seen.push(p)).await;

        assert_eq!(result.success_count, 2);
        assert_eq!(result.failure_count, 1);
        assert_eq!(result.total(), tasks.len());
        // floored thirds
        assert_eq!(seen, vec![33, 66, 100]);
        // the failed middle task did not stop task c from running
        assert_eq!(
            backend.calls(),
            vec!["GET http://x/a.mp3", "GET http://x/b.mp3", "GET http://x/c.mp3"]
        );
    }

    #[tokio::test]
    async fn progress_fires_once_per_task_and_ends_at_100() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = FakeBackend::new().with_default(CannedResponse::ok_audio(b"x"));
        let c = coordinator(backend);
        let tasks = tasks_in(tmp.path(), &["a", "b", "c", "d"]);

        let mut seen = Vec::new();
        c.run_batch(&tasks, |p| seen.push(p)).await;

        assert_eq!(seen, vec![25, 50, 75, 100]);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn all_failures_still_visit_every_task() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = FakeBackend::new().with_transport_failure("http://x/");
        let c = coordinator(backend.clone());
        let tasks = tasks_in(tmp.path(), &["a", "b", "c"]);

        let mut calls = 0;
        let result = c.run_batch(&tasks, |_| calls += 1).await;

        assert_eq!(result.success_count, 0);
        assert_eq!(result.failure_count, 3);
        assert_eq!(calls, 3);
        assert_eq!(backend.call_count(), 3);
    }
}
