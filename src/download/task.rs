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


//! Download task construction
//!
//! A task pairs a media URL with the file it should land in. Tasks are
//! plain data so the GUI can build, reorder, and re-submit them freely.

use std::path::{Path, PathBuf};

use crate::search::parser::Track;

/// One file to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub url: String,
    /// Final file name inside `target_directory`
    pub filename: String,
    pub target_directory: PathBuf,
}

impl DownloadTask {
    pub fn new<U, F, D>(url: U, filename: F, target_directory: D) -> Self
    where
        U: Into<String>,
        F: Into<String>,
        D: Into<PathBuf>,
    {
        Self {
            url: url.into(),
            filename: filename.into(),
            target_directory: target_directory.into(),
        }
    }

    /// Build a task for a validated track, named `<title> - <author>.mp3`
    pub fn for_track<D: Into<PathBuf>>(track: &Track, target_directory: D) -> Self {
        let stem = sanitize_filename(&format!("{} - {}", track.title, track.author));
        Self::new(track.url.clone(), format!("{stem}.mp3"), target_directory)
    }

    /// Where the finished file will live
    pub fn target_path(&self) -> PathBuf {
        self.target_directory.join(&self.filename)
    }
}

/// Outcome tally for a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchResult {
    pub success_count: usize,
    pub failure_count: usize,
}

impl BatchResult {
    pub fn total(&self) -> usize {
        self.success_count + self.failure_count
    }
}

/// Make a track title usable as a file name
///
/// Track metadata arrives unfiltered from the catalog, so separators and
/// other characters that are invalid on common filesystems become `_`.
/// The original application wrote titles verbatim and let the OS reject
/// the bad ones; replacing is a deliberate behavior change.
pub fn sanitize_filename(name: &str) -> String {
    let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
    let cleaned: String = name
        .chars()
        .map(|c| {
            if invalid_chars.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    // Windows refuses names ending in a dot or a space
    let cleaned = cleaned.trim().trim_end_matches('.').trim_end();
    if cleaned.is_empty() {
        "track".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Extension helper for callers that already hold a full path
pub fn part_path(final_path: &Path) -> PathBuf {
    let mut name = final_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "download".to_string());
    name.push_str(".part");
    final_path.with_file_name(name)
}
