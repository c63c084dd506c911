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


//! Search response parsing
//!
//! The upstream answers with a JSON envelope whose `data` array holds the
//! result rows. The first row is a non-track header the site renders as a
//! banner, so it is always skipped. Absent or falsy title/author fields fall
//! back to the upstream's own "unknown" sentinels.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CatMusicError, Result};

/// Sentinel title for rows without a usable `title` field ("unknown song")
pub const UNKNOWN_TITLE: &str = "未知歌曲";

/// Sentinel author for rows without a usable `author` field ("unknown singer")
pub const UNKNOWN_AUTHOR: &str = "未知歌手";

/// One track from the search results
///
/// Parsed rows and validated rows share this shape; validation only filters
/// the list, it never rewrites a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub author: String,
    /// Direct media URL; may be empty, in which case validation rejects the
    /// track without probing it
    pub url: String,
}

impl Track {
    pub fn new<T, A, U>(title: T, author: A, url: U) -> Self
    where
        T: Into<String>,
        A: Into<String>,
        U: Into<String>,
    {
        Self {
            title: title.into(),
            author: author.into(),
            url: url.into(),
        }
    }
}

/// Parse a search response body into candidate tracks
///
/// A missing `data` field means "no results" and is not an error; a `data`
/// that is present but not an array is a malformed envelope. The first
/// `data` element is always skipped — the upstream prepends a header row
/// that is not a track. Every row after it produces a candidate, however
/// sparse.
pub(crate) fn parse_candidates(body: &[u8]) -> Result<Vec<Track>> {
    let envelope: Value = serde_json::from_slice(body)?;

    let Some(data) = envelope.get("data") else {
        return Ok(Vec::new());
    };
    let rows = data
        .as_array()
        .ok_or_else(|| CatMusicError::malformed("\"data\" is not an array"))?;

    Ok(rows.iter().skip(1).map(parse_row).collect())
}

fn parse_row(row: &Value) -> Track {
    Track {
        title: non_empty_string(row, "title").unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        author: non_empty_string(row, "author").unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        url: non_empty_string(row, "url").unwrap_or_default(),
    }
}

/// String field lookup treating absent, null, non-string, and empty values
/// as missing
fn non_empty_string(row: &Value, key: &str) -> Option<String> {
    row.get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
