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


//! Search request construction
//!
//! The upstream service is a single undocumented endpoint that answers JSON
//! only when the request looks like the site's own XHR traffic: browser
//! user agent, referer pinned to the service origin, and an
//! `x-requested-with` marker. Everything in this module is fixed except the
//! keyword.

use lazy_static::lazy_static;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, REFERER, USER_AGENT};

use crate::error::{CatMusicError, Result};

/// Origin of the upstream music service
pub const SERVICE_ORIGIN: &str = "https://musicjx.com/";

/// Search endpoint; the upstream serves search POSTs on its origin itself
pub const SEARCH_ENDPOINT: &str = SERVICE_ORIGIN;

/// Browser-style user agent the upstream expects
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";

/// Fixed catalog identifier in the search payload
pub const CATALOG_TYPE: &str = "netease";

/// Fixed filter field; the upstream matches on track name only
const SEARCH_FILTER: &str = "name";

/// Fixed page field; only the first result page is ever requested
const SEARCH_PAGE: &str = "1";

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(REFERER, HeaderValue::from_static(SERVICE_ORIGIN));
    headers.insert(
        HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static("XMLHttpRequest"),
    );
    headers
}

lazy_static! {
    static ref SEARCH_HEADERS: HeaderMap = browser_headers();
    static ref DOWNLOAD_HEADERS: HeaderMap = {
        let mut headers = browser_headers();
        headers.insert(
            HeaderName::from_static("upgrade-insecure-requests"),
            HeaderValue::from_static("1"),
        );
        headers
    };
}

/// Header set for search POSTs and validation HEADs
pub fn search_headers() -> &'static HeaderMap {
    &SEARCH_HEADERS
}

/// Header set for download GETs
///
/// Same as [`search_headers`] plus `upgrade-insecure-requests: 1`; some
/// media hosts answer plain-HTTP track URLs only when the client offers to
/// upgrade.
pub fn download_headers() -> &'static HeaderMap {
    &DOWNLOAD_HEADERS
}

/// One keyword search
///
/// Trimmed and non-empty by construction, so the search service never has
/// to re-validate the keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    keyword: String,
}

impl SearchQuery {
    /// Trim the keyword and reject it when nothing is left
    pub fn new(keyword: &str) -> Result<Self> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(CatMusicError::invalid_input("search keyword is empty"));
        }
        Ok(Self {
            keyword: keyword.to_string(),
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Form payload for the search POST
    pub fn form_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("input", self.keyword.clone()),
            ("filter", SEARCH_FILTER.to_string()),
            ("type", CATALOG_TYPE.to_string()),
            ("page", SEARCH_PAGE.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_is_trimmed() {
        let query = SearchQuery::new("  晴天  ").unwrap();
        assert_eq!(query.keyword(), "晴天");
    }

    #[test]
    fn empty_and_whitespace_keywords_are_rejected() {
        assert!(matches!(
            SearchQuery::new(""),
            Err(CatMusicError::InvalidInput(_))
        ));
        assert!(matches!(
            SearchQuery::new("   \t "),
            Err(CatMusicError::InvalidInput(_))
        ));
    }

    #[test]
    fn form_payload_is_fixed_except_keyword() {
        let query = SearchQuery::new("test").unwrap();
        assert_eq!(
            query.form_params(),
            vec![
                ("input", "test".to_string()),
                ("filter", "name".to_string()),
                ("type", "netease".to_string()),
                ("page", "1".to_string()),
            ]
        );
    }

    #[test]
    fn search_headers_mimic_site_xhr_traffic() {
        let headers = search_headers();
        assert_eq!(
            headers.get(USER_AGENT).unwrap().to_str().unwrap(),
            BROWSER_USER_AGENT
        );
        assert_eq!(
            headers.get(REFERER).unwrap().to_str().unwrap(),
            SERVICE_ORIGIN
        );
        assert_eq!(
            headers.get("x-requested-with").unwrap().to_str().unwrap(),
            "XMLHttpRequest"
        );
        assert!(headers.get("upgrade-insecure-requests").is_none());
    }

    #[test]
    fn download_headers_add_upgrade_marker() {
        let headers = download_headers();
        assert_eq!(
            headers
                .get("upgrade-insecure-requests")
                .unwrap()
                .to_str()
                .unwrap(),
            "1"
        );
        // downloads keep the browser identity too
        assert_eq!(
            headers.get(USER_AGENT).unwrap().to_str().unwrap(),
            BROWSER_USER_AGENT
        );
    }
}
