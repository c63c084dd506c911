// CatMusic - music search and download for the desktop
// Copyright (C) 2025 CatMusic contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Music search pipeline
//!
//! Query construction, response parsing, and link validation for the
//! musicjx.com catalog.

pub mod parser;
pub mod query;
pub mod service;
pub mod validator;

pub use parser::{Track, UNKNOWN_AUTHOR, UNKNOWN_TITLE};
pub use query::{SearchQuery, BROWSER_USER_AGENT, CATALOG_TYPE, SERVICE_ORIGIN};
pub use service::SearchService;
pub use validator::{LinkValidator, PROBE_TIMEOUT};
