//! CatMusic core library
//!
//! Search, validate, and download pipeline for the musicjx.com music
//! catalog, plus the persisted settings behind it. The desktop GUI embeds
//! this crate and drives it through three seams:
//!
//! - [`search::SearchService`] turns a keyword into validated tracks
//! - [`download::BatchDownloadCoordinator`] fetches the user's selection
//!   sequentially with progress callbacks
//! - [`storage::SettingsStore`] remembers the download directory between
//!   runs
//!
//! Every service boundary collapses failures into the simple shapes the
//! GUI renders (`None` lists, `false` tasks); the typed error classes in
//! [`error`] stay available for callers that need to distinguish them.

pub mod download;
pub mod error;
pub mod http;
pub mod search;
pub mod storage;

pub use download::{BatchDownloadCoordinator, BatchResult, DownloadService, DownloadTask};
pub use error::{CatMusicError, Result};
pub use http::{HttpBackend, HttpResponse, ReqwestBackend};
pub use search::{LinkValidator, SearchQuery, SearchService, Track};
pub use storage::{Database, SettingsStore};
