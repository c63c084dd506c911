// CatMusic - music search and download for the desktop
// Copyright (C) 2025 CatMusic contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Download pipeline
//!
//! Single-file fetching plus the sequential batch runner the GUI drives.

pub mod batch;
pub mod service;
pub mod task;

pub use batch::BatchDownloadCoordinator;
pub use service::DownloadService;
pub use task::{sanitize_filename, BatchResult, DownloadTask};
